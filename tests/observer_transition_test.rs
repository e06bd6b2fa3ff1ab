mod common;

use approx::assert_relative_eq;

use skynav::bodies::solar_system::SolarSystem;
use skynav::bodies::BodyProvider;
use skynav::navigator::SelectedObject;
use skynav::navigator_errors::NavigatorError;
use skynav::observers::location::Location;

use common::navigator;

fn elsewhere_on_earth() -> Location {
    Location::new("Earth", -70.4042, -24.6272, 2635.0).with_labels(
        "Cerro Paranal",
        "Antofagasta",
        "Chile",
    )
}

#[test]
fn test_zero_duration_relocation_is_immediate() {
    let mut nav = navigator();
    let target = elsewhere_on_earth();
    nav.move_observer_to(target.clone(), 0.0, 0.0).unwrap();

    assert_eq!(nav.current_location(), &target);
    assert!(!nav.observer().is_transitioning());
}

#[test]
fn test_timed_relocation() {
    let mut nav = navigator();
    nav.step(3.0);
    let source = nav.current_location().clone();
    let target = elsewhere_on_earth();

    nav.move_observer_to(target.clone(), 10.0, 0.0).unwrap();
    assert_eq!(nav.current_location(), &source);
    assert!(nav.observer().is_transitioning());

    nav.step(5.0);
    let mid = nav.current_location();
    assert_relative_eq!(mid.longitude, (source.longitude + target.longitude) / 2.0, epsilon = 1e-9);
    assert_relative_eq!(mid.latitude, (source.latitude + target.latitude) / 2.0, epsilon = 1e-9);
    assert_relative_eq!(mid.altitude, (source.altitude + target.altitude) / 2.0, epsilon = 1e-9);
    assert_eq!(mid.name, source.name);

    nav.step(5.0);
    assert_eq!(nav.current_location(), &target);
    assert!(!nav.observer().is_transitioning());
}

#[test]
fn test_planet_change_uses_its_own_duration() {
    let mut nav = navigator();

    // same body: duration 0 wins even though the planet change duration is long
    nav.move_observer_to(elsewhere_on_earth(), 0.0, 100.0).unwrap();
    assert!(!nav.observer().is_transitioning());

    nav.move_observer_to_named("Gale Crater, , ", 0.0, 4.0).unwrap();
    assert!(nav.observer().is_transitioning());
    assert_eq!(nav.home_planet().english_name(), "Earth");

    nav.step(2.0);
    assert_eq!(nav.observer().transition_ratio(), Some(0.5));
    assert_eq!(nav.home_planet().english_name(), "Earth");

    nav.step(2.0);
    assert_eq!(nav.home_planet().english_name(), "Mars");
    assert_eq!(nav.current_location().name, "Gale Crater");
}

#[test]
fn test_unknown_body_leaves_state_unchanged() {
    let mut nav = navigator();
    let before = nav.current_location().clone();
    let matrices = *nav.matrices();

    for (d, d_planet) in [(0.0, 0.0), (5.0, 5.0)] {
        let res = nav.move_observer_to(Location::new("Vulcan", 1.0, 2.0, 0.0), d, d_planet);
        assert_eq!(res, Err(NavigatorError::UnknownBody("Vulcan".into())));
        assert_eq!(nav.current_location(), &before);
        assert!(!nav.observer().is_transitioning());
        assert_eq!(nav.matrices(), &matrices);
    }
}

#[test]
fn test_unknown_location_leaves_state_unchanged() {
    let mut nav = navigator();
    let before = nav.current_location().clone();
    let res = nav.move_observer_to_named("Atlantis, , ", 0.0, 0.0);
    assert_eq!(res, Err(NavigatorError::UnknownLocation("Atlantis, , ".into())));
    assert_eq!(nav.current_location(), &before);
}

#[test]
fn test_selection_cleared_when_landing_on_it() {
    let system = SolarSystem::with_default_bodies();
    let mut nav = navigator();

    let mars = system.search_by_english_name("Mars").unwrap();
    nav.select_object(SelectedObject::Body(mars));
    nav.move_observer_to_named("Gale Crater, , ", 1.0, 1.0).unwrap();
    assert!(nav.selected_object().is_some());

    nav.step(1.0);
    assert_eq!(nav.home_planet().english_name(), "Mars");
    assert!(nav.selected_object().is_none());
}

#[test]
fn test_selection_kept_when_landing_elsewhere() {
    let system = SolarSystem::with_default_bodies();
    let mut nav = navigator();

    let jupiter = system.search_by_english_name("Jupiter").unwrap();
    nav.select_object(SelectedObject::Body(jupiter));
    nav.move_observer_to_named("Gale Crater, , ", 1.0, 1.0).unwrap();
    nav.step(1.0);

    assert!(matches!(
        nav.selected_object(),
        Some(SelectedObject::Body(body)) if body.english_name() == "Jupiter"
    ));

    // immediate relocations do not touch the selection
    nav.unselect();
    nav.select_object(SelectedObject::Other("M31".into()));
    nav.move_observer_to_named("Cloud tops, , ", 0.0, 0.0).unwrap();
    assert!(nav.selected_object().is_some());
}

#[test]
fn test_move_observer_to_selected() {
    let system = SolarSystem::with_default_bodies();
    let mut nav = navigator();
    let paris = nav.current_location().clone();

    assert_eq!(nav.move_observer_to_selected(0.0, 0.0), Ok(false));
    nav.select_object(SelectedObject::Other("Sirius".into()));
    assert_eq!(nav.move_observer_to_selected(0.0, 0.0), Ok(false));
    assert_eq!(nav.current_location(), &paris);

    let mars = system.search_by_english_name("Mars").unwrap();
    nav.select_object(SelectedObject::Body(mars));
    assert_eq!(nav.move_observer_to_selected(0.0, 0.0), Ok(true));

    let loc = nav.current_location();
    assert_eq!(loc.planet, "Mars");
    assert_eq!(loc.name, "-");
    assert_eq!(loc.state, "");
    assert_eq!(loc.country, paris.country);
    assert_eq!(loc.longitude, paris.longitude);
    assert_eq!(loc.latitude, paris.latitude);
}

#[test]
fn test_relocation_during_transition_departs_midway() {
    let mut nav = navigator();
    let paris = nav.current_location().clone();
    let target = elsewhere_on_earth();

    nav.move_observer_to(target.clone(), 10.0, 10.0).unwrap();
    nav.step(5.0);
    let midway = nav.current_location().clone();

    nav.move_observer_to(paris.clone(), 10.0, 10.0).unwrap();
    assert_eq!(nav.current_location(), &midway);

    nav.step(10.0);
    assert_eq!(nav.current_location(), &paris);
}

#[test]
fn test_transitions_run_on_real_time() {
    let mut nav = navigator();
    nav.set_time_speed(-1.0);
    nav.move_observer_to(elsewhere_on_earth(), 2.0, 2.0).unwrap();
    nav.step(2.0);
    assert!(!nav.observer().is_transitioning());
    assert_eq!(nav.current_location(), &elsewhere_on_earth());
}
