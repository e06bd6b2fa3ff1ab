mod common;

use approx::assert_relative_eq;
use std::sync::Arc;

use skynav::bodies::solar_system::SolarSystem;
use skynav::config::{Config, StartupTimeMode};
use skynav::constants::{J2000, JD_DAY, JD_SECOND, MAX_JDAY, MIN_JDAY};
use skynav::navigator::Navigator;
use skynav::navigator_errors::NavigatorError;
use skynav::observers::location::Location;
use skynav::observers::locations::LocationCatalog;
use skynav::time::jd_from_system;

use common::{navigator, navigator_with};

fn build(config: &Config) -> Result<Navigator, NavigatorError> {
    Navigator::new(
        config,
        Arc::new(SolarSystem::with_default_bodies()),
        Arc::new(LocationCatalog::with_default_sites()),
    )
}

#[test]
fn test_step_keeps_instant_in_bounds() {
    let mut nav = navigator();

    nav.set_time_speed(1e9);
    nav.step(1.0);
    assert_eq!(nav.jday(), MAX_JDAY);
    nav.step(1.0);
    assert_eq!(nav.jday(), MAX_JDAY);

    nav.set_time_speed(-1e12);
    nav.step(0.5);
    assert_eq!(nav.jday(), MIN_JDAY);

    // the engine stays usable at the bounds
    assert!(nav.matrices().j2000_to_eye.iter().all(|c| c.is_finite()));
}

#[test]
fn test_non_finite_time_inputs_keep_engine_finite() {
    let mut nav = navigator();
    let finite = |nav: &Navigator| nav.matrices().j2000_to_eye.iter().all(|c| c.is_finite());

    nav.set_time_speed(f64::INFINITY);
    nav.step(0.0);
    assert_eq!(nav.time_speed(), 0.0);
    assert_eq!(nav.jday(), J2000);
    assert!(finite(&nav));

    nav.set_jday(f64::NAN);
    assert_eq!(nav.jday(), J2000);
    assert!(finite(&nav));

    // an infinite frame lands on a bound and leaves transitions alone
    nav.set_time_speed(JD_DAY);
    nav.move_observer_to_named("Gale Crater, , ", 10.0, 10.0).unwrap();
    nav.step(f64::INFINITY);
    assert_eq!(nav.jday(), MAX_JDAY);
    assert!(nav.observer().is_transitioning());
    assert!(finite(&nav));

    nav.step(f64::NAN);
    assert_eq!(nav.jday(), MAX_JDAY);
    assert!(finite(&nav));
}

#[test]
fn test_speed_ladder_round_trip() {
    let mut nav = navigator();
    for start in [0.0, JD_SECOND] {
        nav.set_time_speed(start);
        nav.increase_time_speed();
        nav.decrease_time_speed();
        assert_eq!(nav.time_speed(), start);
    }

    nav.set_time_speed(JD_SECOND);
    for _ in 0..3 {
        nav.increase_time_speed();
    }
    assert_relative_eq!(nav.time_speed(), 1000.0 * JD_SECOND, epsilon = 1e-15);
}

#[test]
fn test_step_moves_time_at_rate() {
    let mut nav = navigator();
    nav.set_time_speed(JD_DAY);
    nav.step(0.25);
    nav.step(0.25);
    assert_relative_eq!(nav.jday(), J2000 + 0.5, epsilon = 1e-9);
    assert_eq!(nav.elapsed(), 0.5);

    // negative deltas rewind the simulated time, not the elapsed clock
    nav.step(-0.5);
    assert_relative_eq!(nav.jday(), J2000, epsilon = 1e-9);
    assert_eq!(nav.elapsed(), 0.5);
}

#[test]
fn test_is_time_now() {
    let mut nav = navigator();
    assert!(!nav.is_time_now());
    nav.set_time_now();
    assert!(nav.is_time_now());
}

#[test]
fn test_startup_preset_time() {
    let config = Config::from_toml_str(
        r#"
        [navigation]
        preset_sky_time = 2451545.5
        startup_time_mode = "preset"
        "#,
    )
    .unwrap();

    let nav = build(&config).unwrap();
    assert_eq!(nav.startup_time_mode(), StartupTimeMode::Preset);
    assert_eq!(nav.preset_sky_time(), 2451545.5);
    assert_eq!(nav.jday(), 2451545.5);
}

#[test]
fn test_startup_preset_date_string() {
    let config = Config::from_toml_str(
        r#"
        [navigation]
        preset_sky_time = "2021-01-01T12:00:00"
        startup_time_mode = "preset"
        "#,
    )
    .unwrap();

    let nav = build(&config).unwrap();
    assert_relative_eq!(nav.jday(), 2459216.0, epsilon = 1e-9);
}

#[test]
fn test_startup_unparseable_preset_uses_now() {
    let config = Config::from_toml_str(
        r#"
        [navigation]
        preset_sky_time = "the day after tomorrow"
        startup_time_mode = "preset"
        "#,
    )
    .unwrap();

    let nav = build(&config).unwrap();
    assert!((nav.jday() - jd_from_system()).abs() < 10.0 * JD_SECOND);
}

#[test]
fn test_startup_today_time() {
    let config = Config::from_toml_str(
        r#"
        [navigation]
        today_time = "06:15"
        startup_time_mode = "today"
        "#,
    )
    .unwrap();

    let nav = build(&config).unwrap();
    assert_eq!(nav.init_today_time(), "06:15");
    let day_fraction = (nav.jday() - 0.5).rem_euclid(1.0);
    assert_relative_eq!(day_fraction, 6.25 / 24.0, epsilon = 1e-8);
    assert!((nav.jday() - jd_from_system()).abs() < 1.0);
}

#[test]
fn test_startup_actual_time() {
    let nav = build(&Config::default()).unwrap();
    assert!((nav.jday() - jd_from_system()).abs() < 10.0 * JD_SECOND);
}

#[test]
fn test_startup_failures() {
    let config = Config::from_toml_str(
        r#"
        [init_location]
        location = "Atlantis, , "
        "#,
    )
    .unwrap();
    assert_eq!(
        build(&config).err(),
        Some(NavigatorError::UnknownLocation("Atlantis, , ".into()))
    );

    let mut catalog = LocationCatalog::new();
    catalog.insert(Location::new("Vulcan", 0.0, 0.0, 0.0).with_labels("ShiKahr", "", ""));
    let config = Config::from_toml_str("[init_location]\nlocation = \"ShiKahr, , \"").unwrap();
    let res = Navigator::new(
        &config,
        Arc::new(SolarSystem::with_default_bodies()),
        Arc::new(catalog),
    );
    assert_eq!(res.err(), Some(NavigatorError::UnknownBody("Vulcan".into())));
}

#[test]
fn test_add_days() {
    let mut nav = navigator();
    nav.add_solar_days(1.5);
    assert_eq!(nav.jday(), J2000 + 1.5);

    nav.set_jday(J2000);
    nav.add_sidereal_days(1.0);
    assert_relative_eq!(nav.jday(), J2000 + 0.997_269_566_3, epsilon = 1e-9);

    // on Mars a sidereal day is longer than a solar day on Earth
    nav.move_observer_to_named("Gale Crater, , ", 0.0, 0.0).unwrap();
    nav.set_jday(J2000);
    nav.add_sidereal_days(1.0);
    assert!(nav.jday() - J2000 > 1.02);
}

#[test]
fn test_sky_turns_once_per_sidereal_day() {
    let mut nav = navigator_with(&Config::default());
    let j2000_dir = nalgebra::Vector3::new(0.2, 0.5, 0.8);

    let before = nav.j2000_to_altaz(&j2000_dir);
    nav.add_sidereal_days(1.0);
    let after = nav.j2000_to_altaz(&j2000_dir);
    assert_relative_eq!(before, after, epsilon = 1e-6);

    nav.add_solar_days(0.5);
    let half_day = nav.j2000_to_altaz(&j2000_dir);
    assert!((half_day - before).norm() > 0.1);
}
