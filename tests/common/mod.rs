#![allow(dead_code)]

use approx::assert_relative_eq;
use nalgebra::{Matrix4, Vector3};
use std::sync::Arc;

use skynav::bodies::solar_system::SolarSystem;
use skynav::config::Config;
use skynav::constants::J2000;
use skynav::navigator::Navigator;
use skynav::observers::locations::LocationCatalog;

/// Install a test logger once, ignoring repeated initialisation
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Navigator on the default bodies and sites, frozen at J2000.0
pub fn navigator_with(config: &Config) -> Navigator {
    init_logger();
    let mut nav = Navigator::new(
        config,
        Arc::new(SolarSystem::with_default_bodies()),
        Arc::new(LocationCatalog::with_default_sites()),
    )
    .unwrap();
    nav.set_jday(J2000);
    nav.set_time_speed(0.0);
    nav
}

pub fn navigator() -> Navigator {
    navigator_with(&Config::default())
}

/// Assert that the upper-left 3×3 block of `m` is a proper rotation
pub fn assert_rotation(m: &Matrix4<f64>, epsilon: f64) {
    let r = m.fixed_view::<3, 3>(0, 0);
    assert_relative_eq!(
        r * r.transpose(),
        nalgebra::Matrix3::identity(),
        epsilon = epsilon
    );
    assert_relative_eq!(r.determinant(), 1.0, epsilon = epsilon);
}

/// Assert that two direction vectors agree once normalised
pub fn assert_same_direction(a: &Vector3<f64>, b: &Vector3<f64>, epsilon: f64) {
    assert_relative_eq!(a.normalize(), b.normalize(), epsilon = epsilon);
}
