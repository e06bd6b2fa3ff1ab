use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

use super::planet::{OrbitElements, Planet, RotationElements, SiderealClock};
use super::{Body, BodyProvider};
use crate::constants::{J2000, SOLAR_SYSTEM_OBSERVER};

/// Registry of the bodies an observer can stand on.
///
/// The default content is a small set of bodies described by mean J2000 elements:
/// good to a fraction of a degree over a few centuries, which is all a sky view needs.
#[derive(Debug, Clone, Default)]
pub struct SolarSystem {
    bodies: HashMap<String, Arc<dyn Body>>,
}

impl SolarSystem {
    pub fn new() -> Self {
        SolarSystem {
            bodies: HashMap::new(),
        }
    }

    /// Register a body under its English name, replacing any previous one
    pub fn insert(&mut self, body: Arc<dyn Body>) {
        debug!("Registering body {}", body.english_name());
        self.bodies.insert(body.english_name().to_string(), body);
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Sun, Earth, Mars, Jupiter and the solar system observer.
    pub fn with_default_bodies() -> Self {
        let mut system = SolarSystem::new();

        let sun = Planet::new("Sun", 696_000.0).with_rotation(RotationElements {
            period: 25.38,
            clock: SiderealClock::Uniform {
                offset: 84.176,
                epoch: J2000,
            },
            obliquity: 7.25,
            equinox_longitude: 255.8,
            precession_rate: 0.0,
            epoch: J2000,
        });

        let earth = Planet::new("Earth", 6_378.137)
            .with_rotation(RotationElements {
                period: 0.997_269_566_3,
                clock: SiderealClock::Greenwich,
                obliquity: 23.439_280_305_555_555_555_6,
                equinox_longitude: 0.0,
                precession_rate: 0.0,
                epoch: J2000,
            })
            .with_orbit(OrbitElements {
                semi_major_axis: 1.000_002_61,
                eccentricity: 0.016_711_23,
                inclination: -0.000_015_31,
                ascending_node: 0.0,
                perihelion_longitude: 102.937_681_93,
                mean_longitude: 100.464_571_66,
                mean_motion: 0.985_609_112_5,
                epoch: J2000,
            });

        let mars = Planet::new("Mars", 3_396.19)
            .with_rotation(RotationElements {
                period: 1.025_956_76,
                clock: SiderealClock::Uniform {
                    offset: 176.630,
                    epoch: J2000,
                },
                obliquity: 26.72,
                equinox_longitude: 262.9,
                precession_rate: 0.0,
                epoch: J2000,
            })
            .with_orbit(OrbitElements {
                semi_major_axis: 1.523_710_34,
                eccentricity: 0.093_394_10,
                inclination: 1.849_691_42,
                ascending_node: 49.559_538_91,
                perihelion_longitude: -23.943_629_59,
                mean_longitude: -4.553_432_05,
                mean_motion: 0.524_020_68,
                epoch: J2000,
            });

        let jupiter = Planet::new("Jupiter", 71_492.0)
            .with_rotation(RotationElements {
                period: 0.413_54,
                clock: SiderealClock::Uniform {
                    offset: 284.95,
                    epoch: J2000,
                },
                obliquity: 2.22,
                equinox_longitude: 158.0,
                precession_rate: 0.0,
                epoch: J2000,
            })
            .with_orbit(OrbitElements {
                semi_major_axis: 5.202_887_00,
                eccentricity: 0.048_386_24,
                inclination: 1.304_396_95,
                ascending_node: 100.473_909_09,
                perihelion_longitude: 14.728_479_83,
                mean_longitude: 34.396_440_51,
                mean_motion: 0.083_085_29,
                epoch: J2000,
            });

        let observer = Planet::new(SOLAR_SYSTEM_OBSERVER, 0.0).as_solar_system_observer();

        for body in [sun, earth, mars, jupiter, observer] {
            system.insert(Arc::new(body));
        }
        system
    }
}

impl BodyProvider for SolarSystem {
    fn search_by_english_name(&self, name: &str) -> Option<Arc<dyn Body>> {
        self.bodies.get(name).cloned()
    }
}

#[cfg(test)]
mod solar_system_test {
    use super::*;
    use crate::constants::VSOP87_POLE_DRIFT_DEG;
    use crate::ref_system::{cartesian_to_spherical, rotate, rotmt, Axis, MAT_VSOP87_TO_J2000};
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    #[test]
    fn test_default_bodies() {
        let system = SolarSystem::with_default_bodies();
        assert_eq!(system.len(), 5);
        for name in ["Sun", "Earth", "Mars", "Jupiter", SOLAR_SYSTEM_OBSERVER] {
            let body = system.search_by_english_name(name).unwrap();
            assert_eq!(body.english_name(), name);
        }
        assert!(system.search_by_english_name("Vulcan").is_none());
    }

    #[test]
    fn test_earth_at_j2000() {
        let system = SolarSystem::with_default_bodies();
        let earth = system.search_by_english_name("Earth").unwrap();

        // early January: close to perihelion, the Sun seen at longitude ~280°
        let pos = earth.heliocentric_ecliptic_pos(J2000);
        assert_relative_eq!(pos.norm(), 0.9833, epsilon = 1e-3);
        let (lon, lat) = cartesian_to_spherical(&pos);
        assert!((99.0..102.0).contains(&lon.to_degrees()), "lon = {}", lon.to_degrees());
        assert!(lat.abs() < 1e-6);

        // six months later, near aphelion
        let pos = earth.heliocentric_ecliptic_pos(J2000 + 182.6);
        assert_relative_eq!(pos.norm(), 1.0167, epsilon = 1e-3);
    }

    #[test]
    fn test_earth_equator_is_j2000_equator() {
        let system = SolarSystem::with_default_bodies();
        let earth = system.search_by_english_name("Earth").unwrap();

        let equ_to_vsop = earth.rot_equatorial_to_vsop87(J2000).to_homogeneous();
        let equ_to_j2000 = *MAT_VSOP87_TO_J2000 * equ_to_vsop;
        let pole = rotate(&equ_to_j2000, &Vector3::z());
        assert_relative_eq!(pole, Vector3::z(), epsilon = 1e-14);

        // not quite the identity: the VSOP87 pole drift remains as a spin about the pole
        let drift = rotmt(-VSOP87_POLE_DRIFT_DEG.to_radians(), Axis::Z).to_homogeneous();
        assert_relative_eq!(equ_to_j2000, drift, epsilon = 1e-14);
        let x = rotate(&equ_to_j2000, &Vector3::x());
        assert_relative_eq!(x.y.atan2(x.x).to_degrees(), -VSOP87_POLE_DRIFT_DEG, epsilon = 1e-12);
    }

    #[test]
    fn test_sun_and_observer_sit_at_origin() {
        let system = SolarSystem::with_default_bodies();
        for name in ["Sun", SOLAR_SYSTEM_OBSERVER] {
            let body = system.search_by_english_name(name).unwrap();
            assert_eq!(body.heliocentric_ecliptic_pos(J2000 + 1000.0), Vector3::zeros());
        }
        let observer = system.search_by_english_name(SOLAR_SYSTEM_OBSERVER).unwrap();
        assert!(observer.is_solar_system_observer());
        assert_eq!(observer.radius(), 0.0);
    }

    #[test]
    fn test_mars_distance_range() {
        let system = SolarSystem::with_default_bodies();
        let mars = system.search_by_english_name("Mars").unwrap();
        for k in 0..20 {
            let r = mars.heliocentric_ecliptic_pos(J2000 + 40.0 * k as f64).norm();
            assert!((1.38..1.67).contains(&r), "r = {r}");
        }
    }
}
