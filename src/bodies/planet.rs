use nalgebra::{Matrix3, Vector3};

use super::Body;
use crate::constants::{AstronomicalUnit, Degree, JulianDay, Kilometer, AU, J2000};
use crate::kepler::solve_kepler;
use crate::ref_system::{rotmt, Axis};
use crate::time::{gmst, jd_to_mjd};

/// How the prime meridian of a body advances with time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SiderealClock {
    /// Earth: Greenwich mean sidereal time (IAU 1982 polynomial)
    Greenwich,
    /// Uniform rotation: `offset` degrees at `epoch`, one turn per sidereal day
    Uniform { offset: Degree, epoch: JulianDay },
}

/// Orientation of the body equator with respect to the VSOP87 ecliptic.
///
/// The body equatorial frame is obtained from the ecliptic frame by tilting around the
/// equinox direction by `obliquity`, the equinox itself lying at ecliptic longitude
/// `equinox_longitude` and drifting by `precession_rate` degrees per day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationElements {
    /// Sidereal rotation period in solar days, `0` for a non-rotating body
    pub period: f64,
    pub clock: SiderealClock,
    pub obliquity: Degree,
    pub equinox_longitude: Degree,
    pub precession_rate: Degree,
    pub epoch: JulianDay,
}

impl RotationElements {
    /// A frame aligned with the VSOP87 ecliptic that never rotates
    pub fn fixed() -> Self {
        RotationElements {
            period: 0.0,
            clock: SiderealClock::Uniform {
                offset: 0.0,
                epoch: J2000,
            },
            obliquity: 0.0,
            equinox_longitude: 0.0,
            precession_rate: 0.0,
            epoch: J2000,
        }
    }
}

/// Mean heliocentric Keplerian elements, in the VSOP87 ecliptic frame.
///
/// Units
/// -----
/// * `semi_major_axis`: AU
/// * angles: degrees
/// * `mean_motion`: degrees per day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitElements {
    pub semi_major_axis: AstronomicalUnit,
    pub eccentricity: f64,
    pub inclination: Degree,
    pub ascending_node: Degree,
    pub perihelion_longitude: Degree,
    pub mean_longitude: Degree,
    pub mean_motion: Degree,
    pub epoch: JulianDay,
}

impl OrbitElements {
    /// Heliocentric position at `jd`, solving Kepler's equation on the mean anomaly.
    pub fn position(&self, jd: JulianDay) -> Vector3<f64> {
        let a = self.semi_major_axis;
        let e = self.eccentricity;

        let mean_anomaly = (self.mean_longitude - self.perihelion_longitude
            + self.mean_motion * (jd - self.epoch))
            .to_radians();
        let ecc_anomaly = solve_kepler(mean_anomaly, e);

        // position in the orbital plane, x toward the perihelion
        let in_plane = Vector3::new(
            a * (ecc_anomaly.cos() - e),
            a * (1.0 - e * e).sqrt() * ecc_anomaly.sin(),
            0.0,
        );

        let arg_perihelion = self.perihelion_longitude - self.ascending_node;
        let to_ecliptic = rotmt(self.ascending_node.to_radians(), Axis::Z)
            * rotmt(self.inclination.to_radians(), Axis::X)
            * rotmt(arg_perihelion.to_radians(), Axis::Z);

        to_ecliptic * in_plane
    }
}

/// A body with a Keplerian heliocentric orbit and a simple rotation model.
#[derive(Debug, Clone, PartialEq)]
pub struct Planet {
    name: String,
    radius: AstronomicalUnit,
    rotation: RotationElements,
    orbit: Option<OrbitElements>,
    solar_system_observer: bool,
}

impl Planet {
    /// Create a body at the heliocentric origin, with a fixed frame.
    ///
    /// Arguments
    /// ---------
    /// * `name`: English name
    /// * `radius`: equatorial radius in **kilometers**
    pub fn new(name: &str, radius: Kilometer) -> Self {
        Planet {
            name: name.to_string(),
            radius: radius / AU,
            rotation: RotationElements::fixed(),
            orbit: None,
            solar_system_observer: false,
        }
    }

    pub fn with_rotation(mut self, rotation: RotationElements) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_orbit(mut self, orbit: OrbitElements) -> Self {
        self.orbit = Some(orbit);
        self
    }

    /// Mark the body as the special non-rotating observer of the whole solar system
    pub fn as_solar_system_observer(mut self) -> Self {
        self.solar_system_observer = true;
        self
    }

    pub fn rotation(&self) -> &RotationElements {
        &self.rotation
    }

    pub fn orbit(&self) -> Option<&OrbitElements> {
        self.orbit.as_ref()
    }
}

impl Body for Planet {
    fn english_name(&self) -> &str {
        &self.name
    }

    fn radius(&self) -> AstronomicalUnit {
        self.radius
    }

    fn sidereal_day(&self) -> f64 {
        self.rotation.period
    }

    fn sidereal_time(&self, jd: JulianDay) -> Degree {
        match self.rotation.clock {
            SiderealClock::Greenwich => gmst(jd_to_mjd(jd)).to_degrees(),
            SiderealClock::Uniform { offset, epoch } => {
                if self.rotation.period == 0.0 {
                    return offset;
                }
                let rotations = (jd - epoch) / self.rotation.period;
                let remainder = rotations - rotations.floor();
                remainder * 360.0 + offset
            }
        }
    }

    fn rot_equatorial_to_vsop87(&self, jd: JulianDay) -> Matrix3<f64> {
        let rot = &self.rotation;
        let equinox = rot.equinox_longitude - rot.precession_rate * (jd - rot.epoch);
        rotmt(equinox.to_radians(), Axis::Z) * rotmt(-rot.obliquity.to_radians(), Axis::X)
    }

    fn heliocentric_ecliptic_pos(&self, jd: JulianDay) -> Vector3<f64> {
        self.orbit
            .map(|orbit| orbit.position(jd))
            .unwrap_or_else(Vector3::zeros)
    }

    fn is_solar_system_observer(&self) -> bool {
        self.solar_system_observer
    }
}
