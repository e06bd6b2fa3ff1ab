//! # Body orientation providers
//!
//! A body (planet, moon, the Sun, or the special barycentric observer) tells the navigator
//! how its own frames sit in space at a given julian day:
//!
//! ```text
//! local horizon --(sidereal rotation, latitude)--> body equatorial
//! body equatorial --(axial tilt, equinox)--------> VSOP87 heliocentric ecliptic (orientation)
//! body center ------------------------------------> VSOP87 heliocentric ecliptic (position)
//! ```
//!
//! The navigator never looks bodies up through a global registry: it receives a
//! [`BodyProvider`] at construction and resolves each [`Location::planet`] through it.
//!
//! ## Units
//!
//! - Julian days (UTC) for every time argument.
//! - Positions and radii in **AU**.
//! - Sidereal day in **solar days**, sidereal time in **degrees**.

pub mod planet;
pub mod solar_system;

use nalgebra::{Matrix3, Vector3};
use std::fmt::Debug;
use std::sync::Arc;

use crate::constants::{AstronomicalUnit, Degree, JulianDay};
use crate::observers::location::Location;
use crate::ref_system::{rotmt, Axis};

/// Orientation and position of one body able to host an observer.
pub trait Body: Send + Sync + Debug {
    /// English name, also used as the body identifier in [`Location::planet`]
    fn english_name(&self) -> &str;

    /// Equatorial radius in AU
    fn radius(&self) -> AstronomicalUnit;

    /// Rotation period relative to the fixed stars, in solar days
    fn sidereal_day(&self) -> f64;

    /// Angle of the body prime meridian relative to its equinox, in degrees
    fn sidereal_time(&self, jd: JulianDay) -> Degree;

    /// Rotation from the body equatorial frame to the VSOP87 ecliptic frame
    fn rot_equatorial_to_vsop87(&self, jd: JulianDay) -> Matrix3<f64>;

    /// Position of the body center in the heliocentric VSOP87 ecliptic frame, in AU
    fn heliocentric_ecliptic_pos(&self, jd: JulianDay) -> Vector3<f64>;

    /// `true` for the non-rotating reference body placed at the solar system center
    fn is_solar_system_observer(&self) -> bool {
        false
    }

    /// Rotation from the local horizon frame at `location` to the body equatorial frame.
    ///
    /// The zenith is first tilted by the colatitude, then carried around the polar axis by
    /// the local sidereal time (body sidereal time plus the site longitude).
    fn rot_altaz_to_equatorial(&self, jd: JulianDay, location: &Location) -> Matrix3<f64> {
        rotmt(
            (self.sidereal_time(jd) + location.longitude).to_radians(),
            Axis::Z,
        ) * rotmt((90.0 - location.latitude).to_radians(), Axis::Y)
    }
}

/// Lookup of bodies by English name.
pub trait BodyProvider: Send + Sync {
    /// Find the body named `name`, or `None` when it is unknown.
    fn search_by_english_name(&self, name: &str) -> Option<Arc<dyn Body>>;
}

/// Two handles designate the same body when they share the same English name.
pub fn same_body(a: &dyn Body, b: &dyn Body) -> bool {
    a.english_name() == b.english_name()
}
