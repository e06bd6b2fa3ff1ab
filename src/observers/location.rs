//! # Observer location
//!
//! A [`Location`] is an immutable geographic point tied to a named celestial body.
//! It carries no behavior beyond formatting: orientation and position queries are answered
//! by the [`Body`](crate::bodies::Body) named in [`Location::planet`].
//!
//! ## Small strings
//!
//! Locations are keyed by a compact `"name, region, country"` label (the *small string*),
//! which is what configuration files store. For example `"Paris, Paris, France"`.

use serde::Deserialize;
use std::fmt;

use crate::constants::{BodyId, Degree, Meter};

/// A geographic point on a given body.
///
/// Units
/// -----
/// * `longitude`: degrees, east positive.
/// * `latitude`: degrees, north positive.
/// * `altitude`: meters above the body surface.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Location {
    /// English name of the host body (e.g. `"Earth"`)
    pub planet: BodyId,

    /// Longitude in **degrees**, east positive
    pub longitude: Degree,

    /// Latitude in **degrees**, north positive
    pub latitude: Degree,

    /// Altitude above the body surface in **meters**
    #[serde(default)]
    pub altitude: Meter,

    /// Display name of the site
    #[serde(default)]
    pub name: String,

    /// State, province or region of the site
    #[serde(default)]
    pub state: String,

    /// Country of the site
    #[serde(default)]
    pub country: String,
}

impl Location {
    /// Create a new location on `planet`.
    ///
    /// The labels are left empty; use [`Location::with_labels`] to name it.
    pub fn new(planet: &str, longitude: Degree, latitude: Degree, altitude: Meter) -> Self {
        Location {
            planet: planet.to_string(),
            longitude,
            latitude,
            altitude,
            name: String::new(),
            state: String::new(),
            country: String::new(),
        }
    }

    /// Attach display labels to a location
    pub fn with_labels(mut self, name: &str, state: &str, country: &str) -> Self {
        self.name = name.to_string();
        self.state = state.to_string();
        self.country = country.to_string();
        self
    }

    /// Compact `"name, state, country"` label used as the catalog key
    pub fn to_small_string(&self) -> String {
        format!("{}, {}, {}", self.name, self.state, self.country)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] (lon {:.4}°, lat {:.4}°, alt {:.0} m)",
            self.to_small_string(),
            self.planet,
            self.longitude,
            self.latitude,
            self.altitude
        )
    }
}
