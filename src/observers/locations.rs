use log::debug;
use serde::Deserialize;
use std::collections::HashMap;

use super::location::Location;
use crate::constants::SOLAR_SYSTEM_OBSERVER;
use crate::navigator_errors::NavigatorError;

/// Resolve a location from its small string (`"name, state, country"`).
///
/// The navigator only depends on this trait, so hosts can plug their own location
/// database in place of [`LocationCatalog`].
pub trait LocationResolver: Send + Sync {
    /// Find the location registered under `small_string`.
    ///
    /// Errors
    /// ------
    /// * [`NavigatorError::UnknownLocation`] when nothing matches.
    fn location_for_small_string(&self, small_string: &str) -> Result<Location, NavigatorError>;
}

/// In-memory location database keyed by small string.
#[derive(Debug, Clone, Default)]
pub struct LocationCatalog {
    locations: HashMap<String, Location>,
}

#[derive(Debug, Deserialize)]
struct LocationFile {
    #[serde(default)]
    location: Vec<Location>,
}

impl LocationCatalog {
    /// An empty catalog
    pub fn new() -> Self {
        LocationCatalog {
            locations: HashMap::new(),
        }
    }

    /// A catalog pre-filled with a handful of well known sites.
    pub fn with_default_sites() -> Self {
        let mut catalog = LocationCatalog::new();
        for loc in [
            Location::new("Earth", 2.3522, 48.8566, 35.0).with_labels("Paris", "Paris", "France"),
            Location::new("Earth", 0.0, 51.4769, 46.0).with_labels(
                "Greenwich",
                "Greater London",
                "United Kingdom",
            ),
            Location::new("Earth", -155.4681, 19.8207, 4205.0).with_labels(
                "Mauna Kea",
                "Hawaii",
                "United States",
            ),
            Location::new("Earth", -70.4042, -24.6272, 2635.0).with_labels(
                "Cerro Paranal",
                "Antofagasta",
                "Chile",
            ),
            Location::new("Mars", 137.4417, -4.5895, 0.0).with_labels("Gale Crater", "", ""),
            Location::new("Jupiter", 0.0, 0.0, 0.0).with_labels("Cloud tops", "", ""),
            Location::new(SOLAR_SYSTEM_OBSERVER, 0.0, 0.0, 0.0).with_labels(
                SOLAR_SYSTEM_OBSERVER,
                "",
                "",
            ),
        ] {
            catalog.insert(loc);
        }
        catalog
    }

    /// Parse additional locations from a TOML document made of `[[location]]` tables.
    ///
    /// ```toml
    /// [[location]]
    /// planet = "Earth"
    /// longitude = -17.8792
    /// latitude = 28.7606
    /// altitude = 2396.0
    /// name = "Roque de los Muchachos"
    /// state = "La Palma"
    /// country = "Spain"
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self, NavigatorError> {
        let file: LocationFile = toml::from_str(content)?;
        let mut catalog = LocationCatalog::new();
        for loc in file.location {
            catalog.insert(loc);
        }
        Ok(catalog)
    }

    /// Register a location under its small string, replacing any previous entry
    pub fn insert(&mut self, location: Location) {
        debug!("Registering location {}", location.to_small_string());
        self.locations.insert(location.to_small_string(), location);
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

impl LocationResolver for LocationCatalog {
    fn location_for_small_string(&self, small_string: &str) -> Result<Location, NavigatorError> {
        if let Some(loc) = self.locations.get(small_string) {
            return Ok(loc.clone());
        }

        // configuration files are hand written: ignore case and surrounding blanks
        let key = small_string.trim();
        self.locations
            .iter()
            .find(|(k, _)| k.trim().eq_ignore_ascii_case(key))
            .map(|(_, loc)| loc.clone())
            .ok_or_else(|| NavigatorError::UnknownLocation(small_string.to_string()))
    }
}
