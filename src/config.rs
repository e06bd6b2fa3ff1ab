use log::{debug, warn};
use nalgebra::Vector3;
use serde::Deserialize;
use std::fmt;
use std::path::Path;

use crate::constants::{JulianDay, J2000};
use crate::navigator::ViewingMode;
use crate::navigator_errors::NavigatorError;
use crate::time::parse_preset_sky_time;

/// Startup gaze used when none is configured, or when the configured one is unusable
pub const DEFAULT_INIT_VIEW_POS: [f64; 3] = [1.0, 1e-05, 0.2];

/// Navigator configuration, read from a TOML document.
///
/// ```toml
/// [init_location]
/// location = "Paris, Paris, France"
///
/// [navigation]
/// viewing_mode = "horizon"          # or "equator"
/// init_view_pos = "1,1e-05,0.2"
/// preset_sky_time = 2451545.0       # julian day, or a date string
/// today_time = "22:00"
/// startup_time_mode = "actual"      # actual | preset | today
/// ```
///
/// Every key is optional.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub init_location: InitLocationConfig,
    pub navigation: NavigationConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InitLocationConfig {
    /// Small string of the startup location (`"name, state, country"`)
    pub location: String,
}

impl Default for InitLocationConfig {
    fn default() -> Self {
        InitLocationConfig {
            location: "Paris, Paris, France".to_string(),
        }
    }
}

/// Preset sky time, either an old style bare julian day or a date string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PresetSkyTime {
    JulianDay(f64),
    Date(String),
}

impl PresetSkyTime {
    /// The preset as a julian day, `None` when it cannot be understood
    pub fn jday(&self) -> Option<JulianDay> {
        match self {
            PresetSkyTime::JulianDay(jd) if jd.is_finite() => Some(*jd),
            PresetSkyTime::JulianDay(_) => None,
            PresetSkyTime::Date(date) => parse_preset_sky_time(date),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub viewing_mode: String,
    pub init_view_pos: String,
    pub preset_sky_time: PresetSkyTime,
    pub today_time: String,
    pub startup_time_mode: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        let [x, y, z] = DEFAULT_INIT_VIEW_POS;
        NavigationConfig {
            viewing_mode: ViewingMode::Horizon.to_string(),
            init_view_pos: format!("{x},{y},{z}"),
            preset_sky_time: PresetSkyTime::JulianDay(J2000),
            today_time: "22:00".to_string(),
            startup_time_mode: StartupTimeMode::Actual.to_string(),
        }
    }
}

/// Which instant the navigator starts at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartupTimeMode {
    /// The current real-world instant
    #[default]
    Actual,
    /// The configured preset sky time
    Preset,
    /// Today's date at the configured time of day
    Today,
}

impl StartupTimeMode {
    /// Case-insensitive parse; anything unknown is read as [`StartupTimeMode::Actual`].
    pub fn from_config_str(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "preset" => StartupTimeMode::Preset,
            "today" => StartupTimeMode::Today,
            "actual" | "now" => StartupTimeMode::Actual,
            other => {
                warn!("Unknown startup time mode \"{other}\", using the actual time");
                StartupTimeMode::Actual
            }
        }
    }
}

impl fmt::Display for StartupTimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StartupTimeMode::Actual => "actual",
            StartupTimeMode::Preset => "preset",
            StartupTimeMode::Today => "today",
        };
        write!(f, "{s}")
    }
}

/// Parse a direction written `"x,y,z"`.
///
/// Return
/// ------
/// * `None` unless there are exactly three finite components with a non-zero norm
pub fn parse_view_direction(value: &str) -> Option<Vector3<f64>> {
    let components = value
        .split(',')
        .map(|c| c.trim().parse::<f64>().ok())
        .collect::<Option<Vec<f64>>>()?;

    match components.as_slice() {
        [x, y, z] => {
            let v = Vector3::new(*x, *y, *z);
            (v.iter().all(|c| c.is_finite()) && v.norm() > 0.0).then_some(v)
        }
        _ => None,
    }
}

impl NavigationConfig {
    /// Errors
    /// ------
    /// * [`NavigatorError::InvalidViewingMode`] for anything other than `horizon` or `equator`.
    pub fn viewing_mode(&self) -> Result<ViewingMode, NavigatorError> {
        self.viewing_mode.parse()
    }

    /// Startup gaze in the local horizon frame, the default one when unparseable
    pub fn init_view_direction(&self) -> Vector3<f64> {
        parse_view_direction(&self.init_view_pos).unwrap_or_else(|| {
            warn!(
                "Invalid navigation/init_view_pos \"{}\", using the default direction",
                self.init_view_pos
            );
            Vector3::from(DEFAULT_INIT_VIEW_POS)
        })
    }

    pub fn preset_sky_jday(&self) -> Option<JulianDay> {
        self.preset_sky_time.jday()
    }

    pub fn startup_time_mode(&self) -> StartupTimeMode {
        StartupTimeMode::from_config_str(&self.startup_time_mode)
    }
}

impl Config {
    /// Read and validate a configuration file.
    ///
    /// Errors
    /// ------
    /// * [`NavigatorError::IoError`] if the file cannot be read
    /// * [`NavigatorError::ConfigParseError`] if it is not valid TOML for this schema
    /// * [`NavigatorError::InvalidViewingMode`] for an unknown viewing mode
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, NavigatorError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        debug!("Loading navigator configuration from {}", path.as_ref().display());
        Config::from_toml_str(&contents)
    }

    /// Parse and validate a configuration held in memory.
    pub fn from_toml_str(contents: &str) -> Result<Self, NavigatorError> {
        let config: Config = toml::from_str(contents)?;
        config.navigation.viewing_mode()?;
        Ok(config)
    }
}

#[cfg(test)]
mod config_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.init_location.location, "Paris, Paris, France");
        assert_eq!(config.navigation.viewing_mode().unwrap(), ViewingMode::Horizon);
        assert_eq!(
            config.navigation.init_view_direction(),
            Vector3::new(1.0, 1e-05, 0.2)
        );
        assert_eq!(config.navigation.preset_sky_jday(), Some(J2000));
        assert_eq!(config.navigation.today_time, "22:00");
        assert_eq!(
            config.navigation.startup_time_mode(),
            StartupTimeMode::Actual
        );

        // an empty document is the default configuration
        assert_eq!(Config::from_toml_str("").unwrap(), config);
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_toml_str(
            r#"
            [init_location]
            location = "Mauna Kea, Hawaii, United States"

            [navigation]
            viewing_mode = "equator"
            init_view_pos = "0, 1, 0.5"
            preset_sky_time = "2021-01-01T12:00:00"
            today_time = "05:30"
            startup_time_mode = "Preset"
            "#,
        )
        .unwrap();

        assert_eq!(config.init_location.location, "Mauna Kea, Hawaii, United States");
        let nav = &config.navigation;
        assert_eq!(nav.viewing_mode().unwrap(), ViewingMode::Equator);
        assert_eq!(nav.init_view_direction(), Vector3::new(0.0, 1.0, 0.5));
        assert_relative_eq!(nav.preset_sky_jday().unwrap(), 2459216.0, epsilon = 1e-9);
        assert_eq!(nav.startup_time_mode(), StartupTimeMode::Preset);
    }

    #[test]
    fn test_invalid_viewing_mode_fails_at_load() {
        let res = Config::from_toml_str("[navigation]\nviewing_mode = \"ecliptic\"");
        assert_eq!(
            res.unwrap_err(),
            NavigatorError::InvalidViewingMode("ecliptic".into())
        );
    }

    #[test]
    fn test_lenient_fields() {
        let config = Config::from_toml_str(
            r#"
            [navigation]
            init_view_pos = "1,2"
            preset_sky_time = "sometime"
            startup_time_mode = "tomorrow"
            "#,
        )
        .unwrap();

        let nav = &config.navigation;
        assert_eq!(nav.init_view_direction(), Vector3::from(DEFAULT_INIT_VIEW_POS));
        assert_eq!(nav.preset_sky_jday(), None);
        assert_eq!(nav.startup_time_mode(), StartupTimeMode::Actual);
    }

    #[test]
    fn test_preset_sky_time_as_string_number() {
        let config = Config::from_toml_str("[navigation]\npreset_sky_time = \"2451545.5\"").unwrap();
        assert_eq!(config.navigation.preset_sky_jday(), Some(2451545.5));
    }

    #[test]
    fn test_parse_view_direction() {
        assert_eq!(parse_view_direction("1,0,0"), Some(Vector3::x()));
        assert_eq!(parse_view_direction("0,0,0"), None);
        assert_eq!(parse_view_direction("1,0,0,0"), None);
        assert_eq!(parse_view_direction("a,b,c"), None);
        assert_eq!(parse_view_direction("inf,0,0"), None);
    }

    #[test]
    fn test_bad_toml() {
        let res = Config::from_toml_str("[navigation\nviewing_mode = 3");
        assert!(matches!(res, Err(NavigatorError::ConfigParseError(_))));

        let res = Config::load("/definitely/not/a/skynav/config.toml");
        assert!(matches!(res, Err(NavigatorError::IoError(_))));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join("skynav_config_test.toml");
        std::fs::write(&path, "[navigation]\ntoday_time = \"06:00\"\n").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.navigation.today_time, "06:00");
        std::fs::remove_file(&path).unwrap();
    }
}
