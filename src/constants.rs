//! # Constants and type definitions for skynav
//!
//! This module centralizes the **physical constants**, **time units**, and **common type
//! aliases** used throughout the navigation engine.
//!
//! ## Overview
//!
//! - Astronomical constants (AU, J2000 epoch, speed-of-time units)
//! - Unit conversions (days ↔ seconds)
//! - Safety bounds applied to the simulated Julian day
//! - Core type aliases used across the crate

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00 TT)
pub const T2000: f64 = 51544.5;

/// Julian day of J2000.0
pub const J2000: f64 = 2_451_545.0;

/// Conversion factor between Julian Date and Modified Julian Date
pub const JDTOMJD: f64 = 2400000.5;

// -------------------------------------------------------------------------------------------------
// Simulated time units, expressed in Julian days
// -------------------------------------------------------------------------------------------------

/// One second of simulated time, in days
pub const JD_SECOND: f64 = 1.0 / SECONDS_PER_DAY;

/// One hour of simulated time, in days
pub const JD_HOUR: f64 = 1.0 / 24.0;

/// One day of simulated time
pub const JD_DAY: f64 = 1.0;

/// Lowest Julian day the engine accepts (roughly year -100000)
pub const MIN_JDAY: f64 = -34_803_211.500012;

/// Highest Julian day the engine accepts (roughly year +100000)
pub const MAX_JDAY: f64 = 38_245_309.499988;

/// Obliquity of the ecliptic used to tie the J2000 equator to the VSOP87 ecliptic (degrees)
pub const J2000_OBLIQUITY_DEG: f64 = 23.439_280_305_555_555_555_6;

/// Drift of the VSOP87 ecliptic pole with respect to the J2000 frame (degrees)
pub const VSOP87_POLE_DRIFT_DEG: f64 = 0.000_027_5;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Distance in meters
pub type Meter = f64;
/// Distance in astronomical units
pub type AstronomicalUnit = f64;
/// Julian day (fractional days)
pub type JulianDay = f64;
/// Modified Julian Date (days)
pub type MJD = f64;
/// Real (wall-clock) seconds fed to the engine by its driver
pub type Seconds = f64;

/// Identifier of a body able to host an observer (its English name, e.g. `"Earth"`)
pub type BodyId = String;

/// Name of the special non-rotating body sitting at the solar system barycenter
pub const SOLAR_SYSTEM_OBSERVER: &str = "Solar System Observer";
