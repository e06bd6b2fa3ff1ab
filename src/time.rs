use hifitime::Epoch;
use log::warn;
use std::str::FromStr;

use crate::constants::{JulianDay, DPI, J2000, JDTOMJD, MJD, T2000};

/// Transformation from julian date (JD) to modified julian date (MJD)
pub fn jd_to_mjd(jd: JulianDay) -> MJD {
    jd - JDTOMJD
}

/// Current real-world instant as a UTC Julian day.
///
/// If the system clock cannot be read, a warning is logged and J2000.0 is returned.
pub fn jd_from_system() -> JulianDay {
    match Epoch::now() {
        Ok(now) => now.to_jde_utc_days(),
        Err(err) => {
            warn!("Unable to read the system clock ({err}), falling back to J2000.0");
            J2000
        }
    }
}

/// Transformation from a calendar date string to a UTC julian date.
///
/// Any format accepted by [`hifitime::Epoch::from_str`] is valid,
/// e.g. `"2021-01-01T00:00:00"` or `"2021-01-01T00:00:00 UTC"`.
///
/// Return
/// ------
/// * `None` if the string is not a recognised date
pub fn date_to_jd(date: &str) -> Option<JulianDay> {
    Epoch::from_str(date.trim())
        .ok()
        .map(|epoch| epoch.to_jde_utc_days())
}

/// Parse a preset sky time.
///
/// Old style presets are a bare julian day (`"2451545.0"`), newer ones are a human
/// readable date. The numeric form is tried first.
pub fn parse_preset_sky_time(value: &str) -> Option<JulianDay> {
    match f64::from_str(value.trim()) {
        Ok(jd) if jd.is_finite() => Some(jd),
        _ => date_to_jd(value),
    }
}

/// Parse a time of day in the format `HH:MM` or `HH:MM:SS`.
///
/// Return
/// ------
/// * the time of day as a fraction of a day in `[0, 1)`, or `None` if invalid
pub fn parse_time_of_day(value: &str) -> Option<f64> {
    let parts: Vec<&str> = value.trim().split(':').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return None;
    }

    let hour = u32::from_str(parts[0]).ok()?;
    let minute = u32::from_str(parts[1]).ok()?;
    let second = match parts.get(2) {
        Some(s) => f64::from_str(s).ok()?,
        None => 0.0,
    };

    if hour > 23 || minute > 59 || !(0.0..60.0).contains(&second) {
        return None;
    }

    Some((hour as f64 * 3600.0 + minute as f64 * 60.0 + second) / 86_400.0)
}

/// Julian day of the given time of day on the UTC calendar date containing `jd`.
///
/// Julian days start at noon, so the civil midnight preceding `jd` is `floor(jd - 0.5) + 0.5`.
pub fn jd_at_time_of_day(jd: JulianDay, day_fraction: f64) -> JulianDay {
    (jd - 0.5).floor() + 0.5 + day_fraction
}

/// Compute the Greenwich Mean Sidereal Time (GMST) in radians
/// for a given Modified Julian Date (UT1 time scale).
///
/// This function implements the IAU 1982/2000 polynomial formula
/// for the mean sidereal time at 0h UT1, plus the fractional-day
/// correction term due to Earth's rotation rate.
///
/// # Arguments
/// * `tjm` - Modified Julian Date (MJD, UT1 time scale)
///
/// # Returns
/// * GMST angle in radians, normalized to the interval [0, 2π).
///
/// # References
/// * IAU 1982, IERS Conventions 1996/2000.
/// * Explanatory Supplement to the Astronomical Almanac (1992).
pub fn gmst(tjm: MJD) -> f64 {
    // Polynomial coefficients for GMST at 0h UT1 (in seconds)
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    // Ratio of sidereal day to solar day
    const RAP: f64 = 1.00273790934;

    let itjm = tjm.floor();
    let t = (itjm - T2000) / 36525.0;

    // GMST at 0h UT1, seconds converted to radians
    let mut gmst0 = ((C3 * t + C2) * t + C1) * t + C0;
    gmst0 *= DPI / 86400.0;

    // rotation accumulated during the fraction of the day
    let h = (tjm - itjm) * DPI;
    let gmst = gmst0 + h * RAP;

    gmst.rem_euclid(DPI)
}
