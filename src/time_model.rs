//! # Simulated time
//!
//! [`TimeModel`] holds the simulated instant (a fractional UTC Julian day) and the rate at
//! which it flows, in days of simulated time per real second.
//!
//! ## Bounds
//!
//! After every [`TimeModel::advance`] the instant is clamped, without error, to
//! `[MIN_JDAY, MAX_JDAY]` (roughly ±100 000 years). Direct setters do not clamp, the bound
//! is applied on the next advance.
//!
//! The instant and the speed are always finite. Setters log a warning and keep the previous
//! value when handed a NaN or an infinity. An advance whose product is infinite lands on the
//! nearest bound, one whose product is NaN (`0 * inf`, NaN delta) leaves the instant as is.
//!
//! ## Speed ladder
//!
//! [`TimeModel::increase_time_speed`] and [`TimeModel::decrease_time_speed`] walk a
//! logarithmic ladder anchored at one simulated second per real second (`JD_SECOND`):
//!
//! ```text
//!   ... -10u  -u   0   u   10u  100u ...
//!        <---- decrease | increase ---->
//! ```
//!
//! Zero is a rung of its own, so `increase` then `decrease` always comes back to the
//! starting speed when starting from `0` or `u`.

use log::{debug, warn};
use std::cell::Cell;

use crate::constants::{JulianDay, Seconds, JD_SECOND, MAX_JDAY, MIN_JDAY};
use crate::time::{jd_at_time_of_day, jd_from_system, parse_time_of_day};

/// Instant tolerance under which the cached `is_now` answer is reused
const IS_NOW_CACHE_TOLERANCE: f64 = JD_SECOND / 4.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct NowCheck {
    jday: JulianDay,
    is_now: bool,
}

/// Simulated instant and rate of flow.
#[derive(Debug, Clone)]
pub struct TimeModel {
    jday: JulianDay,
    time_speed: f64,
    now_check: Cell<Option<NowCheck>>,
}

/// A time model at the current real-world instant
impl Default for TimeModel {
    fn default() -> Self {
        TimeModel::new(jd_from_system())
    }
}

impl TimeModel {
    /// A time model frozen at `jday` flowing at real speed (`JD_SECOND` per second).
    pub fn new(jday: JulianDay) -> Self {
        TimeModel {
            jday,
            time_speed: JD_SECOND,
            now_check: Cell::new(None),
        }
    }

    /// Current simulated instant, UTC Julian day
    pub fn jday(&self) -> JulianDay {
        self.jday
    }

    /// Simulated days elapsed per real second
    pub fn time_speed(&self) -> f64 {
        self.time_speed
    }

    /// Non-finite instants are rejected, the previous one is kept
    pub fn set_jday(&mut self, jday: JulianDay) {
        if jday.is_finite() {
            self.jday = jday;
        } else {
            warn!("Rejected non-finite julian day {jday}, keeping {}", self.jday);
        }
    }

    /// Any finite value is accepted, including zero and negative rates
    pub fn set_time_speed(&mut self, time_speed: f64) {
        if time_speed.is_finite() {
            self.time_speed = time_speed;
        } else {
            warn!(
                "Rejected non-finite time speed {time_speed}, keeping {} days/s",
                self.time_speed
            );
        }
    }

    /// Move the instant forward by `time_speed * delta` and clamp it to the valid range.
    ///
    /// Arguments
    /// ---------
    /// * `delta`: real seconds elapsed since the previous advance
    pub fn advance(&mut self, delta: Seconds) {
        let next = self.jday + self.time_speed * delta;
        if next.is_nan() {
            warn!("Time step of {delta} s gives no valid instant, keeping JD {}", self.jday);
        } else {
            self.jday = next;
        }
        self.jday = self.jday.clamp(MIN_JDAY, MAX_JDAY);
    }

    /// Next rung of the speed ladder
    pub fn increase_time_speed(&mut self) {
        let unit = JD_SECOND;
        let s = self.time_speed;

        let next = if s >= unit {
            s * 10.0
        } else if s < -unit {
            s / 10.0
        } else if (0.0..unit).contains(&s) {
            unit
        } else {
            // [-unit, 0)
            0.0
        };
        self.set_time_speed(next);
        debug!("Time speed increased to {} days/s", self.time_speed);
    }

    /// Previous rung of the speed ladder
    pub fn decrease_time_speed(&mut self) {
        let unit = JD_SECOND;
        let s = self.time_speed;

        let next = if s > unit {
            s / 10.0
        } else if s <= -unit {
            s * 10.0
        } else if s > -unit && s <= 0.0 {
            -unit
        } else {
            // (0, unit]
            0.0
        };
        self.set_time_speed(next);
        debug!("Time speed decreased to {} days/s", self.time_speed);
    }

    /// Shift the instant by `days` solar days
    pub fn add_solar_days(&mut self, days: f64) {
        self.set_jday(self.jday + days);
    }

    /// Jump to the current real-world instant
    pub fn set_time_now(&mut self) {
        self.jday = jd_from_system();
    }

    /// Jump to today's UTC date at the time of day `hh_mm` (`"HH:MM"` or `"HH:MM:SS"`).
    ///
    /// An invalid time of day logs a warning and jumps to the current instant instead.
    pub fn set_today_time(&mut self, hh_mm: &str) {
        let now = jd_from_system();
        self.jday = match parse_time_of_day(hh_mm) {
            Some(fraction) => jd_at_time_of_day(now, fraction),
            None => {
                warn!("Invalid today time \"{hh_mm}\", using the current time instead");
                now
            }
        };
    }

    /// `true` when the simulated instant is within one second of the real-world clock.
    ///
    /// The answer is cached and reused as long as the instant moved by less than a quarter
    /// of a second since the last evaluation, so a paused clock keeps its last answer.
    pub fn is_now(&self) -> bool {
        self.is_now_with(jd_from_system)
    }

    /// Same as [`TimeModel::is_now`], reading the real-world instant from `system_jd`.
    pub fn is_now_with<F>(&self, system_jd: F) -> bool
    where
        F: FnOnce() -> JulianDay,
    {
        if let Some(check) = self.now_check.get() {
            if (self.jday - check.jday).abs() <= IS_NOW_CACHE_TOLERANCE {
                return check.is_now;
            }
        }

        let is_now = (self.jday - system_jd()).abs() < JD_SECOND;
        self.now_check.set(Some(NowCheck {
            jday: self.jday,
            is_now,
        }));
        is_now
    }
}
