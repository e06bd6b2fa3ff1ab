//! # Observer state
//!
//! This module gathers everything that describes **where** the simulated viewer stands:
//!
//! - [`Location`](crate::observers::location::Location): an immutable geographic point on a
//!   named body.
//! - [`LocationResolver`](crate::observers::locations::LocationResolver) and its in-memory
//!   implementation [`LocationCatalog`](crate::observers::locations::LocationCatalog).
//! - [`Observer`]: the observer state machine, a sum type over
//!   [`Stationary`](Observer::Stationary) and [`Transitioning`](Observer::Transitioning).
//!
//! ## Lifecycle
//!
//! ```text
//!                 move_observer_to(d <= 0)
//!   Stationary(A) -----------------------------> Stationary(B)
//!        |
//!        | move_observer_to(d > 0)
//!        v
//!   Transitioning(A -> B) --ratio reaches 1--> Stationary(B)
//! ```
//!
//! An observer is never mutated into another variant: the owner replaces the whole value,
//! either on relocation or when [`Observer::is_observer_life_over`] reports that a
//! transition reached its destination ([`Observer::next_observer`]).
//!
//! ## Interpolation
//!
//! While transitioning, longitude, latitude and altitude move linearly with
//! `ratio = clamp((now - start) / duration, 0, 1)`. The body (and thus every orientation
//! and position query) and the display labels stay those of the departure until the ratio
//! reaches 1, then snap to the arrival.
//!
//! ## Units
//!
//! - `now`, `start`, `duration`: real seconds of the engine elapsed clock.
//! - Distances returned by the queries: **AU**.

pub mod location;
pub mod locations;

use log::debug;
use nalgebra::{Matrix3, Vector3};
use std::sync::Arc;

use crate::bodies::{Body, BodyProvider};
use crate::constants::{AstronomicalUnit, JulianDay, Seconds, AU};
use crate::navigator_errors::NavigatorError;
use location::Location;

/// An observer standing still at one location.
#[derive(Debug, Clone)]
pub struct StationaryObserver {
    location: Location,
    planet: Arc<dyn Body>,
}

impl StationaryObserver {
    /// Build a stationary observer, resolving the host body through `bodies`.
    ///
    /// Errors
    /// ------
    /// * [`NavigatorError::UnknownBody`] if `location.planet` is not known by the provider.
    pub fn new(location: Location, bodies: &dyn BodyProvider) -> Result<Self, NavigatorError> {
        let planet = bodies
            .search_by_english_name(&location.planet)
            .ok_or_else(|| NavigatorError::UnknownBody(location.planet.clone()))?;
        Ok(StationaryObserver { location, planet })
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn planet(&self) -> &Arc<dyn Body> {
        &self.planet
    }
}

/// An observer travelling from one location to another over a fixed duration.
#[derive(Debug, Clone)]
pub struct TransitioningObserver {
    departure: StationaryObserver,
    arrival: StationaryObserver,
    start: Seconds,
    duration: Seconds,
    ratio: f64,
    current: Location,
}

impl TransitioningObserver {
    fn new(
        departure: StationaryObserver,
        arrival: StationaryObserver,
        start: Seconds,
        duration: Seconds,
    ) -> Self {
        let current = departure.location.clone();
        let mut transition = TransitioningObserver {
            departure,
            arrival,
            start,
            duration,
            ratio: 0.0,
            current,
        };
        transition.update(start);
        transition
    }

    /// Fraction of the trip already travelled, in [0, 1]
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn departure(&self) -> &Location {
        &self.departure.location
    }

    pub fn arrival(&self) -> &Location {
        &self.arrival.location
    }

    fn update(&mut self, now: Seconds) {
        let ratio = if self.duration > 0.0 {
            ((now - self.start) / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        };
        // the ratio never goes back, even if the caller's clock does
        self.ratio = self.ratio.max(ratio);
        self.current = self.interpolate();
    }

    fn interpolate(&self) -> Location {
        if self.ratio >= 1.0 {
            return self.arrival.location.clone();
        }

        let from = &self.departure.location;
        let to = &self.arrival.location;
        let r = self.ratio;

        Location {
            longitude: from.longitude - r * (from.longitude - to.longitude),
            latitude: from.latitude - r * (from.latitude - to.latitude),
            altitude: from.altitude - r * (from.altitude - to.altitude),
            ..from.clone()
        }
    }

    /// Body context: the departure's until arrival, no blending in between
    fn home(&self) -> &StationaryObserver {
        if self.ratio >= 1.0 {
            &self.arrival
        } else {
            &self.departure
        }
    }
}

/// Where the viewer currently is.
///
/// Both variants answer the same queries, so callers never branch on the active one.
#[derive(Debug, Clone)]
pub enum Observer {
    Stationary(StationaryObserver),
    Transitioning(TransitioningObserver),
}

impl Observer {
    /// A stationary observer at `location`.
    ///
    /// Errors
    /// ------
    /// * [`NavigatorError::UnknownBody`] if the location body is unknown.
    pub fn new(location: Location, bodies: &dyn BodyProvider) -> Result<Self, NavigatorError> {
        Ok(Observer::Stationary(StationaryObserver::new(
            location, bodies,
        )?))
    }

    /// Start a trip from the current position of `self` to `target`.
    ///
    /// The departure keeps the current home body handle, so a trip started in the middle of
    /// another one departs from the interpolated point on the held body.
    ///
    /// Arguments
    /// ---------
    /// * `target`: destination
    /// * `start`: elapsed-clock time of departure, in seconds
    /// * `duration`: trip duration in seconds, expected to be positive
    /// * `bodies`: provider used to resolve the destination body
    ///
    /// Errors
    /// ------
    /// * [`NavigatorError::UnknownBody`] if the destination body is unknown.
    pub fn transition_to(
        &self,
        target: Location,
        start: Seconds,
        duration: Seconds,
        bodies: &dyn BodyProvider,
    ) -> Result<Observer, NavigatorError> {
        let arrival = StationaryObserver::new(target, bodies)?;
        let departure = StationaryObserver {
            location: self.current_location().clone(),
            planet: self.home_planet().clone(),
        };
        debug!(
            "Observer transition from {} to {} over {duration} s",
            departure.location, arrival.location
        );
        Ok(Observer::Transitioning(TransitioningObserver::new(
            departure, arrival, start, duration,
        )))
    }

    /// Body the observer currently stands on
    pub fn home_planet(&self) -> &Arc<dyn Body> {
        match self {
            Observer::Stationary(obs) => &obs.planet,
            Observer::Transitioning(obs) => &obs.home().planet,
        }
    }

    /// Current (possibly interpolated) location
    pub fn current_location(&self) -> &Location {
        match self {
            Observer::Stationary(obs) => &obs.location,
            Observer::Transitioning(obs) => &obs.current,
        }
    }

    /// Rotation from the local horizon frame to the home body equatorial frame
    pub fn rot_altaz_to_equatorial(&self, jd: JulianDay) -> Matrix3<f64> {
        self.home_planet()
            .rot_altaz_to_equatorial(jd, self.current_location())
    }

    /// Rotation from the home body equatorial frame to the VSOP87 ecliptic frame
    pub fn rot_equatorial_to_vsop87(&self, jd: JulianDay) -> Matrix3<f64> {
        self.home_planet().rot_equatorial_to_vsop87(jd)
    }

    /// Heliocentric VSOP87 position of the home body center, in AU
    pub fn center_vsop87_pos(&self, jd: JulianDay) -> Vector3<f64> {
        self.home_planet().heliocentric_ecliptic_pos(jd)
    }

    /// Distance from the home body center to the observer, in AU
    pub fn distance_from_center(&self) -> AstronomicalUnit {
        self.home_planet().radius() + self.current_location().altitude / (1000.0 * AU)
    }

    /// `true` once a transition reached its destination and must be replaced
    pub fn is_observer_life_over(&self) -> bool {
        match self {
            Observer::Stationary(_) => false,
            Observer::Transitioning(obs) => obs.ratio >= 1.0,
        }
    }

    /// The observer that replaces `self` once its life is over
    pub fn next_observer(&self) -> Observer {
        match self {
            Observer::Stationary(obs) => Observer::Stationary(obs.clone()),
            Observer::Transitioning(obs) => Observer::Stationary(obs.arrival.clone()),
        }
    }

    /// Advance a transition to the elapsed-clock time `now`
    pub fn update(&mut self, now: Seconds) {
        if let Observer::Transitioning(obs) = self {
            obs.update(now);
        }
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self, Observer::Transitioning(_))
    }

    /// Trip progress, `None` when stationary
    pub fn transition_ratio(&self) -> Option<f64> {
        match self {
            Observer::Stationary(_) => None,
            Observer::Transitioning(obs) => Some(obs.ratio),
        }
    }
}
