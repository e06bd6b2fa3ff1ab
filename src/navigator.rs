//! # Navigator
//!
//! The [`Navigator`] is the reference-frame and time-navigation engine. It owns the
//! simulated clock ([`TimeModel`]), the [`Observer`] state and three gaze vectors, and
//! keeps a set of homogeneous 4×4 matrices linking the frames a renderer needs:
//!
//! ```text
//!                       T(center)·tmp·T(0,0,d)
//!        AltAz  <-------------------------------------> Heliocentric ecliptic (VSOP87)
//!          |                                                    |
//!          | rot_altaz_to_equatorial(jd, location)              | VSOP87_TO_J2000
//!          v                                                    v
//!     Equatorial -- VSOP87_TO_J2000·rot_equatorial_to_vsop87 --> J2000
//!          |
//!          | AltAzToEye·EquatorialToAltAz
//!          v
//!         Eye
//! ```
//!
//! ## Stepping
//!
//! [`Navigator::step`] is meant to be called once per frame with the real seconds elapsed
//! since the previous call. It advances the simulated time, moves a travelling observer
//! forward, replaces it once it arrived, then recomputes every matrix and gaze vector.
//!
//! Every public mutator leaves the engine fully consistent: matrices and non-primary gaze
//! vectors always match the current time, observer and primary gaze.
//!
//! ## Transitions
//!
//! Trips between locations are timed on the engine *elapsed clock*, the running sum of the
//! deltas given to [`Navigator::step`]. A trip therefore completes in real time whatever the
//! simulated time rate is.
//!
//! ## Example
//!
//! ```rust, no_run
//! use std::sync::Arc;
//! use skynav::bodies::solar_system::SolarSystem;
//! use skynav::config::Config;
//! use skynav::navigator::Navigator;
//! use skynav::observers::locations::LocationCatalog;
//!
//! let mut nav = Navigator::new(
//!     &Config::default(),
//!     Arc::new(SolarSystem::with_default_bodies()),
//!     Arc::new(LocationCatalog::with_default_sites()),
//! )
//! .unwrap();
//!
//! nav.step(1.0 / 60.0);
//! let snapshot = nav.snapshot();
//! println!("{}", snapshot.matrices.j2000_to_eye);
//! ```

use log::{debug, info, warn};
use nalgebra::{Matrix4, Point3, Vector3};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::bodies::{same_body, Body, BodyProvider};
use crate::config::{Config, StartupTimeMode};
use crate::constants::{JulianDay, Radian, Seconds};
use crate::navigator_errors::NavigatorError;
use crate::observers::location::Location;
use crate::observers::locations::LocationResolver;
use crate::observers::Observer;
use crate::ref_system::{rotate, translation, RefFrame, MAT_J2000_TO_VSOP87, MAT_VSOP87_TO_J2000};
use crate::time::jd_from_system;
use crate::time_model::TimeModel;

/// How the eye frame is kept upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewingMode {
    /// The horizon stays level
    #[default]
    Horizon,
    /// The celestial north stays up
    Equator,
}

impl FromStr for ViewingMode {
    type Err = NavigatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "horizon" => Ok(ViewingMode::Horizon),
            "equator" => Ok(ViewingMode::Equator),
            other => Err(NavigatorError::InvalidViewingMode(other.to_string())),
        }
    }
}

impl fmt::Display for ViewingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewingMode::Horizon => write!(f, "horizon"),
            ViewingMode::Equator => write!(f, "equator"),
        }
    }
}

/// The object currently selected by the user.
#[derive(Debug, Clone)]
pub enum SelectedObject {
    /// A body an observer can stand on
    Body(Arc<dyn Body>),
    /// Any other sky object, identified by name
    Other(String),
}

/// Frame in which the authoritative gaze vector was last given
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisionFrame {
    Local,
    Equatorial,
    J2000,
}

/// Every transform maintained by the navigator.
///
/// All matrices are homogeneous 4×4 matrices acting on column vectors. The rotations are
/// orthonormal, the heliocentric ones also carry a translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMatrices {
    pub altaz_to_equ: Matrix4<f64>,
    pub equ_to_altaz: Matrix4<f64>,
    pub equ_to_j2000: Matrix4<f64>,
    pub j2000_to_equ: Matrix4<f64>,
    pub j2000_to_altaz: Matrix4<f64>,
    pub helio_to_equ: Matrix4<f64>,
    pub altaz_to_helio: Matrix4<f64>,
    pub helio_to_altaz: Matrix4<f64>,
    pub altaz_to_eye: Matrix4<f64>,
    pub equ_to_eye: Matrix4<f64>,
    pub helio_to_eye: Matrix4<f64>,
    pub j2000_to_eye: Matrix4<f64>,
}

impl Default for FrameMatrices {
    fn default() -> Self {
        let id = Matrix4::identity();
        FrameMatrices {
            altaz_to_equ: id,
            equ_to_altaz: id,
            equ_to_j2000: id,
            j2000_to_equ: id,
            j2000_to_altaz: id,
            helio_to_equ: id,
            altaz_to_helio: id,
            helio_to_altaz: id,
            altaz_to_eye: id,
            equ_to_eye: id,
            helio_to_eye: id,
            j2000_to_eye: id,
        }
    }
}

impl FrameMatrices {
    /// Transform from `frame` to the local horizon frame
    fn to_altaz(&self, frame: RefFrame) -> Matrix4<f64> {
        match frame {
            RefFrame::AltAz => Matrix4::identity(),
            RefFrame::Equatorial => self.equ_to_altaz,
            RefFrame::J2000 => self.j2000_to_altaz,
            RefFrame::HeliocentricEcliptic => self.helio_to_altaz,
            RefFrame::Eye => self.altaz_to_eye.transpose(),
        }
    }

    /// Transform from the local horizon frame to `frame`
    fn from_altaz(&self, frame: RefFrame) -> Matrix4<f64> {
        match frame {
            RefFrame::AltAz => Matrix4::identity(),
            RefFrame::Equatorial => self.altaz_to_equ,
            RefFrame::J2000 => self.j2000_to_altaz.transpose(),
            RefFrame::HeliocentricEcliptic => self.altaz_to_helio,
            RefFrame::Eye => self.altaz_to_eye,
        }
    }
}

/// Immutable copy of the navigator state at one instant.
///
/// A host running the renderer on another thread can publish this value instead of
/// sharing the navigator.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub jday: JulianDay,
    pub time_speed: f64,
    pub location: Location,
    pub viewing_mode: ViewingMode,
    pub local_vision: Vector3<f64>,
    pub equ_vision: Vector3<f64>,
    pub j2000_equ_vision: Vector3<f64>,
    pub matrices: FrameMatrices,
}

/// Reference-frame and time-navigation engine.
pub struct Navigator {
    time: TimeModel,
    observer: Observer,
    bodies: Arc<dyn BodyProvider>,
    locations: Arc<dyn LocationResolver>,

    /// Real seconds accumulated by `step`, clock of the observer transitions
    elapsed: Seconds,

    viewing_mode: ViewingMode,
    local_vision: Vector3<f64>,
    equ_vision: Vector3<f64>,
    j2000_equ_vision: Vector3<f64>,
    primary_vision: VisionFrame,

    matrices: FrameMatrices,
    selected: Option<SelectedObject>,

    default_location_id: String,
    init_view_pos: Vector3<f64>,
    preset_sky_time: JulianDay,
    init_today_time: String,
    startup_time_mode: StartupTimeMode,
}

impl Navigator {
    /// Build a navigator from its configuration.
    ///
    /// The startup location is resolved through `locations` and its body through `bodies`.
    /// The startup instant follows `navigation.startup_time_mode`.
    ///
    /// Errors
    /// ------
    /// * [`NavigatorError::UnknownLocation`] if the startup location is not known
    /// * [`NavigatorError::UnknownBody`] if its body is not known
    /// * [`NavigatorError::InvalidViewingMode`] if the configured mode is invalid
    pub fn new(
        config: &Config,
        bodies: Arc<dyn BodyProvider>,
        locations: Arc<dyn LocationResolver>,
    ) -> Result<Self, NavigatorError> {
        let nav_config = &config.navigation;
        let viewing_mode = nav_config.viewing_mode()?;

        let default_location_id = config.init_location.location.clone();
        let location = locations.location_for_small_string(&default_location_id)?;
        let observer = Observer::new(location, bodies.as_ref())?;

        let preset_sky_time = nav_config.preset_sky_jday().unwrap_or_else(|| {
            warn!(
                "Unable to read navigation/preset_sky_time {:?}, using the current time",
                nav_config.preset_sky_time
            );
            jd_from_system()
        });

        let init_view_pos = nav_config.init_view_direction();

        let mut nav = Navigator {
            time: TimeModel::default(),
            observer,
            bodies,
            locations,
            elapsed: 0.0,
            viewing_mode,
            local_vision: init_view_pos,
            equ_vision: Vector3::zeros(),
            j2000_equ_vision: Vector3::zeros(),
            primary_vision: VisionFrame::Local,
            matrices: FrameMatrices::default(),
            selected: None,
            default_location_id,
            init_view_pos,
            preset_sky_time,
            init_today_time: nav_config.today_time.clone(),
            startup_time_mode: nav_config.startup_time_mode(),
        };

        match nav.startup_time_mode {
            StartupTimeMode::Actual => {}
            StartupTimeMode::Preset => nav.time.set_jday(nav.preset_sky_time),
            StartupTimeMode::Today => nav.time.set_today_time(&nav.init_today_time),
        }

        nav.refresh();
        info!(
            "Navigator ready at {} (JD {:.5}, {} mode)",
            nav.current_location(),
            nav.jday(),
            nav.viewing_mode
        );
        Ok(nav)
    }

    // ---------------------------------------------------------------------------------------------
    // Stepping
    // ---------------------------------------------------------------------------------------------

    /// Advance the engine by `delta_time` real seconds.
    ///
    /// A negative delta moves the simulated time backward at the current rate but never
    /// rewinds the elapsed clock.
    pub fn step(&mut self, delta_time: Seconds) {
        self.time.advance(delta_time);
        if delta_time.is_finite() {
            self.elapsed += delta_time.max(0.0);
        } else {
            warn!("Ignored non-finite frame duration {delta_time} s for observer transitions");
        }

        self.observer.update(self.elapsed);
        self.check_observer_life();

        self.refresh();
    }

    fn check_observer_life(&mut self) {
        if !self.observer.is_observer_life_over() {
            return;
        }

        if let Some(SelectedObject::Body(body)) = &self.selected {
            if same_body(body.as_ref(), self.observer.home_planet().as_ref()) {
                debug!("Unselecting {}, the observer now stands on it", body.english_name());
                self.selected = None;
            }
        }

        self.observer = self.observer.next_observer();
        info!("Observer arrived at {}", self.current_location());
    }

    /// Seconds accumulated by [`Navigator::step`]
    pub fn elapsed(&self) -> Seconds {
        self.elapsed
    }

    // ---------------------------------------------------------------------------------------------
    // Time
    // ---------------------------------------------------------------------------------------------

    pub fn time_model(&self) -> &TimeModel {
        &self.time
    }

    pub fn jday(&self) -> JulianDay {
        self.time.jday()
    }

    pub fn set_jday(&mut self, jday: JulianDay) {
        self.time.set_jday(jday);
        self.refresh();
    }

    pub fn time_speed(&self) -> f64 {
        self.time.time_speed()
    }

    pub fn set_time_speed(&mut self, time_speed: f64) {
        self.time.set_time_speed(time_speed);
    }

    pub fn increase_time_speed(&mut self) {
        self.time.increase_time_speed();
    }

    pub fn decrease_time_speed(&mut self) {
        self.time.decrease_time_speed();
    }

    /// `true` when the simulated instant is the real-world one, see [`TimeModel::is_now`]
    pub fn is_time_now(&self) -> bool {
        self.time.is_now()
    }

    pub fn set_time_now(&mut self) {
        self.time.set_time_now();
        self.refresh();
    }

    /// Jump to today's UTC date at `hh_mm`, or to now if `hh_mm` is invalid
    pub fn set_today_time(&mut self, hh_mm: &str) {
        self.time.set_today_time(hh_mm);
        self.refresh();
    }

    pub fn add_solar_days(&mut self, days: f64) {
        self.time.add_solar_days(days);
        self.refresh();
    }

    /// Shift the instant by `days` sidereal days of the home body.
    ///
    /// The solar system observer does not rotate, its days are solar days.
    pub fn add_sidereal_days(&mut self, days: f64) {
        let home = self.observer.home_planet();
        let days = if home.is_solar_system_observer() {
            days
        } else {
            days * home.sidereal_day()
        };
        self.time.add_solar_days(days);
        self.refresh();
    }

    /// Sidereal time of the home body shifted by the observer longitude, in radians
    pub fn local_sidereal_time(&self) -> Radian {
        (self.observer.home_planet().sidereal_time(self.jday())
            + self.current_location().longitude)
            .to_radians()
    }

    pub fn preset_sky_time(&self) -> JulianDay {
        self.preset_sky_time
    }

    pub fn set_preset_sky_time(&mut self, jday: JulianDay) {
        self.preset_sky_time = jday;
    }

    pub fn startup_time_mode(&self) -> StartupTimeMode {
        self.startup_time_mode
    }

    pub fn set_startup_time_mode(&mut self, mode: StartupTimeMode) {
        self.startup_time_mode = mode;
    }

    pub fn init_today_time(&self) -> &str {
        &self.init_today_time
    }

    pub fn set_init_today_time(&mut self, hh_mm: &str) {
        self.init_today_time = hh_mm.to_string();
    }

    // ---------------------------------------------------------------------------------------------
    // Observer
    // ---------------------------------------------------------------------------------------------

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    pub fn current_location(&self) -> &Location {
        self.observer.current_location()
    }

    pub fn home_planet(&self) -> &Arc<dyn Body> {
        self.observer.home_planet()
    }

    /// Relocate the observer.
    ///
    /// The trip lasts `duration_if_planet_change` seconds when the target lies on another
    /// body, `duration` otherwise. A non-positive duration relocates immediately.
    ///
    /// Errors
    /// ------
    /// * [`NavigatorError::UnknownBody`] if the target body is unknown, the observer is
    ///   left untouched.
    pub fn move_observer_to(
        &mut self,
        target: Location,
        duration: Seconds,
        duration_if_planet_change: Seconds,
    ) -> Result<(), NavigatorError> {
        let d = if target.planet == self.current_location().planet {
            duration
        } else {
            duration_if_planet_change
        };

        let next = if d > 0.0 {
            self.observer
                .transition_to(target, self.elapsed, d, self.bodies.as_ref())?
        } else {
            info!("Observer moved to {target}");
            Observer::new(target, self.bodies.as_ref())?
        };

        self.observer = next;
        self.refresh();
        Ok(())
    }

    /// Relocate the observer to the location registered under `small_string`.
    ///
    /// Errors
    /// ------
    /// * [`NavigatorError::UnknownLocation`] if the resolver does not know it
    /// * [`NavigatorError::UnknownBody`] if its body is unknown
    pub fn move_observer_to_named(
        &mut self,
        small_string: &str,
        duration: Seconds,
        duration_if_planet_change: Seconds,
    ) -> Result<(), NavigatorError> {
        let target = self.locations.location_for_small_string(small_string)?;
        self.move_observer_to(target, duration, duration_if_planet_change)
    }

    /// Fly to the selected body, keeping the current coordinates.
    ///
    /// Return
    /// ------
    /// * `Ok(false)` when nothing or something other than a body is selected
    pub fn move_observer_to_selected(
        &mut self,
        duration: Seconds,
        duration_if_planet_change: Seconds,
    ) -> Result<bool, NavigatorError> {
        let Some(SelectedObject::Body(body)) = &self.selected else {
            return Ok(false);
        };

        let mut target = self.current_location().clone();
        target.planet = body.english_name().to_string();
        target.name = "-".to_string();
        target.state = String::new();

        self.move_observer_to(target, duration, duration_if_planet_change)?;
        Ok(true)
    }

    pub fn default_location_id(&self) -> &str {
        &self.default_location_id
    }

    /// Change the startup location.
    ///
    /// Errors
    /// ------
    /// * [`NavigatorError::UnknownLocation`] if `small_string` cannot be resolved, the
    ///   previous default is kept.
    pub fn set_default_location_id(&mut self, small_string: &str) -> Result<(), NavigatorError> {
        self.locations.location_for_small_string(small_string)?;
        self.default_location_id = small_string.to_string();
        Ok(())
    }

    // ---------------------------------------------------------------------------------------------
    // Selection
    // ---------------------------------------------------------------------------------------------

    pub fn select_object(&mut self, object: SelectedObject) {
        self.selected = Some(object);
    }

    pub fn unselect(&mut self) {
        self.selected = None;
    }

    pub fn selected_object(&self) -> Option<&SelectedObject> {
        self.selected.as_ref()
    }

    // ---------------------------------------------------------------------------------------------
    // Gaze
    // ---------------------------------------------------------------------------------------------

    pub fn viewing_mode(&self) -> ViewingMode {
        self.viewing_mode
    }

    pub fn set_viewing_mode(&mut self, mode: ViewingMode) {
        self.viewing_mode = mode;
        self.update_eye_matrix();
    }

    pub fn local_vision(&self) -> &Vector3<f64> {
        &self.local_vision
    }

    pub fn equ_vision(&self) -> &Vector3<f64> {
        &self.equ_vision
    }

    pub fn j2000_equ_vision(&self) -> &Vector3<f64> {
        &self.j2000_equ_vision
    }

    /// Set the gaze in the local horizon frame.
    ///
    /// Errors
    /// ------
    /// * [`NavigatorError::DegenerateVisionVector`] for a zero or non-finite vector, the
    ///   gaze is left untouched.
    pub fn set_local_vision(&mut self, v: Vector3<f64>) -> Result<(), NavigatorError> {
        check_vision(&v)?;
        self.local_vision = v;
        self.primary_vision = VisionFrame::Local;
        self.derive_vision();
        self.update_eye_matrix();
        Ok(())
    }

    /// Set the gaze in the home body equatorial frame.
    ///
    /// Errors
    /// ------
    /// * [`NavigatorError::DegenerateVisionVector`] for a zero or non-finite vector.
    pub fn set_equ_vision(&mut self, v: Vector3<f64>) -> Result<(), NavigatorError> {
        check_vision(&v)?;
        self.equ_vision = v;
        self.primary_vision = VisionFrame::Equatorial;
        self.derive_vision();
        self.update_eye_matrix();
        Ok(())
    }

    /// Set the gaze in the J2000 frame.
    ///
    /// Errors
    /// ------
    /// * [`NavigatorError::DegenerateVisionVector`] for a zero or non-finite vector.
    pub fn set_j2000_equ_vision(&mut self, v: Vector3<f64>) -> Result<(), NavigatorError> {
        check_vision(&v)?;
        self.j2000_equ_vision = v;
        self.primary_vision = VisionFrame::J2000;
        self.derive_vision();
        self.update_eye_matrix();
        Ok(())
    }

    /// Startup gaze direction in the local horizon frame
    pub fn init_view_direction(&self) -> &Vector3<f64> {
        &self.init_view_pos
    }

    /// Use the current local gaze as the startup direction.
    ///
    /// Return
    /// ------
    /// * the direction formatted as `"x,y,z"`, ready for `navigation.init_view_pos`
    pub fn set_init_view_direction_to_current(&mut self) -> String {
        self.init_view_pos = self.local_vision;
        let v = self.init_view_pos;
        format!("{},{},{}", v.x, v.y, v.z)
    }

    // ---------------------------------------------------------------------------------------------
    // Transforms
    // ---------------------------------------------------------------------------------------------

    pub fn matrices(&self) -> &FrameMatrices {
        &self.matrices
    }

    /// Transform between any two frames, going through the local horizon frame.
    ///
    /// Heliocentric transforms are topocentric: they account for the observer offset from
    /// the body center.
    pub fn frame_transform(&self, from: RefFrame, to: RefFrame) -> Matrix4<f64> {
        if from == to {
            return Matrix4::identity();
        }
        self.matrices.from_altaz(to) * self.matrices.to_altaz(from)
    }

    pub fn altaz_to_equ(&self, v: &Vector3<f64>) -> Vector3<f64> {
        rotate(&self.matrices.altaz_to_equ, v)
    }

    pub fn equ_to_altaz(&self, v: &Vector3<f64>) -> Vector3<f64> {
        rotate(&self.matrices.equ_to_altaz, v)
    }

    pub fn j2000_to_altaz(&self, v: &Vector3<f64>) -> Vector3<f64> {
        rotate(&self.matrices.j2000_to_altaz, v)
    }

    /// Observer position in the heliocentric VSOP87 frame, in AU
    pub fn observer_helio_pos(&self) -> Vector3<f64> {
        self.matrices
            .altaz_to_helio
            .transform_point(&Point3::origin())
            .coords
    }

    /// Immutable copy of the current state
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            jday: self.jday(),
            time_speed: self.time_speed(),
            location: self.current_location().clone(),
            viewing_mode: self.viewing_mode,
            local_vision: self.local_vision,
            equ_vision: self.equ_vision,
            j2000_equ_vision: self.j2000_equ_vision,
            matrices: self.matrices,
        }
    }

    // ---------------------------------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------------------------------

    fn refresh(&mut self) {
        self.update_transform_matrices();
        self.derive_vision();
        self.update_eye_matrix();
    }

    fn update_transform_matrices(&mut self) {
        let jd = self.time.jday();
        let obs = &self.observer;
        let m = &mut self.matrices;

        m.altaz_to_equ = obs.rot_altaz_to_equatorial(jd).to_homogeneous();
        m.equ_to_altaz = m.altaz_to_equ.transpose();

        m.equ_to_j2000 = *MAT_VSOP87_TO_J2000 * obs.rot_equatorial_to_vsop87(jd).to_homogeneous();
        m.j2000_to_equ = m.equ_to_j2000.transpose();
        m.j2000_to_altaz = m.equ_to_altaz * m.j2000_to_equ;

        let center = obs.center_vsop87_pos(jd);
        let dist = obs.distance_from_center();

        m.helio_to_equ = m.j2000_to_equ * *MAT_VSOP87_TO_J2000 * translation(&-center);

        // surface offset along the local zenith
        let tmp = *MAT_J2000_TO_VSOP87 * m.equ_to_j2000 * m.altaz_to_equ;
        m.altaz_to_helio =
            translation(&center) * tmp * translation(&Vector3::new(0.0, 0.0, dist));
        m.helio_to_altaz = translation(&Vector3::new(0.0, 0.0, -dist))
            * tmp.transpose()
            * translation(&-center);
    }

    /// Recompute the two non-primary gaze vectors from the primary one
    fn derive_vision(&mut self) {
        let m = &self.matrices;
        match self.primary_vision {
            VisionFrame::Local => {
                self.equ_vision = rotate(&m.altaz_to_equ, &self.local_vision);
                self.j2000_equ_vision = rotate(&m.equ_to_j2000, &self.equ_vision);
            }
            VisionFrame::Equatorial => {
                self.j2000_equ_vision = rotate(&m.equ_to_j2000, &self.equ_vision);
                self.local_vision = rotate(&m.equ_to_altaz, &self.equ_vision);
            }
            VisionFrame::J2000 => {
                self.equ_vision = rotate(&m.j2000_to_equ, &self.j2000_equ_vision);
                self.local_vision = rotate(&m.equ_to_altaz, &self.equ_vision);
            }
        }
    }

    fn update_eye_matrix(&mut self) {
        let Some(altaz_to_eye) =
            eye_basis(self.viewing_mode, &self.local_vision, &self.equ_vision, &self.matrices)
        else {
            debug!("Gaze parallel to the reference up direction, keeping the previous view");
            return;
        };

        let m = &mut self.matrices;
        m.altaz_to_eye = altaz_to_eye;
        m.equ_to_eye = m.altaz_to_eye * m.equ_to_altaz;
        m.helio_to_eye = m.altaz_to_eye * m.helio_to_altaz;
        m.j2000_to_eye = m.equ_to_eye * m.j2000_to_equ;
    }
}

fn check_vision(v: &Vector3<f64>) -> Result<(), NavigatorError> {
    if v.iter().all(|c| c.is_finite()) && v.norm() > 0.0 {
        Ok(())
    } else {
        warn!("Rejected vision vector {:?}", v.as_slice());
        Err(NavigatorError::DegenerateVisionVector)
    }
}

/// Horizon to eye rotation, `None` when the gaze leaves the basis undefined.
///
/// The eye frame looks along `-z` with `y` up: its rows are the side vector `s`, the up
/// vector `u` and the opposite of the gaze `f`.
fn eye_basis(
    mode: ViewingMode,
    local: &Vector3<f64>,
    equ: &Vector3<f64>,
    m: &FrameMatrices,
) -> Option<Matrix4<f64>> {
    const MIN_NORM: f64 = 1e-12;

    let f = local.try_normalize(MIN_NORM)?;
    let s = match mode {
        ViewingMode::Horizon => Vector3::new(f.y, -f.x, 0.0),
        ViewingMode::Equator => {
            let fe = equ.try_normalize(MIN_NORM)?;
            rotate(&m.equ_to_altaz, &Vector3::new(fe.y, -fe.x, 0.0))
        }
    };

    let u = s.cross(&f).try_normalize(MIN_NORM)?;
    let s = s.try_normalize(MIN_NORM)?;

    #[rustfmt::skip]
    let eye = Matrix4::new(
         s.x,  s.y,  s.z, 0.0,
         u.x,  u.y,  u.z, 0.0,
        -f.x, -f.y, -f.z, 0.0,
         0.0,  0.0,  0.0, 1.0,
    );
    Some(eye)
}
