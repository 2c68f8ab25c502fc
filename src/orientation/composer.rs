//! # Orientation Composer
//!
//! Owns the controller- and stick-rotation accumulators and produces the
//! published look orientation once per tick.
//!
//! ## Per-tick algorithm
//!
//! 1. Drain the gyro accumulator and remap it for the active
//!    [`AxisScheme`].
//! 2. Split the remapped delta into independent yaw and pitch rotations
//!    and advance the controller rotation with yaw pre-multiplied and
//!    pitch post-multiplied. Yaw stays in world space, pitch in local
//!    space, which keeps yaw from bleeding into roll.
//! 3. Advance the stick rotation the same way, at a rate proportional to
//!    deflection and elapsed tick time.
//! 4. Sum the yaw and pitch Euler components of both accumulators and
//!    rebuild the published orientation from the totals.
//! 5. Snap the published pitch out of the forbidden window.
//!
//! The snap is an instantaneous hard limit. Entering the window produces a
//! visible pop; that is the intended behavior, not something to smooth.

use glam::{Quat, Vec2};
use tracing::info;

use super::accumulator::GyroAccumulator;
use super::euler;
use super::remap::AxisScheme;
use super::sample::{AngularSample, SampleConverter};

/// Stick deflection to look rate: degrees per second at full deflection.
pub const DEFAULT_STICK_RATE: f32 = 100.0;

/// Pitch angles the published orientation must stay out of.
///
/// The window is expressed in unsigned degrees: pitch values strictly
/// between `min_degrees` and `max_degrees` are forbidden, and the allowed
/// region is the complement near 0°/360°. The inversion is deliberate and
/// matches how the bounds were tuned; with the defaults of 4 and 334 the
/// view may dip 4° below and rise 26° above the horizon.
#[derive(Debug, Clone, Copy)]
pub struct PitchWindow {
    min_degrees: f32,
    max_degrees: f32,
}

impl Default for PitchWindow {
    fn default() -> Self {
        Self {
            min_degrees: 4.0,
            max_degrees: 334.0,
        }
    }
}

impl PitchWindow {
    /// Creates a window with the given forbidden interval in degrees.
    #[must_use]
    pub fn new(min_degrees: f32, max_degrees: f32) -> Self {
        Self {
            min_degrees,
            max_degrees,
        }
    }

    /// Lower edge of the forbidden interval.
    #[must_use]
    pub fn min_degrees(&self) -> f32 {
        self.min_degrees
    }

    /// Upper edge of the forbidden interval.
    #[must_use]
    pub fn max_degrees(&self) -> f32 {
        self.max_degrees
    }

    /// Snaps an unsigned pitch angle out of the forbidden interval.
    ///
    /// Angles inside `(min, max)` move to the numerically closer bound,
    /// ties to `min`; everything else comes back unchanged.
    #[must_use]
    pub fn constrain(&self, pitch_degrees: f32) -> f32 {
        if pitch_degrees > self.min_degrees && pitch_degrees < self.max_degrees {
            if (pitch_degrees - self.max_degrees).abs() < (pitch_degrees - self.min_degrees).abs() {
                self.max_degrees
            } else {
                self.min_degrees
            }
        } else {
            pitch_degrees
        }
    }
}

/// Owns the rotation state and produces the published orientation.
///
/// The composer is the single owner of its accumulators; sample and stick
/// producers write only through [`ingest_sample`](Self::ingest_sample) and
/// [`set_stick`](Self::set_stick), and the tick source drives
/// [`tick`](Self::tick) once per frame. One instance per tracked viewpoint;
/// nothing here is shared or static, so multiple players stay independent.
#[derive(Debug)]
pub struct OrientationComposer {
    converter: SampleConverter,
    gyro: GyroAccumulator,
    scheme: AxisScheme,
    /// Cumulative gyro-driven look direction.
    controller_rotation: Quat,
    /// Cumulative stick-driven look direction.
    stick_rotation: Quat,
    /// Last reported stick deflection; holds until the next report.
    stick: Vec2,
    window: PitchWindow,
    stick_rate: f32,
    published: Quat,
    last_sample_time: Option<f64>,
}

impl Default for OrientationComposer {
    fn default() -> Self {
        Self::new(
            PitchWindow::default(),
            SampleConverter::default(),
            DEFAULT_STICK_RATE,
        )
    }
}

impl OrientationComposer {
    /// Creates a composer with identity state and the default
    /// [`AxisScheme`].
    ///
    /// # Arguments
    ///
    /// * `window` - Forbidden pitch interval
    /// * `converter` - Sample conversion with the configured gyro scale
    /// * `stick_rate` - Degrees per second at full stick deflection
    #[must_use]
    pub fn new(window: PitchWindow, converter: SampleConverter, stick_rate: f32) -> Self {
        Self {
            converter,
            gyro: GyroAccumulator::new(),
            scheme: AxisScheme::default(),
            controller_rotation: Quat::IDENTITY,
            stick_rotation: Quat::IDENTITY,
            stick: Vec2::ZERO,
            window,
            stick_rate,
            published: Quat::IDENTITY,
            last_sample_time: None,
        }
    }

    /// Entry point for gyro samples.
    ///
    /// Converts the sample against the previous sample's timestamp and folds
    /// the resulting rotation into the accumulator. The first sample only
    /// establishes the time base and contributes no rotation. May be called
    /// any number of times between ticks.
    pub fn ingest_sample(&mut self, sample: &AngularSample) {
        if let Some(last) = self.last_sample_time {
            self.gyro.ingest(self.converter.delta_rotation(sample, last));
        }
        self.last_sample_time = Some(sample.time);
    }

    /// Entry point for stick deflection, [-1, 1] per axis with up positive.
    ///
    /// Last writer wins; the value holds until the next report.
    pub fn set_stick(&mut self, deflection: Vec2) {
        self.stick = deflection;
    }

    /// Advances both accumulators and republishes the orientation.
    ///
    /// # Arguments
    ///
    /// * `dt` - Elapsed wall time since the previous tick, in seconds
    ///
    /// Must be called exactly once per frame, after all of that frame's
    /// sample and stick events have been applied.
    pub fn tick(&mut self, dt: f32) -> Quat {
        let delta = self.scheme.remap(self.gyro.drain());
        let (delta_yaw, delta_pitch, _) = euler::yaw_pitch_roll_degrees(delta);
        self.controller_rotation = Quat::from_rotation_y(delta_yaw.to_radians())
            * self.controller_rotation
            * Quat::from_rotation_x(delta_pitch.to_radians());

        let yaw_rate = self.stick.x * dt * self.stick_rate;
        let pitch_rate = -self.stick.y * dt * self.stick_rate;
        self.stick_rotation = Quat::from_rotation_y(yaw_rate.to_radians())
            * self.stick_rotation
            * Quat::from_rotation_x(pitch_rate.to_radians());

        let (controller_yaw, controller_pitch, _) =
            euler::yaw_pitch_roll_degrees(self.controller_rotation);
        let (stick_yaw, stick_pitch, _) = euler::yaw_pitch_roll_degrees(self.stick_rotation);

        let total_yaw = controller_yaw + stick_yaw;
        let total_pitch = controller_pitch + stick_pitch;

        let unconstrained = Quat::from_rotation_y(total_yaw.to_radians())
            * Quat::from_rotation_x(total_pitch.to_radians());
        self.published = self.constrain_pitch(unconstrained);
        self.published
    }

    /// Rebuilds an orientation whose pitch falls inside the forbidden
    /// window, keeping its yaw and forcing roll to zero. Orientations with
    /// allowed pitch pass through untouched.
    fn constrain_pitch(&self, orientation: Quat) -> Quat {
        let (yaw, pitch, _) = euler::yaw_pitch_roll_degrees(orientation);
        let unsigned_pitch = euler::unsigned_degrees(pitch);
        let snapped = self.window.constrain(unsigned_pitch);
        if snapped == unsigned_pitch {
            orientation
        } else {
            euler::rotation_from_degrees(yaw, snapped, 0.0)
        }
    }

    /// Zeroes both look accumulators.
    ///
    /// The published orientation is not touched here; the next tick
    /// recomputes it from the now-identity accumulators.
    pub fn reset_view(&mut self) {
        self.controller_rotation = Quat::IDENTITY;
        self.stick_rotation = Quat::IDENTITY;
        info!("look recentered");
    }

    /// Switches to the other axis scheme and returns it.
    ///
    /// Manual workaround for the transport-dependent axis conventions; see
    /// [`AxisScheme`].
    pub fn cycle_scheme(&mut self) -> AxisScheme {
        self.scheme = self.scheme.cycled();
        info!(scheme = self.scheme.label(), "axis scheme cycled");
        self.scheme
    }

    /// Active axis scheme.
    #[must_use]
    pub fn scheme(&self) -> AxisScheme {
        self.scheme
    }

    /// Most recently published orientation.
    #[must_use]
    pub fn orientation(&self) -> Quat {
        self.published
    }

    /// Yaw and pitch of the published orientation in signed degrees.
    #[must_use]
    pub fn yaw_pitch_degrees(&self) -> (f32, f32) {
        let (yaw, pitch, _) = euler::yaw_pitch_roll_degrees(self.published);
        (yaw, pitch)
    }

    /// Cumulative gyro-driven rotation.
    #[must_use]
    pub fn controller_rotation(&self) -> Quat {
        self.controller_rotation
    }

    /// Cumulative stick-driven rotation.
    #[must_use]
    pub fn stick_rotation(&self) -> Quat {
        self.stick_rotation
    }

    /// Last reported stick deflection.
    #[must_use]
    pub fn stick(&self) -> Vec2 {
        self.stick
    }
}
