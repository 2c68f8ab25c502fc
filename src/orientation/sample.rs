//! # Gyro Sample Conversion
//!
//! Converts raw angular-velocity readings into incremental rotations.
//!
//! Each sample carries the sensor's raw vector and a timestamp; the elapsed
//! time against the previous sample decides how much rotation the reading
//! represents. Two guards apply:
//!
//! - The elapsed time is capped at [`MAX_SAMPLE_INTERVAL`], so a stale sample
//!   (device reconnect, startup, scheduling stall) cannot turn into one huge
//!   rotation.
//! - The raw-unit-to-degrees coefficient is configurable. The hardware
//!   constant is undocumented; [`DEFAULT_GYRO_SCALE`] is an empirical fit,
//!   not a derived physical value.
//!
//! Non-finite input is not validated here; producers must guard upstream.

use glam::{Quat, Vec3};

use super::euler;

/// Coefficient converting a raw gyro unit into degrees per second.
///
/// The actual hardware constant is undocumented and unknown; this value is a
/// plausible empirical guess. Override it via configuration rather than
/// treating it as ground truth.
pub const DEFAULT_GYRO_SCALE: f32 = 17.5 * 360.0 / std::f32::consts::PI;

/// Longest sample gap folded into a rotation, in seconds.
pub const MAX_SAMPLE_INTERVAL: f64 = 1.0 / 60.0;

/// One raw gyroscope reading.
///
/// Produced by the motion adapter at irregular, possibly sub-tick intervals
/// and consumed immediately; samples are not retained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngularSample {
    /// Angular velocity in raw device units.
    pub vector: Vec3,
    /// Device timestamp in seconds.
    pub time: f64,
}

/// Converts raw samples into incremental rotations.
///
/// Stateless apart from the injected scale; the caller supplies the previous
/// sample's timestamp for elapsed-time computation.
///
/// # Examples
///
/// ```
/// use glam::Vec3;
/// use gyro_look::orientation::sample::{AngularSample, SampleConverter};
///
/// let converter = SampleConverter::default();
/// let sample = AngularSample { vector: Vec3::ZERO, time: 1.0 };
///
/// // A zero reading is a zero rotation regardless of elapsed time.
/// let rotation = converter.delta_rotation(&sample, 0.5);
/// assert!(rotation.angle_between(glam::Quat::IDENTITY) < 1e-6);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SampleConverter {
    /// Raw units to degrees per second.
    scale: f32,
}

impl Default for SampleConverter {
    fn default() -> Self {
        Self {
            scale: DEFAULT_GYRO_SCALE,
        }
    }
}

impl SampleConverter {
    /// Creates a converter with the given raw-unit scale.
    #[must_use]
    pub fn new(scale: f32) -> Self {
        Self { scale }
    }

    /// Returns the configured scale.
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Converts one sample into the incremental rotation it represents.
    ///
    /// # Arguments
    ///
    /// * `sample` - The raw reading to convert
    /// * `last_sample_time` - Timestamp of the previous sample from the same
    ///   source, in seconds
    ///
    /// The elapsed time is capped at [`MAX_SAMPLE_INTERVAL`]; beyond the cap
    /// the output is identical to a sample exactly at the cap.
    #[must_use]
    pub fn delta_rotation(&self, sample: &AngularSample, last_sample_time: f64) -> Quat {
        let dt = (sample.time - last_sample_time).min(MAX_SAMPLE_INTERVAL);
        let degrees = sample.vector * (self.scale * dt as f32);
        euler::rotation_from_degrees(degrees.y, degrees.x, degrees.z)
    }
}
