//! # Stick Response Shaping
//!
//! Deadzone and exponential response for the look stick.
//!
//! A deadzone maps small deflections near center to zero so a worn stick
//! does not drift the view; values outside it are rescaled to keep the full
//! range. The expo curve then softens small deflections while preserving
//! full deflection at the endpoints:
//!
//! `output = (1 - expo) * input + expo * input³`
//!
//! - `expo = 0.0`: linear response
//! - `expo = 0.3`: mild curve
//! - `expo = 0.7`: strong curve

use glam::Vec2;

/// Deadzone + expo response for one stick axis.
///
/// Input and output are normalized to -1.0..1.0 with 0.0 at center.
#[derive(Debug, Clone, Copy)]
pub struct AxisResponse {
    /// Deadzone as a fraction (0.0 to 0.25).
    deadzone: f32,
    /// Exponential curve factor (0.0 to 1.0).
    expo: f32,
}

impl Default for AxisResponse {
    fn default() -> Self {
        Self {
            deadzone: 0.05,
            expo: 0.0,
        }
    }
}

impl AxisResponse {
    /// Creates a response with the given deadzone and expo.
    ///
    /// Out-of-range values are clamped.
    #[must_use]
    pub fn new(deadzone: f32, expo: f32) -> Self {
        Self {
            deadzone: deadzone.clamp(0.0, 0.25),
            expo: expo.clamp(0.0, 1.0),
        }
    }

    /// A linear response with no deadzone.
    #[must_use]
    pub fn linear() -> Self {
        Self {
            deadzone: 0.0,
            expo: 0.0,
        }
    }

    /// Applies the deadzone and expo curve to a normalized deflection.
    #[must_use]
    pub fn apply(&self, input: f32) -> f32 {
        let sign = input.signum();
        let after_deadzone = self.apply_deadzone(input.abs());
        sign * self.apply_expo(after_deadzone)
    }

    /// Maps values within the deadzone to 0 and rescales the rest to 0..1.
    #[inline]
    fn apply_deadzone(&self, abs_input: f32) -> f32 {
        if abs_input <= self.deadzone {
            0.0
        } else {
            (abs_input - self.deadzone) / (1.0 - self.deadzone)
        }
    }

    #[inline]
    fn apply_expo(&self, input: f32) -> f32 {
        if self.expo == 0.0 {
            input
        } else {
            (1.0 - self.expo) * input + self.expo * input * input * input
        }
    }
}

/// Per-axis response for the look stick.
#[derive(Debug, Clone, Copy, Default)]
pub struct StickResponse {
    /// Horizontal (yaw) axis.
    pub yaw: AxisResponse,
    /// Vertical (pitch) axis.
    pub pitch: AxisResponse,
}

impl StickResponse {
    /// Builds the response from config values.
    ///
    /// # Arguments
    ///
    /// * `deadzone` - Shared deadzone fraction for both axes
    /// * `expo_yaw` - Expo factor for the horizontal axis
    /// * `expo_pitch` - Expo factor for the vertical axis
    #[must_use]
    pub fn from_config(deadzone: f32, expo_yaw: f32, expo_pitch: f32) -> Self {
        Self {
            yaw: AxisResponse::new(deadzone, expo_yaw),
            pitch: AxisResponse::new(deadzone, expo_pitch),
        }
    }

    /// Applies both axis responses to a deflection vector.
    #[must_use]
    pub fn apply(&self, deflection: Vec2) -> Vec2 {
        Vec2::new(self.yaw.apply(deflection.x), self.pitch.apply(deflection.y))
    }
}
