//! # Euler Angle Helpers
//!
//! The look math is defined over yaw/pitch Euler components: rotations are
//! built from and decomposed into angles about the world-up (Y), world-right
//! (X), and forward (Z) axes, in Y-X-Z order. Decomposing a quaternion into
//! Euler angles every frame is lossy near the poles; every such conversion
//! goes through this module so the representation can be swapped later
//! without touching the composition order or the clamp policy.

use glam::{EulerRot, Quat};

/// Rotation order used throughout the look math: yaw about Y, then pitch
/// about X, then roll about Z.
const LOOK_ORDER: EulerRot = EulerRot::YXZ;

/// Builds a rotation from yaw/pitch/roll angles in degrees.
#[must_use]
pub fn rotation_from_degrees(yaw: f32, pitch: f32, roll: f32) -> Quat {
    Quat::from_euler(
        LOOK_ORDER,
        yaw.to_radians(),
        pitch.to_radians(),
        roll.to_radians(),
    )
}

/// Decomposes a rotation into (yaw, pitch, roll) degrees.
///
/// Yaw and roll come back in (-180, 180], pitch in [-90, 90].
#[must_use]
pub fn yaw_pitch_roll_degrees(rotation: Quat) -> (f32, f32, f32) {
    let (yaw, pitch, roll) = rotation.to_euler(LOOK_ORDER);
    (yaw.to_degrees(), pitch.to_degrees(), roll.to_degrees())
}

/// Maps an angle in degrees onto [0, 360).
#[must_use]
pub fn unsigned_degrees(degrees: f32) -> f32 {
    degrees.rem_euclid(360.0)
}
