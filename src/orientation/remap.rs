//! # Transport Axis Remap
//!
//! The same physical sensor reports angular data in two different axis
//! conventions depending on how the controller is connected. Over Bluetooth
//! the pitch motion arrives on what the report calls the yaw axis and the
//! yaw motion on the negated roll axis; over USB the axes line up. No
//! reliable signal disambiguates the transport at runtime, so the scheme is
//! cycled manually (see the pad mapper's scheme button) instead of
//! auto-detected.
//!
//! Isolating the quirk here keeps the composer transport-agnostic.

use glam::Quat;

use super::euler;

/// Axis-convention variant for the drained gyro rotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AxisScheme {
    /// Bluetooth-style reports: pitch on the yaw axis, yaw on the negated
    /// roll axis, roll unusable.
    #[default]
    Bluetooth,
    /// Wired-style reports: axes already match, passthrough.
    Usb,
}

impl AxisScheme {
    /// The other variant. Two cycles return the starting scheme.
    #[must_use]
    pub fn cycled(self) -> Self {
        match self {
            AxisScheme::Bluetooth => AxisScheme::Usb,
            AxisScheme::Usb => AxisScheme::Bluetooth,
        }
    }

    /// Short name for logs and trace records.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AxisScheme::Bluetooth => "bluetooth",
            AxisScheme::Usb => "usb",
        }
    }

    /// Remaps a drained rotation into the convention the composer expects.
    ///
    /// For [`AxisScheme::Bluetooth`], Euler components `(x, y, z)` become
    /// `(y, -z, 0)`: pitch is taken from the reported yaw, yaw from the
    /// negated roll, and roll is discarded. [`AxisScheme::Usb`] passes the
    /// rotation through untouched.
    #[must_use]
    pub fn remap(self, rotation: Quat) -> Quat {
        match self {
            AxisScheme::Bluetooth => {
                let (yaw, _pitch, roll) = euler::yaw_pitch_roll_degrees(rotation);
                euler::rotation_from_degrees(-roll, yaw, 0.0)
            }
            AxisScheme::Usb => rotation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    #[test]
    fn test_default_is_bluetooth() {
        assert_eq!(AxisScheme::default(), AxisScheme::Bluetooth);
    }

    #[test]
    fn test_cycled_alternates() {
        assert_eq!(AxisScheme::Bluetooth.cycled(), AxisScheme::Usb);
        assert_eq!(AxisScheme::Usb.cycled(), AxisScheme::Bluetooth);
    }

    #[test]
    fn test_cycling_twice_returns_original() {
        for scheme in [AxisScheme::Bluetooth, AxisScheme::Usb] {
            assert_eq!(scheme.cycled().cycled(), scheme);
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(AxisScheme::Bluetooth.label(), "bluetooth");
        assert_eq!(AxisScheme::Usb.label(), "usb");
    }

    #[test]
    fn test_usb_is_passthrough() {
        let rotation = euler::rotation_from_degrees(20.0, 10.0, 30.0);
        assert_eq!(AxisScheme::Usb.remap(rotation), rotation);
    }

    #[test]
    fn test_bluetooth_remaps_euler_components() {
        // Euler (x=10, y=20, z=30) must come out as (x=20, y=-30, z=0).
        let rotation = euler::rotation_from_degrees(20.0, 10.0, 30.0);

        let remapped = AxisScheme::Bluetooth.remap(rotation);
        let (yaw, pitch, roll) = euler::yaw_pitch_roll_degrees(remapped);

        assert!((pitch - 20.0).abs() < EPSILON, "pitch was {pitch}");
        assert!((yaw - (-30.0)).abs() < EPSILON, "yaw was {yaw}");
        assert!(roll.abs() < EPSILON, "roll was {roll}");
    }

    #[test]
    fn test_bluetooth_discards_pitch_component() {
        // A report carrying only pitch (x) maps to no rotation at all.
        let rotation = euler::rotation_from_degrees(0.0, 15.0, 0.0);

        let remapped = AxisScheme::Bluetooth.remap(rotation);

        assert!(remapped.angle_between(Quat::IDENTITY) < EPSILON);
    }

    #[test]
    fn test_bluetooth_remap_of_identity_is_identity() {
        let remapped = AxisScheme::Bluetooth.remap(Quat::IDENTITY);
        assert!(remapped.angle_between(Quat::IDENTITY) < EPSILON);
    }
}
