//! # Gyro Accumulator
//!
//! Event-driven bucket for incremental rotations.
//!
//! The sensor delivers samples at its own cadence; the tick loop consumes
//! them at the frame rate. Between consecutive drains the accumulator holds
//! the product of every delta received so far, in arrival order, so no
//! rotation is lost when several samples land inside one tick and no
//! rotation is invented when none do.

use glam::Quat;

/// Accumulates incremental rotations between drains.
///
/// Invariant: the held value equals the arrival-order composition of every
/// delta ingested since the last drain; identity when none were.
///
/// # Examples
///
/// ```
/// use glam::Quat;
/// use gyro_look::orientation::accumulator::GyroAccumulator;
///
/// let mut acc = GyroAccumulator::new();
/// acc.ingest(Quat::from_rotation_y(0.1));
/// acc.ingest(Quat::from_rotation_x(0.2));
///
/// let drained = acc.drain();
/// assert!(drained.angle_between(Quat::IDENTITY) > 0.0);
///
/// // Draining resets to identity.
/// assert_eq!(acc.drain(), Quat::IDENTITY);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GyroAccumulator {
    rotation: Quat,
}

impl GyroAccumulator {
    /// Creates an empty (identity) accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one incremental rotation into the bucket.
    ///
    /// Arrival order is preserved: the delta is composed onto the right of
    /// the held value. Safe to call zero, one, or many times between drains.
    pub fn ingest(&mut self, delta: Quat) {
        self.rotation = self.rotation * delta;
    }

    /// Returns the accumulated rotation and resets the bucket to identity.
    ///
    /// Called exactly once per tick, after that tick's ingests.
    #[must_use]
    pub fn drain(&mut self) -> Quat {
        std::mem::replace(&mut self.rotation, Quat::IDENTITY)
    }

    /// Current value without draining. Mainly useful in tests.
    #[must_use]
    pub fn peek(&self) -> Quat {
        self.rotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn same_rotation(a: Quat, b: Quat) -> bool {
        a.dot(b).abs() > 1.0 - EPSILON
    }

    #[test]
    fn test_starts_at_identity() {
        let acc = GyroAccumulator::new();
        assert_eq!(acc.peek(), Quat::IDENTITY);
    }

    #[test]
    fn test_drain_without_ingest_is_identity() {
        let mut acc = GyroAccumulator::new();
        assert_eq!(acc.drain(), Quat::IDENTITY);
    }

    #[test]
    fn test_single_ingest_drains_to_same_delta() {
        let mut acc = GyroAccumulator::new();
        let delta = Quat::from_rotation_y(0.25);

        acc.ingest(delta);

        assert!(same_rotation(acc.drain(), delta));
    }

    #[test]
    fn test_drain_resets_to_identity() {
        let mut acc = GyroAccumulator::new();
        acc.ingest(Quat::from_rotation_x(1.0));

        let _ = acc.drain();

        assert_eq!(acc.peek(), Quat::IDENTITY);
        assert_eq!(acc.drain(), Quat::IDENTITY);
    }

    #[test]
    fn test_two_ingests_compose_in_arrival_order() {
        let mut acc = GyroAccumulator::new();
        let first = Quat::from_rotation_y(0.5);
        let second = Quat::from_rotation_x(0.3);

        acc.ingest(first);
        acc.ingest(second);

        let drained = acc.drain();
        assert!(same_rotation(drained, first * second));
        // Rotation composition does not commute; the reversed order differs.
        assert!(!same_rotation(drained, second * first));
    }

    #[test]
    fn test_many_ingests_equal_ordered_product() {
        let deltas = [
            Quat::from_rotation_y(0.1),
            Quat::from_rotation_x(-0.2),
            Quat::from_rotation_z(0.15),
            Quat::from_rotation_y(-0.05),
        ];

        let mut acc = GyroAccumulator::new();
        let mut expected = Quat::IDENTITY;
        for delta in deltas {
            acc.ingest(delta);
            expected = expected * delta;
        }

        assert!(same_rotation(acc.drain(), expected));
    }

    #[test]
    fn test_ingest_after_drain_starts_fresh() {
        let mut acc = GyroAccumulator::new();
        acc.ingest(Quat::from_rotation_y(1.0));
        let _ = acc.drain();

        let delta = Quat::from_rotation_x(0.4);
        acc.ingest(delta);

        assert!(same_rotation(acc.drain(), delta));
    }
}
