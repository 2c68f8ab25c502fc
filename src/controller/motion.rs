//! # Input Event Mapping
//!
//! Parses raw evdev events from the two DualSense nodes into the typed
//! control events the tick loop consumes.
//!
//! ## Motion node axes (EV_ABS)
//!
//! | Axis | evdev Code | Description |
//! |------|------------|-------------|
//! | Gyro X | ABS_RX | Angular velocity, raw units |
//! | Gyro Y | ABS_RY | Angular velocity, raw units |
//! | Gyro Z | ABS_RZ | Angular velocity, raw units |
//!
//! Accelerometer axes (ABS_X/Y/Z) and MSC timestamps are ignored; the
//! sample clock is the kernel event timestamp. A SYN_REPORT closes one
//! sensor report and emits one [`AngularSample`].
//!
//! ## Pad node inputs
//!
//! | Input | evdev Code | Function |
//! |-------|------------|----------|
//! | Right Stick X | ABS_Z | Stick look yaw |
//! | Right Stick Y | ABS_RZ | Stick look pitch |
//! | R3 | BTN_THUMBR | Recenter the view |
//! | Create/Share | BTN_SELECT | Cycle the axis scheme |

use evdev::{AbsoluteAxisType, InputEvent, InputEventKind, Key};
use glam::{Vec2, Vec3};
use std::time::UNIX_EPOCH;

use crate::orientation::sample::AngularSample;

use super::stick::StickResponse;

/// Raw stick axis range on the pad node.
pub const AXIS_MIN: i32 = 0;
/// Raw stick axis range on the pad node.
pub const AXIS_MAX: i32 = 255;
/// Raw stick axis center value.
pub const AXIS_CENTER: i32 = 128;

/// Control events produced by the mappers and consumed by the tick loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    /// One gyroscope reading, ready for ingestion.
    Motion(AngularSample),
    /// New look-stick deflection, [-1, 1] per axis with up positive.
    Stick(Vec2),
    /// The recenter button was pressed.
    Recenter,
    /// The axis-scheme button was pressed.
    CycleScheme,
}

/// Folds motion-node events into angular samples.
///
/// Axis values persist between reports (the kernel only resends changed
/// axes); a SYN_REPORT snapshots the current vector with the event's
/// kernel timestamp.
///
/// # Thread Safety
///
/// Not thread-safe; owned by the motion reader thread.
#[derive(Debug, Default)]
pub struct MotionMapper {
    pending: Vec3,
}

impl MotionMapper {
    /// Creates a mapper with a zero pending vector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes one motion-node event.
    ///
    /// Returns a [`ControlEvent::Motion`] when `event` closes a report,
    /// `None` otherwise.
    pub fn process_event(&mut self, event: &InputEvent) -> Option<ControlEvent> {
        match event.kind() {
            InputEventKind::AbsAxis(AbsoluteAxisType::ABS_RX) => {
                self.pending.x = event.value() as f32;
                None
            }
            InputEventKind::AbsAxis(AbsoluteAxisType::ABS_RY) => {
                self.pending.y = event.value() as f32;
                None
            }
            InputEventKind::AbsAxis(AbsoluteAxisType::ABS_RZ) => {
                self.pending.z = event.value() as f32;
                None
            }
            InputEventKind::Synchronization(_) => Some(ControlEvent::Motion(AngularSample {
                vector: self.pending,
                time: event
                    .timestamp()
                    .duration_since(UNIX_EPOCH)
                    .map(|elapsed| elapsed.as_secs_f64())
                    .unwrap_or(0.0),
            })),
            // Accelerometer axes, MSC timestamps.
            _ => None,
        }
    }
}

/// Tracks the pad node: look stick and command buttons.
///
/// Stick axis events re-emit the full deflection so the composer always
/// holds the latest value; button events emit on the press edge only
/// (releases and autorepeats are ignored).
#[derive(Debug)]
pub struct PadMapper {
    response: StickResponse,
    stick_x_raw: i32,
    stick_y_raw: i32,
    recenter_held: bool,
    scheme_held: bool,
}

impl PadMapper {
    /// Creates a mapper with a centered stick.
    #[must_use]
    pub fn new(response: StickResponse) -> Self {
        Self {
            response,
            stick_x_raw: AXIS_CENTER,
            stick_y_raw: AXIS_CENTER,
            recenter_held: false,
            scheme_held: false,
        }
    }

    /// Processes one pad-node event.
    pub fn process_event(&mut self, event: &InputEvent) -> Option<ControlEvent> {
        match event.kind() {
            InputEventKind::AbsAxis(AbsoluteAxisType::ABS_Z) => {
                self.stick_x_raw = event.value();
                Some(ControlEvent::Stick(self.deflection()))
            }
            InputEventKind::AbsAxis(AbsoluteAxisType::ABS_RZ) => {
                self.stick_y_raw = event.value();
                Some(ControlEvent::Stick(self.deflection()))
            }
            InputEventKind::Key(Key::BTN_THUMBR) => {
                Self::press_edge(&mut self.recenter_held, event.value() != 0)
                    .then_some(ControlEvent::Recenter)
            }
            InputEventKind::Key(Key::BTN_SELECT) => {
                Self::press_edge(&mut self.scheme_held, event.value() != 0)
                    .then_some(ControlEvent::CycleScheme)
            }
            // Left stick, triggers, remaining buttons, sync events.
            _ => None,
        }
    }

    /// Current shaped deflection.
    #[must_use]
    pub fn deflection(&self) -> Vec2 {
        let x = Self::normalize(self.stick_x_raw);
        // evdev Y grows downward; the look math wants up positive.
        let y = -Self::normalize(self.stick_y_raw);
        self.response.apply(Vec2::new(x, y))
    }

    /// Maps a raw 0-255 axis value onto [-1, 1].
    fn normalize(raw: i32) -> f32 {
        (((raw - AXIS_CENTER) as f32) / 127.0).clamp(-1.0, 1.0)
    }

    /// Updates a held flag, reporting true only on the release-to-press
    /// transition.
    fn press_edge(held: &mut bool, pressed: bool) -> bool {
        let edge = pressed && !*held;
        *held = pressed;
        edge
    }
}
