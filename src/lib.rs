//! # Gyro Look Library
//!
//! Turn DualSense motion input into a bounded look/aim orientation.
//!
//! This library integrates raw gyroscope samples and analog-stick input
//! into a single 3-DoF look orientation with a hard pitch limit. The
//! numeric core lives in [`orientation`]; [`controller`] adapts the Linux
//! evdev interface to it and [`telemetry`] records the published
//! orientation for offline tuning.

pub mod config;
pub mod controller;
pub mod error;
pub mod orientation;
pub mod telemetry;
