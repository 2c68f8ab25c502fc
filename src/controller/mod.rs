//! # Controller Module
//!
//! DualSense input handling over evdev.
//!
//! This module handles:
//! - Locating the pad and motion-sensors nodes of a connected DualSense
//! - Parsing raw input events into typed control events
//! - Shaping stick deflection with deadzone and expo curves

pub mod device;
pub mod motion;
pub mod stick;
