//! # Orientation Core
//!
//! The numeric heart of gyro look tracking: raw angular-velocity samples
//! become incremental rotations ([`sample`]), accumulate between ticks
//! ([`accumulator`]), get remapped for the connection transport ([`remap`]),
//! and are composed with stick input into a pitch-bounded look orientation
//! once per tick ([`composer`]).
//!
//! Everything here is pure state and math; device handling lives in
//! [`crate::controller`] and output in [`crate::telemetry`].

pub mod accumulator;
pub mod composer;
pub mod euler;
pub mod remap;
pub mod sample;
