//! # Telemetry Module
//!
//! Orientation trace logging to JSONL files with rotation.
//!
//! This module handles:
//! - Formatting per-tick orientation snapshots as JSONL (JSON Lines)
//! - Writing to rotating trace files (max N records per file)
//! - Retaining only the last M files

pub mod logger;
