//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::orientation::composer::DEFAULT_STICK_RATE;
use crate::orientation::sample::DEFAULT_GYRO_SCALE;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub controller: ControllerConfig,
    pub tracking: TrackingConfig,
    pub telemetry: TelemetryConfig,
}

/// Controller input configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ControllerConfig {
    /// Explicit pad device path; empty means auto-detect.
    #[serde(default)]
    pub device_path: String,

    #[serde(default = "default_deadzone_stick")]
    pub deadzone_stick: f32,

    #[serde(default = "default_expo_yaw")]
    pub expo_yaw: f32,

    #[serde(default = "default_expo_pitch")]
    pub expo_pitch: f32,
}

/// Orientation tracking configuration
#[derive(Debug, Deserialize, Clone)]
pub struct TrackingConfig {
    /// Lower edge of the forbidden pitch interval, unsigned degrees.
    ///
    /// Together with `max_angle` this names the pitch region the view is
    /// pushed *out of*; the allowed range is the complement near 0°/360°.
    #[serde(default = "default_min_angle")]
    pub min_angle: f32,

    /// Upper edge of the forbidden pitch interval, unsigned degrees.
    #[serde(default = "default_max_angle")]
    pub max_angle: f32,

    /// Raw gyro units to degrees per second. Empirical, not a hardware
    /// constant; tune per device batch if tracking feels off.
    #[serde(default = "default_gyro_scale")]
    pub gyro_scale: f32,

    /// Look rate at full stick deflection, degrees per second.
    #[serde(default = "default_stick_rate")]
    pub stick_rate: f32,

    /// Composer tick rate in Hz.
    #[serde(default = "default_tick_rate_hz")]
    pub tick_rate_hz: u32,
}

/// Orientation trace configuration
#[derive(Debug, Deserialize, Clone)]
pub struct TelemetryConfig {
    #[serde(default = "default_telemetry_enabled")]
    pub enabled: bool,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    #[serde(default = "default_max_records_per_file")]
    pub max_records_per_file: usize,

    #[serde(default = "default_max_files_to_keep")]
    pub max_files_to_keep: usize,

    #[serde(default = "default_log_interval_ms")]
    pub log_interval_ms: u64,

    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_deadzone_stick() -> f32 { 0.05 }
fn default_expo_yaw() -> f32 { 0.2 }
fn default_expo_pitch() -> f32 { 0.3 }

fn default_min_angle() -> f32 { 4.0 }
fn default_max_angle() -> f32 { 334.0 }
fn default_gyro_scale() -> f32 { DEFAULT_GYRO_SCALE }
fn default_stick_rate() -> f32 { DEFAULT_STICK_RATE }
fn default_tick_rate_hz() -> u32 { 60 }

fn default_telemetry_enabled() -> bool { true }
fn default_log_dir() -> String { "./logs".to_string() }
fn default_max_records_per_file() -> usize { 10000 }
fn default_max_files_to_keep() -> usize { 10 }
fn default_log_interval_ms() -> u64 { 100 }
fn default_log_format() -> String { "jsonl".to_string() }

impl Default for Config {
    fn default() -> Self {
        Self {
            controller: ControllerConfig::default(),
            tracking: TrackingConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            device_path: String::new(),
            deadzone_stick: default_deadzone_stick(),
            expo_yaw: default_expo_yaw(),
            expo_pitch: default_expo_pitch(),
        }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            min_angle: default_min_angle(),
            max_angle: default_max_angle(),
            gyro_scale: default_gyro_scale(),
            stick_rate: default_stick_rate(),
            tick_rate_hz: default_tick_rate_hz(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: default_telemetry_enabled(),
            log_dir: default_log_dir(),
            max_records_per_file: default_max_records_per_file(),
            max_files_to_keep: default_max_files_to_keep(),
            log_interval_ms: default_log_interval_ms(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use gyro_look::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    fn validate(&self) -> Result<()> {
        // Validate controller configuration
        if self.controller.deadzone_stick < 0.0 || self.controller.deadzone_stick > 0.25 {
            return Err(crate::error::GyroLookError::Config(
                toml::de::Error::custom("deadzone_stick must be between 0.0 and 0.25"),
            ));
        }

        for (name, value) in [
            ("expo_yaw", self.controller.expo_yaw),
            ("expo_pitch", self.controller.expo_pitch),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(crate::error::GyroLookError::Config(
                    toml::de::Error::custom(format!("{} must be between 0.0 and 1.0", name)),
                ));
            }
        }

        // Validate tracking configuration
        for (name, value) in [
            ("min_angle", self.tracking.min_angle),
            ("max_angle", self.tracking.max_angle),
        ] {
            if !(0.0..360.0).contains(&value) {
                return Err(crate::error::GyroLookError::Config(
                    toml::de::Error::custom(format!("{} must be within 0 to 360 degrees", name)),
                ));
            }
        }

        if self.tracking.min_angle >= self.tracking.max_angle {
            return Err(crate::error::GyroLookError::Config(
                toml::de::Error::custom("min_angle must be less than max_angle"),
            ));
        }

        if !self.tracking.gyro_scale.is_finite() || self.tracking.gyro_scale <= 0.0 {
            return Err(crate::error::GyroLookError::Config(
                toml::de::Error::custom("gyro_scale must be a positive number"),
            ));
        }

        if !self.tracking.stick_rate.is_finite()
            || self.tracking.stick_rate <= 0.0
            || self.tracking.stick_rate > 1000.0
        {
            return Err(crate::error::GyroLookError::Config(
                toml::de::Error::custom("stick_rate must be between 0 and 1000 degrees per second"),
            ));
        }

        if self.tracking.tick_rate_hz < 10 || self.tracking.tick_rate_hz > 500 {
            return Err(crate::error::GyroLookError::Config(
                toml::de::Error::custom("tick_rate_hz must be between 10 and 500"),
            ));
        }

        // Validate telemetry configuration
        if self.telemetry.enabled && self.telemetry.log_dir.is_empty() {
            return Err(crate::error::GyroLookError::Config(
                toml::de::Error::custom("telemetry log_dir cannot be empty when enabled"),
            ));
        }

        if self.telemetry.max_records_per_file == 0 {
            return Err(crate::error::GyroLookError::Config(
                toml::de::Error::custom("max_records_per_file must be greater than 0"),
            ));
        }

        if self.telemetry.max_files_to_keep == 0 {
            return Err(crate::error::GyroLookError::Config(
                toml::de::Error::custom("max_files_to_keep must be greater than 0"),
            ));
        }

        if self.telemetry.log_interval_ms == 0 || self.telemetry.log_interval_ms > 60000 {
            return Err(crate::error::GyroLookError::Config(
                toml::de::Error::custom("log_interval_ms must be between 1 and 60000"),
            ));
        }

        if self.telemetry.format != "jsonl" {
            return Err(crate::error::GyroLookError::Config(
                toml::de::Error::custom("log format must be 'jsonl' (only supported format)"),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();

        assert!(config.controller.device_path.is_empty());
        assert_eq!(config.controller.deadzone_stick, 0.05);
        assert_eq!(config.tracking.min_angle, 4.0);
        assert_eq!(config.tracking.max_angle, 334.0);
        assert!((config.tracking.gyro_scale - 2005.352).abs() < 0.01);
        assert_eq!(config.tracking.stick_rate, 100.0);
        assert_eq!(config.tracking.tick_rate_hz, 60);
        assert!(config.telemetry.enabled);
        assert_eq!(config.telemetry.format, "jsonl");
    }

    #[test]
    fn test_deadzone_too_high() {
        let mut config = Config::default();
        config.controller.deadzone_stick = 0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deadzone_negative() {
        let mut config = Config::default();
        config.controller.deadzone_stick = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_expo_yaw_invalid() {
        let mut config = Config::default();
        config.controller.expo_yaw = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_expo_pitch_negative() {
        let mut config = Config::default();
        config.controller.expo_pitch = -0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_min_angle_out_of_range() {
        let mut config = Config::default();
        config.tracking.min_angle = -1.0;
        assert!(config.validate().is_err());

        config.tracking.min_angle = 360.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_max_angle_out_of_range() {
        let mut config = Config::default();
        config.tracking.max_angle = 400.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_min_angle_must_precede_max() {
        let mut config = Config::default();
        config.tracking.min_angle = 200.0;
        config.tracking.max_angle = 100.0;
        assert!(config.validate().is_err());

        config.tracking.min_angle = 100.0;
        config.tracking.max_angle = 100.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_gyro_scale_zero() {
        let mut config = Config::default();
        config.tracking.gyro_scale = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_gyro_scale_nan() {
        let mut config = Config::default();
        config.tracking.gyro_scale = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_stick_rate_zero() {
        let mut config = Config::default();
        config.tracking.stick_rate = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_stick_rate_too_high() {
        let mut config = Config::default();
        config.tracking.stick_rate = 1001.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tick_rate_too_low() {
        let mut config = Config::default();
        config.tracking.tick_rate_hz = 9;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tick_rate_too_high() {
        let mut config = Config::default();
        config.tracking.tick_rate_hz = 501;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_log_dir_when_enabled() {
        let mut config = Config::default();
        config.telemetry.enabled = true;
        config.telemetry.log_dir = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_log_dir_when_disabled() {
        let mut config = Config::default();
        config.telemetry.enabled = false;
        config.telemetry.log_dir = String::new();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_max_records_per_file_zero() {
        let mut config = Config::default();
        config.telemetry.max_records_per_file = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_max_files_to_keep_zero() {
        let mut config = Config::default();
        config.telemetry.max_files_to_keep = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_interval_zero() {
        let mut config = Config::default();
        config.telemetry.log_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_interval_too_high() {
        let mut config = Config::default();
        config.telemetry.log_interval_ms = 60001;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_format() {
        let mut config = Config::default();
        config.telemetry.format = "csv".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let toml_content = r#"
[controller]
deadzone_stick = 0.1

[tracking]
min_angle = 10.0
max_angle = 300.0

[telemetry]
enabled = false
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = Config::load(temp_file.path()).unwrap();
        assert_eq!(config.controller.deadzone_stick, 0.1);
        assert_eq!(config.tracking.min_angle, 10.0);
        assert_eq!(config.tracking.max_angle, 300.0);
        // Unspecified fields fall back to defaults.
        assert_eq!(config.tracking.tick_rate_hz, 60);
        assert!(!config.telemetry.enabled);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let toml_content = r#"
[controller]

[tracking]
gyro_scale = -5.0

[telemetry]
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        assert!(Config::load(temp_file.path()).is_err());
    }

    #[test]
    fn test_load_missing_file_is_error() {
        assert!(Config::load("/nonexistent/gyro-look.toml").is_err());
    }
}
