//! # DualSense Device Discovery
//!
//! Locates and opens the two evdev nodes a DualSense controller exposes:
//!
//! - the **pad node** carrying sticks and buttons, and
//! - the **motion node** ("Motion Sensors") carrying the gyroscope and
//!   accelerometer axes.
//!
//! Both nodes report the same vendor/product pair, wired or Bluetooth:
//!
//! - Vendor ID: 0x054c (Sony)
//! - Product ID: 0x0ce6 (DualSense)
//!
//! The touchpad node is ignored.

use evdev::Device;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{GyroLookError, Result};

/// DualSense vendor ID (Sony)
const DUALSENSE_VENDOR_ID: u16 = 0x054c;

/// DualSense product ID (wired and Bluetooth)
const DUALSENSE_PRODUCT_ID: u16 = 0x0ce6;

/// Name fragment identifying the motion-sensors node.
const MOTION_NODE_MARKER: &str = "Motion Sensors";

/// Name fragment identifying the touchpad node, which is not used.
const TOUCHPAD_NODE_MARKER: &str = "Touchpad";

/// One opened evdev node.
pub struct InputNode {
    device: Device,
    device_path: String,
}

impl InputNode {
    /// Opens a specific evdev device path.
    ///
    /// # Errors
    ///
    /// Returns `Controller` if the device cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let device = Device::open(path)
            .map_err(|e| GyroLookError::Controller(format!("failed to open {}: {}", path.display(), e)))?;
        Ok(Self {
            device,
            device_path: path.to_string_lossy().to_string(),
        })
    }

    /// The `/dev/input/eventX` path this node was opened from.
    #[must_use]
    pub fn device_path(&self) -> &str {
        &self.device_path
    }

    /// Human-readable device name from evdev.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.device.name()
    }

    /// Fetches pending input events.
    ///
    /// Blocks until at least one event is available, so call this from a
    /// dedicated reader thread.
    ///
    /// # Errors
    ///
    /// Returns `Controller` if fetching fails (e.g. the controller
    /// disconnected).
    pub fn fetch_events(&mut self) -> Result<impl Iterator<Item = evdev::InputEvent> + '_> {
        self.device
            .fetch_events()
            .map_err(|e| GyroLookError::Controller(format!("failed to fetch events: {}", e)))
    }
}

/// The pair of DualSense endpoints needed for look tracking.
pub struct DualSense {
    /// Sticks and buttons.
    pub pad: InputNode,
    /// Gyroscope and accelerometer.
    pub motion: InputNode,
}

impl DualSense {
    /// Detects and opens the first available DualSense controller.
    ///
    /// Scans `/dev/input/event*` in sorted order for deterministic selection
    /// when several controllers are connected, matching vendor and product
    /// IDs and splitting the pad node from the motion node by name.
    ///
    /// # Arguments
    ///
    /// * `pad_override` - Explicit pad device path; when set, only the
    ///   motion node is auto-detected
    ///
    /// # Errors
    ///
    /// - `ControllerNotFound`: no DualSense pad/motion pair on the system
    /// - `Controller`: `/dev/input` unreadable or an explicit path failed
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use gyro_look::controller::device::DualSense;
    ///
    /// let controller = DualSense::open(None)?;
    /// println!("pad at {}", controller.pad.device_path());
    /// println!("motion at {}", controller.motion.device_path());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn open(pad_override: Option<&str>) -> Result<Self> {
        let input_dir = Path::new("/dev/input");

        if !input_dir.exists() {
            return Err(GyroLookError::Controller(
                "/dev/input directory not found".to_string(),
            ));
        }

        let mut entries: Vec<_> = std::fs::read_dir(input_dir)
            .map_err(|e| GyroLookError::Controller(format!("failed to read /dev/input: {}", e)))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| GyroLookError::Controller(format!("failed to read directory entry: {}", e)))?;

        // Sorted for deterministic selection with multiple controllers.
        entries.sort_by_key(|entry| entry.path());

        let mut pad = match pad_override {
            Some(path) => {
                let node = InputNode::open(path)?;
                info!("using configured pad device at: {}", path);
                Some(node)
            }
            None => None,
        };
        let mut motion: Option<InputNode> = None;

        for entry in entries {
            if pad.is_some() && motion.is_some() {
                break;
            }

            let path = entry.path();
            match path.file_name() {
                Some(filename) if filename.to_string_lossy().starts_with("event") => {}
                _ => continue,
            }

            let device = match Device::open(&path) {
                Ok(device) => device,
                Err(e) => {
                    // Permission denied or other errors, skip the node.
                    debug!("could not open {}: {}", path.display(), e);
                    continue;
                }
            };

            let id = device.input_id();
            debug!(
                "found input device: {} (vendor: 0x{:04x}, product: 0x{:04x})",
                path.display(),
                id.vendor(),
                id.product()
            );

            if id.vendor() != DUALSENSE_VENDOR_ID || id.product() != DUALSENSE_PRODUCT_ID {
                continue;
            }

            let name = device.name().unwrap_or("").to_string();
            let node = InputNode {
                device,
                device_path: path.to_string_lossy().to_string(),
            };

            if name.contains(MOTION_NODE_MARKER) {
                if motion.is_none() {
                    info!("found DualSense motion node at: {}", node.device_path);
                    motion = Some(node);
                }
            } else if name.contains(TOUCHPAD_NODE_MARKER) {
                debug!("ignoring touchpad node at: {}", node.device_path);
            } else if pad.is_none() {
                info!("found DualSense pad node at: {}", node.device_path);
                pad = Some(node);
            }
        }

        match (pad, motion) {
            (Some(pad), Some(motion)) => Ok(Self { pad, motion }),
            _ => Err(GyroLookError::ControllerNotFound),
        }
    }
}
