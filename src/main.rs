//! # Gyro Look
//!
//! Turn DualSense motion input into a bounded look/aim orientation.
//!
//! This binary binds the orientation core to a connected controller:
//! reader threads pump evdev events into a channel, and a fixed-rate tick
//! loop drains them, advances the composer, and publishes the resulting
//! orientation to the trace sink.

use anyhow::Result;
use std::path::Path;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::time::{interval, Duration};
use tracing::{info, warn};

use gyro_look::config::Config;
use gyro_look::controller::device::{DualSense, InputNode};
use gyro_look::controller::motion::{ControlEvent, MotionMapper, PadMapper};
use gyro_look::controller::stick::StickResponse;
use gyro_look::orientation::composer::{OrientationComposer, PitchWindow};
use gyro_look::orientation::sample::SampleConverter;
use gyro_look::telemetry::logger::{TraceLogger, TraceRecord};

/// Configuration file consulted when no path is given on the command line.
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Ticks between status log messages (~10 seconds at 60Hz)
const STATUS_LOG_INTERVAL_TICKS: u64 = 600;

/// Queue depth between the reader threads and the tick loop.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Main entry point for the Gyro Look application
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Set up logging with tracing subscriber
///    - Load configuration (explicit path, default path, or built-in defaults)
///    - Open the DualSense pad and motion nodes
///    - Spawn one blocking reader thread per node, feeding a channel
///
/// 2. **Main Loop**
///    - Apply queued control events as they arrive
///    - On each tick: flush remaining events, advance the composer,
///      publish the orientation to the trace sink
///    - Log status every [`STATUS_LOG_INTERVAL_TICKS`] ticks
///
/// 3. **Graceful Shutdown**
///    - Ctrl+C stops the loop and logs the total tick count
///
/// # Errors
///
/// Returns error if:
/// - The configuration file is malformed or out of range
/// - No DualSense pad/motion pair is found
/// - The telemetry directory cannot be created
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Gyro Look v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;

    let window = PitchWindow::new(config.tracking.min_angle, config.tracking.max_angle);
    let converter = SampleConverter::new(config.tracking.gyro_scale);
    let mut composer = OrientationComposer::new(window, converter, config.tracking.stick_rate);

    let response = StickResponse::from_config(
        config.controller.deadzone_stick,
        config.controller.expo_yaw,
        config.controller.expo_pitch,
    );

    let pad_override = (!config.controller.device_path.is_empty())
        .then_some(config.controller.device_path.as_str());
    let controller = DualSense::open(pad_override)?;
    info!(
        "tracking {} (pad: {}, motion: {})",
        controller.pad.name().unwrap_or("unknown controller"),
        controller.pad.device_path(),
        controller.motion.device_path()
    );

    let (tx, mut rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    spawn_pad_reader(controller.pad, PadMapper::new(response), tx.clone());
    spawn_motion_reader(controller.motion, MotionMapper::new(), tx);

    let mut trace = if config.telemetry.enabled {
        Some(TraceLogger::new(
            &config.telemetry.log_dir,
            config.telemetry.max_records_per_file,
            config.telemetry.max_files_to_keep,
        )?)
    } else {
        None
    };
    let trace_period = Duration::from_millis(config.telemetry.log_interval_ms);

    let mut ticker = interval(Duration::from_micros(
        1_000_000 / u64::from(config.tracking.tick_rate_hz),
    ));

    info!(
        "tick loop running at {}Hz, press Ctrl+C to exit",
        config.tracking.tick_rate_hz
    );

    let mut last_tick = Instant::now();
    let mut last_trace = Instant::now();
    let mut tick_count: u64 = 0;

    loop {
        tokio::select! {
            Some(event) = rx.recv() => {
                apply_event(&mut composer, event);
            }

            _ = ticker.tick() => {
                // Everything the readers queued before this boundary is
                // ingested ahead of the drain.
                while let Ok(event) = rx.try_recv() {
                    apply_event(&mut composer, event);
                }

                let now = Instant::now();
                let dt = (now - last_tick).as_secs_f32();
                last_tick = now;

                composer.tick(dt);
                tick_count += 1;

                if let Some(logger) = trace.as_mut() {
                    if now.duration_since(last_trace) >= trace_period {
                        let (yaw, pitch) = composer.yaw_pitch_degrees();
                        let record = TraceRecord::now(yaw, pitch, composer.scheme().label());
                        if let Err(e) = logger.log(&record) {
                            warn!("trace write failed: {}", e);
                        }
                        last_trace = now;
                    }
                }

                if tick_count % STATUS_LOG_INTERVAL_TICKS == 0 {
                    let (yaw, pitch) = composer.yaw_pitch_degrees();
                    info!(yaw, pitch, scheme = composer.scheme().label(), "tracking");
                }
            }

            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                break;
            }
        }
    }

    info!("Total ticks: {}", tick_count);
    Ok(())
}

/// Routes one control event into the composer.
fn apply_event(composer: &mut OrientationComposer, event: ControlEvent) {
    match event {
        ControlEvent::Motion(sample) => composer.ingest_sample(&sample),
        ControlEvent::Stick(deflection) => composer.set_stick(deflection),
        ControlEvent::Recenter => composer.reset_view(),
        ControlEvent::CycleScheme => {
            composer.cycle_scheme();
        }
    }
}

/// Loads configuration from the first CLI argument, the default path, or
/// built-in defaults when neither file exists.
fn load_config() -> Result<Config> {
    match std::env::args().nth(1) {
        Some(path) => Ok(Config::load(path)?),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            Ok(Config::load(DEFAULT_CONFIG_PATH)?)
        }
        None => {
            info!("no config file at {}, using defaults", DEFAULT_CONFIG_PATH);
            Ok(Config::default())
        }
    }
}

/// Pumps pad-node events into the channel from a blocking reader thread.
fn spawn_pad_reader(mut node: InputNode, mut mapper: PadMapper, tx: mpsc::Sender<ControlEvent>) {
    std::thread::spawn(move || loop {
        match node.fetch_events() {
            Ok(events) => {
                let events: Vec<_> = events.collect();
                for event in events {
                    if let Some(control) = mapper.process_event(&event) {
                        if tx.blocking_send(control).is_err() {
                            return;
                        }
                    }
                }
            }
            Err(e) => {
                warn!("pad read failed: {}", e);
                std::thread::sleep(std::time::Duration::from_millis(500));
            }
        }
    });
}

/// Pumps motion-node events into the channel from a blocking reader thread.
fn spawn_motion_reader(
    mut node: InputNode,
    mut mapper: MotionMapper,
    tx: mpsc::Sender<ControlEvent>,
) {
    std::thread::spawn(move || loop {
        match node.fetch_events() {
            Ok(events) => {
                let events: Vec<_> = events.collect();
                for event in events {
                    if let Some(control) = mapper.process_event(&event) {
                        if tx.blocking_send(control).is_err() {
                            return;
                        }
                    }
                }
            }
            Err(e) => {
                warn!("motion read failed: {}", e);
                std::thread::sleep(std::time::Duration::from_millis(500));
            }
        }
    });
}
