//! Sandman Controller: Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  EvdevOpener        ControlTable       MonotonicClock          │
//! │  (InputDevice)      (ControlRegistry)  (TimePort)              │
//! │  SoundQueue                                                    │
//! │  (SoundPort)                                                   │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │           ControllerService (pure logic)               │    │
//! │  │  InputDeviceManager · ScheduleEngine                   │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `sandman [CONFIG.json]`.  Log level comes from `RUST_LOG`
//! (default `info`).  SIGINT or SIGTERM ends the tick loop; the service is
//! then shut down and the remaining sound cues are played.
#![deny(unused_must_use)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use tracing_subscriber::EnvFilter;

use sandman::adapters::sound::SoundQueue;
use sandman::app::ports::{ControlRegistry, InputDeviceOpener, TimePort};
use sandman::app::service::ControllerService;
use sandman::config::{DEFAULT_CONFIG_PATH, SandmanConfig};
use sandman::error::{ConfigError, Error};

#[derive(Parser, Debug)]
#[command(
    name = "sandman",
    about = "Motorized bed controller: button remote and timed schedule",
    version
)]
struct Args {
    /// JSON config file [default: /etc/sandman/sandman.json]
    config: Option<PathBuf>,
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("logger init failed: {e}"))
}

/// Load the config.  Only the default location may be absent, in which case
/// the built-in defaults are used; a path given on the command line must
/// exist.
fn load_config(explicit: Option<&Path>) -> Result<SandmanConfig> {
    let path = explicit.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
    match SandmanConfig::load(path) {
        Ok(config) => Ok(config),
        Err(ConfigError::Io(std::io::ErrorKind::NotFound)) if explicit.is_none() => {
            warn!("No config at '{}', running with defaults", path.display());
            Ok(SandmanConfig::default())
        }
        Err(e) => Err(anyhow::Error::new(Error::from(e)))
            .with_context(|| format!("loading '{}'", path.display())),
    }
}

/// Hand every queued cue to the player.  Returns how many were played.
fn play_pending(sounds: &mut SoundQueue) -> usize {
    let mut played = 0;
    while let Some(cue) = sounds.pop() {
        info!("Playing sound '{}'", cue);
        played += 1;
    }
    played
}

/// Tick until `term` is raised, then shut the service down and flush the
/// sound queue.  Returns the number of cues played.
fn run<O: InputDeviceOpener>(
    service: &mut ControllerService<O>,
    clock: &impl TimePort,
    controls: &mut impl ControlRegistry,
    sounds: &mut SoundQueue,
    tick: Duration,
    term: &AtomicBool,
) -> usize {
    let mut played = 0;
    while !term.load(Ordering::Relaxed) {
        service.tick(clock, controls);
        played += play_pending(sounds);
        std::thread::sleep(tick);
    }

    info!("Termination requested");
    service.shutdown(sounds);
    played + play_pending(sounds)
}

#[cfg(target_os = "linux")]
fn main() -> Result<()> {
    use std::sync::Arc;

    use signal_hook::consts::{SIGINT, SIGTERM};

    use sandman::adapters::controls::ControlTable;
    use sandman::adapters::evdev::EvdevOpener;
    use sandman::adapters::time::MonotonicClock;
    use sandman::app::commands::AppCommand;

    let args = Args::parse();

    // ── 1. Logging ────────────────────────────────────────────
    init_logging()?;
    info!("Sandman v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Config (file or defaults) ──────────────────────────
    let config = load_config(args.config.as_deref())?;

    // ── 3. Termination flag ───────────────────────────────────
    let term = Arc::new(AtomicBool::new(false));
    for signal in [SIGINT, SIGTERM] {
        signal_hook::flag::register(signal, Arc::clone(&term))
            .with_context(|| format!("registering handler for signal {signal}"))?;
    }

    // ── 4. Adapters ───────────────────────────────────────────
    let clock = MonotonicClock::new();
    let mut controls = ControlTable::new(config.controls.iter().map(String::as_str));
    let mut sounds = SoundQueue::new();

    // ── 5. Service ────────────────────────────────────────────
    let mut service = ControllerService::new(&config, EvdevOpener);
    if config.autostart_schedule {
        service.handle_command(AppCommand::StartSchedule, &clock, &mut sounds);
    }

    // ── 6. Tick loop until SIGINT / SIGTERM ───────────────────
    let tick = Duration::from_millis(config.tick_interval_ms);
    let played = run(
        &mut service,
        &clock,
        &mut controls,
        &mut sounds,
        tick,
        &term,
    );

    info!(
        "Sandman stopped after {} ticks ({} sound cues played)",
        service.tick_count(),
        played
    );
    Ok(())
}

#[cfg(not(target_os = "linux"))]
fn main() -> Result<()> {
    let _args = Args::parse();
    init_logging()?;
    info!("Sandman requires Linux evdev input devices");
    anyhow::bail!("unsupported platform")
}
