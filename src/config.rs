//! Controller configuration
//!
//! All tunable parameters for the sandman controller.  Loaded from a JSON
//! file at startup; any field left out takes its default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::control::{Action, Command, Direction};
use crate::drivers::bindings::Binding;
use crate::drivers::input::DEFAULT_RETRY_DELAY_MS;
use crate::error::ConfigError;
use crate::scheduler::ScheduleCues;

/// Where the binary looks for its config when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/sandman/sandman.json";

/// One key code bound to a control direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingConfig {
    pub code: u16,
    pub control: String,
    pub direction: Direction,
}

impl BindingConfig {
    pub fn new(code: u16, control: &str, direction: Direction) -> Self {
        Self {
            code,
            control: control.to_string(),
            direction,
        }
    }
}

impl From<&BindingConfig> for Binding {
    fn from(b: &BindingConfig) -> Self {
        Binding::new(b.code, Command::new(&b.control, Action::from(b.direction)))
    }
}

/// Core controller configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandmanConfig {
    // --- Input ---
    /// evdev node of the button remote
    pub input_device_path: String,
    /// Key code → control bindings (last duplicate wins)
    pub bindings: Vec<BindingConfig>,
    /// Minimum wait between device reopen attempts (milliseconds)
    pub device_retry_delay_ms: u64,

    // --- Schedule ---
    /// Schedule timeline file
    pub schedule_path: PathBuf,
    /// Sound played when the schedule starts
    pub schedule_start_cue: String,
    /// Sound played when the schedule stops
    pub schedule_stop_cue: String,
    /// Start the schedule as soon as the controller boots
    pub autostart_schedule: bool,

    // --- Controls ---
    /// Names of the movable sections
    pub controls: Vec<String>,

    // --- Timing ---
    /// Main loop interval (milliseconds)
    pub tick_interval_ms: u64,
}

impl Default for SandmanConfig {
    fn default() -> Self {
        Self {
            // Input
            input_device_path: "/dev/input/event0".into(),
            bindings: default_bindings(),
            device_retry_delay_ms: DEFAULT_RETRY_DELAY_MS,

            // Schedule
            schedule_path: PathBuf::from("/etc/sandman/sandman.sched"),
            schedule_start_cue: "/usr/share/sandman/audio/sched_start.wav".into(),
            schedule_stop_cue: "/usr/share/sandman/audio/sched_stop.wav".into(),
            autostart_schedule: false,

            // Controls
            controls: vec!["back".into(), "legs".into(), "elev".into()],

            // Timing
            tick_interval_ms: 50, // 20 Hz
        }
    }
}

/// Button remote layout shipped with the bed.
pub fn default_bindings() -> Vec<BindingConfig> {
    vec![
        BindingConfig::new(311, "back", Direction::Up),
        BindingConfig::new(310, "back", Direction::Down),
        BindingConfig::new(305, "legs", Direction::Up),
        BindingConfig::new(308, "legs", Direction::Down),
        BindingConfig::new(304, "elev", Direction::Up),
        BindingConfig::new(307, "elev", Direction::Down),
    ]
}

impl SandmanConfig {
    /// Read, parse and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.kind()))?;
        let config: Self = serde_json::from_str(&text).map_err(|_| ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the controller cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.device_retry_delay_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "device_retry_delay_ms must be > 0",
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("tick_interval_ms must be > 0"));
        }
        if self.controls.is_empty() {
            return Err(ConfigError::ValidationFailed("at least one control is required"));
        }
        if self.controls.iter().any(String::is_empty) {
            return Err(ConfigError::ValidationFailed("control names must not be empty"));
        }
        if self.bindings.iter().any(|b| b.control.is_empty()) {
            return Err(ConfigError::ValidationFailed(
                "binding control names must not be empty",
            ));
        }
        Ok(())
    }

    pub fn input_bindings(&self) -> Vec<Binding> {
        self.bindings.iter().map(Binding::from).collect()
    }

    pub fn schedule_cues(&self) -> ScheduleCues {
        ScheduleCues {
            start: self.schedule_start_cue.clone(),
            stop: self.schedule_stop_cue.clone(),
        }
    }
}
