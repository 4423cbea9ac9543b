//! Schedule replay engine.
//!
//! Two states: **Stopped** (no cursor) and **Running** (cursor + the time the
//! current entry's wait began).  Each `process()` call advances at most one
//! entry, even if the caller fell behind by several delays; the timeline
//! then drifts behind wall-clock time rather than skipping entries.  After
//! the last entry the cursor wraps to 0 and the timeline repeats until
//! stopped.

use std::path::Path;

use log::{info, warn};

use crate::app::ports::{ControlRegistry, SoundPort, elapsed_ms};
use crate::control::Mode;
use crate::error::ScheduleError;

use super::parser::{ScheduleEntry, load_schedule};

/// Sound cues played on start and stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleCues {
    pub start: String,
    pub stop: String,
}

pub struct ScheduleEngine {
    /// `None` until a schedule has been loaded successfully.
    entries: Option<Vec<ScheduleEntry>>,
    /// Index of the entry being waited on; `None` while stopped.
    cursor: Option<usize>,
    phase_start_ms: u64,
    cues: ScheduleCues,
}

impl ScheduleEngine {
    /// An engine with no schedule loaded.  Start/process are no-ops until
    /// [`load`](Self::load) succeeds.
    pub fn new(cues: ScheduleCues) -> Self {
        Self {
            entries: None,
            cursor: None,
            phase_start_ms: 0,
            cues,
        }
    }

    /// An engine loaded with an already parsed timeline.
    pub fn with_entries(entries: Vec<ScheduleEntry>, cues: ScheduleCues) -> Self {
        let mut engine = Self::new(cues);
        engine.install(entries);
        engine
    }

    /// Load the schedule file.  On failure the engine stays disabled; there
    /// is no retry.
    pub fn load(&mut self, path: &Path) -> Result<usize, ScheduleError> {
        self.unload();

        info!("Initializing the schedule from '{}'...", path.display());
        match load_schedule(path) {
            Ok(entries) => {
                info!("\tsucceeded");
                let count = entries.len();
                self.install(entries);
                Ok(count)
            }
            Err(e) => {
                warn!("\tfailed: {}", e);
                Err(e)
            }
        }
    }

    /// Drop the loaded schedule.  Stops without playing a cue.
    pub fn unload(&mut self) {
        self.cursor = None;
        self.entries = None;
    }

    fn install(&mut self, entries: Vec<ScheduleEntry>) {
        info!("The following schedule is loaded:");
        for entry in &entries {
            info!("\t{}", entry);
        }
        self.entries = Some(entries);
        self.cursor = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.entries.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        self.entries.as_deref().unwrap_or_default()
    }

    pub fn start(&mut self, now_ms: u64, sounds: &mut dyn SoundPort) {
        let Some(entries) = self.entries.as_ref() else {
            return;
        };
        if self.is_running() {
            return;
        }
        if entries.is_empty() {
            warn!("Schedule is empty, not starting.");
            return;
        }

        self.cursor = Some(0);
        self.phase_start_ms = now_ms;
        sounds.enqueue(&self.cues.start);
        info!("Schedule started.");
    }

    pub fn stop(&mut self, sounds: &mut dyn SoundPort) {
        if !self.is_running() {
            return;
        }

        self.cursor = None;
        sounds.enqueue(&self.cues.stop);
        info!("Schedule stopped.");
    }

    /// Run one tick at time `now_ms`.
    pub fn process(&mut self, now_ms: u64, controls: &mut dyn ControlRegistry) {
        let (Some(entries), Some(index)) = (self.entries.as_ref(), self.cursor) else {
            return;
        };
        let Some(entry) = entries.get(index) else {
            warn!("Schedule cursor {} out of range, stopping.", index);
            self.cursor = None;
            return;
        };

        if elapsed_ms(self.phase_start_ms, now_ms) < u64::from(entry.delay_secs) * 1000 {
            return;
        }

        let next = (index + 1) % entries.len();
        self.cursor = Some(next);
        self.phase_start_ms = now_ms;

        // A missing control does not hold the timeline back.
        let Some(control) = controls.find_control(&entry.command.control) else {
            warn!(
                "Schedule couldn't find control \"{}\". Moving to event {}.",
                entry.command.control, next
            );
            return;
        };

        control.set_desired_action(entry.command.action, Mode::Timed);
        info!("Schedule moving to event {}.", next);
    }
}
