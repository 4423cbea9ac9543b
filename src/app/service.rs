//! Controller service: the hexagonal core.
//!
//! [`ControllerService`] owns the button-device driver and the schedule
//! engine.  The tick loop calls [`tick`](ControllerService::tick) once per
//! cycle; both stimulus sources then dispatch into the same borrowed
//! [`ControlRegistry`].
//!
//! ```text
//!  InputDeviceOpener ──▶ ┌──────────────────────────┐
//!                        │    ControllerService     │ ──▶ ControlRegistry
//!          TimePort ───▶ │  InputDeviceManager      │
//!                        │  ScheduleEngine          │ ──▶ SoundPort
//!                        └──────────────────────────┘
//! ```

use log::{info, warn};

use crate::config::SandmanConfig;
use crate::drivers::input::InputDeviceManager;
use crate::scheduler::ScheduleEngine;

use super::commands::AppCommand;
use super::ports::{ControlRegistry, InputDeviceOpener, SoundPort, TimePort};

pub struct ControllerService<O: InputDeviceOpener> {
    input: InputDeviceManager<O>,
    schedule: ScheduleEngine,
    tick_count: u64,
}

impl<O: InputDeviceOpener> ControllerService<O> {
    /// Build both subsystems from configuration and load the schedule.
    ///
    /// A schedule that fails to load leaves the schedule disabled; the
    /// button path works regardless.
    pub fn new(config: &SandmanConfig, opener: O) -> Self {
        let input = InputDeviceManager::new(
            opener,
            &config.input_device_path,
            &config.input_bindings(),
            config.device_retry_delay_ms,
        );

        let mut schedule = ScheduleEngine::new(config.schedule_cues());
        if let Err(e) = schedule.load(&config.schedule_path) {
            warn!("Schedule disabled: {}", e);
        }

        Self::from_parts(input, schedule)
    }

    pub fn from_parts(input: InputDeviceManager<O>, schedule: ScheduleEngine) -> Self {
        Self {
            input,
            schedule,
            tick_count: 0,
        }
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one cycle: button device first, then the schedule.
    pub fn tick(&mut self, clock: &impl TimePort, controls: &mut impl ControlRegistry) {
        self.tick_count += 1;
        let now_ms = clock.now_ms();

        self.input.process(now_ms, controls);
        self.schedule.process(now_ms, controls);
    }

    // ── Command handling ──────────────────────────────────────

    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        clock: &impl TimePort,
        sounds: &mut impl SoundPort,
    ) {
        match cmd {
            AppCommand::StartSchedule => self.schedule.start(clock.now_ms(), sounds),
            AppCommand::StopSchedule => self.schedule.stop(sounds),
            AppCommand::ToggleSchedule => {
                if self.schedule.is_running() {
                    self.schedule.stop(sounds);
                } else {
                    self.schedule.start(clock.now_ms(), sounds);
                }
            }
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Stop the schedule, release it, and close the input device.
    pub fn shutdown(&mut self, sounds: &mut impl SoundPort) {
        self.schedule.stop(sounds);
        self.schedule.unload();
        self.input.shutdown();
        info!("Controller shut down after {} ticks", self.tick_count);
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn input(&self) -> &InputDeviceManager<O> {
        &self.input
    }

    pub fn schedule(&self) -> &ScheduleEngine {
        &self.schedule
    }

    /// Total ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
