//! Inbound commands to the controller service.
//!
//! These represent actions requested by the outside world (voice, console,
//! boot config) that [`ControllerService`](super::service::ControllerService)
//! interprets and acts upon.

/// Commands that external adapters can send into the controller core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Begin replaying the schedule from its first entry.
    StartSchedule,

    /// Stop the schedule; no further scheduled commands are sent.
    StopSchedule,

    /// Start if stopped, stop if running.
    ToggleSchedule,
}
