//! Unified error types for the sandman controller.
//!
//! A single `Error` enum that every subsystem can convert into, keeping the
//! binary's startup error handling uniform.  All variants are `Copy` so they
//! can be passed through the tick path without allocation.
//!
//! None of these are ever returned from a `process()` tick: the input and
//! schedule subsystems absorb their failures and degrade instead.

use core::fmt;
use std::io::ErrorKind;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The raw input device could not be opened, queried, or read.
    Device(DeviceError),
    /// The schedule file could not be loaded.
    Schedule(ScheduleError),
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Device(e) => write!(f, "input device: {e}"),
            Self::Schedule(e) => write!(f, "schedule: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Input device errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceError {
    /// Opening the device file failed (absent, unplugged, no permission).
    Open(ErrorKind),
    /// The device opened but its name/id query failed.
    Metadata(ErrorKind),
    /// Non-blocking read found no pending data.  Not a fault.
    WouldBlock,
    /// Any other read failure, typically a disconnect.
    Read(ErrorKind),
}

impl DeviceError {
    /// `true` for the idle "no data yet" condition.
    pub const fn is_would_block(self) -> bool {
        matches!(self, Self::WouldBlock)
    }
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open(kind) => write!(f, "open failed ({kind})"),
            Self::Metadata(kind) => write!(f, "name query failed ({kind})"),
            Self::WouldBlock => write!(f, "no data available"),
            Self::Read(kind) => write!(f, "read failed ({kind})"),
        }
    }
}

impl From<DeviceError> for Error {
    fn from(e: DeviceError) -> Self {
        Self::Device(e)
    }
}

// ---------------------------------------------------------------------------
// Schedule errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleError {
    /// The schedule file could not be opened or read.
    FileUnavailable(ErrorKind),
    /// No `start` line was found.
    MissingStart,
    /// A `start` line was found but no `end` line after it.
    MissingEnd,
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileUnavailable(kind) => write!(f, "file unavailable ({kind})"),
            Self::MissingStart => write!(f, "missing 'start' line"),
            Self::MissingEnd => write!(f, "missing 'end' line"),
        }
    }
}

impl From<ScheduleError> for Error {
    fn from(e: ScheduleError) -> Self {
        Self::Schedule(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The config file could not be read.
    Io(ErrorKind),
    /// The config file is not valid JSON for [`SandmanConfig`](crate::config::SandmanConfig).
    Parse,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(kind) => write!(f, "I/O error ({kind})"),
            Self::Parse => write!(f, "malformed JSON"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
