//! Actuator command vocabulary shared by the button and schedule paths.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::name::{ControlName, truncated};

/// What a control should be doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveUp,
    MoveDown,
    Stop,
}

impl Action {
    /// Short lowercase label used in binding and schedule listings.
    pub const fn label(self) -> &'static str {
        match self {
            Self::MoveUp => "up",
            Self::MoveDown => "down",
            Self::Stop => "stop",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How long a requested movement lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Movement auto-stops after a bounded duration.
    Timed,
    /// Movement lasts while held.
    Manual,
}

/// A movement direction as written in config and schedule files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Match `text` by prefix: `up...` or `down...`.  `up` is tested first.
    pub fn from_prefix(text: &str) -> Option<Self> {
        if text.starts_with("up") {
            Some(Self::Up)
        } else if text.starts_with("down") {
            Some(Self::Down)
        } else {
            None
        }
    }
}

impl From<Direction> for Action {
    fn from(d: Direction) -> Self {
        match d {
            Direction::Up => Self::MoveUp,
            Direction::Down => Self::MoveDown,
        }
    }
}

/// A control name paired with the action requested of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub control: ControlName,
    pub action: Action,
}

impl Command {
    /// Build a command; `control` is truncated to the name capacity.
    pub fn new(control: &str, action: Action) -> Self {
        Self {
            control: truncated(control),
            action,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.control, self.action)
    }
}
