//! Control vocabulary: what can be asked of an actuator, and by which name.
//!
//! Both stimulus sources (button device, schedule) produce [`Command`]s and
//! hand them to a [`ControlRegistry`](crate::app::ports::ControlRegistry).

pub mod command;
pub mod name;

pub use command::{Action, Command, Direction, Mode};
pub use name::{ControlName, DeviceName, DevicePath, truncated};
