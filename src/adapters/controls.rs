//! Logging control table.
//!
//! Implements [`ControlRegistry`] for the host binary.  Each
//! [`LoggedControl`] records and logs the latest requested action; the motor
//! driver that turns that request into movement is a separate component.

use log::info;

use crate::app::ports::{Control, ControlRegistry};
use crate::control::{Action, ControlName, Mode, truncated};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedControl {
    name: ControlName,
    desired: Option<(Action, Mode)>,
}

impl LoggedControl {
    pub fn new(name: &str) -> Self {
        Self {
            name: truncated(name),
            desired: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The last action requested, if any.
    pub fn desired(&self) -> Option<(Action, Mode)> {
        self.desired
    }
}

impl Control for LoggedControl {
    fn set_desired_action(&mut self, action: Action, mode: Mode) {
        info!("Control '{}' -> {} ({:?})", self.name, action, mode);
        self.desired = Some((action, mode));
    }
}

#[derive(Debug, Clone, Default)]
pub struct ControlTable {
    controls: Vec<LoggedControl>,
}

impl ControlTable {
    pub fn new<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            controls: names.into_iter().map(LoggedControl::new).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&LoggedControl> {
        self.controls.iter().find(|c| c.name() == name)
    }

    pub fn controls(&self) -> &[LoggedControl] {
        &self.controls
    }
}

impl ControlRegistry for ControlTable {
    fn find_control(&mut self, name: &str) -> Option<&mut dyn Control> {
        self.controls
            .iter_mut()
            .find(|c| c.name() == name)
            .map(|c| c as &mut dyn Control)
    }
}
