//! Schedule file parser.
//!
//! ```text
//! # anything before `start` is ignored
//! start
//! # delay (s), control, direction
//! 5, back, up
//! 10, legs, down
//! end
//! # anything after `end` is ignored
//! ```
//!
//! Lines starting with `#` are comments.  Leading whitespace is skipped
//! before matching `start` / `end` (prefix match, rest of the line ignored).
//! An entry line needs two commas; lines without them are skipped silently.
//! Entries with a bad direction or delay are dropped with a warning and the
//! parse continues.

use core::fmt;
use std::fs;
use std::path::Path;

use log::warn;

use crate::control::{Action, Command, Direction};
use crate::error::ScheduleError;

/// One step of the timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    /// Seconds to wait after the previous entry (or after start).
    pub delay_secs: u32,
    pub command: Command,
}

impl ScheduleEntry {
    pub fn new(delay_secs: u32, control: &str, direction: Direction) -> Self {
        Self {
            delay_secs,
            command: Command::new(control, Action::from(direction)),
        }
    }
}

impl fmt::Display for ScheduleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.delay_secs / 3600;
        let mins = (self.delay_secs % 3600) / 60;
        let secs = self.delay_secs % 60;
        write!(f, "+{hours}h {mins:02}m {secs:02}s -> {}", self.command)
    }
}

/// Read and parse a schedule file.
///
/// The whole file is read up front; the handle is released before parsing.
pub fn load_schedule(path: &Path) -> Result<Vec<ScheduleEntry>, ScheduleError> {
    let bytes = fs::read(path).map_err(|e| ScheduleError::FileUnavailable(e.kind()))?;
    parse_schedule(&String::from_utf8_lossy(&bytes))
}

/// Parse schedule text into entries, in file order.
pub fn parse_schedule(text: &str) -> Result<Vec<ScheduleEntry>, ScheduleError> {
    let mut lines = text.lines().filter(|line| !line.starts_with('#'));

    if !lines.any(|line| line.trim_start().starts_with("start")) {
        return Err(ScheduleError::MissingStart);
    }

    let mut entries = Vec::new();
    for line in lines {
        let line = line.trim_start();
        if line.starts_with("end") {
            return Ok(entries);
        }

        match parse_entry(line) {
            Ok(Some(entry)) => entries.push(entry),
            Ok(None) => {}
            Err(InvalidEntry::Direction(rest)) => {
                warn!("\"{rest}\" is not a valid control direction.  This entry will be ignored.");
            }
            Err(InvalidEntry::Delay(field)) => {
                warn!("\"{field}\" is not a valid delay.  This entry will be ignored.");
            }
        }
    }

    Err(ScheduleError::MissingEnd)
}

#[derive(Debug, PartialEq, Eq)]
enum InvalidEntry<'a> {
    Direction(&'a str),
    Delay(&'a str),
}

/// Parse `delay, control, direction`.  `Ok(None)` if the line lacks the
/// two separators.
fn parse_entry(line: &str) -> Result<Option<ScheduleEntry>, InvalidEntry<'_>> {
    let Some((delay, rest)) = line.split_once(',') else {
        return Ok(None);
    };
    let Some((control, direction)) = rest.split_once(',') else {
        return Ok(None);
    };

    let direction = direction.trim();
    let Some(parsed_direction) = Direction::from_prefix(direction) else {
        return Err(InvalidEntry::Direction(direction));
    };

    let delay = delay.trim();
    let Some(delay_secs) = parse_delay(delay) else {
        return Err(InvalidEntry::Delay(delay));
    };

    Ok(Some(ScheduleEntry::new(
        delay_secs,
        control.trim(),
        parsed_direction,
    )))
}

/// Leading decimal digits of `field`; trailing text is ignored (`"10s"` is
/// 10).  `None` if there are no leading digits or the value overflows.
fn parse_delay(field: &str) -> Option<u32> {
    let field = field.strip_prefix('+').unwrap_or(field);
    let digits_end = field
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(field.len());
    field[..digits_end].parse().ok()
}
