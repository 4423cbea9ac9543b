//! Time-driven schedule replay.
//!
//! ```text
//!   sandman.sched ──▶ parser ──▶ [ScheduleEntry] ──▶ ScheduleEngine
//!                                                       │ process(now)
//!                                                       ▼
//!                                                ControlRegistry
//! ```
//!
//! The schedule is loaded once at startup.  A missing or malformed file
//! leaves the engine disabled for the life of the process.

pub mod engine;
pub mod parser;

pub use engine::{ScheduleCues, ScheduleEngine};
pub use parser::{ScheduleEntry, load_schedule, parse_schedule};
