//! Sandman controller library.
//!
//! Exposes the dispatch core (button device driver, schedule parser and
//! engine, port traits) for the binary and for integration testing.  The
//! evdev adapter is only built on Linux.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod drivers;
pub mod error;
#[cfg(test)]
mod log_capture;
pub mod scheduler;
