//! Application core: dispatch logic, zero direct I/O.
//!
//! All interaction with devices, motors, clocks and sound happens through
//! **port traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod commands;
pub mod ports;
pub mod service;
