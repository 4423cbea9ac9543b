//! Stimulus drivers.
//!
//! `input` owns the button device; `bindings` maps its key codes to
//! control commands.

pub mod bindings;
pub mod input;
