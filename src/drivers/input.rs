//! Button-device driver: owns one raw input device and turns key events into
//! control commands.
//!
//! ## Lifecycle
//!
//! ```text
//!            open ok + identify ok
//!   Closed ─────────────────────────▶ Open
//!     ▲  │ open/identify failed        │ read fault
//!     │  ▼                             │
//!   Backoff ◀──────────────────────────┘
//!     (retry once `retry_delay_ms` has passed since the last failure)
//! ```
//!
//! Every `process()` call is one non-blocking tick.  Device absence, failed
//! queries and read faults are never fatal: the device is dropped and
//! reopened later.  Only the first failure of a streak is logged so an
//! unplugged remote does not flood the log.
//!
//! ## Press translation
//!
//! | Event value     | Action sent               |
//! |-----------------|---------------------------|
//! | 1 (pressed)     | bound action              |
//! | anything else   | `Stop`                    |
//!
//! Every action is sent in [`Mode::Timed`].

use log::{debug, info, trace, warn};

use crate::app::ports::{
    ControlRegistry, InputDevice, InputDeviceOpener, RawInputEvent, elapsed_ms,
};
use crate::control::{Action, DevicePath, Mode, truncated};
use crate::error::DeviceError;

use super::bindings::{Binding, BindingTable};

/// Raw events read per tick.
pub const EVENTS_PER_READ: usize = 64;

/// Default minimum wait between reopen attempts after a failure.
pub const DEFAULT_RETRY_DELAY_MS: u64 = 5000;

pub struct InputDeviceManager<O: InputDeviceOpener> {
    opener: O,
    path: DevicePath,
    bindings: BindingTable,
    device: Option<O::Device>,
    /// Set on the first failure of a streak, cleared by a successful open.
    open_failed: bool,
    last_failure_ms: u64,
    retry_delay_ms: u64,
}

impl<O: InputDeviceOpener> InputDeviceManager<O> {
    /// Store the device path (truncated to [`DevicePath`] capacity) and build
    /// the binding table.  The device is opened lazily on the first tick.
    pub fn new(opener: O, device_path: &str, bindings: &[Binding], retry_delay_ms: u64) -> Self {
        let path: DevicePath = truncated(device_path);
        let bindings = BindingTable::from_bindings(bindings);

        info!("Initialized input device '{}' with input bindings:", path);
        for binding in bindings.bindings() {
            info!("\tCode {} -> {}", binding.code, binding.command);
        }

        Self {
            opener,
            path,
            bindings,
            device: None,
            open_failed: false,
            last_failure_ms: 0,
            retry_delay_ms,
        }
    }

    pub fn device_path(&self) -> &str {
        &self.path
    }

    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    pub fn is_open(&self) -> bool {
        self.device.is_some()
    }

    /// `true` while in a failure streak (device absent or faulted).
    pub fn has_failed(&self) -> bool {
        self.open_failed
    }

    pub fn opener(&self) -> &O {
        &self.opener
    }

    pub fn opener_mut(&mut self) -> &mut O {
        &mut self.opener
    }

    /// Close the device without recording a failure.
    pub fn shutdown(&mut self) {
        if self.device.take().is_some() {
            debug!("Input device '{}' closed", self.path);
        }
    }

    /// Run one tick at time `now_ms`.
    pub fn process(&mut self, now_ms: u64, controls: &mut dyn ControlRegistry) {
        if self.device.is_none() && !self.try_open(now_ms) {
            return;
        }

        let Some(device) = self.device.as_mut() else {
            return;
        };

        let mut events = [RawInputEvent::default(); EVENTS_PER_READ];
        let count = match device.read_events(&mut events) {
            Ok(count) => count.min(EVENTS_PER_READ),
            Err(e) if e.is_would_block() => return,
            Err(e) => {
                // The failure timestamp is left alone so the reopen happens
                // on the next tick.
                self.close_on_failure(e);
                return;
            }
        };

        for event in &events[..count] {
            self.dispatch(event, controls);
        }
    }

    /// Attempt to (re)open the device, honouring the retry backoff.
    /// Returns `true` if the device is now open.
    fn try_open(&mut self, now_ms: u64) -> bool {
        if self.open_failed && elapsed_ms(self.last_failure_ms, now_ms) < self.retry_delay_ms {
            return false;
        }

        let mut device = match self.opener.open(&self.path) {
            Ok(device) => device,
            Err(e) => {
                self.last_failure_ms = now_ms;
                self.close_on_failure(e);
                return false;
            }
        };

        match device.identify() {
            Ok(info) => {
                info!("Input device '{}' is a '{}'", self.path, info.name);
                info!(
                    "Input device bus 0x{:x}, vendor 0x{:x}, product 0x{:x}, version 0x{:x}.",
                    info.bus, info.vendor, info.product, info.version
                );
                self.device = Some(device);
                self.open_failed = false;
                true
            }
            Err(e) => {
                drop(device);
                self.last_failure_ms = now_ms;
                self.close_on_failure(e);
                false
            }
        }
    }

    /// Drop the device and log the failure if it starts a new streak.
    fn close_on_failure(&mut self, err: DeviceError) {
        self.device = None;

        if self.open_failed {
            return;
        }
        self.open_failed = true;

        warn!("Input device '{}': {}, will retry", self.path, err);
    }

    fn dispatch(&self, event: &RawInputEvent, controls: &mut dyn ControlRegistry) {
        if !event.is_key() {
            return;
        }

        let Some(command) = self.bindings.resolve(event.code) else {
            trace!("Unbound input code {} (value {})", event.code, event.value);
            return;
        };

        let Some(control) = controls.find_control(&command.control) else {
            warn!(
                "Couldn't find control '{}' mapped to key code {}.",
                command.control, event.code
            );
            return;
        };

        let action = if event.value == 1 {
            command.action
        } else {
            Action::Stop
        };

        control.set_desired_action(action, Mode::Timed);
    }
}
