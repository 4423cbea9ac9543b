//! Port traits: the hexagonal boundary between dispatch logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ InputDeviceManager / ScheduleEngine
//! ```
//!
//! Driven adapters (evdev device, controls, clock, sound queue) implement
//! these traits.  The subsystems receive them at call sites, so the dispatch
//! core never touches a file descriptor or a motor directly.

use crate::control::{Action, DeviceName, Mode};
use crate::error::DeviceError;

// ───────────────────────────────────────────────────────────────
// Control ports (driven adapter: domain → actuator driver)
// ───────────────────────────────────────────────────────────────

/// One movable section of the furniture.
pub trait Control {
    /// Request a movement.  The driver decides how to realise it.
    fn set_desired_action(&mut self, action: Action, mode: Mode);
}

/// Looks up controls by name.
///
/// Both stimulus sources borrow the same registry once per tick; neither
/// owns it.
pub trait ControlRegistry {
    /// Find the control called `name`, or `None` if no such control exists.
    fn find_control(&mut self, name: &str) -> Option<&mut dyn Control>;
}

// ───────────────────────────────────────────────────────────────
// Time port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock.
pub trait TimePort {
    /// Milliseconds since an arbitrary fixed origin.
    fn now_ms(&self) -> u64;
}

/// Milliseconds from `since` to `now`; zero if the clock went backwards.
pub const fn elapsed_ms(since: u64, now: u64) -> u64 {
    now.saturating_sub(since)
}

// ───────────────────────────────────────────────────────────────
// Sound port
// ───────────────────────────────────────────────────────────────

/// Audio-cue queue.  Enqueueing never blocks.
pub trait SoundPort {
    fn enqueue(&mut self, path: &str);
}

// ───────────────────────────────────────────────────────────────
// Input device ports (driven adapter: kernel input device → domain)
// ───────────────────────────────────────────────────────────────

/// `EV_KEY` from `linux/input-event-codes.h`: key and button events.
pub const EV_KEY: u16 = 0x01;

/// One raw event as delivered by the device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawInputEvent {
    /// Event type (`EV_KEY`, `EV_SYN`, ...).
    pub kind: u16,
    /// Key or axis code.
    pub code: u16,
    /// 1 = pressed, 0 = released, 2 = autorepeat for keys.
    pub value: i32,
}

impl RawInputEvent {
    pub const fn key(code: u16, value: i32) -> Self {
        Self {
            kind: EV_KEY,
            code,
            value,
        }
    }

    pub const fn is_key(&self) -> bool {
        self.kind == EV_KEY
    }
}

/// Identification reported by a freshly opened device.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceInfo {
    pub name: DeviceName,
    pub bus: u16,
    pub vendor: u16,
    pub product: u16,
    pub version: u16,
}

/// An open input device.  Dropping it releases the underlying handle.
pub trait InputDevice {
    /// Query the display name and bus/vendor/product/version ids.
    fn identify(&mut self) -> Result<DeviceInfo, DeviceError>;

    /// Read as many pending events as fit in `buf` without blocking.
    ///
    /// Returns the number of events written.  No pending data is reported as
    /// [`DeviceError::WouldBlock`].
    fn read_events(&mut self, buf: &mut [RawInputEvent]) -> Result<usize, DeviceError>;
}

/// Opens input devices by path in non-blocking read mode.
pub trait InputDeviceOpener {
    type Device: InputDevice;

    fn open(&mut self, path: &str) -> Result<Self::Device, DeviceError>;
}
