//! Fixed-capacity names.
//!
//! Device paths and control names are always short and known at
//! configuration time, so they live in stack-allocated `heapless::String`s.
//! Anything longer than the capacity is truncated silently: the stored value
//! is the longest prefix of at most `N` bytes that ends on a UTF-8 character
//! boundary.

use heapless::String;

/// Maximum bytes kept from a control name ("back", "legs", "elev", ...).
pub const CONTROL_NAME_CAPACITY: usize = 16;

/// Maximum bytes kept from an input device path.
pub const DEVICE_PATH_CAPACITY: usize = 128;

/// Maximum bytes kept from a device's self-reported display name.
pub const DEVICE_NAME_CAPACITY: usize = 64;

pub type ControlName = String<CONTROL_NAME_CAPACITY>;
pub type DevicePath = String<DEVICE_PATH_CAPACITY>;
pub type DeviceName = String<DEVICE_NAME_CAPACITY>;

/// Copy `s` into a bounded string, truncating on overflow.
pub fn truncated<const N: usize>(s: &str) -> String<N> {
    let mut end = s.len().min(N);
    while !s.is_char_boundary(end) {
        end -= 1;
    }

    let mut out = String::new();
    // `end <= N`, so this cannot overflow.
    let _ = out.push_str(&s[..end]);
    out
}
