//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements                         | Connects to               |
//! |------------|------------------------------------|---------------------------|
//! | `controls` | ControlRegistry, Control           | Logged desired actions    |
//! | `evdev`    | InputDeviceOpener, InputDevice     | Linux `/dev/input/event*` |
//! | `sound`    | SoundPort                          | In-memory cue FIFO        |
//! | `time`     | TimePort                           | `std::time::Instant`      |

pub mod controls;
#[cfg(target_os = "linux")]
pub mod evdev;
pub mod sound;
pub mod time;
