//! Linux evdev input device adapter.
//!
//! Implements [`InputDeviceOpener`] / [`InputDevice`] over a
//! `/dev/input/eventN` character device opened read-only with
//! `O_NONBLOCK`, so a read with nothing pending returns `EAGAIN` instead of
//! hanging the tick loop.
//!
//! Identification uses the `EVIOCGNAME` and `EVIOCGID` ioctls.  Events are
//! read as raw `struct input_event` records and decoded without copying the
//! kernel struct layout into Rust beyond its trailing `type/code/value`
//! fields.

use std::fs::{File, OpenOptions};
use std::io::{self, ErrorKind, Read};
use std::os::fd::AsRawFd;
use std::os::unix::fs::OpenOptionsExt;

use log::debug;

use crate::app::ports::{DeviceInfo, InputDevice, InputDeviceOpener, RawInputEvent};
use crate::control::truncated;
use crate::drivers::input::EVENTS_PER_READ;
use crate::error::DeviceError;

/// `sizeof(struct input_event)` on this target (24 bytes on 64-bit).
pub const EVENT_SIZE: usize = core::mem::size_of::<libc::input_event>();

const NAME_BUFFER_LEN: usize = 256;

// ── ioctl request numbers (asm-generic/ioctl.h) ───────────────

const IOC_READ: u64 = 2;

const fn ioc_read(nr: u64, size: u64) -> u64 {
    (IOC_READ << 30) | (size << 16) | ((b'E' as u64) << 8) | nr
}

/// `EVIOCGNAME(len)`: device display name.
const EVIOCGNAME: u64 = ioc_read(0x06, NAME_BUFFER_LEN as u64);
/// `EVIOCGID`: `struct input_id` (four `u16`s).
const EVIOCGID: u64 = ioc_read(0x02, 8);

// Indices into `struct input_id`.
const ID_BUS: usize = 0;
const ID_VENDOR: usize = 1;
const ID_PRODUCT: usize = 2;
const ID_VERSION: usize = 3;

/// Opens evdev nodes in non-blocking read-only mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct EvdevOpener;

impl InputDeviceOpener for EvdevOpener {
    type Device = EvdevDevice;

    fn open(&mut self, path: &str) -> Result<EvdevDevice, DeviceError> {
        OpenOptions::new()
            .read(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(path)
            .map(|file| EvdevDevice { file })
            .map_err(|e| DeviceError::Open(e.kind()))
    }
}

/// An open evdev node.  The fd is closed when this is dropped.
#[derive(Debug)]
pub struct EvdevDevice {
    file: File,
}

impl InputDevice for EvdevDevice {
    fn identify(&mut self) -> Result<DeviceInfo, DeviceError> {
        let fd = self.file.as_raw_fd();

        let mut name = [0u8; NAME_BUFFER_LEN];
        // SAFETY: `name` is a writable buffer of exactly the length encoded
        // in the request number.
        let rc = unsafe { libc::ioctl(fd, EVIOCGNAME as _, name.as_mut_ptr()) };
        if rc < 0 {
            return Err(DeviceError::Metadata(io::Error::last_os_error().kind()));
        }
        let len = name.iter().position(|&b| b == 0).unwrap_or(name.len());
        let display = String::from_utf8_lossy(&name[..len]);

        let mut id = [0u16; 4];
        // SAFETY: `struct input_id` is four u16s; `id` has that size.
        let rc = unsafe { libc::ioctl(fd, EVIOCGID as _, id.as_mut_ptr()) };
        if rc < 0 {
            debug!(
                "EVIOCGID failed ({}), reporting zero ids",
                io::Error::last_os_error()
            );
            id = [0; 4];
        }

        Ok(DeviceInfo {
            name: truncated(&display),
            bus: id[ID_BUS],
            vendor: id[ID_VENDOR],
            product: id[ID_PRODUCT],
            version: id[ID_VERSION],
        })
    }

    fn read_events(&mut self, buf: &mut [RawInputEvent]) -> Result<usize, DeviceError> {
        let mut raw = [0u8; EVENTS_PER_READ * EVENT_SIZE];
        let want = buf.len().min(EVENTS_PER_READ) * EVENT_SIZE;

        match self.file.read(&mut raw[..want]) {
            Ok(n) => Ok(decode_events(&raw[..n], buf)),
            Err(e) if e.kind() == ErrorKind::WouldBlock => Err(DeviceError::WouldBlock),
            Err(e) => Err(DeviceError::Read(e.kind())),
        }
    }
}

/// Decode whole `input_event` records from `bytes` into `out`.
///
/// The record starts with a `struct timeval` whose size depends on the
/// target; `type`, `code` and `value` are always its last eight bytes.
/// Trailing partial records are ignored.  Returns the number decoded.
pub fn decode_events(bytes: &[u8], out: &mut [RawInputEvent]) -> usize {
    let mut count = 0;
    for (record, slot) in bytes.chunks_exact(EVENT_SIZE).zip(out.iter_mut()) {
        let tail = &record[EVENT_SIZE - 8..];
        *slot = RawInputEvent {
            kind: u16::from_ne_bytes([tail[0], tail[1]]),
            code: u16::from_ne_bytes([tail[2], tail[3]]),
            value: i32::from_ne_bytes([tail[4], tail[5], tail[6], tail[7]]),
        };
        count += 1;
    }
    count
}
