//! Mock adapters for integration tests.
//!
//! Records every control call and sound cue so tests can assert on the full
//! command history without touching a real input device or motor.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use sandman::app::ports::{
    Control, ControlRegistry, DeviceInfo, InputDevice, InputDeviceOpener, RawInputEvent,
    SoundPort, TimePort,
};
use sandman::control::{Action, Mode};
use sandman::error::DeviceError;

// ── Control call record ───────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlCall {
    pub control: String,
    pub action: Action,
    pub mode: Mode,
}

impl ControlCall {
    pub fn timed(control: &str, action: Action) -> Self {
        Self {
            control: control.to_string(),
            action,
            mode: Mode::Timed,
        }
    }
}

// ── MockControls ──────────────────────────────────────────────

struct MockControl {
    name: String,
    log: Rc<RefCell<Vec<ControlCall>>>,
}

impl Control for MockControl {
    fn set_desired_action(&mut self, action: Action, mode: Mode) {
        self.log.borrow_mut().push(ControlCall {
            control: self.name.clone(),
            action,
            mode,
        });
    }
}

pub struct MockControls {
    controls: Vec<MockControl>,
    log: Rc<RefCell<Vec<ControlCall>>>,
}

#[allow(dead_code)]
impl MockControls {
    pub fn new(names: &[&str]) -> Self {
        let log = Rc::new(RefCell::new(Vec::new()));
        let controls = names
            .iter()
            .map(|name| MockControl {
                name: (*name).to_string(),
                log: Rc::clone(&log),
            })
            .collect();
        Self { controls, log }
    }

    pub fn bed() -> Self {
        Self::new(&["back", "legs", "elev"])
    }

    pub fn calls(&self) -> Vec<ControlCall> {
        self.log.borrow().clone()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}

impl ControlRegistry for MockControls {
    fn find_control(&mut self, name: &str) -> Option<&mut dyn Control> {
        self.controls
            .iter_mut()
            .find(|c| c.name == name)
            .map(|c| c as &mut dyn Control)
    }
}

// ── ManualClock ───────────────────────────────────────────────

#[derive(Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

#[allow(dead_code)]
impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl TimePort for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

// ── RecordingSounds ───────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSounds {
    pub cues: Vec<String>,
}

impl SoundPort for RecordingSounds {
    fn enqueue(&mut self, path: &str) {
        self.cues.push(path.to_string());
    }
}

// ── MockDevice / MockOpener ───────────────────────────────────

/// Shared script of what the device does on each read.
pub type ReadScript = Rc<RefCell<VecDeque<Result<Vec<RawInputEvent>, DeviceError>>>>;

pub struct MockDevice {
    reads: ReadScript,
}

impl InputDevice for MockDevice {
    fn identify(&mut self) -> Result<DeviceInfo, DeviceError> {
        Ok(DeviceInfo::default())
    }

    fn read_events(&mut self, buf: &mut [RawInputEvent]) -> Result<usize, DeviceError> {
        match self.reads.borrow_mut().pop_front() {
            Some(Ok(events)) => {
                let n = events.len().min(buf.len());
                buf[..n].copy_from_slice(&events[..n]);
                Ok(n)
            }
            Some(Err(e)) => Err(e),
            None => Err(DeviceError::WouldBlock),
        }
    }
}

/// Opener whose device is present or absent as the test dictates.
pub struct MockOpener {
    pub present: Rc<Cell<bool>>,
    pub attempts: Rc<Cell<usize>>,
    pub reads: ReadScript,
}

#[allow(dead_code)]
impl MockOpener {
    pub fn new(present: bool) -> Self {
        Self {
            present: Rc::new(Cell::new(present)),
            attempts: Rc::new(Cell::new(0)),
            reads: Rc::default(),
        }
    }

    pub fn push_events(&self, events: Vec<RawInputEvent>) {
        self.reads.borrow_mut().push_back(Ok(events));
    }

    pub fn push_error(&self, err: DeviceError) {
        self.reads.borrow_mut().push_back(Err(err));
    }
}

impl InputDeviceOpener for MockOpener {
    type Device = MockDevice;

    fn open(&mut self, _path: &str) -> Result<MockDevice, DeviceError> {
        self.attempts.set(self.attempts.get() + 1);
        if !self.present.get() {
            return Err(DeviceError::Open(std::io::ErrorKind::NotFound));
        }
        Ok(MockDevice {
            reads: Rc::clone(&self.reads),
        })
    }
}
