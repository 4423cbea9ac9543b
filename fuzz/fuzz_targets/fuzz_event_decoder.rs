//! Fuzz target: evdev record decoder
//!
//! Arbitrary read buffers (including torn trailing records) must decode
//! without panicking and never report more events than fit in either the
//! buffer or the output slice.
//!
//! cargo fuzz run fuzz_event_decoder

#![no_main]

use libfuzzer_sys::fuzz_target;
use sandman::adapters::evdev::{EVENT_SIZE, decode_events};
use sandman::app::ports::RawInputEvent;

fuzz_target!(|data: &[u8]| {
    let mut out = [RawInputEvent::default(); 64];
    let n = decode_events(data, &mut out);
    assert!(n <= out.len());
    assert!(n <= data.len() / EVENT_SIZE);
});
