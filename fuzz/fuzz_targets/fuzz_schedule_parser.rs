//! Fuzz target: schedule file parser
//!
//! Feeds arbitrary bytes through the same lossy decoding the loader uses and
//! checks:
//! - No panics
//! - Every parsed entry can be rendered for the startup listing
//!
//! cargo fuzz run fuzz_schedule_parser

#![no_main]

use libfuzzer_sys::fuzz_target;
use sandman::scheduler::parse_schedule;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    if let Ok(entries) = parse_schedule(&text) {
        for entry in &entries {
            let _ = entry.to_string();
        }
    }
});
