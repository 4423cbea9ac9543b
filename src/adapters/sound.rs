//! In-memory audio-cue queue.
//!
//! Implements [`SoundPort`] as a bounded FIFO of sound-file paths.  The
//! audio player drains it with [`SoundQueue::pop`].  When full, the oldest
//! cue is dropped so enqueueing never blocks or fails.

use std::collections::VecDeque;

use log::{debug, warn};

use crate::app::ports::SoundPort;

/// Cues kept before the oldest is discarded.
pub const SOUND_QUEUE_CAPACITY: usize = 8;

#[derive(Debug, Default)]
pub struct SoundQueue {
    pending: VecDeque<String>,
}

impl SoundQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next cue to play, oldest first.
    pub fn pop(&mut self) -> Option<String> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl SoundPort for SoundQueue {
    fn enqueue(&mut self, path: &str) {
        if self.pending.len() >= SOUND_QUEUE_CAPACITY {
            if let Some(dropped) = self.pending.pop_front() {
                warn!("Sound queue full, dropping '{}'", dropped);
            }
        }
        debug!("Queued sound '{}'", path);
        self.pending.push_back(path.to_string());
    }
}
