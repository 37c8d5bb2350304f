//! Bounded log trail and a recording sink.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::{BgmTrack, Cue, Importance, Sink};

/// One line of the textual trail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Monotonic sequence number, not reset by eviction.
    pub seq: u64,
    pub message: String,
    pub importance: Importance,
}

/// Append-only log with a fixed capacity. The oldest entry is evicted first.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogTrail {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    next_seq: u64,
}

impl LogTrail {
    /// Create an empty trail. A capacity of 0 is treated as 1.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            next_seq: 0,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, importance: Importance) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            seq: self.next_seq,
            message: message.into(),
            importance,
        });
        self.next_seq += 1;
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for LogTrail {
    fn default() -> Self {
        Self::new(50)
    }
}

/// Sink that records every notification.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    /// Every cue, in order.
    pub cues: Vec<Cue>,
    /// Every background music change, in order.
    pub bgm: Vec<BgmTrack>,
    pub trail: LogTrail,
}

impl EventLog {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            cues: Vec::new(),
            bgm: Vec::new(),
            trail: LogTrail::new(capacity),
        }
    }

    /// How many times a cue was played.
    #[must_use]
    pub fn count(&self, cue: Cue) -> usize {
        self.cues.iter().filter(|&&c| c == cue).count()
    }

    /// Was a cue played at all?
    #[must_use]
    pub fn heard(&self, cue: Cue) -> bool {
        self.cues.contains(&cue)
    }

    /// Does any retained log line contain `needle`?
    #[must_use]
    pub fn logged(&self, needle: &str) -> bool {
        self.trail.iter().any(|e| e.message.contains(needle))
    }
}

impl Sink for EventLog {
    fn notify(&mut self, cue: Cue) {
        self.cues.push(cue);
    }

    fn log(&mut self, message: &str, importance: Importance) {
        self.trail.push(message, importance);
    }

    fn change_bgm(&mut self, track: BgmTrack) {
        self.bgm.push(track);
    }

    fn clear_log(&mut self) {
        self.trail.clear();
    }
}
