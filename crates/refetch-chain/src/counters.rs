//! Per-resource attempt bookkeeping.

use std::collections::HashMap;

/// How far through its fallback chain each resource has progressed.
///
/// Entries are created lazily on first use and only ever advance. A resource
/// that failed twice and is mounted again later resumes at its third URL
/// instead of re-fetching locations already known to be dead this session.
#[derive(Debug, Default)]
pub struct AttemptCounters {
    /// Resource name to the index of the next URL to attempt.
    seen: HashMap<String, u32>,
}

impl AttemptCounters {
    /// Create an empty counter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current attempt index for `name`, creating the entry at 0 if absent.
    pub fn current(&mut self, name: &str) -> u32 {
        *self.seen.entry(name.to_string()).or_insert(0)
    }

    /// Advance `name` to the next URL and return the new index.
    pub fn advance(&mut self, name: &str) -> u32 {
        let slot = self.seen.entry(name.to_string()).or_insert(0);
        *slot += 1;
        *slot
    }
}
