//! The fetch primitive the retry loader wraps.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use parking_lot::Mutex;
use thiserror::Error;

/// Failure reported by the underlying chunk fetch.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct FetchError(
    /// Fetch-layer failure description.
    pub String,
);

/// Trait abstraction over the module loader's chunk fetch.
///
/// `src` mirrors the loader's own source resolution so the decorator can
/// rotate base paths; `fetch` is the wrapped async primitive. The decorator
/// passes fully rewritten URLs to `fetch` and never calls it concurrently
/// for the same logical load.
#[async_trait]
pub trait ChunkFetcher: Send + Sync {
    /// Resolve the URL for `chunk_id` against the given base path.
    fn src(&self, chunk_id: &str, base: &str) -> String;

    /// Fetch and apply the chunk from `url`, resolving once it has loaded
    /// or failed.
    async fn fetch(&self, chunk_id: &str, url: &str) -> Result<(), FetchError>;
}

/// Scriptable fetcher for tests: per-chunk failure counts, per-chunk file
/// suffix, and a log of every URL fetched.
#[derive(Default)]
pub struct MockChunkFetcher {
    /// Chunk id to the number of fetches that should still fail.
    fail_remaining: Mutex<HashMap<String, u32>>,
    /// Chunk id to file suffix; defaults to `.js`.
    suffixes: Mutex<HashMap<String, String>>,
    /// Every fetched URL, in order.
    calls: Mutex<Vec<String>>,
}

impl MockChunkFetcher {
    /// Create a fetcher where every fetch succeeds.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make the next `n` fetches of `chunk_id` fail.
    pub fn fail_times(&self, chunk_id: &str, n: u32) {
        self.fail_remaining.lock().insert(chunk_id.to_string(), n);
    }

    /// Resolve `chunk_id` with the given suffix instead of `.js`.
    pub fn set_suffix(&self, chunk_id: &str, suffix: &str) {
        self.suffixes
            .lock()
            .insert(chunk_id.to_string(), suffix.to_string());
    }

    /// URLs fetched so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl ChunkFetcher for MockChunkFetcher {
    fn src(&self, chunk_id: &str, base: &str) -> String {
        let suffixes = self.suffixes.lock();
        let suffix = suffixes.get(chunk_id).map_or(".js", String::as_str);
        format!("{base}{chunk_id}{suffix}")
    }

    async fn fetch(&self, chunk_id: &str, url: &str) -> Result<(), FetchError> {
        self.calls.lock().push(url.to_string());
        let mut remaining = self.fail_remaining.lock();
        match remaining.get_mut(chunk_id) {
            Some(n) if *n > 0 => {
                *n -= 1;
                Err(FetchError(format!("load of {url} failed")))
            }
            _ => Ok(()),
        }
    }
}
