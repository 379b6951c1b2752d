//! The retrying decorator around a chunk fetch.

use std::{collections::HashMap, sync::Arc};

use once_cell::sync::Lazy;
use regex::Regex;
use tokio::time::sleep;
use tracing::{debug, error, trace};

use refetch_chain::{PublicPaths, RetryDelay, RewritePolicy};

use crate::{
    error::{Error, Result},
    fetcher::ChunkFetcher,
};

/// File extension probe on a resolved chunk URL. The extension decides which
/// attempt counter a fetch belongs to, since a chunk may request a script
/// and a stylesheet independently.
static EXT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.([0-9a-z]+)(?:[?#]|$)").expect("valid extension pattern"));

/// Extension of `url`, lowercased, ignoring query and fragment.
fn extension_of(url: &str) -> Option<String> {
    EXT_RE
        .captures(url)
        .map(|caps| caps[1].to_ascii_lowercase())
}

/// Retry configuration for a [`ChunkLoader`].
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum retry count; 0 disables retry entirely.
    pub max_retries: u32,
    /// Wait applied before every attempt after the first.
    pub delay: RetryDelay,
    /// Cache-busting rewrite applied to every attempt's URL.
    pub rewrite: RewritePolicy,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delay: RetryDelay::default(),
            rewrite: RewritePolicy::default(),
        }
    }
}

/// Wraps a [`ChunkFetcher`] with path rotation and delay-based retry.
///
/// The public-path sequence and policy are fixed at construction. Each
/// `load` call keeps its own attempt bookkeeping and discards it on
/// success; nothing is shared between logical loads.
pub struct ChunkLoader {
    /// The wrapped fetch primitive.
    fetcher: Arc<dyn ChunkFetcher>,
    /// Origin plus fallback base paths, clamped rotation.
    paths: PublicPaths,
    /// Retry budget, delay, and rewrite configuration.
    policy: RetryPolicy,
}

impl ChunkLoader {
    /// Build a loader over the given fetch primitive.
    pub fn new(fetcher: Arc<dyn ChunkFetcher>, paths: PublicPaths, policy: RetryPolicy) -> Self {
        Self {
            fetcher,
            paths,
            policy,
        }
    }

    /// Load a chunk, retrying against the rotated public paths until it
    /// loads or the retry budget is spent.
    ///
    /// Attempt 0 fetches immediately from the origin path; later attempts
    /// wait out the configured delay, use the clamped fallback path for
    /// their index, and carry a `reload` rewrite so intermediate caches do
    /// not replay the failed response. Intermediate failures are logged;
    /// only the final one propagates.
    pub async fn load(&self, chunk_id: &str) -> Result<()> {
        // One counter per file extension, shared across the retries of this
        // logical load only.
        let mut attempts: HashMap<String, u32> = HashMap::new();
        loop {
            let probe = self.fetcher.src(chunk_id, self.paths.base_for(0));
            let ext = extension_of(&probe).unwrap_or_else(|| "js".to_string());
            let attempt = {
                let slot = attempts.entry(ext.clone()).or_insert(0);
                let current = *slot;
                *slot += 1;
                current
            };

            let base = self.paths.base_for(attempt);
            let url = self.fetcher.src(chunk_id, base);
            let url = self.policy.rewrite.apply(&url, attempt);

            if attempt > 0 {
                let delay = self.policy.delay.duration_for(attempt);
                trace!(chunk = chunk_id, attempt, ?delay, "waiting before retry");
                sleep(delay).await;
            }

            trace!(chunk = chunk_id, attempt, %url, %ext, "fetching chunk");
            match self.fetcher.fetch(chunk_id, &url).await {
                Ok(()) => {
                    debug!(chunk = chunk_id, attempt, "chunk loaded");
                    return Ok(());
                }
                Err(err) => {
                    error!(chunk = chunk_id, attempt, %err, "chunk fetch failed");
                    if attempt < self.policy.max_retries {
                        continue;
                    }
                    return Err(Error::RetryExhausted {
                        chunk: chunk_id.to_string(),
                        attempts: attempt,
                        source: err,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_probe_ignores_query_and_fragment() {
        assert_eq!(extension_of("/a/chunk.7f3a.js"), Some("js".to_string()));
        assert_eq!(extension_of("/a/chunk.css?v=2"), Some("css".to_string()));
        assert_eq!(extension_of("/a/chunk.CSS#frag"), Some("css".to_string()));
        assert_eq!(extension_of("/a/chunk"), None);
    }
}
