//! Chunk Retry Loader
//!
//! Wraps a module loader's "fetch chunk by id" primitive with retries:
//! - [`ChunkLoader`]: the retrying decorator — rotates a public-path list,
//!   waits out the configured delay between attempts, and rewrites retried
//!   URLs so intermediate caches see distinct resources
//! - [`ChunkFetcher`]: the seam the embedder implements with its real fetch
//! - [`RetryPolicy`]: retry budget, delay, and URL-rewrite configuration
//!
//! A [`MockChunkFetcher`] is exported for consumers' tests.

mod error;
mod fetcher;
mod retry;

pub use error::{Error, Result};
pub use fetcher::{ChunkFetcher, FetchError, MockChunkFetcher};
pub use retry::{ChunkLoader, RetryPolicy};
