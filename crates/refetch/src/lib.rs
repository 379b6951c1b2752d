//! refetch
//!
//! Resilient loading of externally hosted assets and application code
//! chunks. Given an ordered list of candidate locations for a resource, the
//! loaders attempt them in sequence until one succeeds or the list is
//! exhausted, deduplicating repeated requests and reporting deterministic
//! outcomes.
//!
//! Two independent runtime components, assembled from one [`Config`]:
//! - [`Loader`]: mounts, caches, and destroys named scripts/stylesheets
//!   against a fallback URL chain, driven through the embedder's
//!   [`DomHost`] primitives
//! - [`ChunkLoader`]: wraps the module loader's [`ChunkFetcher`] with
//!   public-path rotation and delay-based retry
//!
//! The host environment serializes the configuration once at startup and
//! supplies the two leaf primitives; everything else lives here.

mod config;
mod error;
pub mod logging;

pub use config::Config;
pub use error::{Error, Result};
pub use refetch_chain::{
    AttemptCounters, FallbackChain, PublicPaths, ResourceKind, RetryDelay, RewritePolicy,
};
pub use refetch_chunk::{ChunkFetcher, ChunkLoader, FetchError, MockChunkFetcher, RetryPolicy};
pub use refetch_loader::{
    Attached, DetachError, DomHost, ElementProps, InlineSwapper, Loader, MockDomHost, NodeId,
    ResourceHandle, SwapAction,
};
