//! Shared data structures for the refetch loaders.
//!
//! This crate holds the types both loaders are built on:
//! - [`FallbackChain`]: ordered candidate URLs for one logical resource
//! - [`AttemptCounters`]: per-resource progress through a chain
//! - [`PublicPaths`]: clamped base-path rotation for chunk fetches
//! - [`RetryDelay`] and [`RewritePolicy`]: retry timing and cache-busting
//!
//! All of these are constructed once from configuration and immutable
//! afterwards, except [`AttemptCounters`], which only ever advances.

mod chain;
mod counters;
mod error;
mod paths;
mod policy;

pub use chain::{FallbackChain, ResourceKind};
pub use counters::AttemptCounters;
pub use error::{Error, Result};
pub use paths::PublicPaths;
pub use policy::{RetryDelay, RewritePolicy};
