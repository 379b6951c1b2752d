//! Fallback Resource Loader
//!
//! Mounts named scripts and stylesheets against an ordered fallback URL
//! chain supplied at construction time:
//! - [`Loader`]: the primary type — `mount`, `get`, and `destroy` named
//!   resources, caching successful loads and resuming a chain where a
//!   previous mount left off
//! - [`DomHost`]: the environment-binding seam the embedder implements with
//!   its document's element insertion primitives
//! - [`InlineSwapper`]: the fire-and-forget sibling for tags written
//!   directly into the page
//!
//! A [`MockDomHost`] is exported for consumers' tests.

mod error;
mod host;
mod inline;
mod loader;

pub use error::{Error, Result};
pub use host::{Attached, DetachError, DomHost, ElementProps, MockDomHost, NodeId};
pub use inline::{InlineSwapper, SwapAction};
pub use loader::{Loader, ResourceHandle};
