use std::result::Result as StdResult;

use thiserror::Error;

use crate::host::DetachError;

/// Convenient result type for the loader crate.
pub type Result<T> = StdResult<T, Error>;

/// Unified error type for the fallback resource loader.
#[derive(Debug, Error)]
pub enum Error {
    /// Every URL in the resource's fallback chain failed, or no chain is
    /// registered for the name. Terminal for this name.
    #[error("fallback chain for '{name}' exhausted after {attempts} attempts")]
    ChainExhausted {
        /// Resource name whose chain ran out.
        name: String,
        /// Attempt index reached when the chain ran out.
        attempts: u32,
    },

    /// `destroy` was called for a resource that never loaded successfully.
    #[error("resource '{name}' is not mounted")]
    NotMounted {
        /// Resource name with no cached handle.
        name: String,
    },

    /// The host failed to remove the cached element. The cache entry is left
    /// in place, so the resource is still considered loaded.
    #[error("failed to detach resource '{name}'")]
    Detach {
        /// Resource name whose element could not be removed.
        name: String,
        /// Underlying removal failure reported by the host.
        #[source]
        source: DetachError,
    },
}
