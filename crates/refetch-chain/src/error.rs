use std::result::Result as StdResult;

use thiserror::Error;

/// Convenient result type for chain construction.
pub type Result<T> = StdResult<T, Error>;

/// Errors raised while validating configured chains.
#[derive(Debug, Error)]
pub enum Error {
    /// A chain was registered without any URLs.
    #[error("fallback chain '{name}' has no URLs")]
    EmptyChain {
        /// Name of the offending chain.
        name: String,
    },

    /// A URL's suffix maps to neither a script nor a stylesheet.
    #[error("cannot determine resource kind for '{url}' in chain '{name}'")]
    UnknownKind {
        /// Name of the offending chain.
        name: String,
        /// URL whose suffix was not recognized.
        url: String,
    },

    /// A chain mixes script and stylesheet URLs.
    #[error("chain '{name}' mixes resource kinds at '{url}'")]
    MixedKinds {
        /// Name of the offending chain.
        name: String,
        /// First URL disagreeing with the chain's kind.
        url: String,
    },
}
