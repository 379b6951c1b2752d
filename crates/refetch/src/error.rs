use std::result::Result as StdResult;

use thiserror::Error;

/// Convenient result type for configuration handling.
pub type Result<T> = StdResult<T, Error>;

/// Errors raised while parsing configuration or assembling the loaders.
#[derive(Debug, Error)]
pub enum Error {
    /// The configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A configured chain failed validation.
    #[error(transparent)]
    Chain(#[from] refetch_chain::Error),
}
