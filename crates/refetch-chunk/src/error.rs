use std::result::Result as StdResult;

use thiserror::Error;

use crate::fetcher::FetchError;

/// Convenient result type for chunk loading.
pub type Result<T> = StdResult<T, Error>;

/// Terminal failures of a chunk load. Intermediate fetch failures are only
/// logged; this surfaces once the retry budget is spent.
#[derive(Debug, Error)]
pub enum Error {
    /// The chunk failed on every attempt up to the configured maximum.
    #[error("chunk '{chunk}' failed at attempt {attempts}, retry budget spent")]
    RetryExhausted {
        /// Chunk id that could not be loaded.
        chunk: String,
        /// Final attempt index reached.
        attempts: u32,
        /// The last failure reported by the underlying fetch.
        #[source]
        source: FetchError,
    },
}
