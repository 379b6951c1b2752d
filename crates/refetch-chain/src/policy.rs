//! Retry timing and URL-rewrite policies for chunk fetches.

use std::{fmt, sync::Arc, time::Duration};

/// Delay computed per attempt count.
pub type DelayFn = dyn Fn(u32) -> Duration + Send + Sync;

/// Rewrites a fetch URL for a given attempt count.
pub type RewriteFn = dyn Fn(&str, u32) -> String + Send + Sync;

/// How long to wait before a retry attempt.
#[derive(Clone)]
pub enum RetryDelay {
    /// The same pause before every retry.
    Fixed(Duration),
    /// Pause computed from the attempt count, e.g. for backoff curves.
    PerAttempt(Arc<DelayFn>),
}

impl RetryDelay {
    /// Delay to apply before the given attempt. Never consulted for
    /// attempt 0, which fetches immediately.
    pub fn duration_for(&self, attempt: u32) -> Duration {
        match self {
            Self::Fixed(d) => *d,
            Self::PerAttempt(f) => f(attempt),
        }
    }
}

impl Default for RetryDelay {
    fn default() -> Self {
        Self::Fixed(Duration::from_millis(3000))
    }
}

impl fmt::Debug for RetryDelay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(d) => f.debug_tuple("Fixed").field(d).finish(),
            Self::PerAttempt(_) => f.write_str("PerAttempt(..)"),
        }
    }
}

/// Rewrites retried URLs so caches between the client and a fallback path
/// treat each retry as a distinct resource.
#[derive(Clone)]
pub enum RewritePolicy {
    /// Append or extend a `reload=<n>` query marker on attempts after the
    /// first; identity at attempt 0.
    ReloadQuery,
    /// Caller-supplied rewrite.
    Custom(Arc<RewriteFn>),
}

impl RewritePolicy {
    /// Rewrite `url` for the given attempt count.
    pub fn apply(&self, url: &str, attempt: u32) -> String {
        match self {
            Self::ReloadQuery => reload_query(url, attempt),
            Self::Custom(f) => f(url, attempt),
        }
    }
}

impl Default for RewritePolicy {
    fn default() -> Self {
        Self::ReloadQuery
    }
}

impl fmt::Debug for RewritePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReloadQuery => f.write_str("ReloadQuery"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Default rewrite: `url` untouched at attempt 0, `?reload=n` when the URL
/// has no query string yet, `&reload=n` when it does.
fn reload_query(url: &str, attempt: u32) -> String {
    if attempt == 0 {
        url.to_string()
    } else if url.contains('?') {
        format!("{url}&reload={attempt}")
    } else {
        format!("{url}?reload={attempt}")
    }
}
