//! Logging setup shared by embedders and tests.

use tracing_subscriber::EnvFilter;

/// List of crate targets that constitute "our" logs.
pub fn our_crates() -> &'static [&'static str] {
    &["refetch", "refetch_chain", "refetch_chunk", "refetch_loader"]
}

/// Build a filter directive string that sets the same `level` for all of
/// our crates.
pub fn level_spec_for(level: &str) -> String {
    let lvl = level.to_ascii_lowercase();
    our_crates()
        .iter()
        .map(|t| format!("{}={}", t, lvl))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install a fmt subscriber. `RUST_LOG` wins when set; otherwise our crates
/// log at `info`. Safe to call once per process.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_spec_for("info")));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
