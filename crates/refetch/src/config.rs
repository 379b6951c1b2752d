//! The configuration surface supplied once at startup.

use std::{
    collections::{BTreeMap, HashMap},
    result::Result as StdResult,
    sync::Arc,
    time::Duration,
};

use serde::{Deserialize, Serialize};

use refetch_chain::{FallbackChain, PublicPaths, ResourceKind, RetryDelay, RewritePolicy};
use refetch_chunk::{ChunkFetcher, ChunkLoader, RetryPolicy};
use refetch_loader::{DomHost, ElementProps, InlineSwapper, Loader};

use crate::error::Result;

/// Startup configuration for both loaders. Immutable once the loaders are
/// built from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Resource name to its ordered fallback URL chain (first entry is
    /// attempted first; at least one per chain).
    #[serde(default)]
    pub resources: BTreeMap<String, Vec<String>>,

    /// URL chains for tags written directly into the page, in page order.
    #[serde(default)]
    pub inline: Vec<Vec<String>>,

    /// Element properties applied to every created script element.
    #[serde(default = "default_script_props")]
    pub script_props: BTreeMap<String, String>,

    /// Element properties applied to every created stylesheet element.
    #[serde(default)]
    pub style_props: BTreeMap<String, String>,

    /// Origin public path chunk fetches start from.
    #[serde(default = "default_public_path")]
    pub public_path: String,

    /// Ordered fallback base paths rotated through on chunk retries.
    #[serde(default)]
    pub fallback_paths: Vec<String>,

    /// Maximum chunk retry count; 0 disables retry.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Fixed pause between chunk retries, in milliseconds. Replaceable with
    /// a per-attempt function via [`Config::chunk_loader_with`].
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

/// Scripts are fetched cross-origin by default so error events carry detail.
fn default_script_props() -> BTreeMap<String, String> {
    BTreeMap::from([("crossorigin".to_string(), "anonymous".to_string())])
}

/// Serve chunks from the site root unless configured otherwise.
fn default_public_path() -> String {
    "/".to_string()
}

/// Default chunk retry budget.
fn default_max_retries() -> u32 {
    3
}

/// Default fixed pause between chunk retries.
fn default_retry_delay_ms() -> u64 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resources: BTreeMap::new(),
            inline: Vec::new(),
            script_props: default_script_props(),
            style_props: BTreeMap::new(),
            public_path: default_public_path(),
            fallback_paths: Vec::new(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl Config {
    /// Parse a configuration document from JSON.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Build the fallback resource loader over the embedder's host.
    pub fn loader(&self, host: Arc<dyn DomHost>) -> Result<Loader> {
        let chains = self
            .resources
            .iter()
            .map(|(name, urls)| FallbackChain::new(name.clone(), urls.clone()))
            .collect::<StdResult<Vec<_>, _>>()?;
        let mut kind_props: HashMap<ResourceKind, ElementProps> = HashMap::new();
        kind_props.insert(ResourceKind::Script, self.script_props.clone());
        kind_props.insert(ResourceKind::Stylesheet, self.style_props.clone());
        Ok(Loader::new(host, chains, kind_props))
    }

    /// Build the swapper for inline page tags.
    pub fn inline_swapper(&self) -> Result<InlineSwapper> {
        let chains = self
            .inline
            .iter()
            .enumerate()
            .map(|(idx, urls)| FallbackChain::new(idx.to_string(), urls.clone()))
            .collect::<StdResult<Vec<_>, _>>()?;
        Ok(InlineSwapper::new(chains))
    }

    /// Build the chunk retry loader with the configured fixed delay and the
    /// default `reload=<n>` rewrite.
    pub fn chunk_loader(&self, fetcher: Arc<dyn ChunkFetcher>) -> ChunkLoader {
        self.chunk_loader_with(
            fetcher,
            RetryPolicy {
                max_retries: self.max_retries,
                delay: RetryDelay::Fixed(Duration::from_millis(self.retry_delay_ms)),
                rewrite: RewritePolicy::default(),
            },
        )
    }

    /// Build the chunk retry loader with a caller-supplied policy, for
    /// per-attempt delay functions or custom URL rewrites.
    pub fn chunk_loader_with(&self, fetcher: Arc<dyn ChunkFetcher>, policy: RetryPolicy) -> ChunkLoader {
        let paths = PublicPaths::new(self.public_path.clone(), self.fallback_paths.clone());
        ChunkLoader::new(fetcher, paths, policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_surface() {
        let cfg = Config::default();
        assert_eq!(cfg.max_retries, 3);
        assert_eq!(cfg.retry_delay_ms, 3000);
        assert_eq!(cfg.public_path, "/");
        assert_eq!(
            cfg.script_props.get("crossorigin").map(String::as_str),
            Some("anonymous")
        );
    }

    #[test]
    fn parses_a_full_document() {
        let cfg = Config::from_json(
            r#"{
                "resources": {
                    "vendor": ["https://cdn.a.com/v.js", "https://cdn.b.com/v.js"]
                },
                "inline": [["https://cdn.a.com/site.css", "https://cdn.b.com/site.css"]],
                "public_path": "/assets/",
                "fallback_paths": ["https://cdn.b.com/assets/"],
                "max_retries": 2,
                "retry_delay_ms": 500
            }"#,
        )
        .expect("valid config");
        assert_eq!(cfg.resources["vendor"].len(), 2);
        assert_eq!(cfg.max_retries, 2);
        // Defaults still apply to omitted fields.
        assert_eq!(
            cfg.script_props.get("crossorigin").map(String::as_str),
            Some("anonymous")
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(Config::from_json(r#"{"integrity": true}"#).is_err());
    }

    #[test]
    fn invalid_chains_fail_at_build_time() {
        let cfg = Config::from_json(r#"{"resources": {"vendor": []}}"#).expect("parses");
        let host = refetch_loader::MockDomHost::new();
        assert!(cfg.loader(host).is_err());
    }
}
