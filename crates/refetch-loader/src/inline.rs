//! URL rotation for tags written directly into the page.
//!
//! Inline tags are not cached or tracked like mounted resources. When one of
//! them fires its error event the host asks the swapper for a replacement:
//! stylesheet links get a clone inserted immediately before the failed tag,
//! scripts get re-emitted through a document write because a failed script
//! tag cannot be reattached. Rotation stops silently once a tag's list is
//! exhausted — these are fire-and-forget page-load assets.

use std::collections::HashMap;

use parking_lot::Mutex;

use refetch_chain::{FallbackChain, ResourceKind};

/// Replacement the host should apply for a failed inline tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapAction {
    /// Clone the failed link tag with this href and insert the clone
    /// immediately before it.
    CloneBefore {
        /// Replacement stylesheet URL.
        url: String,
    },
    /// Emit a fresh script tag for this src via a document write.
    RewriteScript {
        /// Replacement script URL.
        url: String,
    },
}

/// One counter per tag position, rotating through that tag's chain.
pub struct InlineSwapper {
    /// Chains in page order; index 0 of each chain is the URL originally
    /// written into the document.
    chains: Vec<FallbackChain>,
    /// Tag position to the chain index last handed out.
    counters: Mutex<HashMap<usize, u32>>,
}

impl InlineSwapper {
    /// Build a swapper over the inline tag chains, in page order.
    pub fn new(chains: Vec<FallbackChain>) -> Self {
        Self {
            chains,
            counters: Mutex::new(HashMap::new()),
        }
    }

    /// URL the host should write into the page for the tag at `index`.
    pub fn primary_url(&self, index: usize) -> Option<&str> {
        self.chains.get(index).and_then(|c| c.url_at(0))
    }

    /// Called from the tag's error handler. Returns the next replacement for
    /// the tag at `index`, or `None` once its alternates are exhausted.
    pub fn on_error(&self, index: usize) -> Option<SwapAction> {
        let chain = self.chains.get(index)?;
        let mut counters = self.counters.lock();
        let slot = counters.entry(index).or_insert(0);
        // Slot 0 is the tag originally written into the page.
        *slot += 1;
        let url = chain.url_at(*slot)?.to_string();
        Some(match chain.kind() {
            ResourceKind::Stylesheet => SwapAction::CloneBefore { url },
            ResourceKind::Script => SwapAction::RewriteScript { url },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swapper() -> InlineSwapper {
        InlineSwapper::new(vec![
            FallbackChain::new(
                "0",
                vec![
                    "https://a/app.js".into(),
                    "https://b/app.js".into(),
                    "https://c/app.js".into(),
                ],
            )
            .expect("script chain"),
            FallbackChain::new(
                "1",
                vec!["https://a/site.css".into(), "https://b/site.css".into()],
            )
            .expect("style chain"),
        ])
    }

    #[test]
    fn scripts_rewrite_and_links_clone() {
        let sw = swapper();
        assert_eq!(sw.primary_url(0), Some("https://a/app.js"));
        assert_eq!(
            sw.on_error(0),
            Some(SwapAction::RewriteScript {
                url: "https://b/app.js".into()
            })
        );
        assert_eq!(
            sw.on_error(1),
            Some(SwapAction::CloneBefore {
                url: "https://b/site.css".into()
            })
        );
    }

    #[test]
    fn rotation_exhausts_silently() {
        let sw = swapper();
        assert!(sw.on_error(1).is_some());
        assert_eq!(sw.on_error(1), None);
        assert_eq!(sw.on_error(1), None);
    }

    #[test]
    fn unknown_tag_position_yields_nothing() {
        let sw = swapper();
        assert_eq!(sw.on_error(9), None);
    }

    #[test]
    fn counters_are_per_tag() {
        let sw = swapper();
        let _first = sw.on_error(0);
        // Tag 1 still starts at its first alternate.
        assert_eq!(
            sw.on_error(1),
            Some(SwapAction::CloneBefore {
                url: "https://b/site.css".into()
            })
        );
    }
}
