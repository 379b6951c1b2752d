//! Fallback chains and the resource kind decided at registration time.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// What a chain's URLs point at. Decided once when the chain is registered,
/// so the loader never re-inspects suffixes on the hot path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// A `.js` asset mounted as a script element.
    Script,
    /// A `.css` asset mounted as a stylesheet link element.
    Stylesheet,
}

impl ResourceKind {
    /// Classify a URL by its path suffix, ignoring any query or fragment.
    pub fn from_url(url: &str) -> Option<Self> {
        let path = url.split(['?', '#']).next().unwrap_or(url);
        if path.ends_with(".js") {
            Some(Self::Script)
        } else if path.ends_with(".css") {
            Some(Self::Stylesheet)
        } else {
            None
        }
    }
}

/// Ordered candidate locations for one logical resource.
///
/// The URL sequence is immutable after construction; index 0 is attempted
/// first. All URLs must agree on the resource kind.
#[derive(Debug, Clone)]
pub struct FallbackChain {
    /// Logical resource name the chain is registered under.
    name: String,
    /// Kind shared by every URL in the chain.
    kind: ResourceKind,
    /// Candidate URLs in attempt order.
    urls: Vec<String>,
}

impl FallbackChain {
    /// Validate and build a chain. Fails on empty chains, unrecognized
    /// suffixes, and chains mixing scripts with stylesheets.
    pub fn new(name: impl Into<String>, urls: Vec<String>) -> Result<Self> {
        let name = name.into();
        let Some(first) = urls.first() else {
            return Err(Error::EmptyChain { name });
        };
        let kind = ResourceKind::from_url(first).ok_or_else(|| Error::UnknownKind {
            name: name.clone(),
            url: first.clone(),
        })?;
        for url in &urls[1..] {
            match ResourceKind::from_url(url) {
                Some(k) if k == kind => {}
                Some(_) => {
                    return Err(Error::MixedKinds {
                        name,
                        url: url.clone(),
                    });
                }
                None => {
                    return Err(Error::UnknownKind {
                        name,
                        url: url.clone(),
                    });
                }
            }
        }
        Ok(Self { name, kind, urls })
    }

    /// The resource name this chain belongs to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind shared by every URL in the chain.
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Candidate URL for the given attempt index, if the chain still has one.
    pub fn url_at(&self, attempt: u32) -> Option<&str> {
        self.urls.get(attempt as usize).map(String::as_str)
    }

    /// Number of candidate URLs.
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// True when the chain holds no URLs. Unreachable for validated chains,
    /// present to keep the `len` API conventional.
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
