//! The fallback resource loader proper.

use std::{collections::HashMap, sync::Arc};

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use refetch_chain::{AttemptCounters, FallbackChain, ResourceKind};

use crate::{
    error::{Error, Result},
    host::{DomHost, ElementProps, NodeId},
};

/// A successfully loaded script or stylesheet.
///
/// At most one live handle exists per resource name; it is owned by the
/// loader's cache and handed out by value.
#[derive(Debug, Clone)]
pub struct ResourceHandle {
    /// Resource name owning this handle.
    pub name: String,
    /// The element the host attached for it.
    pub node: NodeId,
    /// Kind of the underlying element.
    pub kind: ResourceKind,
    /// URL that ultimately loaded.
    pub url: String,
}

/// Loads named resources against their fallback chains.
///
/// Chains and per-kind element props are fixed at construction. Attempt
/// counters are kept per name rather than per call, so a resource that
/// failed partway through its chain and is mounted again later resumes from
/// where it left off. Successful loads are cached; a cached name mounts
/// again without touching the document.
pub struct Loader {
    /// Document-side insertion primitives.
    host: Arc<dyn DomHost>,
    /// Registered chains by resource name.
    chains: HashMap<String, FallbackChain>,
    /// Default element props applied per resource kind.
    kind_props: HashMap<ResourceKind, ElementProps>,
    /// Per-name progress through the chains.
    counters: Mutex<AttemptCounters>,
    /// Successfully mounted resources by name.
    cache: Mutex<HashMap<String, ResourceHandle>>,
}

impl Loader {
    /// Build a loader over validated chains.
    pub fn new(
        host: Arc<dyn DomHost>,
        chains: Vec<FallbackChain>,
        kind_props: HashMap<ResourceKind, ElementProps>,
    ) -> Self {
        let chains = chains
            .into_iter()
            .map(|c| (c.name().to_string(), c))
            .collect();
        Self {
            host,
            chains,
            kind_props,
            counters: Mutex::new(AttemptCounters::new()),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Mount a resource with no call-site props.
    pub async fn mount(&self, name: &str) -> Result<ResourceHandle> {
        self.mount_with(name, &ElementProps::new()).await
    }

    /// Mount a resource, walking its fallback chain until a URL loads or the
    /// chain is exhausted.
    ///
    /// A cached name returns its handle immediately with no insertion.
    /// `props` overlay the per-kind defaults on the created element. Each
    /// failed element is removed from the document before the next URL is
    /// tried; the per-name counter advances so the chain is never rewound
    /// within a session.
    pub async fn mount_with(&self, name: &str, props: &ElementProps) -> Result<ResourceHandle> {
        if let Some(handle) = self.cache.lock().get(name) {
            trace!(name, "mount hit cache");
            return Ok(handle.clone());
        }

        let Some(chain) = self.chains.get(name) else {
            let attempts = self.counters.lock().current(name);
            debug!(name, "mount for unregistered resource");
            return Err(Error::ChainExhausted {
                name: name.to_string(),
                attempts,
            });
        };

        let mut merged = self.kind_props.get(&chain.kind()).cloned().unwrap_or_default();
        merged.extend(props.iter().map(|(k, v)| (k.clone(), v.clone())));

        loop {
            let attempt = self.counters.lock().current(name);
            let Some(url) = chain.url_at(attempt) else {
                debug!(name, attempts = attempt, "fallback chain exhausted");
                return Err(Error::ChainExhausted {
                    name: name.to_string(),
                    attempts: attempt,
                });
            };

            trace!(name, url, attempt, "attaching");
            let attached = self.host.attach(chain.kind(), url, &merged).await;
            if attached.loaded {
                let handle = ResourceHandle {
                    name: name.to_string(),
                    node: attached.node,
                    kind: chain.kind(),
                    url: url.to_string(),
                };
                self.cache.lock().insert(name.to_string(), handle.clone());
                debug!(name, url, attempt, "resource mounted");
                return Ok(handle);
            }

            // Failed nodes never stay in the document.
            if let Err(e) = self.host.detach(attached.node) {
                warn!(name, url, %e, "could not remove failed element");
            }
            let next = self.counters.lock().advance(name);
            debug!(name, url, attempt, next, "load failed, advancing chain");
        }
    }

    /// Remove a mounted resource's element and drop it from the cache.
    ///
    /// Fails with [`Error::NotMounted`] when the name has no cached handle,
    /// and with [`Error::Detach`] when the host cannot remove the element —
    /// in which case the cache entry is kept and the resource remains
    /// considered loaded. Attempt counters are untouched either way.
    pub fn destroy(&self, name: &str) -> Result<()> {
        let handle = match self.cache.lock().get(name) {
            Some(h) => h.clone(),
            None => {
                return Err(Error::NotMounted {
                    name: name.to_string(),
                });
            }
        };
        if let Err(source) = self.host.detach(handle.node) {
            warn!(name, %source, "detach failed, keeping cache entry");
            return Err(Error::Detach {
                name: name.to_string(),
                source,
            });
        }
        self.cache.lock().remove(name);
        debug!(name, "resource destroyed");
        Ok(())
    }

    /// Cached handle for a name, if the resource is currently mounted.
    /// Pure lookup with no side effects.
    pub fn get(&self, name: &str) -> Option<ResourceHandle> {
        self.cache.lock().get(name).cloned()
    }
}
