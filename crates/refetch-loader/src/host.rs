//! Environment binding: the document-side primitives the loader drives.

use std::{
    collections::{BTreeMap, HashSet},
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
};

use async_trait::async_trait;
use parking_lot::Mutex;
use thiserror::Error;

use refetch_chain::ResourceKind;

/// Identifier for an element attached to the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(
    /// Host-assigned element id.
    pub u64,
);

/// Property bag applied to a created element before insertion.
pub type ElementProps = BTreeMap<String, String>;

/// Outcome of attaching an element and waiting for its load/error event.
#[derive(Debug, Clone, Copy)]
pub struct Attached {
    /// The element the host inserted.
    pub node: NodeId,
    /// True when the element's load event fired, false on its error event.
    pub loaded: bool,
}

/// Failure reported by the host while removing an element, e.g. the element
/// was already detached by other code.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct DetachError(
    /// Host-reported reason.
    pub String,
);

/// Trait abstraction over the host document's element insertion primitives.
///
/// Implementations wrap whatever DOM-equivalent the embedding environment
/// provides. The loader only ever issues the next `attach` for a name after
/// the previous one has resolved, so implementations need no per-name
/// ordering of their own.
#[async_trait]
pub trait DomHost: Send + Sync {
    /// Create an element of `kind` pointing at `url`, apply `props` as
    /// element properties, append it to the document, and resolve once its
    /// load or error event fires. The element stays attached either way;
    /// the loader detaches failed nodes itself.
    async fn attach(&self, kind: ResourceKind, url: &str, props: &ElementProps) -> Attached;

    /// Remove a previously attached element from the document.
    fn detach(&self, node: NodeId) -> Result<(), DetachError>;
}

/// Scriptable in-memory host for tests.
///
/// Records every attach in order, tracks which nodes are currently attached,
/// fails loads for configured URLs, and can be told to refuse detaches.
#[derive(Default)]
pub struct MockDomHost {
    /// Next node id to hand out.
    next_id: AtomicU64,
    /// URLs whose load should report failure.
    fail_urls: Mutex<HashSet<String>>,
    /// Every attached URL, in attach order.
    attach_log: Mutex<Vec<String>>,
    /// Nodes currently attached to the fake document.
    attached: Mutex<HashSet<NodeId>>,
    /// Props seen on the most recent attach.
    last_props: Mutex<ElementProps>,
    /// When set, `detach` refuses and reports an error.
    fail_detach: AtomicBool,
}

impl MockDomHost {
    /// Create a host where every load succeeds.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Mark a URL as failing its load event.
    pub fn fail_url(&self, url: &str) {
        self.fail_urls.lock().insert(url.to_string());
    }

    /// Make subsequent `detach` calls fail.
    pub fn set_fail_detach(&self, v: bool) {
        self.fail_detach.store(v, Ordering::SeqCst);
    }

    /// Total number of attach calls seen.
    pub fn attach_count(&self) -> usize {
        self.attach_log.lock().len()
    }

    /// URLs attached so far, in order.
    pub fn attach_log(&self) -> Vec<String> {
        self.attach_log.lock().clone()
    }

    /// Number of nodes currently attached to the fake document.
    pub fn attached_count(&self) -> usize {
        self.attached.lock().len()
    }

    /// Whether a specific node is still attached.
    pub fn is_attached(&self, node: NodeId) -> bool {
        self.attached.lock().contains(&node)
    }

    /// Props applied on the most recent attach.
    pub fn last_props(&self) -> ElementProps {
        self.last_props.lock().clone()
    }
}

#[async_trait]
impl DomHost for MockDomHost {
    async fn attach(&self, _kind: ResourceKind, url: &str, props: &ElementProps) -> Attached {
        let node = NodeId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.attach_log.lock().push(url.to_string());
        self.attached.lock().insert(node);
        *self.last_props.lock() = props.clone();
        let loaded = !self.fail_urls.lock().contains(url);
        Attached { node, loaded }
    }

    fn detach(&self, node: NodeId) -> Result<(), DetachError> {
        if self.fail_detach.load(Ordering::SeqCst) {
            return Err(DetachError("detach refused".to_string()));
        }
        if self.attached.lock().remove(&node) {
            Ok(())
        } else {
            Err(DetachError(format!("node {:?} is not attached", node)))
        }
    }
}
