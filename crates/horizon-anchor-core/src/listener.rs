//! Document-level listener bookkeeping.
//!
//! An open floating surface needs to hear about events that happen anywhere
//! in the document: pointer presses outside of it (to dismiss) and scroll or
//! resize (to reposition). The host owns a single [`ListenerRegistry`] and,
//! when such an event happens, routes it to [`ListenerRegistry::owners`] of
//! the matching [`ListenerKind`].
//!
//! Registrations are handed out as [`ListenerGuard`]s. Dropping the guard
//! removes the registration, so a control that closes, is disabled, or is
//! dropped while open can never leave a listener behind.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::error::{ListenerError, Result};
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a registered listener.
    pub struct ListenerId;
}

/// Identifies the control that owns a set of listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerId(u64);

impl OwnerId {
    /// Allocate a process-unique owner ID.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw numeric value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "owner#{}", self.0)
    }
}

/// The document-level event a listener is interested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Pointer presses anywhere in the document.
    OutsidePointer,
    /// Scroll of any ancestor or viewport resize.
    Reposition,
}

#[derive(Debug, Clone, Copy)]
struct ListenerEntry {
    kind: ListenerKind,
    owner: OwnerId,
}

/// Shared registry of document-level listeners.
///
/// Cloning is cheap and every clone refers to the same registry.
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    inner: Arc<Mutex<SlotMap<ListenerId, ListenerEntry>>>,
}

impl ListenerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener and return the guard that owns the registration.
    pub fn add(&self, kind: ListenerKind, owner: OwnerId) -> ListenerGuard {
        let id = self.inner.lock().insert(ListenerEntry { kind, owner });
        tracing::trace!(target: targets::LISTENER, ?id, ?kind, %owner, "listener added");
        ListenerGuard {
            registry: self.clone(),
            id,
        }
    }

    /// Remove a listener by ID.
    pub fn remove(&self, id: ListenerId) -> Result<()> {
        match self.inner.lock().remove(id) {
            Some(entry) => {
                tracing::trace!(
                    target: targets::LISTENER,
                    ?id,
                    kind = ?entry.kind,
                    owner = %entry.owner,
                    "listener removed"
                );
                Ok(())
            }
            None => Err(ListenerError::InvalidListenerId.into()),
        }
    }

    /// Owners currently listening for `kind`, in ascending owner order.
    pub fn owners(&self, kind: ListenerKind) -> Vec<OwnerId> {
        let mut owners: Vec<OwnerId> = self
            .inner
            .lock()
            .values()
            .filter(|entry| entry.kind == kind)
            .map(|entry| entry.owner)
            .collect();
        owners.sort_unstable();
        owners.dedup();
        owners
    }

    /// Total number of live registrations.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether there are no live registrations.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Number of live registrations held by `owner`.
    pub fn count_for(&self, owner: OwnerId) -> usize {
        self.inner
            .lock()
            .values()
            .filter(|entry| entry.owner == owner)
            .count()
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("len", &self.len())
            .finish()
    }
}

/// RAII registration in a [`ListenerRegistry`].
#[derive(Debug)]
pub struct ListenerGuard {
    registry: ListenerRegistry,
    id: ListenerId,
}

impl ListenerGuard {
    /// The ID of the guarded registration.
    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let _ = self.registry.remove(self.id);
    }
}

static_assertions::assert_impl_all!(ListenerRegistry: Send, Sync);
static_assertions::assert_impl_all!(ListenerGuard: Send, Sync);
