#![forbid(unsafe_code)]

//! Ordered listener registry with RAII subscriptions.
//!
//! # Design
//!
//! [`Notifier<K>`] keeps `(id, callback)` pairs in registration order inside
//! shared, reference-counted storage. [`Subscription`] holds a `Weak` handle
//! back to that storage and removes its entry when dropped.
//!
//! A broadcast snapshots the callback list before invoking anything, so no
//! borrow is held while listener code runs. Listeners may subscribe,
//! unsubscribe, or trigger further broadcasts from inside a callback.
//!
//! # Invariants
//!
//! 1. Callbacks run in registration order.
//! 2. Ids are never reused within one notifier.
//! 3. A callback registered during a broadcast is not invoked by that
//!    broadcast; a callback removed during a broadcast still receives it.
//! 4. After a [`Subscription`] is dropped, its callback is never invoked by a
//!    later broadcast.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Identifier of one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

type Callback<K> = Rc<dyn Fn(K)>;

struct Registry<K> {
    next_id: u64,
    entries: Vec<(SubscriptionId, Callback<K>)>,
}

impl<K> Registry<K> {
    /// Unlink the entry for `id` and hand it back. The caller drops it after
    /// releasing the borrow: the callback may own other subscriptions on this
    /// registry.
    fn take(&mut self, id: SubscriptionId) -> Option<Callback<K>> {
        let index = self
            .entries
            .iter()
            .position(|(entry_id, _)| *entry_id == id)?;
        Some(self.entries.remove(index).1)
    }
}

/// Broadcasts keys of type `K` to every registered listener.
///
/// Cloning a `Notifier` creates a new handle to the **same** registry.
pub struct Notifier<K> {
    registry: Rc<RefCell<Registry<K>>>,
}

impl<K> Clone for Notifier<K> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
        }
    }
}

impl<K> Default for Notifier<K> {
    fn default() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }
}

impl<K> fmt::Debug for Notifier<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl<K> Notifier<K> {
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().entries.len()
    }
}

impl<K: Copy + 'static> Notifier<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback`. It stays registered until the returned
    /// [`Subscription`] is dropped or unsubscribed.
    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(K) + 'static) -> Subscription {
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = SubscriptionId(registry.next_id);
            registry.next_id += 1;
            registry.entries.push((id, Rc::new(callback)));
            id
        };
        tracing::debug!(message = "notifier.subscribe", id = id.raw());

        let weak: Weak<RefCell<Registry<K>>> = Rc::downgrade(&self.registry);
        Subscription {
            id,
            remove: Some(Box::new(move || {
                let Some(registry) = weak.upgrade() else {
                    return false;
                };
                let taken = registry.borrow_mut().take(id);
                taken.is_some()
            })),
        }
    }

    /// Invoke every listener once with `key`, in registration order.
    pub fn broadcast(&self, key: K) {
        let callbacks: Vec<Callback<K>> = self
            .registry
            .borrow()
            .entries
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();
        for callback in callbacks {
            callback(key);
        }
    }

    /// Broadcast each key in turn. Every listener sees the first key before
    /// any listener sees the second.
    pub fn broadcast_all(&self, keys: impl IntoIterator<Item = K>) {
        for key in keys {
            self.broadcast(key);
        }
    }
}

/// Guard for a registered listener. Dropping it unsubscribes.
#[must_use = "dropping the Subscription unsubscribes immediately"]
pub struct Subscription {
    id: SubscriptionId,
    remove: Option<Box<dyn FnOnce() -> bool>>,
}

impl Subscription {
    #[must_use]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Remove the listener now. Returns `false` if it was already gone (the
    /// notifier was dropped).
    pub fn unsubscribe(mut self) -> bool {
        let removed = self.remove.take().is_some_and(|remove| remove());
        tracing::debug!(message = "notifier.unsubscribe", id = self.id.raw(), removed);
        removed
    }

    /// Keep the listener registered for as long as the notifier lives.
    pub fn detach(mut self) {
        self.remove = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("attached", &self.remove.is_some())
            .finish()
    }
}
