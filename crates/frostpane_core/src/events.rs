//! Event dispatch with releasable subscriptions
//!
//! [`EventHub`] is a small synchronous publish/subscribe primitive.
//! Subscribing hands back a [`Subscription`] token; releasing it (or
//! dropping it) removes the callback. Release is idempotent, so
//! repeated disable/enable cycles are safe.

use std::sync::{Arc, Mutex};

use rustc_hash::FxHashMap;

type Callback<T> = Box<dyn FnMut(&T) + Send>;

struct HubInner<T> {
    next_id: u64,
    subscribers: FxHashMap<u64, Callback<T>>,
    // Ids considered subscribed. A callback is briefly absent from
    // `subscribers` while it runs; this set decides whether it comes back.
    live: rustc_hash::FxHashSet<u64>,
}

/// Synchronous publish/subscribe hub.
///
/// Callbacks run on the publishing thread, one after another, in an
/// unspecified order across subscribers.
pub struct EventHub<T> {
    inner: Arc<Mutex<HubInner<T>>>,
}

impl<T> Clone for EventHub<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: 'static> Default for EventHub<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Payloads are plain values; the bound lets subscription tokens own a
// handle to the hub.
impl<T: 'static> EventHub<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HubInner {
                next_id: 0,
                subscribers: FxHashMap::default(),
                live: rustc_hash::FxHashSet::default(),
            })),
        }
    }

    /// Register a callback. Dropping or releasing the returned token
    /// unsubscribes it.
    pub fn subscribe(&self, callback: impl FnMut(&T) + Send + 'static) -> Subscription {
        let id = {
            let mut inner = self.inner.lock().unwrap();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.subscribers.insert(id, Box::new(callback));
            inner.live.insert(id);
            id
        };

        let hub = Arc::clone(&self.inner);
        Subscription::new(move || {
            let mut inner = hub.lock().unwrap();
            inner.live.remove(&id);
            inner.subscribers.remove(&id);
        })
    }

    /// Deliver `value` to every current subscriber.
    ///
    /// The hub lock is not held while a callback runs, so callbacks may
    /// subscribe or release freely; a callback released mid-publish is
    /// not re-registered.
    pub fn publish(&self, value: &T) {
        let ids: Vec<u64> = {
            let inner = self.inner.lock().unwrap();
            inner.subscribers.keys().copied().collect()
        };

        for id in ids {
            let callback = self.inner.lock().unwrap().subscribers.remove(&id);
            let Some(mut callback) = callback else {
                continue;
            };
            callback(value);
            let mut inner = self.inner.lock().unwrap();
            if inner.live.contains(&id) {
                inner.subscribers.insert(id, callback);
            }
        }
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().unwrap().subscribers.len()
    }
}

/// Token for an active [`EventHub`] subscription.
///
/// [`release`](Subscription::release) is idempotent and also runs on
/// drop.
pub struct Subscription {
    remove: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Build a token around an arbitrary removal action.
    pub fn new(remove: impl FnOnce() + Send + 'static) -> Self {
        Self {
            remove: Some(Box::new(remove)),
        }
    }

    /// Unsubscribe. Calling this more than once is a no-op.
    pub fn release(&mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}
