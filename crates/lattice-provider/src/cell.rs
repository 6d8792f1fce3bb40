//! Observable context cells.
//!
//! A [`ContextCell`] is one propagation channel: it holds the current value
//! behind an atomic reference swap and keeps its own subscriber list, so
//! replacing the value on one channel never notifies consumers of another.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};

type Callback<T> = Arc<dyn Fn(&Arc<T>) + Send + Sync>;

struct Subscriber<T> {
    id: u64,
    callback: Callback<T>,
}

/// One observable propagation channel.
///
/// Reads observe either the fully-old or fully-new value; replacement is a
/// single reference swap, never field-by-field mutation.
pub struct ContextCell<T> {
    value: RwLock<Option<Arc<T>>>,
    subscribers: Arc<Mutex<Vec<Subscriber<T>>>>,
    next_id: AtomicU64,
}

impl<T> ContextCell<T> {
    /// Create an empty cell.
    #[must_use]
    pub fn new() -> Self {
        Self {
            value: RwLock::new(None),
            subscribers: Arc::new(Mutex::new(Vec::new())),
            next_id: AtomicU64::new(0),
        }
    }

    /// Whether the cell currently holds a value.
    #[must_use]
    pub fn has_value(&self) -> bool {
        self.value.read().is_some()
    }

    /// The current value, if any.
    #[must_use]
    pub fn get(&self) -> Option<Arc<T>> {
        self.value.read().clone()
    }

    /// Replace the value and notify this cell's subscribers.
    ///
    /// Callbacks run after the swap, outside the value lock.
    pub fn set(&self, value: Arc<T>) {
        *self.value.write() = Some(Arc::clone(&value));
        let callbacks: Vec<Callback<T>> = self
            .subscribers
            .lock()
            .iter()
            .map(|subscriber| Arc::clone(&subscriber.callback))
            .collect();
        for callback in callbacks {
            callback(&value);
        }
    }

    /// Empty the cell without notifying subscribers.
    ///
    /// Used when the owning provider unmounts; readers fall through to an
    /// ancestor, or fail loudly when none exists.
    pub(crate) fn clear(&self) {
        *self.value.write() = None;
    }

    /// Subscribe to value replacements on this cell.
    ///
    /// The subscription ends when the returned guard is dropped.
    #[must_use]
    pub fn subscribe(&self, callback: impl Fn(&Arc<T>) + Send + Sync + 'static) -> Subscription
    where
        T: 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.subscribers.lock().push(Subscriber {
            id,
            callback: Arc::new(callback),
        });

        let list: Weak<Mutex<Vec<Subscriber<T>>>> = Arc::downgrade(&self.subscribers);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(list) = list.upgrade() {
                    list.lock().retain(|subscriber| subscriber.id != id);
                }
            })),
        }
    }

    /// Number of live subscriptions on this cell.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}

impl<T> Default for ContextCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ContextCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextCell")
            .field("has_value", &self.has_value())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Ends a [`ContextCell`] subscription when dropped.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
