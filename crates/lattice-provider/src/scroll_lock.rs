//! Document scroll locking.
//!
//! A [`ScrollLockManager`] reference-counts scroll-lock requests from the
//! component tree: overlays, sheets, and modals each register a lock while
//! open, and the document scrolls again only when every lock is released.
//!
//! The count is a monotonic atomic counter; releasing more locks than were
//! acquired saturates at zero rather than underflowing.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::warn;

/// Attribute hosts place on the document body while scrolling is locked.
pub const SCROLL_LOCKING_ATTRIBUTE: &str = "data-lock-scrolling";

/// Attribute hosts place on the wrapper element that scrolls in place of the
/// locked document.
pub const SCROLL_LOCKING_WRAPPER_ATTRIBUTE: &str = "data-lock-scrolling-wrapper";

/// Reference-counted coordinator for document scroll locking.
///
/// Multiple descendants may register and release locks within the same
/// synchronous pass; the counter keeps them consistent without any outer
/// serialization.
#[derive(Default)]
pub struct ScrollLockManager {
    locks: AtomicUsize,
}

impl ScrollLockManager {
    /// Create a manager with no locks held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one scroll lock.
    pub fn register_scroll_lock(&self) {
        let _ = self.locks.fetch_add(1, Ordering::SeqCst);
    }

    /// Release one scroll lock.
    ///
    /// Saturates at zero; an unbalanced release is logged and ignored.
    pub fn unregister_scroll_lock(&self) {
        let result = self
            .locks
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |count| {
                count.checked_sub(1)
            });
        if result.is_err() {
            warn!("scroll lock released more times than it was acquired");
        }
    }

    /// Number of locks currently held.
    #[must_use]
    pub fn lock_count(&self) -> usize {
        self.locks.load(Ordering::SeqCst)
    }

    /// Whether the document is currently locked.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.lock_count() > 0
    }

    /// Register a lock held for the lifetime of the returned guard.
    #[must_use]
    pub fn lock(self: &Arc<Self>) -> ScrollLockGuard {
        self.register_scroll_lock();
        ScrollLockGuard {
            manager: Arc::clone(self),
        }
    }
}

impl fmt::Debug for ScrollLockManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollLockManager")
            .field("locks", &self.lock_count())
            .finish()
    }
}

/// Releases its scroll lock when dropped.
#[derive(Debug)]
pub struct ScrollLockGuard {
    manager: Arc<ScrollLockManager>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.manager.unregister_scroll_lock();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
