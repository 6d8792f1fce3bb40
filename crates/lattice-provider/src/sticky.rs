//! Sticky-positioning coordination.
//!
//! A [`StickyManager`] tracks the sticky-positioned regions registered within
//! one coordinate space. The provider owns one manager for the lifetime of
//! the mounted tree and binds it to the root container after mount; an
//! isolated scrollable region can own its own manager so its regions stick
//! relative to that region instead of the document.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

/// Callback invoked with an item's stuck state on every recalculation.
pub type PositioningCallback = Arc<dyn Fn(bool) + Send + Sync>;

/// The scrollable container a manager measures against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollContainer {
    name: String,
}

impl ScrollContainer {
    /// The ambient document root.
    #[must_use]
    pub fn document() -> Self {
        Self {
            name: "document".to_string(),
        }
    }

    /// A named nested scrollable region.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Container name, for diagnostics.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// One registered sticky region.
pub struct StickyItem {
    id: String,
    activation_offset: f64,
    on_position: Option<PositioningCallback>,
}

impl StickyItem {
    /// Register a region that sticks once the container scrolls past
    /// `activation_offset`.
    #[must_use]
    pub fn new(id: impl Into<String>, activation_offset: f64) -> Self {
        Self {
            id: id.into(),
            activation_offset,
            on_position: None,
        }
    }

    /// Attach a positioning callback, invoked with the stuck state on every
    /// recalculation.
    #[must_use]
    pub fn with_positioning(mut self, callback: impl Fn(bool) + Send + Sync + 'static) -> Self {
        self.on_position = Some(Arc::new(callback));
        self
    }

    /// The region's identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Debug for StickyItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StickyItem")
            .field("id", &self.id)
            .field("activation_offset", &self.activation_offset)
            .field("has_positioning", &self.on_position.is_some())
            .finish()
    }
}

/// Tracks sticky-positioned regions for one coordinate space.
///
/// Registration and recalculation take the manager's own lock; the
/// composition layer never serializes access on its behalf.
#[derive(Default)]
pub struct StickyManager {
    items: Mutex<Vec<StickyItem>>,
    container: Mutex<Option<ScrollContainer>>,
    stuck: Mutex<HashSet<String>>,
}

impl StickyManager {
    /// Create a manager with no container bound.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sticky region.
    ///
    /// Registering an id that already exists replaces the earlier item.
    /// Regions may register before the container is bound; they resolve once
    /// [`set_container`](Self::set_container) runs.
    pub fn register(&self, item: StickyItem) {
        let mut items = self.items.lock();
        items.retain(|existing| existing.id != item.id);
        debug!(id = item.id(), "registering sticky region");
        items.push(item);
    }

    /// Unregister a region by id. Returns `true` if a region was removed.
    pub fn unregister(&self, id: &str) -> bool {
        let mut items = self.items.lock();
        let before = items.len();
        items.retain(|item| item.id != id);
        let removed = items.len() < before;
        if removed {
            let _ = self.stuck.lock().remove(id);
        }
        removed
    }

    /// Bind the manager to its scrollable container.
    ///
    /// Set once after the tree mounts; regions registered earlier resolve
    /// against the bound container from then on.
    pub fn set_container(&self, container: ScrollContainer) {
        debug!(container = container.name(), "binding sticky container");
        *self.container.lock() = Some(container);
    }

    /// The bound container, if any.
    #[must_use]
    pub fn container(&self) -> Option<ScrollContainer> {
        self.container.lock().clone()
    }

    /// Number of registered regions.
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.lock().len()
    }

    /// Recompute stuck states for a container scroll offset.
    ///
    /// Each region whose activation offset has been scrolled past is stuck.
    /// Positioning callbacks run on every recalculation, outside the item
    /// lock.
    pub fn recalculate(&self, scroll_offset: f64) {
        let updates: Vec<(String, bool, Option<PositioningCallback>)> = self
            .items
            .lock()
            .iter()
            .map(|item| {
                let stuck = scroll_offset >= item.activation_offset;
                (item.id.clone(), stuck, item.on_position.clone())
            })
            .collect();

        let mut stuck_set = self.stuck.lock();
        for (id, stuck, _) in &updates {
            if *stuck {
                let _ = stuck_set.insert(id.clone());
            } else {
                let _ = stuck_set.remove(id);
            }
        }
        drop(stuck_set);

        for (_, stuck, callback) in updates {
            if let Some(callback) = callback {
                callback(stuck);
            }
        }
    }

    /// Whether a region is currently stuck.
    #[must_use]
    pub fn is_stuck(&self, id: &str) -> bool {
        self.stuck.lock().contains(id)
    }
}

impl fmt::Debug for StickyManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StickyManager")
            .field("items", &self.count())
            .field("container", &self.container())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
