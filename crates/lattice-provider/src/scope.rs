//! The scope tree.
//!
//! Scopes replace the host framework's ancestor-context mechanism with an
//! explicit tree: each node carries one optional slot per propagation channel
//! and a parent link, and reads walk toward the root until a slot holds a
//! value (nearest-ancestor-wins). A provider fills every slot of its scope; a
//! narrower override (an isolated sticky region, say) fills only one and
//! forwards the rest by leaving its other slots empty.

use std::sync::{Arc, OnceLock};

use lattice_intl::Intl;
use lattice_theme::Theme;

use crate::cell::{ContextCell, Subscription};
use crate::context::AppContext;
use crate::scroll_lock::ScrollLockManager;

/// The handle consumers use when no localization was provided anywhere above
/// them: an empty dictionary, so every lookup yields an empty string.
fn default_intl() -> Arc<Intl> {
    static DEFAULT: OnceLock<Arc<Intl>> = OnceLock::new();
    Arc::clone(DEFAULT.get_or_init(|| Arc::new(Intl::default())))
}

/// One node in the context scope tree.
#[derive(Debug, Default)]
pub struct Scope {
    parent: Option<Arc<Scope>>,
    app: ContextCell<AppContext>,
    intl: ContextCell<Intl>,
    scroll_lock: ContextCell<ScrollLockManager>,
    theme: ContextCell<Theme>,
}

impl Scope {
    /// The tree root. All slots are empty; a consumer reading configuration
    /// through a bare root fails with a missing-provider error.
    #[must_use]
    pub fn root() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Create a child scope with every slot empty.
    ///
    /// Reads through the child fall through to this scope until the child's
    /// own slots are filled.
    #[must_use]
    pub fn child(self: &Arc<Self>) -> Arc<Self> {
        Arc::new(Self {
            parent: Some(Arc::clone(self)),
            ..Self::default()
        })
    }

    /// This scope's configuration slot.
    #[must_use]
    pub fn app_cell(&self) -> &ContextCell<AppContext> {
        &self.app
    }

    /// This scope's localization slot.
    #[must_use]
    pub fn intl_cell(&self) -> &ContextCell<Intl> {
        &self.intl
    }

    /// This scope's scroll-lock slot.
    #[must_use]
    pub fn scroll_lock_cell(&self) -> &ContextCell<ScrollLockManager> {
        &self.scroll_lock
    }

    /// This scope's theme slot.
    #[must_use]
    pub fn theme_cell(&self) -> &ContextCell<Theme> {
        &self.theme
    }

    /// Nearest configuration above (or at) this scope.
    #[must_use]
    pub fn app_context(&self) -> Option<Arc<AppContext>> {
        self.resolve(|scope| &scope.app).and_then(ContextCell::get)
    }

    /// Nearest localization handle, falling back to an empty dictionary.
    #[must_use]
    pub fn intl(&self) -> Arc<Intl> {
        self.resolve(|scope| &scope.intl)
            .and_then(ContextCell::get)
            .unwrap_or_else(default_intl)
    }

    /// Nearest scroll-lock manager, if a provider is mounted above.
    #[must_use]
    pub fn scroll_lock_manager(&self) -> Option<Arc<ScrollLockManager>> {
        self.resolve(|scope| &scope.scroll_lock)
            .and_then(ContextCell::get)
    }

    /// Nearest theme tokens, if a provider is mounted above.
    #[must_use]
    pub fn theme(&self) -> Option<Arc<Theme>> {
        self.resolve(|scope| &scope.theme).and_then(ContextCell::get)
    }

    /// Subscribe to configuration replacements on the providing scope.
    ///
    /// Returns `None` when no scope above holds a configuration.
    #[must_use]
    pub fn subscribe_app(
        &self,
        callback: impl Fn(&Arc<AppContext>) + Send + Sync + 'static,
    ) -> Option<Subscription> {
        self.resolve(|scope| &scope.app)
            .map(|cell| cell.subscribe(callback))
    }

    /// Subscribe to localization replacements on the providing scope.
    #[must_use]
    pub fn subscribe_intl(
        &self,
        callback: impl Fn(&Arc<Intl>) + Send + Sync + 'static,
    ) -> Option<Subscription> {
        self.resolve(|scope| &scope.intl)
            .map(|cell| cell.subscribe(callback))
    }

    /// Subscribe to theme replacements on the providing scope.
    #[must_use]
    pub fn subscribe_theme(
        &self,
        callback: impl Fn(&Arc<Theme>) + Send + Sync + 'static,
    ) -> Option<Subscription> {
        self.resolve(|scope| &scope.theme)
            .map(|cell| cell.subscribe(callback))
    }

    /// Walk toward the root until a slot for the channel holds a value.
    fn resolve<'a, T>(&'a self, pick: fn(&Scope) -> &ContextCell<T>) -> Option<&'a ContextCell<T>> {
        let mut current = self;
        loop {
            let cell = pick(current);
            if cell.has_value() {
                return Some(cell);
            }
            current = current.parent.as_deref()?;
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
