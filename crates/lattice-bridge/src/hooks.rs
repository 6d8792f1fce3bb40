//! Lifecycle hook registry.
//!
//! Maintains an ordered middleware list per [`LifecycleHook`]. Dispatching an
//! action folds it through the list in registration order: each middleware
//! receives the action produced by the previous one and returns the action
//! handed to the next. Middleware transforms and forwards; it cannot
//! short-circuit the chain.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::action::Action;

/// Lifecycle points a host integration can intercept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleHook {
    /// An action is about to be forwarded to the host.
    DispatchAction,
}

impl std::fmt::Display for LifecycleHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DispatchAction => write!(f, "DispatchAction"),
        }
    }
}

/// A single step in a lifecycle middleware chain.
pub trait ActionMiddleware: Send + Sync {
    /// Unique name within the hook kind; re-registering replaces.
    fn name(&self) -> &str;

    /// Transform the action and hand it onward.
    fn apply(&self, action: Action) -> Action;
}

/// Registry of lifecycle middleware, keyed by hook kind.
#[derive(Default)]
pub struct HookRegistry {
    hooks: RwLock<HashMap<LifecycleHook, Vec<Arc<dyn ActionMiddleware>>>>,
}

impl HookRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            hooks: RwLock::new(HashMap::new()),
        }
    }

    /// Register middleware for a hook kind.
    ///
    /// Middleware runs in registration order. Registering a middleware whose
    /// name already exists for the same kind replaces the earlier one in
    /// place.
    pub fn set(&self, kind: LifecycleHook, middleware: Arc<dyn ActionMiddleware>) {
        let mut hooks = self.hooks.write();
        let chain = hooks.entry(kind).or_default();
        debug!(kind = %kind, name = middleware.name(), "registering lifecycle middleware");
        if let Some(existing) = chain.iter_mut().find(|m| m.name() == middleware.name()) {
            *existing = middleware;
        } else {
            chain.push(middleware);
        }
    }

    /// The middleware chain for a hook kind, in execution order.
    #[must_use]
    pub fn middleware(&self, kind: LifecycleHook) -> Vec<Arc<dyn ActionMiddleware>> {
        self.hooks.read().get(&kind).cloned().unwrap_or_default()
    }

    /// Total number of registered middleware across all kinds.
    #[must_use]
    pub fn count(&self) -> usize {
        self.hooks.read().values().map(Vec::len).sum()
    }

    /// Fold an action through the chain for a hook kind.
    #[must_use]
    pub fn run(&self, kind: LifecycleHook, action: Action) -> Action {
        self.middleware(kind)
            .iter()
            .fold(action, |action, middleware| middleware.apply(action))
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry")
            .field("middleware_count", &self.count())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
