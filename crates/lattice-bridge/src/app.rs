//! The embedded-host application handle.

use serde_json::Value;
use tracing::debug;

use crate::action::Action;
use crate::hooks::{HookRegistry, LifecycleHook};

/// Environment variable consulted when no host origin override is supplied.
pub const HOST_ORIGIN_ENV: &str = "LATTICE_HOST_ORIGIN";

/// Configuration for constructing a [`HostApp`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostAppConfig {
    /// API key identifying the embedding application.
    pub api_key: String,
    /// Origin of the embedding host.
    pub host_origin: String,
    /// Whether the host should force a redirect into the embedded frame.
    pub force_redirect: bool,
}

/// Handle to the embedding host application.
///
/// Owns the lifecycle middleware registry; actions pass through the
/// [`LifecycleHook::DispatchAction`] chain before reaching the host.
#[derive(Debug)]
pub struct HostApp {
    config: HostAppConfig,
    hooks: HookRegistry,
}

impl HostApp {
    /// The configuration this handle was constructed with.
    #[must_use]
    pub fn config(&self) -> &HostAppConfig {
        &self.config
    }

    /// The lifecycle middleware registry.
    #[must_use]
    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    /// Forward an action to the host, folding it through the dispatch chain.
    ///
    /// Returns the action as the host received it.
    pub fn dispatch(&self, action: Action) -> Action {
        let action = self.hooks.run(LifecycleHook::DispatchAction, action);
        debug!(kind = %action.kind, origin = %self.config.host_origin, "dispatching action to host");
        action
    }

    /// Convenience for dispatching an action built from kind and payload.
    pub fn dispatch_raw(&self, kind: impl Into<String>, payload: Value) -> Action {
        self.dispatch(Action::new(kind, payload))
    }
}

/// Construct a host application handle.
#[must_use]
pub fn create_host_app(config: HostAppConfig) -> HostApp {
    debug!(origin = %config.host_origin, "constructing embedded host handle");
    HostApp {
        config,
        hooks: HookRegistry::new(),
    }
}

/// Look up the host origin from the ambient process environment.
///
/// Used only when no explicit origin override is supplied. Returns `None`
/// when the variable is unset or empty.
#[must_use]
pub fn ambient_host_origin() -> Option<String> {
    origin_from(std::env::var(HOST_ORIGIN_ENV).ok())
}

/// Pure filter behind [`ambient_host_origin`], testable without env vars.
fn origin_from(value: Option<String>) -> Option<String> {
    value.filter(|origin| !origin.is_empty())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
