//! The read side.
//!
//! Consumers do not subscribe to the channels one by one: they read one
//! recombined [`ContextView`] through [`use_app_context`], which resolves the
//! nearest configuration plus localization, scroll lock, and theme, and fails
//! loudly when no provider is mounted above the caller.

use std::sync::Arc;

use lattice_bridge::HostApp;
use lattice_intl::Intl;
use lattice_theme::Theme;

use crate::context::AppContext;
use crate::errors::{ProviderError, Result};
use crate::link::Link;
use crate::scope::Scope;
use crate::scroll_lock::ScrollLockManager;
use crate::sticky::StickyManager;

/// The recombined configuration a consumer reads.
#[derive(Debug, Clone)]
pub struct ContextView {
    /// Link-rendering capability.
    pub link: Link,
    /// Sticky-positioning coordinator for the consumer's coordinate space.
    pub sticky_manager: Arc<StickyManager>,
    /// Scroll-lock coordinator, when the providing scope exposes one.
    pub scroll_lock_manager: Option<Arc<ScrollLockManager>>,
    /// Deprecated embedded-host handle.
    pub host_app: Option<Arc<HostApp>>,
    /// Localization handle.
    pub intl: Arc<Intl>,
    /// Theme tokens, when the providing scope exposes them.
    pub theme: Option<Arc<Theme>>,
}

/// Read the nearest configuration above `scope`.
///
/// # Errors
///
/// Returns [`ProviderError::MissingProvider`] when no provider is mounted
/// above the caller. A component outside any provider cannot resolve links,
/// localization, or theme, so this is fatal to its render.
pub fn use_app_context(scope: &Scope) -> Result<ContextView> {
    let app = scope.app_context().ok_or(ProviderError::MissingProvider)?;
    Ok(recombine(&app, scope))
}

fn recombine(app: &AppContext, scope: &Scope) -> ContextView {
    ContextView {
        link: app.link.clone(),
        sticky_manager: Arc::clone(&app.sticky_manager),
        scroll_lock_manager: scope.scroll_lock_manager(),
        host_app: app.host_app.clone(),
        intl: scope.intl(),
        theme: scope.theme(),
    }
}

/// A unit of UI that renders against the configuration.
pub trait Component {
    /// What rendering produces.
    type Output;

    /// Render with the recombined configuration view.
    fn render(&self, context: &ContextView) -> Self::Output;
}

/// Wraps a [`Component`], injecting the configuration view into its render.
///
/// The [`within_scrollable`](Connected::within_scrollable) variant gives the
/// wrapped component an isolated sticky-positioning coordinate space: the
/// wrapper owns a fresh [`StickyManager`] for its lifetime and interposes a
/// scope whose configuration overrides only that manager, forwarding every
/// other field unchanged.
pub struct Connected<C> {
    component: C,
    isolated_sticky: Option<Arc<StickyManager>>,
}

impl<C: Component> Connected<C> {
    /// Wrap a component.
    #[must_use]
    pub fn new(component: C) -> Self {
        Self {
            component,
            isolated_sticky: None,
        }
    }

    /// Wrap a component inside an isolated sticky scope.
    ///
    /// Used by nested scrollable regions whose sticky elements position
    /// relative to the region rather than the document.
    #[must_use]
    pub fn within_scrollable(component: C) -> Self {
        Self {
            component,
            isolated_sticky: Some(Arc::new(StickyManager::new())),
        }
    }

    /// The isolated sticky manager, when this wrapper owns one.
    #[must_use]
    pub fn sticky_manager(&self) -> Option<&Arc<StickyManager>> {
        self.isolated_sticky.as_ref()
    }

    /// Render the wrapped component against the nearest configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::MissingProvider`] when no provider is mounted
    /// above `scope`.
    pub fn render(&self, scope: &Arc<Scope>) -> Result<C::Output> {
        let scope = match &self.isolated_sticky {
            Some(sticky_manager) => interpose_sticky_scope(scope, sticky_manager)?,
            None => Arc::clone(scope),
        };
        let view = use_app_context(&scope)?;
        Ok(self.component.render(&view))
    }
}

/// Build a child scope whose configuration overrides only the sticky manager.
fn interpose_sticky_scope(
    parent: &Arc<Scope>,
    sticky_manager: &Arc<StickyManager>,
) -> Result<Arc<Scope>> {
    let app = parent.app_context().ok_or(ProviderError::MissingProvider)?;
    let child = parent.child();
    child.app_cell().set(Arc::new(AppContext {
        link: app.link.clone(),
        sticky_manager: Arc::clone(sticky_manager),
        host_app: app.host_app.clone(),
    }));
    Ok(child)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use crate::link::LinkProps;
    use crate::provider::{AppProvider, AppProviderProps};
    use crate::scope::Scope;

    use super::*;

    struct LinkLabel;

    impl Component for LinkLabel {
        type Output = String;

        fn render(&self, context: &ContextView) -> String {
            context.link.render(&LinkProps::new("/orders", "Orders"))
        }
    }

    struct StickyProbe;

    impl Component for StickyProbe {
        type Output = Arc<StickyManager>;

        fn render(&self, context: &ContextView) -> Arc<StickyManager> {
            Arc::clone(&context.sticky_manager)
        }
    }

    #[test]
    fn use_app_context_without_provider_is_missing_provider() {
        let root = Scope::root();
        assert_matches!(
            use_app_context(&root),
            Err(ProviderError::MissingProvider)
        );
    }

    #[test]
    fn use_app_context_recombines_every_channel() {
        let provider = AppProvider::new_root(AppProviderProps {
            i18n: Some(Arc::new(
                serde_json::json!({"Greeting": {"hello": "Hello"}}).into(),
            )),
            ..AppProviderProps::default()
        });

        let view = use_app_context(provider.scope()).unwrap();
        assert!(Arc::ptr_eq(&view.sticky_manager, provider.sticky_manager()));
        assert!(view.scroll_lock_manager.is_some());
        assert!(view.theme.is_some());
        assert!(view.host_app.is_none());
        assert_eq!(view.intl.translate_plain("Greeting.hello"), "Hello");
    }

    #[test]
    fn use_app_context_from_descendant_scope() {
        let provider = AppProvider::new_root(AppProviderProps::default());
        let leaf = provider.scope().child().child();
        let view = use_app_context(&leaf).unwrap();
        assert!(Arc::ptr_eq(&view.sticky_manager, provider.sticky_manager()));
    }

    #[test]
    fn connected_renders_with_injected_view() {
        let provider = AppProvider::new_root(AppProviderProps::default());
        let connected = Connected::new(LinkLabel);
        let markup = connected.render(provider.scope()).unwrap();
        assert_eq!(markup, "<a href=\"/orders\">Orders</a>");
    }

    #[test]
    fn connected_without_provider_fails() {
        let connected = Connected::new(LinkLabel);
        assert_matches!(
            connected.render(&Scope::root()),
            Err(ProviderError::MissingProvider)
        );
    }

    #[test]
    fn within_scrollable_overrides_only_the_sticky_manager() {
        let provider = AppProvider::new_root(AppProviderProps::default());
        let connected = Connected::within_scrollable(StickyProbe);

        let seen = connected.render(provider.scope()).unwrap();
        let isolated = connected.sticky_manager().unwrap();

        assert!(Arc::ptr_eq(&seen, isolated));
        assert!(!Arc::ptr_eq(&seen, provider.sticky_manager()));
    }

    #[test]
    fn within_scrollable_keeps_manager_identity_across_renders() {
        let provider = AppProvider::new_root(AppProviderProps::default());
        let connected = Connected::within_scrollable(StickyProbe);

        let first = connected.render(provider.scope()).unwrap();
        let second = connected.render(provider.scope()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn within_scrollable_forwards_other_channels() {
        let provider = AppProvider::new_root(AppProviderProps {
            i18n: Some(Arc::new(serde_json::json!({"hello": "Hello"}).into())),
            ..AppProviderProps::default()
        });

        struct ViewProbe;
        impl Component for ViewProbe {
            type Output = ContextView;
            fn render(&self, context: &ContextView) -> ContextView {
                context.clone()
            }
        }

        let connected = Connected::within_scrollable(ViewProbe);
        let view = connected.render(provider.scope()).unwrap();

        assert_eq!(view.intl.translate_plain("hello"), "Hello");
        let scroll_lock = view.scroll_lock_manager.unwrap();
        assert!(Arc::ptr_eq(&scroll_lock, provider.scroll_lock_manager()));
    }

    #[test]
    fn within_scrollable_without_provider_fails() {
        let connected = Connected::within_scrollable(StickyProbe);
        assert_matches!(
            connected.render(&Scope::root()),
            Err(ProviderError::MissingProvider)
        );
    }
}
