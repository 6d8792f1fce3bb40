//! The provider node.
//!
//! An [`AppProvider`] is instantiated once per tree. It owns the sticky and
//! scroll-lock managers for the lifetime of the mounted tree, derives the
//! configuration on construction and on relevant prop changes, and injects
//! configuration, localization, and the scroll-lock manager into its scope on
//! three independent channels (theme travels on its own cell as well).
//!
//! Construction is synchronous: the scope's slots are filled before the
//! constructor returns, so a consumer can never observe a mounted provider
//! without a configuration.

use std::fmt;
use std::sync::Arc;

use lattice_intl::{Intl, Translations};
use lattice_theme::{ThemeConfig, create_theme_context};
use tracing::debug;

use crate::context::{AppContext, AppContextOptions, create_app_context};
use crate::link::LinkComponent;
use crate::scope::Scope;
use crate::scroll_lock::ScrollLockManager;
use crate::sticky::{ScrollContainer, StickyManager};

/// Inputs accepted by the provider.
#[derive(Clone, Default)]
pub struct AppProviderProps {
    /// Translation input; compared by reference identity on update.
    pub i18n: Option<Arc<Translations>>,
    /// Custom link renderer; compared by reference identity on update.
    pub link_component: Option<Arc<dyn LinkComponent>>,
    /// API key for the deprecated embedded-host integration.
    pub api_key: Option<String>,
    /// Host origin override.
    pub host_origin: Option<String>,
    /// Whether the host should force a redirect into the embedded frame.
    pub force_redirect: Option<bool>,
    /// Theme overrides; propagated on the theme channel, not part of the
    /// configuration diff.
    pub theme: Option<ThemeConfig>,
}

impl fmt::Debug for AppProviderProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppProviderProps")
            .field("i18n", &self.i18n.is_some())
            .field("link_component", &self.link_component.is_some())
            .field("api_key", &self.api_key.is_some())
            .field("host_origin", &self.host_origin)
            .field("force_redirect", &self.force_redirect)
            .field("theme", &self.theme.is_some())
            .finish()
    }
}

/// The root node owning manager lifetimes and configuration construction.
pub struct AppProvider {
    sticky_manager: Arc<StickyManager>,
    scroll_lock_manager: Arc<ScrollLockManager>,
    props: AppProviderProps,
    context: Arc<AppContext>,
    scope: Arc<Scope>,
}

impl AppProvider {
    /// Mount a provider under a parent scope.
    ///
    /// Both managers are constructed exactly once here; configuration
    /// rebuilds reuse them. Every channel slot is filled before this
    /// returns.
    #[must_use]
    pub fn new(props: AppProviderProps, parent: &Arc<Scope>) -> Self {
        let sticky_manager = Arc::new(StickyManager::new());
        let scroll_lock_manager = Arc::new(ScrollLockManager::new());

        let context = Arc::new(create_app_context(AppContextOptions {
            link_component: props.link_component.clone(),
            api_key: props.api_key.clone(),
            host_origin: props.host_origin.clone(),
            force_redirect: props.force_redirect,
            sticky_manager: Some(Arc::clone(&sticky_manager)),
        }));
        let intl = build_intl(props.i18n.as_deref());
        let theme = Arc::new(create_theme_context(props.theme.clone()));

        let scope = parent.child();
        scope.app_cell().set(Arc::clone(&context));
        scope.intl_cell().set(intl);
        scope
            .scroll_lock_cell()
            .set(Arc::clone(&scroll_lock_manager));
        scope.theme_cell().set(theme);
        debug!(has_host_app = context.host_app.is_some(), "provider mounted");

        Self {
            sticky_manager,
            scroll_lock_manager,
            props,
            context,
            scope,
        }
    }

    /// Mount a provider at a fresh tree root.
    #[must_use]
    pub fn new_root(props: AppProviderProps) -> Self {
        Self::new(props, &Scope::root())
    }

    /// Post-mount hook: bind the sticky manager to the ambient document root
    /// so regions registered before mount resolve correctly.
    pub fn mount(&self) {
        self.sticky_manager.set_container(ScrollContainer::document());
    }

    /// Apply a prop update.
    ///
    /// The five watched fields (`i18n`, `link_component`, `api_key`,
    /// `host_origin`, `force_redirect`) are compared by identity. When all
    /// are unchanged the configuration is left as-is: same object, no
    /// notifications. When any changed, the configuration and localization
    /// handle are rebuilt (the existing sticky manager is passed through to
    /// preserve its identity) and each channel is replaced with one atomic
    /// reference swap.
    ///
    /// A theme change only replaces the theme channel; it never forces a
    /// configuration rebuild.
    pub fn update(&mut self, props: AppProviderProps) {
        if self.props.theme != props.theme {
            self.scope
                .theme_cell()
                .set(Arc::new(create_theme_context(props.theme.clone())));
        }

        if watched_fields_equal(&self.props, &props) {
            debug!("watched props unchanged, skipping configuration rebuild");
            self.props = props;
            return;
        }

        let context = Arc::new(create_app_context(AppContextOptions {
            link_component: props.link_component.clone(),
            api_key: props.api_key.clone(),
            host_origin: props.host_origin.clone(),
            force_redirect: props.force_redirect,
            sticky_manager: Some(Arc::clone(&self.sticky_manager)),
        }));
        let intl = build_intl(props.i18n.as_deref());

        self.scope.app_cell().set(Arc::clone(&context));
        self.scope.intl_cell().set(intl);
        self.context = context;
        self.props = props;
        debug!("configuration rebuilt");
    }

    /// The scope this provider injects into; descendants read through it.
    #[must_use]
    pub fn scope(&self) -> &Arc<Scope> {
        &self.scope
    }

    /// The current configuration.
    #[must_use]
    pub fn context(&self) -> &Arc<AppContext> {
        &self.context
    }

    /// The sticky manager owned by this provider.
    #[must_use]
    pub fn sticky_manager(&self) -> &Arc<StickyManager> {
        &self.sticky_manager
    }

    /// The scroll-lock manager owned by this provider.
    #[must_use]
    pub fn scroll_lock_manager(&self) -> &Arc<ScrollLockManager> {
        &self.scroll_lock_manager
    }
}

impl Drop for AppProvider {
    /// Unmounting discards the injected configuration: descendants still
    /// holding the scope fall through to an ancestor provider, or fail with
    /// a missing-provider error.
    fn drop(&mut self) {
        self.scope.app_cell().clear();
        self.scope.intl_cell().clear();
        self.scope.scroll_lock_cell().clear();
        self.scope.theme_cell().clear();
    }
}

impl fmt::Debug for AppProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppProvider")
            .field("props", &self.props)
            .field("context", &self.context)
            .finish()
    }
}

/// Build the localization handle from the provider's translation input.
fn build_intl(i18n: Option<&Translations>) -> Arc<Intl> {
    Arc::new(Intl::new(i18n.cloned().unwrap_or_default()))
}

/// Identity comparison over the five watched fields.
fn watched_fields_equal(previous: &AppProviderProps, next: &AppProviderProps) -> bool {
    translations_identity_eq(&previous.i18n, &next.i18n)
        && link_component_identity_eq(&previous.link_component, &next.link_component)
        && previous.api_key == next.api_key
        && previous.host_origin == next.host_origin
        && previous.force_redirect == next.force_redirect
}

fn translations_identity_eq(a: &Option<Arc<Translations>>, b: &Option<Arc<Translations>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        _ => false,
    }
}

fn link_component_identity_eq(
    a: &Option<Arc<dyn LinkComponent>>,
    b: &Option<Arc<dyn LinkComponent>>,
) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b)),
        _ => false,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::link::{LinkComponent, LinkProps};

    use super::*;

    struct NullLink;

    impl LinkComponent for NullLink {
        fn render(&self, _props: &LinkProps) -> String {
            String::new()
        }
    }

    fn translations(value: serde_json::Value) -> Arc<Translations> {
        Arc::new(Translations::Single(value))
    }

    #[test]
    fn construction_fills_every_channel() {
        let provider = AppProvider::new_root(AppProviderProps::default());
        let scope = provider.scope();
        assert!(scope.app_context().is_some());
        assert!(scope.scroll_lock_manager().is_some());
        assert!(scope.theme().is_some());
        assert_eq!(scope.intl().translate_plain("anything"), "");
    }

    #[test]
    fn construction_pins_owned_sticky_manager() {
        let provider = AppProvider::new_root(AppProviderProps::default());
        let context = provider.scope().app_context().unwrap();
        assert!(Arc::ptr_eq(
            &context.sticky_manager,
            provider.sticky_manager()
        ));
    }

    #[test]
    fn mount_binds_document_container() {
        let provider = AppProvider::new_root(AppProviderProps::default());
        assert!(provider.sticky_manager().container().is_none());
        provider.mount();
        assert_eq!(
            provider.sticky_manager().container().unwrap().name(),
            "document"
        );
    }

    #[test]
    fn update_with_unchanged_props_keeps_same_context() {
        let i18n = translations(serde_json::json!({"hello": "Hello"}));
        let props = AppProviderProps {
            i18n: Some(Arc::clone(&i18n)),
            api_key: Some("key".to_string()),
            host_origin: Some("shop.example.com".to_string()),
            ..AppProviderProps::default()
        };
        let mut provider = AppProvider::new(props.clone(), &Scope::root());
        let before = Arc::clone(provider.context());

        provider.update(props);

        assert!(Arc::ptr_eq(provider.context(), &before));
    }

    #[test]
    fn update_with_changed_i18n_rebuilds_but_preserves_sticky_manager() {
        let mut provider = AppProvider::new_root(AppProviderProps {
            i18n: Some(translations(serde_json::json!({"hello": "Hello"}))),
            ..AppProviderProps::default()
        });
        let before = Arc::clone(provider.context());
        let sticky_before = Arc::clone(provider.sticky_manager());

        provider.update(AppProviderProps {
            i18n: Some(translations(serde_json::json!({"hello": "Bonjour"}))),
            ..AppProviderProps::default()
        });

        let after = Arc::clone(provider.context());
        assert!(!Arc::ptr_eq(&before, &after));
        assert!(Arc::ptr_eq(&after.sticky_manager, &sticky_before));
        assert_eq!(
            provider.scope().intl().translate_plain("hello"),
            "Bonjour"
        );
    }

    #[test]
    fn update_compares_i18n_by_identity_not_value() {
        let i18n = translations(serde_json::json!({"hello": "Hello"}));
        let equal_but_distinct = translations(serde_json::json!({"hello": "Hello"}));

        let mut provider = AppProvider::new_root(AppProviderProps {
            i18n: Some(i18n),
            ..AppProviderProps::default()
        });
        let before = Arc::clone(provider.context());

        provider.update(AppProviderProps {
            i18n: Some(equal_but_distinct),
            ..AppProviderProps::default()
        });

        // A new reference counts as changed even when the value is equal.
        assert!(!Arc::ptr_eq(provider.context(), &before));
    }

    #[test]
    fn update_compares_link_component_by_identity() {
        let link: Arc<dyn LinkComponent> = Arc::new(NullLink);
        let props = AppProviderProps {
            link_component: Some(Arc::clone(&link)),
            ..AppProviderProps::default()
        };
        let mut provider = AppProvider::new_root(props.clone());
        let before = Arc::clone(provider.context());

        provider.update(props);
        assert!(Arc::ptr_eq(provider.context(), &before));

        provider.update(AppProviderProps {
            link_component: Some(Arc::new(NullLink)),
            ..AppProviderProps::default()
        });
        assert!(!Arc::ptr_eq(provider.context(), &before));
    }

    #[test]
    fn update_preserves_scroll_lock_manager_identity() {
        let mut provider = AppProvider::new_root(AppProviderProps::default());
        let scroll_lock_before = Arc::clone(provider.scroll_lock_manager());

        provider.update(AppProviderProps {
            api_key: Some("key".to_string()),
            host_origin: Some("shop.example.com".to_string()),
            ..AppProviderProps::default()
        });

        let resolved = provider.scope().scroll_lock_manager().unwrap();
        assert!(Arc::ptr_eq(&resolved, &scroll_lock_before));
    }

    #[test]
    fn skipped_update_sends_no_notifications() {
        let mut provider = AppProvider::new_root(AppProviderProps::default());
        let notified = Arc::new(AtomicUsize::new(0));
        let notified_in_callback = Arc::clone(&notified);
        let _subscription = provider.scope().subscribe_app(move |_| {
            let _ = notified_in_callback.fetch_add(1, Ordering::SeqCst);
        });

        provider.update(AppProviderProps::default());
        assert_eq!(notified.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn theme_change_does_not_rebuild_configuration() {
        let mut provider = AppProvider::new_root(AppProviderProps::default());
        let before = Arc::clone(provider.context());

        provider.update(AppProviderProps {
            theme: Some(ThemeConfig::default()),
            ..AppProviderProps::default()
        });

        assert!(Arc::ptr_eq(provider.context(), &before));
        assert!(provider.scope().theme().is_some());
    }

    #[test]
    fn theme_change_notifies_only_theme_subscribers() {
        let mut provider = AppProvider::new_root(AppProviderProps::default());

        let config_notified = Arc::new(AtomicUsize::new(0));
        let theme_notified = Arc::new(AtomicUsize::new(0));
        let config_counter = Arc::clone(&config_notified);
        let theme_counter = Arc::clone(&theme_notified);
        let _config_subscription = provider.scope().subscribe_app(move |_| {
            let _ = config_counter.fetch_add(1, Ordering::SeqCst);
        });
        let _theme_subscription = provider.scope().subscribe_theme(move |_| {
            let _ = theme_counter.fetch_add(1, Ordering::SeqCst);
        });

        provider.update(AppProviderProps {
            theme: Some(ThemeConfig::default()),
            ..AppProviderProps::default()
        });

        assert_eq!(config_notified.load(Ordering::SeqCst), 0);
        assert_eq!(theme_notified.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn rebuild_notifies_each_channel_exactly_once() {
        let mut provider = AppProvider::new_root(AppProviderProps {
            i18n: Some(translations(serde_json::json!({}))),
            ..AppProviderProps::default()
        });

        let config_notified = Arc::new(AtomicUsize::new(0));
        let intl_notified = Arc::new(AtomicUsize::new(0));
        let config_counter = Arc::clone(&config_notified);
        let intl_counter = Arc::clone(&intl_notified);
        let _config_subscription = provider.scope().subscribe_app(move |_| {
            let _ = config_counter.fetch_add(1, Ordering::SeqCst);
        });
        let _intl_subscription = provider.scope().subscribe_intl(move |_| {
            let _ = intl_counter.fetch_add(1, Ordering::SeqCst);
        });

        provider.update(AppProviderProps {
            i18n: Some(translations(serde_json::json!({"hello": "Hello"}))),
            ..AppProviderProps::default()
        });

        // The configuration channel is rebuilt (i18n is a watched field), and
        // the localization channel is replaced alongside it; each channel
        // notifies only its own subscribers, exactly once.
        assert_eq!(config_notified.load(Ordering::SeqCst), 1);
        assert_eq!(intl_notified.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn drop_clears_injected_channels() {
        let provider = AppProvider::new_root(AppProviderProps::default());
        let scope = Arc::clone(provider.scope());
        drop(provider);

        assert!(scope.app_context().is_none());
        assert!(scope.scroll_lock_manager().is_none());
    }
}
