//! Configuration construction.
//!
//! [`create_app_context`] builds the configuration a provider injects:
//! the link resolver, the sticky manager (supplied or fresh), and, only when
//! an API key override is present, the deprecated embedded-host handle.
//! [`create_lattice_context`] composes that with theme tokens and a
//! localization handle into the full configuration object.

use std::fmt;
use std::sync::Arc;

use lattice_bridge::{
    Action, ActionMiddleware, ClientInterface, HostApp, HostAppConfig, LifecycleHook,
    ambient_host_origin, create_host_app,
};
use lattice_intl::{Intl, Translations};
use lattice_theme::{Theme, ThemeConfig, create_theme_context};
use tracing::{debug, warn};

use crate::link::{Link, LinkComponent};
use crate::sticky::StickyManager;
use crate::{LIBRARY_NAME, LIBRARY_VERSION};

/// Overrides accepted by [`create_app_context`].
#[derive(Clone, Default)]
pub struct AppContextOptions {
    /// Custom link renderer.
    pub link_component: Option<Arc<dyn LinkComponent>>,
    /// API key for the deprecated embedded-host integration.
    pub api_key: Option<String>,
    /// Host origin override; resolved from the ambient environment when
    /// absent.
    pub host_origin: Option<String>,
    /// Whether the host should force a redirect into the embedded frame.
    pub force_redirect: Option<bool>,
    /// Existing sticky manager to preserve across rebuilds. A fresh manager
    /// is constructed when absent.
    pub sticky_manager: Option<Arc<StickyManager>>,
}

impl fmt::Debug for AppContextOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContextOptions")
            .field("link_component", &self.link_component.is_some())
            .field("api_key", &self.api_key.is_some())
            .field("host_origin", &self.host_origin)
            .field("force_redirect", &self.force_redirect)
            .field("sticky_manager", &self.sticky_manager.is_some())
            .finish()
    }
}

/// The configuration injected on the provider's configuration channel.
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Link-rendering capability, rebuilt with every configuration.
    pub link: Link,
    /// Sticky-positioning coordinator; identity survives rebuilds.
    pub sticky_manager: Arc<StickyManager>,
    /// Deprecated embedded-host handle; present only when an API key override
    /// was supplied.
    pub host_app: Option<Arc<HostApp>>,
}

/// Stamps the client identity onto every dispatched action and forwards it
/// otherwise unchanged.
struct ClientInterfaceStamp;

impl ActionMiddleware for ClientInterfaceStamp {
    fn name(&self) -> &str {
        "client-interface"
    }

    fn apply(&self, mut action: Action) -> Action {
        action.client_interface = Some(ClientInterface {
            name: LIBRARY_NAME.to_string(),
            version: LIBRARY_VERSION.to_string(),
        });
        action
    }
}

/// Build a configuration from overrides.
///
/// The link resolver is always constructed fresh. The sticky manager is the
/// supplied instance when present (this is how the provider pins manager
/// identity across rebuilds) and a fresh one otherwise. The embedded-host
/// handle is constructed only when `api_key` is set; its construction emits
/// one deprecation warning and registers the client-identity middleware on
/// the dispatch chain.
#[must_use]
pub fn create_app_context(options: AppContextOptions) -> AppContext {
    let AppContextOptions {
        link_component,
        api_key,
        host_origin,
        force_redirect,
        sticky_manager,
    } = options;

    let link = Link::new(link_component);
    let sticky_manager = sticky_manager.unwrap_or_else(|| Arc::new(StickyManager::new()));

    let host_app = api_key
        .filter(|key| !key.is_empty())
        .map(|api_key| build_host_app(api_key, host_origin, force_redirect));

    AppContext {
        link,
        sticky_manager,
        host_app,
    }
}

fn build_host_app(
    api_key: String,
    host_origin: Option<String>,
    force_redirect: Option<bool>,
) -> Arc<HostApp> {
    let host_origin = host_origin
        .or_else(ambient_host_origin)
        .unwrap_or_else(|| {
            warn!("no host origin supplied and none found in the ambient environment");
            String::new()
        });

    let app = create_host_app(HostAppConfig {
        api_key,
        host_origin,
        force_redirect: force_redirect.unwrap_or(false),
    });

    warn!(
        "Deprecation: using `api_key` and `host_origin` on the provider to initialize the \
         embedded host is deprecated and will be removed in the next major version. Construct \
         the host bridge directly instead."
    );

    app.hooks()
        .set(LifecycleHook::DispatchAction, Arc::new(ClientInterfaceStamp));

    Arc::new(app)
}

/// Inputs for composing the full configuration.
#[derive(Debug, Clone, Default)]
pub struct LatticeContextOptions {
    /// Configuration overrides.
    pub app: Option<AppContextOptions>,
    /// Theme overrides.
    pub theme: Option<ThemeConfig>,
    /// Translation input.
    pub i18n: Option<Translations>,
}

/// The full composed configuration: link, managers, localization, and theme.
#[derive(Debug, Clone)]
pub struct LatticeContext {
    /// Link-rendering capability.
    pub link: Link,
    /// Sticky-positioning coordinator.
    pub sticky_manager: Arc<StickyManager>,
    /// Deprecated embedded-host handle.
    pub host_app: Option<Arc<HostApp>>,
    /// Localization handle.
    pub intl: Arc<Intl>,
    /// Composed theme tokens.
    pub theme: Theme,
}

/// Compose the full configuration from optional sub-inputs.
///
/// Pure composition: delegates to [`create_app_context`] and the theme
/// composer, builds the localization handle, and merges the results flat.
/// Never caches — callers decide when a new configuration exists.
#[must_use]
pub fn create_lattice_context(options: LatticeContextOptions) -> LatticeContext {
    let LatticeContextOptions { app, theme, i18n } = options;

    let app = create_app_context(app.unwrap_or_default());
    let theme = create_theme_context(theme);
    let intl = Arc::new(Intl::new(i18n.unwrap_or_default()));
    debug!(has_host_app = app.host_app.is_some(), "composed configuration");

    LatticeContext {
        link: app.link,
        sticky_manager: app.sticky_manager,
        host_app: app.host_app,
        intl,
        theme,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
