//! # lattice-provider
//!
//! Context composition and propagation for the Lattice component runtime.
//!
//! One [`AppProvider`] is mounted at the root of a component tree. It owns
//! the [`StickyManager`] and [`ScrollLockManager`] for the lifetime of the
//! tree, composes the configuration (link resolution, localization, theme,
//! and the deprecated embedded-host handle) once on construction, and injects
//! it into a [`Scope`] on independent propagation channels. Descendants read
//! the recombined view back with [`use_app_context`] (or through a
//! [`Connected`] wrapper) and fail with
//! [`ProviderError::MissingProvider`](errors::ProviderError) when no provider
//! is mounted above them.
//!
//! Prop updates diff a fixed set of configuration-relevant fields by
//! identity: an unrelated change rebuilds nothing and notifies nobody, and a
//! relevant change rebuilds the configuration while preserving manager
//! identity.
//!
//! ```
//! use lattice_provider::{AppProvider, AppProviderProps, use_app_context};
//!
//! let provider = AppProvider::new_root(AppProviderProps::default());
//! provider.mount();
//!
//! let view = use_app_context(provider.scope()).expect("provider is mounted");
//! assert!(!view.sticky_manager.is_stuck("header"));
//! ```

#![deny(unsafe_code)]

pub mod cell;
pub mod context;
pub mod errors;
pub mod link;
pub mod provider;
pub mod scope;
pub mod scroll_lock;
pub mod sticky;
pub mod view;

pub use cell::{ContextCell, Subscription};
pub use context::{
    AppContext, AppContextOptions, LatticeContext, LatticeContextOptions, create_app_context,
    create_lattice_context,
};
pub use errors::{ProviderError, Result};
pub use link::{Link, LinkComponent, LinkProps};
pub use provider::{AppProvider, AppProviderProps};
pub use scope::Scope;
pub use scroll_lock::{
    SCROLL_LOCKING_ATTRIBUTE, SCROLL_LOCKING_WRAPPER_ATTRIBUTE, ScrollLockGuard, ScrollLockManager,
};
pub use sticky::{PositioningCallback, ScrollContainer, StickyItem, StickyManager};
pub use view::{Component, Connected, ContextView, use_app_context};

/// Client-identity name stamped onto actions dispatched to the embedded host.
pub const LIBRARY_NAME: &str = "lattice";

/// Library version stamped alongside [`LIBRARY_NAME`].
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");
