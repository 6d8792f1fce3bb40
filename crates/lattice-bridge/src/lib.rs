//! # lattice-bridge
//!
//! Deprecated embedded-host integration for the Lattice component runtime.
//!
//! When a host application still embeds Lattice through an API key, the
//! provider constructs a [`HostApp`] handle. The handle carries a
//! [`HookRegistry`](hooks::HookRegistry) of lifecycle middleware: every
//! dispatched [`Action`](action::Action) is folded through the registered
//! middleware chain before it reaches the host.
//!
//! This integration path is deprecated; new hosts should mount the embedded
//! frame directly. The provider emits a deprecation warning each time a
//! handle is constructed.

#![deny(unsafe_code)]

pub mod action;
pub mod app;
pub mod hooks;

pub use action::{Action, ClientInterface};
pub use app::{HOST_ORIGIN_ENV, HostApp, HostAppConfig, ambient_host_origin, create_host_app};
pub use hooks::{ActionMiddleware, HookRegistry, LifecycleHook};
