//! # lattice-theme
//!
//! Theme token composition for the Lattice component runtime.
//!
//! A [`Theme`] is the set of derived visual tokens distributed to the
//! component tree. [`create_theme_context`] composes caller overrides with
//! defaults; when no overrides are supplied the theme carries no logo.
//!
//! Color-space math for deriving token values lives with the host
//! application; this crate only owns the composed token shape.

#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};

/// Logo tokens displayed in the frame's top bar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Logo {
    /// Image source for the top bar rendition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_bar_source: Option<String>,
    /// Image source for contextual save bars.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contextual_save_bar_source: Option<String>,
    /// Destination when the logo is activated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Accessible description of the logo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessibility_label: Option<String>,
    /// Rendered width in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

/// Composed visual tokens for the component tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    /// Logo tokens, absent unless the caller supplied them.
    pub logo: Option<Logo>,
}

/// Caller-supplied theme overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    /// Logo overrides.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<Logo>,
}

/// Compose a theme from optional overrides.
///
/// With no overrides the theme defaults to `logo: None`.
#[must_use]
pub fn create_theme_context(overrides: Option<ThemeConfig>) -> Theme {
    let config = overrides.unwrap_or_default();
    Theme { logo: config.logo }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
