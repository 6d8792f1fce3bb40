//! Link resolution.
//!
//! A [`Link`] decides how navigable links render: through a caller-supplied
//! [`LinkComponent`] when one was configured on the provider, otherwise
//! through a plain anchor.

use std::fmt;
use std::sync::Arc;

/// Inputs for rendering one navigable link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkProps {
    /// Destination URL.
    pub url: String,
    /// Whether the destination is outside the application.
    pub external: bool,
    /// Visible link content.
    pub content: String,
}

impl LinkProps {
    /// Create props for an in-application link.
    #[must_use]
    pub fn new(url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            external: false,
            content: content.into(),
        }
    }

    /// Mark the destination as external.
    #[must_use]
    pub fn external(mut self) -> Self {
        self.external = true;
        self
    }
}

/// A caller-supplied link renderer.
pub trait LinkComponent: Send + Sync {
    /// Render the link to markup.
    fn render(&self, props: &LinkProps) -> String;
}

/// Capability object resolving how navigable links render.
///
/// Constructed fresh on every configuration rebuild; the wrapped custom
/// component (if any) is shared by reference.
#[derive(Clone, Default)]
pub struct Link {
    custom: Option<Arc<dyn LinkComponent>>,
}

impl Link {
    /// Wrap an optional custom link renderer.
    #[must_use]
    pub fn new(custom: Option<Arc<dyn LinkComponent>>) -> Self {
        Self { custom }
    }

    /// The custom renderer, when one was configured.
    #[must_use]
    pub fn custom_component(&self) -> Option<&Arc<dyn LinkComponent>> {
        self.custom.as_ref()
    }

    /// Render a link, preferring the custom renderer over the plain anchor.
    ///
    /// The default anchor marks external destinations with `target="_blank"`
    /// and `rel="noopener noreferrer"`.
    #[must_use]
    pub fn render(&self, props: &LinkProps) -> String {
        if let Some(custom) = &self.custom {
            return custom.render(props);
        }

        if props.external {
            format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
                props.url, props.content
            )
        } else {
            format!("<a href=\"{}\">{}</a>", props.url, props.content)
        }
    }
}

impl fmt::Debug for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Link")
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
