//! Provider error types.

use thiserror::Error;

/// Errors raised by the context read side.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No provider is mounted above the calling component.
    ///
    /// A component rendered outside any provider cannot resolve links,
    /// localization, or theme tokens; this is fatal to the caller's render
    /// and must surface to the host's error boundary.
    #[error(
        "no provider is mounted above this component; wrap the application \
         in an `AppProvider` so configuration, localization, and theme are available"
    )]
    MissingProvider,
}

/// Result type for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
