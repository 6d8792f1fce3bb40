//! Localization error types.

use thiserror::Error;

/// Errors that can occur when resolving a translation.
#[derive(Debug, Error)]
pub enum IntlError {
    /// A template placeholder had no corresponding replacement key.
    #[error(
        "no replacement found for key '{key}'; the following replacements were passed: {provided}"
    )]
    MissingReplacement {
        /// The placeholder name that could not be resolved.
        key: String,
        /// Comma-separated list of replacement keys that were supplied.
        provided: String,
    },
}

/// Result type for localization operations.
pub type Result<T> = std::result::Result<T, IntlError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
