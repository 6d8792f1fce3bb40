//! Actions exchanged with the embedded host.
//!
//! Actions use `camelCase` field names (and `type` for the action kind) for
//! wire compatibility with the host's message format.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identity of the client library that produced an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInterface {
    /// Library name.
    pub name: String,
    /// Library version.
    pub version: String,
}

/// An outgoing action forwarded to the embedded host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    /// Action kind, e.g. `"APP::NAVIGATION::REDIRECT"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Action payload.
    pub payload: Value,
    /// Client identity stamp, set by dispatch middleware.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_interface: Option<ClientInterface>,
}

impl Action {
    /// Create an action with no client identity stamp.
    #[must_use]
    pub fn new(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
            client_interface: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
