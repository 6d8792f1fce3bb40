//! The localization handle.
//!
//! [`Intl`] is an opaque handle over a merged translation dictionary. It is
//! rebuilt by the provider whenever the translation input changes; consumers
//! hold it only through the localization channel.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::errors::{IntlError, Result};
use crate::merge::{lookup, merge_translations};

/// Matches `{placeholder}` spans inside a translation template.
fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{([^}]*)\}").expect("placeholder pattern is valid"))
}

/// Translation input: a single dictionary or an ordered list of them.
///
/// A list is merged left-to-right, later entries overriding earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub enum Translations {
    /// One dictionary tree.
    Single(Value),
    /// Ordered dictionaries, merged left-to-right.
    List(Vec<Value>),
}

impl Translations {
    /// Collapse the input into one dictionary tree.
    #[must_use]
    pub fn into_merged(self) -> Value {
        match self {
            Self::Single(dictionary) => dictionary,
            Self::List(dictionaries) => merge_translations(&dictionaries),
        }
    }
}

impl Default for Translations {
    fn default() -> Self {
        Self::Single(Value::Object(serde_json::Map::new()))
    }
}

impl From<Value> for Translations {
    fn from(dictionary: Value) -> Self {
        Self::Single(dictionary)
    }
}

impl From<Vec<Value>> for Translations {
    fn from(dictionaries: Vec<Value>) -> Self {
        Self::List(dictionaries)
    }
}

/// A replacement value for a template placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplacementValue {
    /// Substituted verbatim.
    Text(String),
    /// Rendered with `Display`.
    Number(i64),
}

impl fmt::Display for ReplacementValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{text}"),
            Self::Number(number) => write!(f, "{number}"),
        }
    }
}

impl From<&str> for ReplacementValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for ReplacementValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<i64> for ReplacementValue {
    fn from(number: i64) -> Self {
        Self::Number(number)
    }
}

/// Placeholder replacements keyed by placeholder name.
pub type Replacements = HashMap<String, ReplacementValue>;

/// Opaque handle over a merged translation dictionary.
#[derive(Debug, Clone, PartialEq)]
pub struct Intl {
    translation: Value,
}

impl Intl {
    /// Build a handle from a translation input.
    #[must_use]
    pub fn new(translations: impl Into<Translations>) -> Self {
        Self {
            translation: translations.into().into_merged(),
        }
    }

    /// Re-point the handle at a new translation input.
    pub fn set_translations(&mut self, translations: impl Into<Translations>) {
        self.translation = translations.into().into_merged();
    }

    /// Resolve and interpolate a translation.
    ///
    /// The id is a dotted path into the dictionary tree. An id that resolves
    /// to nothing (or to a non-string) yields an empty string. Every
    /// `{placeholder}` in the template must have a replacement.
    ///
    /// # Errors
    ///
    /// Returns [`IntlError::MissingReplacement`] when the template references
    /// a placeholder absent from `replacements`.
    pub fn translate(&self, id: &str, replacements: &Replacements) -> Result<String> {
        let Some(template) = lookup(&self.translation, id).and_then(Value::as_str) else {
            debug!(id, "translation key not resolved");
            return Ok(String::new());
        };

        let mut output = String::with_capacity(template.len());
        let mut cursor = 0;
        for captures in placeholder_pattern().captures_iter(template) {
            let span = captures.get(0).expect("capture 0 always present");
            let key = &captures[1];
            let Some(replacement) = replacements.get(key) else {
                return Err(IntlError::MissingReplacement {
                    key: key.to_string(),
                    provided: format_provided_keys(replacements),
                });
            };
            output.push_str(&template[cursor..span.start()]);
            output.push_str(&replacement.to_string());
            cursor = span.end();
        }
        output.push_str(&template[cursor..]);
        Ok(output)
    }

    /// Resolve a translation without interpolation.
    ///
    /// Returns the raw template, or an empty string when the id resolves to
    /// nothing.
    #[must_use]
    pub fn translate_plain(&self, id: &str) -> String {
        lookup(&self.translation, id)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    /// Whether a dotted path resolves to a value in the dictionary.
    #[must_use]
    pub fn key_exists(&self, path: &str) -> bool {
        lookup(&self.translation, path).is_some_and(|value| !value.is_null())
    }
}

impl Default for Intl {
    /// An empty dictionary: every lookup yields an empty string.
    fn default() -> Self {
        Self::new(Translations::default())
    }
}

fn format_provided_keys(replacements: &Replacements) -> String {
    let mut keys: Vec<&str> = replacements.keys().map(String::as_str).collect();
    keys.sort_unstable();
    keys.iter()
        .map(|key| format!("'{key}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
