//! # lattice-intl
//!
//! Localization for the Lattice component runtime.
//!
//! An [`Intl`] handle wraps a translation dictionary (a nested JSON object)
//! and resolves dotted-path keys to interpolated strings:
//!
//! ```
//! use lattice_intl::{Intl, Replacements};
//!
//! let intl = Intl::new(serde_json::json!({
//!     "Greeting": {"hello": "Hello, {name}!"}
//! }));
//!
//! let mut replacements = Replacements::new();
//! let _ = replacements.insert("name".to_string(), "Amy".into());
//! assert_eq!(intl.translate("Greeting.hello", &replacements).unwrap(), "Hello, Amy!");
//! ```
//!
//! Multiple dictionaries can be supplied as a list; they are merged
//! left-to-right, with later entries overriding earlier ones per key.

#![deny(unsafe_code)]

pub mod errors;
pub mod intl;
pub mod merge;

pub use errors::{IntlError, Result};
pub use intl::{Intl, ReplacementValue, Replacements, Translations};
pub use merge::merge_translations;
