//! Translation dictionary merging.
//!
//! Merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Strings, arrays, and other values are replaced entirely by source
//!
//! Dictionaries later in the list win over earlier ones for identical keys.

use serde_json::Value;

/// Merge a list of translation dictionaries left-to-right.
///
/// Returns an empty object for an empty list. Each dictionary is merged over
/// the accumulated result, so later entries override earlier ones.
#[must_use]
pub fn merge_translations(dictionaries: &[Value]) -> Value {
    dictionaries
        .iter()
        .fold(Value::Object(serde_json::Map::new()), |acc, dictionary| {
            merge(acc, dictionary.clone())
        })
}

/// Recursive merge of two dictionary values.
fn merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Resolve a dotted path (`"Greeting.hello"`) within a dictionary tree.
pub(crate) fn lookup<'a>(translations: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = translations;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── merge_translations ──────────────────────────────────────────

    #[test]
    fn merge_empty_list_yields_empty_object() {
        let merged = merge_translations(&[]);
        assert_eq!(merged, serde_json::json!({}));
    }

    #[test]
    fn merge_single_dictionary_is_identity() {
        let dictionary = serde_json::json!({"a": "1", "b": {"c": "2"}});
        let merged = merge_translations(std::slice::from_ref(&dictionary));
        assert_eq!(merged, dictionary);
    }

    #[test]
    fn merge_later_entries_override_earlier() {
        let merged = merge_translations(&[
            serde_json::json!({"a": "1"}),
            serde_json::json!({"a": "2", "b": "3"}),
        ]);
        assert_eq!(merged, serde_json::json!({"a": "2", "b": "3"}));
    }

    #[test]
    fn merge_nested_objects_recursively() {
        let merged = merge_translations(&[
            serde_json::json!({"Common": {"undo": "Undo", "redo": "Redo"}}),
            serde_json::json!({"Common": {"undo": "Custom Undo"}}),
        ]);
        assert_eq!(merged["Common"]["undo"], "Custom Undo");
        assert_eq!(merged["Common"]["redo"], "Redo");
    }

    #[test]
    fn merge_string_replaces_object() {
        let merged = merge_translations(&[
            serde_json::json!({"a": {"nested": "x"}}),
            serde_json::json!({"a": "flat"}),
        ]);
        assert_eq!(merged["a"], "flat");
    }

    #[test]
    fn merge_three_dictionaries_last_wins() {
        let merged = merge_translations(&[
            serde_json::json!({"a": "1"}),
            serde_json::json!({"a": "2"}),
            serde_json::json!({"a": "3"}),
        ]);
        assert_eq!(merged["a"], "3");
    }

    // ── lookup ──────────────────────────────────────────────────────

    #[test]
    fn lookup_top_level_key() {
        let translations = serde_json::json!({"hello": "Hello"});
        assert_eq!(
            lookup(&translations, "hello"),
            Some(&Value::String("Hello".to_string()))
        );
    }

    #[test]
    fn lookup_dotted_path() {
        let translations = serde_json::json!({"Greeting": {"hello": "Hello, {name}!"}});
        let resolved = lookup(&translations, "Greeting.hello");
        assert_eq!(resolved.and_then(Value::as_str), Some("Hello, {name}!"));
    }

    #[test]
    fn lookup_missing_segment_is_none() {
        let translations = serde_json::json!({"Greeting": {"hello": "Hello"}});
        assert!(lookup(&translations, "Greeting.goodbye").is_none());
        assert!(lookup(&translations, "Missing.hello").is_none());
    }

    #[test]
    fn lookup_through_non_object_is_none() {
        let translations = serde_json::json!({"Greeting": "flat"});
        assert!(lookup(&translations, "Greeting.hello").is_none());
    }
}
