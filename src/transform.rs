//! Rebranding transform for template metadata
//!
//! Walks an arbitrary JSON document and replaces the upstream project name with
//! ours in every string and every object key. Only the all-lowercase and the
//! capitalized spelling of the source token are touched; the substitution is a
//! plain substring replacement, so partial-word matches are rewritten too.

use serde_json::{Map, Value};

/// Upstream project name, in its lowercase spelling
pub const SOURCE_TOKEN: &str = "dokploy";

/// Name written in place of the source token
pub const REPLACEMENT_TOKEN: &str = "Hawiyat";

/// A fixed token substitution applied recursively to JSON documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rebrand {
    /// Lowercase source spelling, e.g. `dokploy`
    lower: String,
    /// Capitalized source spelling, e.g. `Dokploy`
    capitalized: String,
    /// Text written for both spellings
    replacement: String,
}

impl Default for Rebrand {
    fn default() -> Self {
        Self::new(SOURCE_TOKEN, REPLACEMENT_TOKEN)
    }
}

impl Rebrand {
    /// Creates a substitution from `source` to `replacement`.
    ///
    /// `source` is normalized to lowercase; its capitalized form is derived
    /// from it. Both spellings map to `replacement` exactly as given.
    pub fn new(source: &str, replacement: &str) -> Self {
        let lower = source.to_lowercase();
        let mut chars = lower.chars();
        let capitalized = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };

        Self {
            lower,
            capitalized,
            replacement: replacement.to_string(),
        }
    }

    /// Applies the substitution to a single piece of text
    pub fn apply_str(&self, text: &str) -> String {
        if self.lower.is_empty() {
            return text.to_string();
        }
        text.replace(&self.lower, &self.replacement)
            .replace(&self.capitalized, &self.replacement)
    }

    /// Applies the substitution to every string and key inside `value`
    ///
    /// Arrays keep their order and length. When two keys of the same object
    /// collapse into one after substitution, the one visited last wins.
    pub fn apply(&self, value: Value) -> Value {
        match value {
            Value::String(text) => Value::String(self.apply_str(&text)),
            Value::Array(items) => Value::Array(items.into_iter().map(|v| self.apply(v)).collect()),
            Value::Object(entries) => {
                let mut out = Map::with_capacity(entries.len());
                for (key, v) in entries {
                    out.insert(self.apply_str(&key), self.apply(v));
                }
                Value::Object(out)
            }
            scalar @ (Value::Null | Value::Bool(_) | Value::Number(_)) => scalar,
        }
    }
}

/// Rebrands `value` with the default dokploy to Hawiyat substitution
pub fn transform(value: Value) -> Value {
    Rebrand::default().apply(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn contains_source_token(value: &Value) -> bool {
        match value {
            Value::String(s) => s.contains("dokploy") || s.contains("Dokploy"),
            Value::Array(items) => items.iter().any(contains_source_token),
            Value::Object(map) => map
                .iter()
                .any(|(k, v)| k.contains("dokploy") || k.contains("Dokploy") || contains_source_token(v)),
            _ => false,
        }
    }

    /// Arbitrary JSON with strings and keys drawn from `text`
    fn json_value_strategy<S>(text: S) -> impl Strategy<Value = Value>
    where
        S: Strategy<Value = String> + Clone + 'static,
    {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| json!(n)),
            text.clone().prop_map(Value::String),
        ];
        leaf.prop_recursive(4, 32, 5, move |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
                prop::collection::vec((text.clone(), inner), 0..5)
                    .prop_map(|pairs| Value::Object(pairs.into_iter().collect())),
            ]
        })
    }

    /// Documents that mention the upstream name somewhere
    fn branded_json() -> impl Strategy<Value = Value> {
        json_value_strategy(prop_oneof![
            "[a-zA-Z0-9 -]{0,20}",
            "[a-z ]{0,5}(dokploy|Dokploy|DOKPLOY|dokdokployploy)[a-z ]{0,5}",
        ])
    }

    /// Documents that can never contain either source spelling
    fn unbranded_json() -> impl Strategy<Value = Value> {
        json_value_strategy("[a-cA-C0-9 _-]{0,20}")
    }

    #[test]
    fn test_replaces_lowercase_and_capitalized_tokens() {
        let rebrand = Rebrand::default();
        assert_eq!(rebrand.apply_str("built by dokploy"), "built by Hawiyat");
        assert_eq!(rebrand.apply_str("Dokploy rocks"), "Hawiyat rocks");
        assert_eq!(rebrand.apply_str("dokploy/Dokploy"), "Hawiyat/Hawiyat");
    }

    #[test]
    fn test_other_case_variants_are_untouched() {
        let rebrand = Rebrand::default();
        assert_eq!(rebrand.apply_str("DOKPLOY"), "DOKPLOY");
        assert_eq!(rebrand.apply_str("dOkploy"), "dOkploy");
    }

    #[test]
    fn test_partial_word_matches_are_replaced() {
        let rebrand = Rebrand::default();
        assert_eq!(rebrand.apply_str("mydokployapp"), "myHawiyatapp");
        assert_eq!(
            rebrand.apply_str("https://github.com/Dokploy/templates"),
            "https://github.com/Hawiyat/templates"
        );
    }

    #[test]
    fn test_end_to_end_literal() {
        let input = json!({"Dokploy-Template": "built by dokploy"});
        assert_eq!(transform(input), json!({"Hawiyat-Template": "built by Hawiyat"}));
    }

    #[test]
    fn test_arrays_keep_order_and_length() {
        let input = json!(["dokploy", 1, null, ["Dokploy"], true]);
        let output = transform(input);
        assert_eq!(output, json!(["Hawiyat", 1, null, ["Hawiyat"], true]));
    }

    #[test]
    fn test_scalars_are_unchanged() {
        assert_eq!(transform(json!(42)), json!(42));
        assert_eq!(transform(json!(1.5)), json!(1.5));
        assert_eq!(transform(json!(false)), json!(false));
        assert_eq!(transform(Value::Null), Value::Null);
    }

    #[test]
    fn test_nested_objects_rewrite_keys_and_values() {
        let input = json!({
            "id": "dokploy-redis",
            "links": {"dokployDocs": "https://docs.dokploy.com"},
            "tags": ["Dokploy", "database"]
        });
        let expected = json!({
            "id": "Hawiyat-redis",
            "links": {"HawiyatDocs": "https://docs.Hawiyat.com"},
            "tags": ["Hawiyat", "database"]
        });
        assert_eq!(transform(input), expected);
    }

    #[test]
    fn test_key_collision_keeps_later_value() {
        let input = json!({"dokploy": 1, "Dokploy": 2, "other": 3});
        let output = transform(input);

        let map = output.as_object().expect("output should be an object");
        assert_eq!(map.len(), 2, "colliding keys should merge into one");
        assert_eq!(map["Hawiyat"], json!(2));
        assert_eq!(map["other"], json!(3));
    }

    #[test]
    fn test_key_order_is_preserved() {
        let input = json!({"zeta": 1, "dokploy": 2, "alpha": 3});
        let output = transform(input);
        let keys: Vec<&str> = output.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "Hawiyat", "alpha"]);
    }

    #[test]
    fn test_custom_rebrand_derives_capitalized_form() {
        let rebrand = Rebrand::new("Acme", "Nova");
        assert_eq!(rebrand.apply_str("acme and Acme and ACME"), "Nova and Nova and ACME");
    }

    #[test]
    fn test_empty_source_token_is_a_no_op() {
        let rebrand = Rebrand::new("", "x");
        assert_eq!(rebrand.apply_str("abc"), "abc");
    }

    proptest! {
        #[test]
        fn prop_identity_without_source_token(value in unbranded_json()) {
            prop_assert_eq!(transform(value.clone()), value);
        }

        #[test]
        fn prop_output_never_contains_source_token(text in ".*(dokploy|Dokploy)?.*") {
            let out = Rebrand::default().apply_str(&text);
            prop_assert!(!out.contains("dokploy"));
            prop_assert!(!out.contains("Dokploy"));
        }

        #[test]
        fn prop_transform_is_idempotent(value in branded_json()) {
            let once = transform(value);
            let twice = transform(once.clone());
            prop_assert_eq!(twice, once);
        }

        #[test]
        fn prop_transformed_documents_are_clean(value in branded_json()) {
            prop_assert!(!contains_source_token(&transform(value)));
        }
    }
}
