//! URL template resolution.
//!
//! Endpoint path templates carry `{name}` placeholders that are filled in
//! from a per-call parameter bag.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::HashMap;

/// Per-call parameter bag. Keys are placeholder names, values are the
/// strings/numbers substituted into URL templates and the payload fragments
/// consumed by body strategies.
pub type ParamBag = HashMap<String, Value>;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{(\w+)\}").unwrap());

/// Replace every `{name}` placeholder in `template` with its value from the
/// parameter bag.
///
/// Resolution is total: a missing key, or a value that degrades to emptiness
/// (null, false, zero, the empty string), substitutes as the empty string.
/// Placeholders are never left literal in the output, and repeated
/// placeholders are replaced consistently everywhere. An empty template
/// resolves to an empty string.
///
/// There is no escaping mechanism; any `{word}` sequence is treated as a
/// placeholder. Misspelled bag keys therefore produce an empty segment
/// silently rather than an error.
pub fn resolve(template: &str, params: &ParamBag) -> String {
    if template.is_empty() {
        return String::new();
    }
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            params
                .get(&caps[1])
                .map(placeholder_value)
                .unwrap_or_default()
        })
        .into_owned()
}

/// String form of a bag value for URL substitution. Values without a
/// meaningful string form degrade to the empty string, same as absent keys.
fn placeholder_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) if n.as_f64() == Some(0.0) => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) | Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bag(pairs: &[(&str, Value)]) -> ParamBag {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_substitutes_named_placeholders() {
        let params = bag(&[
            ("clusterName", json!("c1")),
            ("hostName", json!("h1")),
        ]);
        assert_eq!(
            resolve("/clusters/{clusterName}/hosts/{hostName}", &params),
            "/clusters/c1/hosts/h1"
        );
    }

    #[test]
    fn test_missing_key_substitutes_empty() {
        assert_eq!(resolve("/users/{user}", &ParamBag::new()), "/users/");
    }

    #[test]
    fn test_repeated_placeholder_replaced_everywhere() {
        let params = bag(&[("x", json!("9"))]);
        assert_eq!(resolve("/a/{x}/b/{x}", &params), "/a/9/b/9");
    }

    #[test]
    fn test_template_without_placeholders_unchanged() {
        let params = bag(&[("x", json!("9"))]);
        assert_eq!(resolve("/clusters?fields=*", &params), "/clusters?fields=*");
    }

    #[test]
    fn test_empty_template_propagates() {
        let params = bag(&[("x", json!("9"))]);
        assert_eq!(resolve("", &params), "");
    }

    #[test]
    fn test_numeric_values_use_string_form() {
        let params = bag(&[("requestId", json!(42))]);
        assert_eq!(resolve("/requests/{requestId}", &params), "/requests/42");
    }

    #[test]
    fn test_falsy_values_substitute_empty() {
        let params = bag(&[
            ("a", json!(null)),
            ("b", json!(false)),
            ("c", json!("")),
            ("d", json!(0)),
        ]);
        assert_eq!(resolve("/{a}/{b}/{c}/{d}", &params), "////");
    }

    #[test]
    fn test_idempotent_once_fully_substituted() {
        let params = bag(&[("clusterName", json!("c1"))]);
        let once = resolve("/clusters/{clusterName}", &params);
        assert_eq!(resolve(&once, &params), once);
    }
}
