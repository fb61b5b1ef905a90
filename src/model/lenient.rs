//! Forgiving field decoders for upstream pipeline JSON.
//!
//! Upstream documents are produced by several generations of the content
//! pipeline and are not consistently typed. Every decoder here accepts any
//! JSON value and maps values of the wrong type to an empty/absent result, so
//! one bad optional field can never reject a whole document.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A string, or the empty string for anything else.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_string(deserializer)?.unwrap_or_default())
}

/// `Some` only for a JSON string.
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// `Some` only for a JSON number.
pub fn opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_f64())
}

/// The string entries of an array; other entries and non-arrays are dropped.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect()),
        _ => Ok(Vec::new()),
    }
}

/// The entries of an array that decode as `T`; the rest are dropped.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect()),
        _ => Ok(Vec::new()),
    }
}

/// A nested object decoded as `T`, or `None` when it does not decode.
pub fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        v @ Value::Object(_) => Ok(serde_json::from_value(v).ok()),
        _ => Ok(None),
    }
}

/// Approval flag: numeric `1` or boolean `true`.
pub fn approved_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64() == Some(1.0),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "string")]
        name: String,
        #[serde(default, deserialize_with = "opt_number")]
        score: Option<f64>,
        #[serde(default, deserialize_with = "string_list")]
        tags: Vec<String>,
        #[serde(default, deserialize_with = "approved_flag")]
        approved: bool,
    }

    fn probe(value: serde_json::Value) -> Probe {
        serde_json::from_value(value).expect("lenient decode never fails")
    }

    #[test]
    fn test_wrong_types_degrade() {
        let p = probe(json!({"name": 42, "score": "high", "tags": "x", "approved": "yes"}));
        assert_eq!(p.name, "");
        assert_eq!(p.score, None);
        assert!(p.tags.is_empty());
        assert!(!p.approved);
    }

    #[test]
    fn test_mixed_list_keeps_strings() {
        let p = probe(json!({"tags": ["a", 1, null, "b", {"c": 1}]}));
        assert_eq!(p.tags, vec!["a", "b"]);
    }

    #[test]
    fn test_approved_variants() {
        assert!(probe(json!({"approved": 1})).approved);
        assert!(probe(json!({"approved": true})).approved);
        assert!(!probe(json!({"approved": 0})).approved);
        assert!(!probe(json!({})).approved);
    }

    #[test]
    fn test_null_fields() {
        let p = probe(json!({"name": null, "score": null, "tags": null}));
        assert_eq!(p.name, "");
        assert_eq!(p.score, None);
        assert!(p.tags.is_empty());
    }
}
