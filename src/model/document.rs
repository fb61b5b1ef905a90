//! Serde model of the upstream pipeline document.
//!
//! Both the current and the legacy field naming schemes are decoded side by
//! side; [`DocumentAccessor`](super::DocumentAccessor) decides which one wins.
//! Scorers never read these raw structs directly.

use super::lenient;
use crate::error::{LqsError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One pipeline output document, the unit that gets scored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineDocument {
    /// Product identifier (ASIN)
    #[serde(rename = "ASIN", default, deserialize_with = "lenient::string")]
    pub asin: String,
    /// Merchant SKU
    #[serde(
        rename = "MSKU",
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub msku: Option<String>,
    /// Generated listing copy
    #[serde(rename = "Content")]
    pub content: Content,

    // ---- current schema ----
    #[serde(
        rename = "Competitors Final List",
        default,
        deserialize_with = "lenient::list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub competitors_final: Vec<Competitor>,
    #[serde(
        rename = "Keywords",
        default,
        deserialize_with = "lenient::object",
        skip_serializing_if = "Option::is_none"
    )]
    pub keywords: Option<KeywordCollections>,
    #[serde(
        rename = "USPs",
        default,
        deserialize_with = "lenient::list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub usps: Vec<Usp>,
    #[serde(
        default,
        deserialize_with = "lenient::list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub intent_themes_processed: Vec<IntentTheme>,
    #[serde(
        default,
        deserialize_with = "lenient::object",
        skip_serializing_if = "Option::is_none"
    )]
    pub listing_creation: Option<ListingCreation>,

    // ---- legacy schema ----
    #[serde(
        default,
        deserialize_with = "lenient::list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub competitor_list_final: Vec<Competitor>,
    #[serde(
        default,
        deserialize_with = "lenient::list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub usp_approved_set: Vec<Usp>,
    #[serde(
        default,
        deserialize_with = "lenient::object",
        skip_serializing_if = "Option::is_none"
    )]
    pub keyword_package: Option<KeywordPackage>,
}

/// Listing copy. `title` and `bullet_points` are required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    pub title: String,
    /// Non-string entries are dropped while decoding.
    #[serde(deserialize_with = "lenient::string_list")]
    pub bullet_points: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub search_terms: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub backend_search_terms: Option<String>,
}

/// `Keywords` block of the current schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeywordCollections {
    #[serde(default, deserialize_with = "lenient::list")]
    pub enriched: Vec<Keyword>,
}

/// Legacy `keyword_package` block: flat tier lists plus nested `keyword_sets`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeywordPackage {
    #[serde(default, deserialize_with = "lenient::list")]
    pub primary: Vec<Keyword>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub secondary: Vec<Keyword>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub long_tail: Vec<Keyword>,
    #[serde(
        default,
        deserialize_with = "lenient::object",
        skip_serializing_if = "Option::is_none"
    )]
    pub keyword_sets: Option<KeywordSets>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeywordSets {
    #[serde(default, deserialize_with = "lenient::list")]
    pub primary: Vec<Keyword>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub secondary: Vec<Keyword>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub long_tail: Vec<Keyword>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub excluded: Vec<Keyword>,
}

/// Raw keyword record. Text, tier and strength each have several spellings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Keyword {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub keyword_canonical: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub keyword_text: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub keyword: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub priority_tier: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub tier: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub keyword_strength_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub placement_plan: Vec<String>,
}

/// Raw unique-selling-point record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usp {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub point: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub usp_text: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub text: Option<String>,
    /// `1` or `true` upstream
    #[serde(default, deserialize_with = "lenient::approved_flag")]
    pub approved: bool,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub pains: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub desires: Vec<String>,
}

/// Raw customer-intent theme.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntentTheme {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub theme: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub pains: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub pain_points: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub desires: Vec<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub features: Vec<ThemeFeature>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub keywords: Vec<String>,
}

/// A theme feature: bare text or an object carrying an interest score.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeFeature {
    Text(String),
    Scored {
        feature: String,
        #[serde(default, deserialize_with = "lenient::opt_number")]
        interest_score: Option<f64>,
    },
}

impl ThemeFeature {
    /// The feature text regardless of representation.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Text(s) | Self::Scored { feature: s, .. } => s,
        }
    }
}

/// Raw competitor listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Competitor {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub asin: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub bullet_points: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingCreation {
    #[serde(
        default,
        deserialize_with = "lenient::object",
        skip_serializing_if = "Option::is_none"
    )]
    pub quality_report: Option<QualityReport>,
}

/// Upstream generation report; only the banned-term count is consumed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QualityReport {
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub banned_terms_found: Option<f64>,
}

impl PipelineDocument {
    /// Decode a document from JSON text.
    ///
    /// Fails when the text is not JSON or the minimal shape
    /// (`Content.title` string, `Content.bullet_points` array) is missing.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Decode a document from an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        check_minimal_shape(&value)?;
        Ok(serde_json::from_value(value)?)
    }

    /// A minimal document with only the required fields.
    #[must_use]
    pub fn new(asin: impl Into<String>, title: impl Into<String>, bullets: Vec<String>) -> Self {
        Self {
            asin: asin.into(),
            content: Content {
                title: title.into(),
                bullet_points: bullets,
                ..Content::default()
            },
            ..Self::default()
        }
    }
}

fn check_minimal_shape(value: &Value) -> Result<()> {
    let root = value
        .as_object()
        .ok_or_else(|| LqsError::invalid_shape("<document>", "object"))?;

    let content = match root.get("Content") {
        None | Some(Value::Null) => return Err(LqsError::missing_field("Content")),
        Some(Value::Object(content)) => content,
        Some(_) => return Err(LqsError::invalid_shape("Content", "object")),
    };

    match content.get("title") {
        None | Some(Value::Null) => return Err(LqsError::missing_field("Content.title")),
        Some(Value::String(_)) => {}
        Some(_) => return Err(LqsError::invalid_shape("Content.title", "string")),
    }

    match content.get("bullet_points") {
        None | Some(Value::Null) => Err(LqsError::missing_field("Content.bullet_points")),
        Some(Value::Array(_)) => Ok(()),
        Some(_) => Err(LqsError::invalid_shape("Content.bullet_points", "array")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DocumentErrorKind;
    use serde_json::json;

    #[test]
    fn test_minimal_document() {
        let doc = PipelineDocument::from_value(json!({
            "ASIN": "B0123ABCDE",
            "Content": {"title": "Widget", "bullet_points": ["One", "Two"]}
        }))
        .unwrap();
        assert_eq!(doc.asin, "B0123ABCDE");
        assert_eq!(doc.content.bullet_points.len(), 2);
        assert!(doc.keywords.is_none());
    }

    #[test]
    fn test_missing_title_rejected() {
        let err = PipelineDocument::from_value(json!({
            "Content": {"bullet_points": []}
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            LqsError::Document {
                source: DocumentErrorKind::MissingField { ref field },
                ..
            } if field == "Content.title"
        ));
    }

    #[test]
    fn test_non_array_bullets_rejected() {
        let err = PipelineDocument::from_value(json!({
            "Content": {"title": "x", "bullet_points": "one bullet"}
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            LqsError::Document {
                source: DocumentErrorKind::InvalidShape { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_missing_content_rejected() {
        assert!(PipelineDocument::from_json_str(r#"{"ASIN": "B0"}"#).is_err());
        assert!(PipelineDocument::from_json_str("[1, 2]").is_err());
        assert!(PipelineDocument::from_json_str("{oops").is_err());
    }

    #[test]
    fn test_non_string_bullets_dropped() {
        let doc = PipelineDocument::from_value(json!({
            "Content": {"title": "x", "bullet_points": ["ok", 3, null, "fine"]}
        }))
        .unwrap();
        assert_eq!(doc.content.bullet_points, vec!["ok", "fine"]);
    }

    #[test]
    fn test_malformed_optional_fields_degrade() {
        let doc = PipelineDocument::from_value(json!({
            "ASIN": 12345,
            "Content": {"title": "x", "bullet_points": [], "description": ["not", "a", "string"]},
            "USPs": "nope",
            "Keywords": {"enriched": [{"keyword": "steel", "keyword_strength_score": "high"}, 7]},
            "Competitors Final List": [{"title": 5, "bullet_points": ["b"]}],
            "listing_creation": {"quality_report": {"banned_terms_found": "two"}}
        }))
        .unwrap();
        assert_eq!(doc.asin, "");
        assert!(doc.content.description.is_none());
        assert!(doc.usps.is_empty());
        let enriched = &doc.keywords.as_ref().unwrap().enriched;
        assert_eq!(enriched.len(), 1);
        assert_eq!(enriched[0].keyword_strength_score, None);
        assert_eq!(doc.competitors_final[0].title, None);
        assert_eq!(
            doc.listing_creation
                .and_then(|l| l.quality_report)
                .and_then(|q| q.banned_terms_found),
            None
        );
    }

    #[test]
    fn test_theme_features_both_shapes() {
        let doc = PipelineDocument::from_value(json!({
            "Content": {"title": "x", "bullet_points": []},
            "intent_themes_processed": [{
                "name": "Durability",
                "features": ["steel body", {"feature": "drop proof", "interest_score": 0.8}, 3]
            }]
        }))
        .unwrap();
        let features: Vec<&str> = doc.intent_themes_processed[0]
            .features
            .iter()
            .map(ThemeFeature::text)
            .collect();
        assert_eq!(features, vec!["steel body", "drop proof"]);
    }
}
