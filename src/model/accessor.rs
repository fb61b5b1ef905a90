//! Priority-ordered field resolution across the two document schemas.
//!
//! For every logical field the current schema wins when present and
//! non-empty; otherwise the legacy schema is used; otherwise the result is
//! empty. The two schemas are never merged.

use super::document::{Competitor, IntentTheme, Keyword, PipelineDocument, Usp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Priority classification of a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordTier {
    Primary,
    Secondary,
    LongTail,
    Excluded,
}

impl KeywordTier {
    /// Parse an upstream tier label (`Primary`, `Long-tail`, `long_tail`, ...).
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "primary" => Some(Self::Primary),
            "secondary" => Some(Self::Secondary),
            "long-tail" | "long_tail" | "longtail" | "long tail" => Some(Self::LongTail),
            "excluded" => Some(Self::Excluded),
            _ => None,
        }
    }

    /// Upstream display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Primary => "Primary",
            Self::Secondary => "Secondary",
            Self::LongTail => "Long-tail",
            Self::Excluded => "Excluded",
        }
    }
}

impl fmt::Display for KeywordTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Canonical keyword as seen by the scorers.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordEntry {
    /// Lower-cased keyword text; may be empty.
    pub text: String,
    pub tier: Option<KeywordTier>,
    /// Strength score, when the upstream record carries one.
    pub strength: Option<f64>,
    pub has_placement_plan: bool,
}

impl KeywordEntry {
    /// Strength with absent scores treated as zero, for ranking.
    #[must_use]
    pub fn rank_strength(&self) -> f64 {
        self.strength.unwrap_or(0.0)
    }

    #[must_use]
    pub fn is_tier(&self, tier: KeywordTier) -> bool {
        self.tier == Some(tier)
    }
}

impl From<&Keyword> for KeywordEntry {
    fn from(raw: &Keyword) -> Self {
        Self {
            text: keyword_text(raw).to_lowercase(),
            tier: raw
                .priority_tier
                .as_deref()
                .or(raw.tier.as_deref())
                .and_then(KeywordTier::parse),
            strength: raw.keyword_strength_score.or(raw.score),
            has_placement_plan: !raw.placement_plan.is_empty(),
        }
    }
}

/// Canonical approved USP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UspEntry {
    pub text: String,
    pub pains: Vec<String>,
    pub desires: Vec<String>,
}

/// Canonical intent theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeEntry {
    /// Theme name; empty when the upstream record has none.
    pub name: String,
    pub pains: Vec<String>,
    pub desires: Vec<String>,
    pub features: Vec<String>,
    pub keywords: Vec<String>,
}

/// Canonical competitor listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompetitorEntry {
    pub title: String,
    pub bullets: Vec<String>,
}

/// Read-only view that resolves logical fields of a [`PipelineDocument`].
#[derive(Debug, Clone, Copy)]
pub struct DocumentAccessor<'a> {
    doc: &'a PipelineDocument,
}

impl<'a> DocumentAccessor<'a> {
    #[must_use]
    pub const fn new(doc: &'a PipelineDocument) -> Self {
        Self { doc }
    }

    #[must_use]
    pub const fn document(&self) -> &'a PipelineDocument {
        self.doc
    }

    #[must_use]
    pub fn product_id(&self) -> &'a str {
        &self.doc.asin
    }

    #[must_use]
    pub fn title(&self) -> &'a str {
        &self.doc.content.title
    }

    #[must_use]
    pub fn bullets(&self) -> &'a [String] {
        &self.doc.content.bullet_points
    }

    /// Description, or the empty string.
    #[must_use]
    pub fn description(&self) -> &'a str {
        self.doc.content.description.as_deref().unwrap_or("")
    }

    /// Backend keywords: `backend_search_terms`, else `search_terms`,
    /// split on commas, trimmed, empties dropped.
    #[must_use]
    pub fn backend_keywords(&self) -> Vec<String> {
        let content = &self.doc.content;
        let raw = non_empty(content.backend_search_terms.as_deref())
            .or_else(|| non_empty(content.search_terms.as_deref()))
            .unwrap_or("");
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Short product name: title text before the first comma, else the
    /// first 50 characters, else the product id.
    #[must_use]
    pub fn product_name(&self) -> String {
        let title = self.title().trim();
        if let Some((head, _)) = title.split_once(',') {
            let head = head.trim();
            if !head.is_empty() {
                return head.to_string();
            }
        }
        if title.is_empty() {
            return self.product_id().to_string();
        }
        title.chars().take(50).collect()
    }

    /// `Keywords.enriched` in document order.
    #[must_use]
    pub fn enriched_keywords(&self) -> Vec<KeywordEntry> {
        self.doc
            .keywords
            .as_ref()
            .map(|k| k.enriched.iter().map(KeywordEntry::from).collect())
            .unwrap_or_default()
    }

    /// Lower-cased, non-empty keyword texts of one tier.
    ///
    /// Resolution: enriched keywords filtered by tier when the enriched list
    /// is non-empty; else `keyword_package.<tier>`; else
    /// `keyword_package.keyword_sets.<tier>`.
    #[must_use]
    pub fn keywords_by_tier(&self, tier: KeywordTier) -> Vec<String> {
        if let Some(enriched) = self.doc.keywords.as_ref().map(|k| &k.enriched) {
            if !enriched.is_empty() {
                return enriched
                    .iter()
                    .map(KeywordEntry::from)
                    .filter(|k| k.is_tier(tier))
                    .map(|k| k.text)
                    .filter(|t| !t.is_empty())
                    .collect();
            }
        }

        let Some(pkg) = self.doc.keyword_package.as_ref() else {
            return Vec::new();
        };

        let flat = match tier {
            KeywordTier::Primary => pkg.primary.as_slice(),
            KeywordTier::Secondary => pkg.secondary.as_slice(),
            KeywordTier::LongTail => pkg.long_tail.as_slice(),
            KeywordTier::Excluded => &[],
        };
        if !flat.is_empty() {
            return lowered_texts(flat);
        }

        let nested: &[Keyword] = match pkg.keyword_sets.as_ref() {
            Some(sets) => match tier {
                KeywordTier::Primary => &sets.primary,
                KeywordTier::Secondary => &sets.secondary,
                KeywordTier::LongTail => &sets.long_tail,
                KeywordTier::Excluded => &sets.excluded,
            },
            None => &[],
        };
        lowered_texts(nested)
    }

    /// `Competitors Final List`, else `competitor_list_final`.
    #[must_use]
    pub fn competitors(&self) -> Vec<CompetitorEntry> {
        prefer_current(&self.doc.competitors_final, &self.doc.competitor_list_final)
            .iter()
            .map(competitor_entry)
            .collect()
    }

    /// All competitor bullet texts, flattened.
    #[must_use]
    pub fn competitor_bullets(&self) -> Vec<String> {
        self.competitors()
            .into_iter()
            .flat_map(|c| c.bullets)
            .collect()
    }

    /// Approved entries of `USPs` when that list is non-empty, else the
    /// legacy `usp_approved_set` (already approved by construction).
    #[must_use]
    pub fn approved_usps(&self) -> Vec<UspEntry> {
        if self.doc.usps.is_empty() {
            self.doc.usp_approved_set.iter().map(usp_entry).collect()
        } else {
            self.doc
                .usps
                .iter()
                .filter(|u| u.approved)
                .map(usp_entry)
                .collect()
        }
    }

    /// `intent_themes_processed` in canonical form.
    #[must_use]
    pub fn intent_themes(&self) -> Vec<ThemeEntry> {
        self.doc
            .intent_themes_processed
            .iter()
            .map(theme_entry)
            .collect()
    }

    /// Upstream banned-term count; absent or malformed counts are zero.
    #[must_use]
    pub fn banned_terms_found(&self) -> u32 {
        self.doc
            .listing_creation
            .as_ref()
            .and_then(|l| l.quality_report.as_ref())
            .and_then(|q| q.banned_terms_found)
            .filter(|n| n.is_finite() && *n > 0.0)
            .map_or(0, |n| n.round().min(f64::from(u32::MAX)) as u32)
    }
}

/// Keyword text: `keyword`, then `keyword_text`, then `keyword_canonical`.
fn keyword_text(raw: &Keyword) -> &str {
    non_empty(raw.keyword.as_deref())
        .or_else(|| non_empty(raw.keyword_text.as_deref()))
        .or_else(|| non_empty(raw.keyword_canonical.as_deref()))
        .unwrap_or("")
}

fn lowered_texts(raw: &[Keyword]) -> Vec<String> {
    raw.iter()
        .map(|k| keyword_text(k).to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

fn usp_entry(raw: &Usp) -> UspEntry {
    let text = non_empty(raw.point.as_deref())
        .or_else(|| non_empty(raw.usp_text.as_deref()))
        .or_else(|| non_empty(raw.text.as_deref()))
        .unwrap_or("");
    UspEntry {
        text: text.to_string(),
        pains: raw.pains.clone(),
        desires: raw.desires.clone(),
    }
}

fn theme_entry(raw: &IntentTheme) -> ThemeEntry {
    let name = non_empty(raw.name.as_deref())
        .or_else(|| non_empty(raw.theme.as_deref()))
        .unwrap_or("");
    ThemeEntry {
        name: name.to_string(),
        pains: prefer_current(&raw.pains, &raw.pain_points).to_vec(),
        desires: raw.desires.clone(),
        features: raw
            .features
            .iter()
            .map(|f| f.text().to_string())
            .collect(),
        keywords: raw.keywords.clone(),
    }
}

fn competitor_entry(raw: &Competitor) -> CompetitorEntry {
    CompetitorEntry {
        title: raw.title.clone().unwrap_or_default(),
        bullets: prefer_current(&raw.bullet_points, &raw.bullets).to_vec(),
    }
}

fn prefer_current<'a, T>(current: &'a [T], legacy: &'a [T]) -> &'a [T] {
    if current.is_empty() {
        legacy
    } else {
        current
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}
