//! Snapshot version resolution.
//!
//! Many dated snapshots of the same product can exist side by side. Files are
//! grouped by product identifier, ordered by the date embedded in their file
//! name (falling back to the storage timestamp) and numbered from 1; the last
//! file of each group is the authoritative latest version.
//!
//! Everything here is a pure transform over in-memory descriptors.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static PRODUCT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(B[A-Z0-9]{9})(?:_|\.json$)").expect("static regex"));
static JSON_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.json$").expect("static regex"));
static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_(\d{4}-\d{2}-\d{2})\.json$").expect("static regex"));
static COMPACT_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"_(\d{4})(\d{2})(\d{2})_\d{6}\.json$").expect("static regex")
});

/// A stored snapshot file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// Product identifier extracted from the file name
    pub product_id: String,
    /// Storage key or relative path, `/`-separated
    pub key: String,
    /// Last path segment of `key`
    pub name: String,
    /// Size in bytes
    pub size: u64,
    pub last_modified: DateTime<Utc>,
}

impl FileDescriptor {
    /// Build a descriptor from a storage key, deriving name and product id.
    #[must_use]
    pub fn from_key(key: impl Into<String>, size: u64, last_modified: DateTime<Utc>) -> Self {
        let key = key.into();
        let name = file_name(&key).to_string();
        Self {
            product_id: extract_product_id(&name),
            key,
            name,
            size,
            last_modified,
        }
    }
}

/// A file with its inferred position in its product's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionedFile {
    pub product_id: String,
    /// 1-based, chronological
    pub version: u32,
    /// `YYYY-MM-DD`
    pub date: String,
    pub file: FileDescriptor,
}

fn file_name(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}

/// Product identifier from a file name.
///
/// A leading `B` plus nine alphanumerics, followed by `_` or `.json`, is
/// returned upper-cased; anything else yields the name minus `.json`.
#[must_use]
pub fn extract_product_id(file_name: &str) -> String {
    match PRODUCT_ID.captures(file_name) {
        Some(caps) => caps[1].to_uppercase(),
        None => JSON_SUFFIX.replace(file_name, "").into_owned(),
    }
}

/// Date embedded in a file name, as `YYYY-MM-DD`.
///
/// Recognizes `..._YYYY-MM-DD.json` and `..._YYYYMMDD_HHMMSS.json`.
#[must_use]
pub fn extract_date_from_filename(key: &str) -> Option<String> {
    let name = file_name(key);
    if let Some(caps) = ISO_DATE.captures(name) {
        return Some(caps[1].to_string());
    }
    COMPACT_DATE
        .captures(name)
        .map(|caps| format!("{}-{}-{}", &caps[1], &caps[2], &caps[3]))
}

/// Version histories for every product, in first-seen product order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionIndex {
    groups: IndexMap<String, Vec<VersionedFile>>,
}

impl VersionIndex {
    /// History of one product, oldest first.
    #[must_use]
    pub fn history(&self, product_id: &str) -> Option<&[VersionedFile]> {
        self.groups.get(product_id).map(Vec::as_slice)
    }

    /// Latest version of one product.
    #[must_use]
    pub fn latest(&self, product_id: &str) -> Option<&VersionedFile> {
        self.history(product_id).and_then(latest_version)
    }

    /// Latest file of every product.
    #[must_use]
    pub fn latest_files(&self) -> Vec<FileDescriptor> {
        self.groups
            .values()
            .filter_map(|v| latest_version(v))
            .map(|v| v.file.clone())
            .collect()
    }

    /// Iterate product histories.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[VersionedFile])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    #[must_use]
    pub fn product_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of files across all products.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Group files by product and number each group chronologically.
///
/// Dates compare lexicographically; files with equal dates keep input order.
#[must_use]
pub fn group_versions(files: &[FileDescriptor]) -> VersionIndex {
    let mut groups: IndexMap<String, Vec<VersionedFile>> = IndexMap::new();

    for file in files {
        let date = extract_date_from_filename(&file.key)
            .unwrap_or_else(|| file.last_modified.format("%Y-%m-%d").to_string());
        groups
            .entry(file.product_id.clone())
            .or_default()
            .push(VersionedFile {
                product_id: file.product_id.clone(),
                version: 0,
                date,
                file: file.clone(),
            });
    }

    for (product_id, versions) in &mut groups {
        versions.sort_by(|a, b| a.date.cmp(&b.date));
        for (version, file) in (1u32..).zip(versions.iter_mut()) {
            file.version = version;
        }
        tracing::debug!(product = %product_id, versions = versions.len(), "Grouped versions");
    }

    VersionIndex { groups }
}

/// Last entry of a sorted history.
#[must_use]
pub fn latest_version(versions: &[VersionedFile]) -> Option<&VersionedFile> {
    versions.last()
}

/// The latest file of every product.
#[must_use]
pub fn resolve_latest(files: &[FileDescriptor]) -> Vec<FileDescriptor> {
    group_versions(files).latest_files()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn file(key: &str, modified: DateTime<Utc>) -> FileDescriptor {
        FileDescriptor::from_key(key, 100, modified)
    }

    #[test]
    fn test_extract_product_id() {
        assert_eq!(extract_product_id("B0123ABCDE_2024-01-05.json"), "B0123ABCDE");
        assert_eq!(extract_product_id("b0123abcde.json"), "B0123ABCDE");
        assert_eq!(extract_product_id("report_final.JSON"), "report_final");
        // eleven characters: not an identifier
        assert_eq!(extract_product_id("B0123ABCDEF.json"), "B0123ABCDEF");
    }

    #[test]
    fn test_from_key_uses_last_segment() {
        let f = file("reports/2024/B0123ABCDE_2024-01-05.json", at(2024, 1, 5));
        assert_eq!(f.name, "B0123ABCDE_2024-01-05.json");
        assert_eq!(f.product_id, "B0123ABCDE");
    }

    #[test]
    fn test_extract_dates() {
        assert_eq!(
            extract_date_from_filename("B0123ABCDE_2024-01-05.json").as_deref(),
            Some("2024-01-05")
        );
        assert_eq!(
            extract_date_from_filename("B0123ABCDE_john_test1_20240115_143000.json").as_deref(),
            Some("2024-01-15")
        );
        assert_eq!(
            extract_date_from_filename("prefix/B0123ABCDE_2024-03-10.json").as_deref(),
            Some("2024-03-10")
        );
        assert_eq!(extract_date_from_filename("B0123ABCDE.json"), None);
        assert_eq!(extract_date_from_filename("B0123ABCDE_20240115.json"), None);
    }

    #[test]
    fn test_latest_by_embedded_date() {
        let files = vec![
            file("B0123ABCDE_2024-03-10.json", at(2024, 1, 1)),
            file("B0123ABCDE_2024-01-05.json", at(2024, 6, 1)),
        ];
        let index = group_versions(&files);
        let history = index.history("B0123ABCDE").unwrap();
        assert_eq!(history[0].date, "2024-01-05");
        assert_eq!(history[0].version, 1);
        assert_eq!(history[1].date, "2024-03-10");
        assert_eq!(history[1].version, 2);

        let latest = resolve_latest(&files);
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].name, "B0123ABCDE_2024-03-10.json");
    }

    #[test]
    fn test_fallback_to_last_modified() {
        let files = vec![
            file("B0123ABCDE.json", at(2024, 2, 1)),
            file("B0123ABCDE_2024-01-15.json", at(2024, 9, 9)),
        ];
        let index = group_versions(&files);
        let latest = index.latest("B0123ABCDE").unwrap();
        assert_eq!(latest.date, "2024-02-01");
        assert_eq!(latest.file.key, "B0123ABCDE.json");
    }

    #[test]
    fn test_ties_keep_input_order() {
        let files = vec![
            file("B0123ABCDE_a_2024-01-05.json", at(2024, 1, 5)),
            file("B0123ABCDE_b_2024-01-05.json", at(2024, 1, 5)),
        ];
        let index = group_versions(&files);
        let history = index.history("B0123ABCDE").unwrap();
        assert_eq!(history[0].file.key, "B0123ABCDE_a_2024-01-05.json");
        assert_eq!(history[1].version, 2);
        assert_eq!(index.latest("B0123ABCDE").unwrap().file.key, "B0123ABCDE_b_2024-01-05.json");
    }

    #[test]
    fn test_groups_in_first_seen_order() {
        let files = vec![
            file("B0000000002_2024-01-01.json", at(2024, 1, 1)),
            file("B0000000001_2024-01-01.json", at(2024, 1, 1)),
            file("B0000000002_2024-02-01.json", at(2024, 2, 1)),
        ];
        let index = group_versions(&files);
        assert_eq!(index.product_count(), 2);
        assert_eq!(index.file_count(), 3);
        let ids: Vec<&str> = index.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["B0000000002", "B0000000001"]);
        let latest: Vec<String> = index.latest_files().into_iter().map(|f| f.name).collect();
        assert_eq!(
            latest,
            vec!["B0000000002_2024-02-01.json", "B0000000001_2024-01-01.json"]
        );
    }

    #[test]
    fn test_empty_input() {
        let index = group_versions(&[]);
        assert!(index.is_empty());
        assert!(resolve_latest(&[]).is_empty());
        assert!(latest_version(&[]).is_none());
    }
}
