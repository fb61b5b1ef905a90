//! Listing document loading.

use crate::error::{ErrorContext, LqsError, Result};
use crate::model::PipelineDocument;
use std::path::Path;

/// Read and decode one listing document, with the path in error context.
pub fn load_document(path: &Path) -> Result<PipelineDocument> {
    tracing::debug!("Loading document: {}", path.display());

    let raw = std::fs::read_to_string(path).map_err(|e| LqsError::io(path, e))?;
    PipelineDocument::from_json_str(&raw).with_context(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_valid_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("B0123ABCDE.json");
        std::fs::write(
            &path,
            r#"{"ASIN":"B0123ABCDE","Content":{"title":"Mug","bullet_points":["Keeps coffee hot"]}}"#,
        )
        .unwrap();

        let doc = load_document(&path).unwrap();
        assert_eq!(doc.asin, "B0123ABCDE");
        assert_eq!(doc.content.bullet_points.len(), 1);
    }

    #[test]
    fn test_load_rejects_missing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"ASIN":"B0123ABCDE"}"#).unwrap();

        let err = load_document(&path).unwrap_err();
        assert!(err.is_rejected_document());
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_document(Path::new("/nonexistent/B0123ABCDE.json")).unwrap_err();
        assert!(matches!(err, LqsError::Io { .. }));
    }
}
