//! Unified error types for lqs-tools.
//!
//! The scoring core itself is infallible: every missing or malformed optional
//! field degrades to a neutral default. Errors only arise at the edges, when a
//! document is decoded, read from disk, or when configuration is invalid.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for lqs-tools operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LqsError {
    /// The document violates the minimal shape required for scoring
    #[error("Invalid pipeline document: {context}")]
    Document {
        context: String,
        #[source]
        source: DocumentErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific document error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DocumentErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Field '{field}' has the wrong shape (expected {expected})")]
    InvalidShape { field: String, expected: String },
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for lqs-tools operations
pub type Result<T> = std::result::Result<T, LqsError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl LqsError {
    /// Create a document error with context
    pub fn document(context: impl Into<String>, source: DocumentErrorKind) -> Self {
        Self::Document {
            context: context.into(),
            source,
        }
    }

    /// Create a document error for a missing required field
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::document(
            "missing required field",
            DocumentErrorKind::MissingField {
                field: field.into(),
            },
        )
    }

    /// Create a document error for a field with the wrong JSON type
    pub fn invalid_shape(field: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::document(
            "unexpected field shape",
            DocumentErrorKind::InvalidShape {
                field: field.into(),
                expected: expected.into(),
            },
        )
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let message = format!("{source}");
        Self::Io {
            path: Some(path.into()),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this error means the input document was rejected
    #[must_use]
    pub const fn is_rejected_document(&self) -> bool {
        matches!(self, Self::Document { .. })
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for LqsError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for LqsError {
    fn from(err: serde_json::Error) -> Self {
        Self::document(
            "JSON deserialization",
            DocumentErrorKind::InvalidJson(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// ```ignore
/// use lqs_tools::error::ErrorContext;
///
/// let raw = std::fs::read_to_string(path).context("reading listing document")?;
/// let doc = PipelineDocument::from_json_str(&raw)
///     .with_context(|| format!("decoding {}", path.display()))?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    ///
    /// The context string is prepended to the error's existing context.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<LqsError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: LqsError, new_ctx: &str) -> LqsError {
    match err {
        LqsError::Document {
            context: existing,
            source,
        } => LqsError::Document {
            context: chain_context(new_ctx, &existing),
            source,
        },
        LqsError::Io {
            path,
            message,
            source,
        } => LqsError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        LqsError::Config(msg) => LqsError::Config(chain_context(new_ctx, &msg)),
        LqsError::Validation(msg) => LqsError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together as "`new`: `existing`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message() {
        let err = LqsError::missing_field("Content.title");
        assert!(err.is_rejected_document());
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("Missing required field: Content.title")
        );
    }

    #[test]
    fn test_context_chaining() {
        let result: std::result::Result<(), LqsError> = Err(LqsError::validation("bad score"));
        let err = result.context("loading config").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: loading config: bad score"
        );
    }

    #[test]
    fn test_with_context_on_document_error() {
        let result: std::result::Result<(), LqsError> = Err(LqsError::missing_field("Content"));
        let err = result.with_context(|| "decoding B0123ABCDE.json").unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Invalid pipeline document: decoding B0123ABCDE.json"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: LqsError = json_err.into();
        assert!(matches!(
            err,
            LqsError::Document {
                source: DocumentErrorKind::InvalidJson(_),
                ..
            }
        ));
    }

    #[test]
    fn test_chain_context_empty_existing() {
        assert_eq!(chain_context("outer", ""), "outer");
        assert_eq!(chain_context("outer", "inner"), "outer: inner");
    }
}
