//! Error types for openapi-surface

use std::fmt;
use thiserror::Error;

/// Result type alias for fallible openapi-surface operations
pub type SurfaceResult<T> = std::result::Result<T, SurfaceError>;

/// Errors raised by document loading and boundary validation
///
/// The projections themselves never fail.
#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid boundary schema {schema}: {message}")]
    SchemaBuild {
        schema: &'static str,
        message: String,
    },

    #[error(transparent)]
    SchemaViolation(#[from] SchemaViolations),
}

/// Every mismatch between a value and a boundary schema
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaViolations {
    /// Name of the schema that rejected the value
    pub schema: &'static str,
    pub violations: Vec<Violation>,
}

/// A single mismatch
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// JSON pointer to the offending value ("" for the root)
    pub path: String,
    pub message: String,
}

impl SchemaViolations {
    /// Whether any violation points at `path`
    pub fn has_path(&self, path: &str) -> bool {
        self.violations.iter().any(|v| v.path == path)
    }
}

impl fmt::Display for SchemaViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} failed validation with {} violation(s)",
            self.schema,
            self.violations.len()
        )?;
        for violation in &self.violations {
            write!(f, "\n  {}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaViolations {}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "/" } else { &self.path };
        write!(f, "{}: {}", path, self.message)
    }
}
