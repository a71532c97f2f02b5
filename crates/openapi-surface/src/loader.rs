//! Building an [`ApiDocument`] from JSON or YAML text

use regex::{Captures, Regex};
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

use crate::document::ApiDocument;
use crate::error::SurfaceResult;

/// Loads OpenAPI documents from text or files
///
/// No version checks and no `$ref` resolution happen here; the loader only turns text
/// into the in-memory model.
pub struct DocumentLoader;

impl DocumentLoader {
    /// Parse a document, auto-detecting JSON (leading `{`) or YAML
    pub fn parse(content: &str) -> SurfaceResult<ApiDocument> {
        if content.trim_start().starts_with('{') {
            Self::parse_json(content)
        } else {
            Self::parse_yaml(content)
        }
    }

    pub fn parse_json(content: &str) -> SurfaceResult<ApiDocument> {
        let document: ApiDocument = serde_json::from_str(content)?;
        Self::log_loaded(&document);
        Ok(document)
    }

    pub fn parse_yaml(content: &str) -> SurfaceResult<ApiDocument> {
        let content = clamp_large_bounds(content);
        let document: ApiDocument = serde_yaml::from_str(&content)?;
        Self::log_loaded(&document);
        Ok(document)
    }

    /// Read and parse a document file; `.yaml`/`.yml` files are always read as YAML
    pub fn load(path: impl AsRef<Path>) -> SurfaceResult<ApiDocument> {
        let path = path.as_ref();
        debug!("Loading OpenAPI document from {:?}", path);

        let content = std::fs::read_to_string(path)?;
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        if is_yaml {
            Self::parse_yaml(&content)
        } else {
            Self::parse(&content)
        }
    }

    fn log_loaded(document: &ApiDocument) {
        debug!(
            "Loaded OpenAPI {} document {:?} with {} paths",
            document.openapi.as_deref().unwrap_or("?"),
            document.title().unwrap_or("untitled"),
            document.paths.as_ref().map_or(0, |paths| paths.len())
        );
    }
}

/// Clamp schema bounds too wide for YAML number parsing to the i32 range
///
/// Some published specs use 19-digit `minimum`/`maximum` values; only their sign
/// matters to anything downstream.
fn clamp_large_bounds(content: &str) -> String {
    static LARGE_BOUND: OnceLock<Option<Regex>> = OnceLock::new();

    let pattern = LARGE_BOUND.get_or_init(|| {
        Regex::new(r"(?m)^(\s*(?:minimum|maximum|exclusiveMinimum|exclusiveMaximum):\s*)(-?\d{16,})").ok()
    });

    match pattern {
        Some(re) => re
            .replace_all(content, |caps: &Captures| {
                let bound = if caps[2].starts_with('-') {
                    i32::MIN
                } else {
                    i32::MAX
                };
                format!("{}{}", &caps[1], bound)
            })
            .into_owned(),
        None => content.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SurfaceError;
    use std::io::Write;

    const SAMPLE_SPEC: &str = r#"
openapi: "3.0.0"
info:
  title: Test API
  version: "1.0.0"
paths:
  /users:
    get:
      operationId: listUsers
      summary: List all users
      responses:
        '200':
          description: A list of users
    post:
      operationId: createUser
      requestBody:
        required: true
        content:
          application/json:
            schema:
              type: object
      responses:
        '201':
          description: User created
components:
  securitySchemes:
    bearerAuth:
      type: http
      scheme: bearer
security:
  - bearerAuth: []
"#;

    #[test]
    fn test_parse_yaml() {
        let document = DocumentLoader::parse(SAMPLE_SPEC).unwrap();

        assert_eq!(document.openapi.as_deref(), Some("3.0.0"));
        assert_eq!(document.title(), Some("Test API"));
        let paths = document.paths.as_ref().unwrap();
        let users = paths["/users"].as_ref().unwrap();
        assert!(users.get.is_some());
        assert!(users.post.is_some());
        assert_eq!(document.security.as_ref().unwrap()[0]["bearerAuth"].len(), 0);
    }

    #[test]
    fn test_parse_json_detected() {
        let document = DocumentLoader::parse(
            r#"  {"openapi": "3.1.0", "paths": {"/health": {"get": {}}}}"#,
        )
        .unwrap();

        assert_eq!(document.openapi.as_deref(), Some("3.1.0"));
        assert_eq!(document.paths.unwrap().len(), 1);
    }

    #[test]
    fn test_parse_lenient_document() {
        let document = DocumentLoader::parse_json(
            r#"{
                "openapi": "3.0.0",
                "paths": { "/a": null, "/pet": { "get": {} } },
                "components": {
                    "securitySchemes": { "api_key": { "type": "apiKey", "in": "header" } }
                }
            }"#,
        )
        .unwrap();

        let endpoints = crate::list_endpoints(&document);
        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].id, "GET__pet");
        assert_eq!(crate::detect_auth(&document).schemes.len(), 1);
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = DocumentLoader::parse("{ not json");
        assert!(matches!(result, Err(SurfaceError::Json(_))));
    }

    #[test]
    fn test_clamp_large_bounds() {
        let yaml = r#"
openapi: "3.0.0"
paths: {}
components:
  schemas:
    Seed:
      type: integer
      minimum: -9223372036854776000
      maximum: 9223372036854776000
"#;

        let clamped = clamp_large_bounds(yaml);
        assert!(clamped.contains("minimum: -2147483648"));
        assert!(clamped.contains("maximum: 2147483647"));
        assert!(DocumentLoader::parse_yaml(yaml).is_ok());
    }

    #[test]
    fn test_load_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        file.write_all(SAMPLE_SPEC.as_bytes()).unwrap();

        let document = DocumentLoader::load(file.path()).unwrap();
        assert_eq!(document.title(), Some("Test API"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = DocumentLoader::load("/nonexistent/openapi.json");
        assert!(matches!(result, Err(SurfaceError::Io(_))));
    }
}
