//! Server settings
//!
//! Settings come from an optional JSON file; command-line flags override them.
//! Every field has a default, so an empty file (or none at all) is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{ServerError, ServerResult};
use crate::server::ServerMode;

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 3000;

/// Transport selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    #[default]
    Stdio,
    Http,
}

/// Server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// OpenAPI document to serve (JSON or YAML)
    pub spec_path: Option<PathBuf>,
    pub transport: TransportKind,
    /// Port for the HTTP transport
    pub port: u16,
    /// Name reported in the initialize handshake
    pub server_name: String,
    /// `tracing` filter directive, used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Check every tool output against its boundary schema
    pub validate_outputs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            spec_path: None,
            transport: TransportKind::default(),
            port: DEFAULT_PORT,
            server_name: "openapi-surface".to_string(),
            log_filter: "info".to_string(),
            validate_outputs: true,
        }
    }
}

/// Command-line values that take precedence over the settings file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub spec_path: Option<PathBuf>,
    pub transport: Option<TransportKind>,
    pub port: Option<u16>,
    pub server_name: Option<String>,
    pub skip_validation: bool,
}

impl Settings {
    /// Load settings from a JSON file
    pub fn load(path: &Path) -> ServerResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let settings = serde_json::from_str(&contents).map_err(|source| ServerError::Settings {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Load from `path` when given, otherwise start from defaults
    pub fn load_or_default(path: Option<&Path>) -> ServerResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                debug!("No settings file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(spec_path) = overrides.spec_path {
            self.spec_path = Some(spec_path);
        }
        if let Some(transport) = overrides.transport {
            self.transport = transport;
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(server_name) = overrides.server_name {
            self.server_name = server_name;
        }
        if overrides.skip_validation {
            self.validate_outputs = false;
        }
        self
    }

    /// Document path, or an error when none is configured
    pub fn require_spec_path(&self) -> ServerResult<&Path> {
        self.spec_path.as_deref().ok_or(ServerError::MissingSpec)
    }

    pub fn server_mode(&self) -> ServerMode {
        match self.transport {
            TransportKind::Stdio => ServerMode::Stdio,
            TransportKind::Http => ServerMode::Http { port: self.port },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn settings_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();

        assert_eq!(settings.port, 3000);
        assert_eq!(settings.transport, TransportKind::Stdio);
        assert!(settings.validate_outputs);
        assert_eq!(settings.server_mode(), ServerMode::Stdio);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = settings_file(r#"{ "transport": "http", "port": 8080 }"#);
        let settings = Settings::load(file.path()).unwrap();

        assert_eq!(settings.server_mode(), ServerMode::Http { port: 8080 });
        assert_eq!(settings.server_name, "openapi-surface");
        assert_eq!(settings.log_filter, "info");
        assert!(settings.spec_path.is_none());
    }

    #[test]
    fn test_full_file() {
        let file = settings_file(
            r#"{
                "specPath": "/srv/specs/petstore.yaml",
                "transport": "stdio",
                "serverName": "petstore",
                "logFilter": "debug",
                "validateOutputs": false
            }"#,
        );
        let settings = Settings::load(file.path()).unwrap();

        assert_eq!(
            settings.require_spec_path().unwrap(),
            Path::new("/srv/specs/petstore.yaml")
        );
        assert_eq!(settings.server_name, "petstore");
        assert_eq!(settings.log_filter, "debug");
        assert!(!settings.validate_outputs);
    }

    #[test]
    fn test_invalid_file() {
        let file = settings_file(r#"{ "port": "not a number" }"#);

        let result = Settings::load(file.path());
        assert!(matches!(result, Err(ServerError::Settings { .. })));
    }

    #[test]
    fn test_overrides_take_precedence() {
        let file = settings_file(r#"{ "specPath": "from-file.json", "port": 8080 }"#);
        let settings = Settings::load_or_default(Some(file.path()))
            .unwrap()
            .with_overrides(Overrides {
                spec_path: Some(PathBuf::from("from-cli.json")),
                transport: Some(TransportKind::Http),
                port: None,
                server_name: None,
                skip_validation: true,
            });

        assert_eq!(settings.spec_path, Some(PathBuf::from("from-cli.json")));
        assert_eq!(settings.server_mode(), ServerMode::Http { port: 8080 });
        assert!(!settings.validate_outputs);
    }

    #[test]
    fn test_missing_spec() {
        let settings = Settings::load_or_default(None).unwrap();
        assert!(matches!(
            settings.require_spec_path(),
            Err(ServerError::MissingSpec)
        ));
    }
}
