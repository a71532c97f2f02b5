//! Error types for the MCP server

use std::path::PathBuf;
use thiserror::Error;

use openapi_surface::SurfaceError;

/// Result type alias for server operations
pub type ServerResult<T> = std::result::Result<T, ServerError>;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("No OpenAPI document configured - pass --spec or set specPath in the settings file")]
    MissingSpec,

    #[error("Failed to load OpenAPI document: {0}")]
    Document(#[from] SurfaceError),

    #[error("Invalid settings file {path:?}: {source}")]
    Settings {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of a single tool call, reported to the client as an error result
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },

    #[error("No endpoint found with id {0}")]
    EndpointNotFound(String),

    #[error("Tool output rejected: {0}")]
    Output(#[from] SurfaceError),
}
