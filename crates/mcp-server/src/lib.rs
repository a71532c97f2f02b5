//! # mcp-server
//!
//! MCP (Model Context Protocol) server that lets tool-calling agents explore an
//! OpenAPI document through the `openapi-surface` projections.
//! Supports both stdio and HTTP/SSE transports.

pub mod config;
pub mod error;
pub mod protocol;
mod server;
pub mod tools;
pub mod transport;

pub use config::{Overrides, Settings, TransportKind};
pub use error::{ServerError, ServerResult, ToolError};
pub use protocol::{McpError, McpMessage, RequestHandler, ServerCapabilities};
pub use server::{McpServer, ServerMode};
pub use tools::{ToolCatalog, ToolDispatcher};
pub use transport::{HttpTransport, StdioTransport};
