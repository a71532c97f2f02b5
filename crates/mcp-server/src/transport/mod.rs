//! Transport implementations for MCP server

mod http;
mod stdio;

pub use http::{router, HttpTransport};
pub use stdio::StdioTransport;
