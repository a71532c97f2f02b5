//! Main MCP server orchestration

use openapi_surface::ApiDocument;
use std::sync::Arc;
use tracing::info;

use crate::config::Settings;
use crate::error::ServerResult;
use crate::protocol::RequestHandler;
use crate::transport::{HttpTransport, StdioTransport};

/// Server mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServerMode {
    /// stdio transport (for desktop MCP clients)
    #[default]
    Stdio,
    /// HTTP/SSE transport
    Http { port: u16 },
}

/// MCP server over one loaded OpenAPI document
pub struct McpServer {
    document: Arc<ApiDocument>,
    mode: ServerMode,
    server_name: String,
    validate_outputs: bool,
}

impl McpServer {
    pub fn new(document: ApiDocument, settings: &Settings) -> Self {
        Self {
            document: Arc::new(document),
            mode: settings.server_mode(),
            server_name: settings.server_name.clone(),
            validate_outputs: settings.validate_outputs,
        }
    }

    pub fn with_mode(mut self, mode: ServerMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> ServerMode {
        self.mode
    }

    fn handler(&self) -> RequestHandler {
        RequestHandler::new(
            Arc::clone(&self.document),
            self.server_name.clone(),
            self.validate_outputs,
        )
    }

    /// Run the server until its transport shuts down
    pub async fn run(&self) -> ServerResult<()> {
        match self.mode {
            ServerMode::Stdio => {
                info!("Starting MCP server in stdio mode");
                StdioTransport::new(self.handler()).run().await
            }
            ServerMode::Http { port } => {
                info!("Starting MCP server in HTTP mode on port {}", port);
                HttpTransport::new(self.handler(), port).run().await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Overrides, TransportKind};

    fn document() -> ApiDocument {
        serde_json::from_value(serde_json::json!({
            "openapi": "3.0.0",
            "info": { "title": "Empty", "version": "1" }
        }))
        .unwrap()
    }

    #[test]
    fn test_mode_from_settings() {
        let settings = Settings::default().with_overrides(Overrides {
            transport: Some(TransportKind::Http),
            port: Some(8080),
            ..Default::default()
        });

        let server = McpServer::new(document(), &settings);

        assert_eq!(server.mode(), ServerMode::Http { port: 8080 });
    }

    #[test]
    fn test_with_mode() {
        let server = McpServer::new(document(), &Settings::default());
        assert_eq!(server.mode(), ServerMode::Stdio);

        let server = server.with_mode(ServerMode::Http { port: 9000 });
        assert_eq!(server.mode(), ServerMode::Http { port: 9000 });
    }
}
