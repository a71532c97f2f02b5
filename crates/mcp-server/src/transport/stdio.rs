//! stdio transport for MCP (newline-delimited JSON-RPC)

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use crate::error::ServerResult;
use crate::protocol::{McpError, McpMessage, RequestHandler};

/// stdio transport for MCP protocol
pub struct StdioTransport {
    handler: RequestHandler,
}

impl StdioTransport {
    pub fn new(handler: RequestHandler) -> Self {
        Self { handler }
    }

    /// Serve stdin/stdout until EOF
    pub async fn run(&mut self) -> ServerResult<()> {
        info!("Starting MCP server on stdio");

        let reader = BufReader::new(tokio::io::stdin());
        self.run_with(reader, tokio::io::stdout()).await
    }

    /// Serve any line-oriented reader/writer pair until the reader hits EOF
    pub async fn run_with<R, W>(&mut self, mut reader: R, mut writer: W) -> ServerResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut line = String::new();

        loop {
            line.clear();

            let bytes_read = reader.read_line(&mut line).await?;
            if bytes_read == 0 {
                info!("EOF received, shutting down");
                break;
            }

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            debug!("Received: {}", line);

            let response = match serde_json::from_str::<McpMessage>(line) {
                Ok(message) => self.handler.handle(message),
                Err(e) => {
                    error!("Failed to parse message: {}", e);
                    Some(McpMessage::error_response(None, McpError::parse_error()))
                }
            };

            if let Some(response) = response {
                let response_line = serde_json::to_string(&response)?;
                debug!("Sending: {}", response_line);
                writer.write_all(response_line.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openapi_surface::ApiDocument;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn transport() -> StdioTransport {
        let document: ApiDocument = serde_json::from_value(json!({
            "openapi": "3.0.0",
            "info": { "title": "Inventory", "version": "1" },
            "paths": {
                "/items": { "get": { "summary": "List items" } }
            }
        }))
        .unwrap();

        StdioTransport::new(RequestHandler::new(Arc::new(document), "inventory", true))
    }

    async fn exchange(input: &str) -> Vec<Value> {
        let mut output = Vec::new();
        transport()
            .run_with(input.as_bytes(), &mut output)
            .await
            .unwrap();

        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_request_per_line() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"list_endpoints"}}"#,
            "\n",
        );

        let responses = exchange(input).await;

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["id"], 1);
        assert_eq!(responses[0]["result"], json!({}));

        assert_eq!(responses[1]["id"], 2);
        let text = responses[1]["result"]["content"][0]["text"].as_str().unwrap();
        let endpoints: Value = serde_json::from_str(text).unwrap();
        assert_eq!(endpoints[0]["id"], "GET__items");
    }

    #[tokio::test]
    async fn test_parse_error() {
        let responses = exchange("{not json\n").await;

        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0]["error"]["code"], McpError::PARSE_ERROR);
        assert!(responses[0].get("id").is_none());
    }

    #[tokio::test]
    async fn test_empty_input() {
        assert!(exchange("").await.is_empty());
    }
}
