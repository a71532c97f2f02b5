//! MCP request handler

use openapi_surface::ApiDocument;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::capabilities::ServerCapabilities;
use super::types::*;
use crate::tools::{ToolCatalog, ToolDispatcher};

/// Handler for MCP requests against one OpenAPI document
pub struct RequestHandler {
    document: Arc<ApiDocument>,
    catalog: ToolCatalog,
    dispatcher: ToolDispatcher,
    server_name: String,
    server_version: String,
}

impl RequestHandler {
    pub fn new(
        document: Arc<ApiDocument>,
        server_name: impl Into<String>,
        validate_outputs: bool,
    ) -> Self {
        Self {
            catalog: ToolCatalog::new(document.title()),
            dispatcher: ToolDispatcher::new(Arc::clone(&document), validate_outputs),
            document,
            server_name: server_name.into(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Handle an incoming message, returning the response to send if any
    pub fn handle(&self, message: McpMessage) -> Option<McpMessage> {
        if message.jsonrpc != JSONRPC_VERSION {
            warn!("Rejecting message with jsonrpc version {}", message.jsonrpc);
            return Some(McpMessage::error_response(
                message.id,
                McpError::invalid_request(format!(
                    "Unsupported jsonrpc version: {}",
                    message.jsonrpc
                )),
            ));
        }

        match (message.method, message.id) {
            (Some(method), Some(id)) => {
                debug!("Handling request: {}", method);

                let result = match method.as_str() {
                    "initialize" => self.handle_initialize(message.params),
                    // Some clients send the handshake acknowledgement with an id
                    "initialized" | "notifications/initialized" => {
                        info!("Client initialized");
                        return None;
                    }
                    "ping" => Ok(Value::Object(serde_json::Map::new())),
                    "tools/list" => self.handle_tools_list(),
                    "tools/call" => self.handle_tools_call(message.params),
                    other => Err(McpError::method_not_found(other)),
                };

                Some(match result {
                    Ok(result) => McpMessage::response(id, result),
                    Err(error) => McpMessage::error_response(Some(id), error),
                })
            }
            (Some(method), None) => {
                debug!("Received notification: {}", method);

                match method.as_str() {
                    "notifications/initialized" | "initialized" => info!("Client initialized"),
                    "notifications/cancelled" => debug!("Request cancelled"),
                    _ => debug!("Unknown notification: {}", method),
                }

                None
            }
            (None, _) => {
                debug!("Received unexpected response");
                None
            }
        }
    }

    fn handle_initialize(&self, params: Option<Value>) -> Result<Value, McpError> {
        let params: InitializeParams = required_params(params)?;

        info!(
            "Initializing session with client: {} v{} (protocol {})",
            params.client_info.name, params.client_info.version, params.protocol_version
        );

        let api = self.document.title().unwrap_or("an OpenAPI");
        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities::with_tools(),
            server_info: ServerInfo {
                name: self.server_name.clone(),
                version: self.server_version.clone(),
            },
            instructions: Some(format!(
                "Explore the {} document: call detect_auth to learn how to authenticate, \
                 list_endpoints to see what is available, then get_endpoint for the details \
                 of a single operation.",
                api
            )),
        };

        to_result(&result)
    }

    fn handle_tools_list(&self) -> Result<Value, McpError> {
        let result = ToolsListResult {
            tools: self.catalog.tools().to_vec(),
        };
        to_result(&result)
    }

    fn handle_tools_call(&self, params: Option<Value>) -> Result<Value, McpError> {
        let params: ToolCallParams = required_params(params)?;

        debug!("Calling tool: {}", params.name);

        let result = match self.dispatcher.call(&params.name, params.arguments) {
            Ok(result) => result,
            Err(e) => {
                error!("Tool {} failed: {}", params.name, e);
                ToolCallResult::error(e.to_string())
            }
        };

        to_result(&result)
    }
}

fn required_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, McpError> {
    params
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| McpError::invalid_params(e.to_string()))?
        .ok_or_else(|| McpError::invalid_params("Missing params"))
}

fn to_result<T: Serialize>(result: &T) -> Result<Value, McpError> {
    serde_json::to_value(result).map_err(|e| McpError::internal_error(e.to_string()))
}
