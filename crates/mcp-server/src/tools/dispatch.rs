//! Execute tool calls against the loaded document

use openapi_surface::{
    detect_auth, get_endpoint_by_id, list_endpoints, ApiDocument, BoundarySchema,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use super::catalog::{DETECT_AUTH, GET_ENDPOINT, LIST_ENDPOINTS};
use crate::error::ToolError;
use crate::protocol::ToolCallResult;

#[derive(Debug, Default, Deserialize)]
struct ListEndpointsArgs {
    #[serde(default)]
    tag: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GetEndpointArgs {
    id: String,
}

/// Runs the projection behind each tool
pub struct ToolDispatcher {
    document: Arc<ApiDocument>,
    validate_outputs: bool,
}

impl ToolDispatcher {
    pub fn new(document: Arc<ApiDocument>, validate_outputs: bool) -> Self {
        Self {
            document,
            validate_outputs,
        }
    }

    /// Execute a tool by name
    pub fn call(&self, tool: &str, arguments: Option<Value>) -> Result<ToolCallResult, ToolError> {
        debug!("Dispatching tool {}", tool);

        match tool {
            DETECT_AUTH => self.render(&detect_auth(&self.document)),
            LIST_ENDPOINTS => {
                let args: ListEndpointsArgs = parse_args(tool, arguments)?;
                let mut endpoints = list_endpoints(&self.document);
                if let Some(tag) = &args.tag {
                    endpoints.retain(|endpoint| {
                        endpoint
                            .tags
                            .as_ref()
                            .is_some_and(|tags| tags.contains(tag))
                    });
                }
                self.render(&endpoints)
            }
            GET_ENDPOINT => {
                let args: GetEndpointArgs = parse_args(tool, arguments)?;
                let detail = get_endpoint_by_id(&self.document, &args.id)
                    .ok_or(ToolError::EndpointNotFound(args.id))?;
                self.render(&detail)
            }
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }

    fn render<T: BoundarySchema>(&self, record: &T) -> Result<ToolCallResult, ToolError> {
        let value = if self.validate_outputs {
            record.to_checked_value()?
        } else {
            serde_json::to_value(record).map_err(openapi_surface::SurfaceError::from)?
        };

        let text = serde_json::to_string_pretty(&value).map_err(openapi_surface::SurfaceError::from)?;
        Ok(ToolCallResult::text(text))
    }
}

/// Missing arguments are read as an empty object
fn parse_args<T: DeserializeOwned>(tool: &str, arguments: Option<Value>) -> Result<T, ToolError> {
    let arguments = match arguments {
        None | Some(Value::Null) => Value::Object(serde_json::Map::new()),
        Some(arguments) => arguments,
    };

    serde_json::from_value(arguments).map_err(|e| ToolError::InvalidArguments {
        tool: tool.to_string(),
        message: e.to_string(),
    })
}
