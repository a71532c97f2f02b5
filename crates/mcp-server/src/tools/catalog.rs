//! Tool definitions advertised to MCP clients

use serde_json::json;

use crate::protocol::McpTool;

pub const DETECT_AUTH: &str = "detect_auth";
pub const LIST_ENDPOINTS: &str = "list_endpoints";
pub const GET_ENDPOINT: &str = "get_endpoint";

/// The fixed set of tools this server offers for one document
pub struct ToolCatalog {
    tools: Vec<McpTool>,
}

impl ToolCatalog {
    /// Build the catalog; `api_title` is woven into the tool descriptions
    pub fn new(api_title: Option<&str>) -> Self {
        let api = api_title
            .map(|title| format!("the \"{}\" API", title))
            .unwrap_or_else(|| "the API".to_string());

        let tools = vec![
            McpTool {
                name: DETECT_AUTH.to_string(),
                description: format!(
                    "Describe how {} authenticates: the overall auth type, every declared \
                     security scheme with its details, and the global security requirements.",
                    api
                ),
                input_schema: json!({
                    "type": "object",
                    "properties": {}
                }),
            },
            McpTool {
                name: LIST_ENDPOINTS.to_string(),
                description: format!(
                    "List every endpoint of {} with its id, method, path, summary and tags. \
                     Pass an id to {} for the full parameters, request body, responses and security.",
                    api, GET_ENDPOINT
                ),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "tag": {
                            "type": "string",
                            "description": "Only list endpoints carrying this tag"
                        }
                    }
                }),
            },
            McpTool {
                name: GET_ENDPOINT.to_string(),
                description: format!(
                    "Get the full definition of one endpoint of {} by the id returned from {}.",
                    api, LIST_ENDPOINTS
                ),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "id": {
                            "type": "string",
                            "description": "Endpoint id, e.g. GET__pet__petId"
                        }
                    },
                    "required": ["id"]
                }),
            },
        ];

        Self { tools }
    }

    pub fn tools(&self) -> &[McpTool] {
        &self.tools
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.iter().any(|tool| tool.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_names() {
        let catalog = ToolCatalog::new(None);

        let names: Vec<_> = catalog.tools().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, [DETECT_AUTH, LIST_ENDPOINTS, GET_ENDPOINT]);
        assert!(catalog.contains(GET_ENDPOINT));
        assert!(!catalog.contains("call_endpoint"));
    }

    #[test]
    fn test_descriptions_mention_title() {
        let catalog = ToolCatalog::new(Some("Swagger Petstore"));

        for tool in catalog.tools() {
            assert!(
                tool.description.contains("\"Swagger Petstore\" API"),
                "{}",
                tool.description
            );
        }
    }

    #[test]
    fn test_get_endpoint_requires_id() {
        let catalog = ToolCatalog::new(None);
        let tool = catalog
            .tools()
            .iter()
            .find(|t| t.name == GET_ENDPOINT)
            .unwrap();

        assert_eq!(tool.input_schema["required"], json!(["id"]));
    }
}
