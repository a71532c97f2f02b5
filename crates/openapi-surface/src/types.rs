//! Records produced by the projections

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::document::SecurityRequirement;

/// HTTP methods an OpenAPI path item can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    /// All methods, in the order endpoints are listed within a path
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Patch,
        HttpMethod::Trace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Trace => "TRACE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    /// Case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown HTTP method: {}", s))
    }
}

/// Overall authentication classification of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthType {
    #[serde(rename = "none")]
    None,
    #[serde(rename = "apiKey")]
    ApiKey,
    #[serde(rename = "http")]
    Http,
    #[serde(rename = "oauth2")]
    OAuth2,
    #[serde(rename = "openIdConnect")]
    OpenIdConnect,
    #[serde(rename = "multiple")]
    Multiple,
}

/// Authentication inventory of a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSummary {
    #[serde(rename = "type")]
    pub auth_type: AuthType,
    pub schemes: Vec<AuthSchemeInfo>,
    /// The document's global `security`, untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_security: Option<Vec<SecurityRequirement>>,
}

/// One declared security scheme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSchemeInfo {
    /// Key under `components.securitySchemes`
    pub name: String,
    #[serde(rename = "type")]
    pub scheme_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub details: SchemeDetails,
}

/// Type-specific scheme details, serialized as a flat map
///
/// Fields missing from the document are omitted, never reported as errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged, from = "FlatSchemeDetails")]
pub enum SchemeDetails {
    #[serde(rename_all = "camelCase")]
    ApiKey {
        #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
        location: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        parameter_name: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Http {
        #[serde(skip_serializing_if = "Option::is_none")]
        scheme: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        bearer_format: Option<String>,
    },
    OAuth2 {
        #[serde(skip_serializing_if = "Option::is_none")]
        flows: Option<Value>,
    },
    #[serde(rename_all = "camelCase")]
    OpenIdConnect {
        #[serde(skip_serializing_if = "Option::is_none")]
        open_id_connect_url: Option<String>,
    },
    Empty {},
}

/// Wire shape of [`SchemeDetails`]; the variant is chosen by which keys are present
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FlatSchemeDetails {
    #[serde(rename = "in")]
    location: Option<String>,
    parameter_name: Option<String>,
    scheme: Option<String>,
    bearer_format: Option<String>,
    flows: Option<Value>,
    open_id_connect_url: Option<String>,
}

impl From<FlatSchemeDetails> for SchemeDetails {
    fn from(flat: FlatSchemeDetails) -> Self {
        if flat.flows.is_some() {
            SchemeDetails::OAuth2 { flows: flat.flows }
        } else if flat.open_id_connect_url.is_some() {
            SchemeDetails::OpenIdConnect {
                open_id_connect_url: flat.open_id_connect_url,
            }
        } else if flat.scheme.is_some() || flat.bearer_format.is_some() {
            SchemeDetails::Http {
                scheme: flat.scheme,
                bearer_format: flat.bearer_format,
            }
        } else if flat.location.is_some() || flat.parameter_name.is_some() {
            SchemeDetails::ApiKey {
                location: flat.location,
                parameter_name: flat.parameter_name,
            }
        } else {
            SchemeDetails::Empty {}
        }
    }
}

/// Summary view of one operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointSummary {
    /// `METHOD_pathId`, see [`crate::endpoint_id`]
    pub id: String,
    pub path: String,
    pub method: HttpMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Full view of one operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointDetail {
    #[serde(flatten)]
    pub summary: EndpointSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responses: Option<IndexMap<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirement>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_parse_is_case_insensitive() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("Patch".parse::<HttpMethod>().unwrap(), HttpMethod::Patch);
        assert!("INVALID".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn test_auth_summary_wire_shape() {
        let summary = AuthSummary {
            auth_type: AuthType::OAuth2,
            schemes: vec![AuthSchemeInfo {
                name: "petstore_auth".to_string(),
                scheme_type: "oauth2".to_string(),
                description: None,
                details: SchemeDetails::OAuth2 {
                    flows: Some(json!({ "implicit": { "scopes": {} } })),
                },
            }],
            global_security: None,
        };

        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!({
                "type": "oauth2",
                "schemes": [{
                    "name": "petstore_auth",
                    "type": "oauth2",
                    "details": { "flows": { "implicit": { "scopes": {} } } }
                }]
            })
        );
    }

    #[test]
    fn test_empty_details_serialize_as_empty_object() {
        let value = serde_json::to_value(SchemeDetails::Empty {}).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_partial_details_omit_missing_fields() {
        let details = SchemeDetails::ApiKey {
            location: Some("header".to_string()),
            parameter_name: None,
        };
        assert_eq!(serde_json::to_value(&details).unwrap(), json!({ "in": "header" }));

        let details = SchemeDetails::Http {
            scheme: None,
            bearer_format: None,
        };
        assert_eq!(serde_json::to_value(&details).unwrap(), json!({}));
    }

    #[test]
    fn test_details_read_back_by_present_keys() {
        let parse = |value| serde_json::from_value::<SchemeDetails>(value).unwrap();

        assert_eq!(
            parse(json!({ "in": "query", "parameterName": "key" })),
            SchemeDetails::ApiKey {
                location: Some("query".to_string()),
                parameter_name: Some("key".to_string()),
            }
        );
        assert_eq!(
            parse(json!({ "scheme": "basic" })),
            SchemeDetails::Http {
                scheme: Some("basic".to_string()),
                bearer_format: None,
            }
        );
        assert_eq!(
            parse(json!({ "flows": {} })),
            SchemeDetails::OAuth2 {
                flows: Some(json!({})),
            }
        );
        assert_eq!(parse(json!({})), SchemeDetails::Empty {});
    }

    #[test]
    fn test_detail_flattens_summary() {
        let detail = EndpointDetail {
            summary: EndpointSummary {
                id: "GET__pet".to_string(),
                path: "/pet".to_string(),
                method: HttpMethod::Get,
                summary: None,
                description: None,
                operation_id: Some("listPets".to_string()),
                tags: None,
            },
            parameters: None,
            request_body: None,
            responses: None,
            security: Some(vec![IndexMap::from([(
                "api_key".to_string(),
                Vec::new(),
            )])]),
        };

        assert_eq!(
            serde_json::to_value(&detail).unwrap(),
            json!({
                "id": "GET__pet",
                "path": "/pet",
                "method": "GET",
                "operationId": "listPets",
                "security": [{ "api_key": [] }]
            })
        );
    }
}
