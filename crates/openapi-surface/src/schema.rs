//! JSON Schemas for the projection records
//!
//! Tool-calling layers exchange these records as plain JSON. The schemas here let a
//! caller enforce their shape at that boundary, independently of the Rust types:
//! validation reports every violation, not just the first.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{SchemaViolations, SurfaceError, SurfaceResult, Violation};
use crate::types::{AuthSummary, EndpointDetail, EndpointSummary};

const DIALECT: &str = "https://json-schema.org/draft/2020-12/schema";

/// A record with a JSON Schema enforceable at the tool boundary
pub trait BoundarySchema: Serialize + DeserializeOwned {
    /// Name reported in violations
    const NAME: &'static str;

    fn json_schema() -> Value;

    /// Validate an arbitrary value against this record's schema
    fn validate(instance: &Value) -> SurfaceResult<()> {
        validate_against(Self::NAME, &Self::json_schema(), instance)
    }

    /// Validate, then deserialize
    fn parse(instance: Value) -> SurfaceResult<Self> {
        Self::validate(&instance)?;
        Ok(serde_json::from_value(instance)?)
    }

    /// Serialize this record and check the result against the schema
    fn to_checked_value(&self) -> SurfaceResult<Value> {
        let value = serde_json::to_value(self)?;
        Self::validate(&value)?;
        Ok(value)
    }
}

impl BoundarySchema for AuthSummary {
    const NAME: &'static str = "AuthSummary";

    fn json_schema() -> Value {
        with_header(Self::NAME, auth_summary_schema())
    }
}

impl BoundarySchema for EndpointSummary {
    const NAME: &'static str = "EndpointSummary";

    fn json_schema() -> Value {
        with_header(Self::NAME, endpoint_summary_schema())
    }
}

impl BoundarySchema for Vec<EndpointSummary> {
    const NAME: &'static str = "EndpointSummary[]";

    fn json_schema() -> Value {
        with_header(
            Self::NAME,
            json!({
                "type": "array",
                "items": endpoint_summary_schema()
            }),
        )
    }
}

impl BoundarySchema for EndpointDetail {
    const NAME: &'static str = "EndpointDetail";

    fn json_schema() -> Value {
        with_header(Self::NAME, endpoint_detail_schema())
    }
}

/// Validate `instance` against `schema`, collecting every violation
pub fn validate_against(name: &'static str, schema: &Value, instance: &Value) -> SurfaceResult<()> {
    let validator = jsonschema::validator_for(schema).map_err(|e| SurfaceError::SchemaBuild {
        schema: name,
        message: e.to_string(),
    })?;

    let violations: Vec<Violation> = validator
        .iter_errors(instance)
        .map(|error| Violation {
            path: error.instance_path.to_string(),
            message: error.to_string(),
        })
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(SchemaViolations {
            schema: name,
            violations,
        }
        .into())
    }
}

fn with_header(name: &str, mut schema: Value) -> Value {
    if let Some(obj) = schema.as_object_mut() {
        obj.insert("$schema".to_string(), json!(DIALECT));
        obj.insert("title".to_string(), json!(name));
    }
    schema
}

fn security_requirements_schema(description: &str) -> Value {
    json!({
        "type": "array",
        "description": description,
        "items": {
            "type": "object",
            "additionalProperties": {
                "type": "array",
                "items": { "type": "string" }
            }
        }
    })
}

fn auth_summary_schema() -> Value {
    json!({
        "type": "object",
        "required": ["type", "schemes"],
        "properties": {
            "type": {
                "enum": ["none", "apiKey", "http", "oauth2", "openIdConnect", "multiple"],
                "description": "Primary authentication type, or \"multiple\" if several schemes exist"
            },
            "schemes": {
                "type": "array",
                "description": "Authentication schemes declared by the API",
                "items": {
                    "type": "object",
                    "required": ["name", "type", "details"],
                    "properties": {
                        "name": { "type": "string", "description": "Name of the authentication scheme" },
                        "type": { "type": "string", "description": "Type of authentication (apiKey, oauth2, http, ...)" },
                        "description": { "type": "string", "description": "Description of the authentication scheme" },
                        "details": { "type": "object", "description": "Details specific to the authentication type" }
                    }
                }
            },
            "globalSecurity": security_requirements_schema(
                "Global security requirements that apply to all operations"
            )
        }
    })
}

fn endpoint_summary_schema() -> Value {
    json!({
        "type": "object",
        "required": ["id", "path", "method"],
        "properties": endpoint_summary_properties()
    })
}

fn endpoint_summary_properties() -> Value {
    json!({
        "id": { "type": "string", "minLength": 1, "description": "Unique identifier for the endpoint (METHOD_pathId)" },
        "path": { "type": "string", "minLength": 1, "description": "API path for the endpoint" },
        "method": { "type": "string", "minLength": 1, "description": "HTTP method (GET, POST, PUT, DELETE, ...)" },
        "summary": { "type": "string", "description": "Brief summary of what the endpoint does" },
        "description": { "type": "string", "description": "Detailed description of the endpoint" },
        "operationId": { "type": "string", "description": "Operation identifier declared by the document" },
        "tags": {
            "type": "array",
            "items": { "type": "string" },
            "description": "Tags associated with the endpoint"
        }
    })
}

fn endpoint_detail_schema() -> Value {
    let mut properties = endpoint_summary_properties();
    if let Some(obj) = properties.as_object_mut() {
        obj.insert(
            "parameters".to_string(),
            json!({ "type": "array", "description": "Parameters accepted by the endpoint" }),
        );
        obj.insert(
            "requestBody".to_string(),
            json!({ "description": "Request body schema and requirements" }),
        );
        obj.insert(
            "responses".to_string(),
            json!({ "type": "object", "description": "Response schemas by status code" }),
        );
        obj.insert(
            "security".to_string(),
            security_requirements_schema("Security requirements specific to this endpoint"),
        );
    }

    json!({
        "type": "object",
        "required": ["id", "path", "method"],
        "properties": properties
    })
}
