//! In-memory model of a parsed OpenAPI 3.x document
//!
//! Only the parts the projections read are modelled. Payloads the projections pass
//! through untouched (flows, parameters, request bodies, responses) stay opaque
//! `serde_json::Value`s.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::types::HttpMethod;

/// Security requirement: scheme name -> required scopes
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// Root of a parsed OpenAPI document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiDocument {
    /// Declared OpenAPI version (e.g. "3.0.4", "3.1.0")
    #[serde(default)]
    pub openapi: Option<String>,
    #[serde(default)]
    pub info: Option<Info>,
    /// Path templates in declaration order; a `null` item declares nothing
    #[serde(default)]
    pub paths: Option<IndexMap<String, Option<PathItem>>>,
    #[serde(default)]
    pub components: Option<Components>,
    /// Global security requirements
    #[serde(default)]
    pub security: Option<Vec<SecurityRequirement>>,
}

impl ApiDocument {
    /// API title, if the document declares one
    pub fn title(&self) -> Option<&str> {
        self.info.as_ref().and_then(|info| info.title.as_deref())
    }

    /// Non-null path items in declaration order
    pub fn path_items(&self) -> impl Iterator<Item = (&str, &PathItem)> {
        self.paths
            .iter()
            .flatten()
            .filter_map(|(path, item)| item.as_ref().map(|item| (path.as_str(), item)))
    }

    /// Declared security schemes, references included
    pub fn security_schemes(&self) -> Option<&IndexMap<String, RefOr<SecurityScheme>>> {
        self.components
            .as_ref()
            .and_then(|c| c.security_schemes.as_ref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Info {
    pub title: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
}

/// Operations declared for a single path
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathItem {
    pub get: Option<Operation>,
    pub put: Option<Operation>,
    pub post: Option<Operation>,
    pub delete: Option<Operation>,
    pub options: Option<Operation>,
    pub head: Option<Operation>,
    pub patch: Option<Operation>,
    pub trace: Option<Operation>,
}

impl PathItem {
    /// Operation declared for `method`, if any
    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
            HttpMethod::Options => self.options.as_ref(),
            HttpMethod::Head => self.head.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
            HttpMethod::Trace => self.trace.as_ref(),
        }
    }
}

/// A single operation on a path
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub summary: Option<String>,
    pub description: Option<String>,
    /// Informational only; endpoint identity comes from method and path
    pub operation_id: Option<String>,
    pub tags: Option<Vec<String>>,
    pub parameters: Option<Vec<Value>>,
    pub request_body: Option<Value>,
    /// Responses keyed by status code
    pub responses: Option<IndexMap<String, Value>>,
    /// Overrides the global requirements when present
    pub security: Option<Vec<SecurityRequirement>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    #[serde(default)]
    pub security_schemes: Option<IndexMap<String, RefOr<SecurityScheme>>>,
}

/// Either a `$ref` placeholder or an inline object
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RefOr<T> {
    /// Unresolved `$ref` indirection
    Reference {
        #[serde(rename = "$ref")]
        reference: String,
    },
    Item(T),
}

/// A named authentication mechanism
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawSecurityScheme")]
pub struct SecurityScheme {
    pub description: Option<String>,
    pub kind: SchemeKind,
}

impl SecurityScheme {
    /// The scheme's `type` as written in the document
    pub fn type_name(&self) -> &str {
        self.kind.type_name()
    }
}

/// Type-specific payload of a security scheme
///
/// Fields the document leaves out stay `None`; an incomplete scheme is still listed.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemeKind {
    ApiKey {
        /// `header`, `query` or `cookie` in conforming documents, kept as written
        location: Option<String>,
        name: Option<String>,
    },
    Http {
        scheme: Option<String>,
        bearer_format: Option<String>,
    },
    OAuth2 {
        flows: Option<Value>,
    },
    OpenIdConnect {
        open_id_connect_url: Option<String>,
    },
    MutualTls,
    /// A type this crate does not know about, kept verbatim
    Other(String),
}

impl SchemeKind {
    pub fn type_name(&self) -> &str {
        match self {
            SchemeKind::ApiKey { .. } => "apiKey",
            SchemeKind::Http { .. } => "http",
            SchemeKind::OAuth2 { .. } => "oauth2",
            SchemeKind::OpenIdConnect { .. } => "openIdConnect",
            SchemeKind::MutualTls => "mutualTLS",
            SchemeKind::Other(name) => name,
        }
    }
}

/// Flat wire shape of a security scheme, before it is narrowed by `type`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSecurityScheme {
    #[serde(rename = "type")]
    scheme_type: String,
    description: Option<String>,
    name: Option<String>,
    #[serde(rename = "in")]
    location: Option<String>,
    scheme: Option<String>,
    bearer_format: Option<String>,
    flows: Option<Value>,
    open_id_connect_url: Option<String>,
}

impl From<RawSecurityScheme> for SecurityScheme {
    fn from(raw: RawSecurityScheme) -> Self {
        let kind = match raw.scheme_type.as_str() {
            "apiKey" => SchemeKind::ApiKey {
                location: raw.location,
                name: raw.name,
            },
            "http" => SchemeKind::Http {
                scheme: raw.scheme,
                bearer_format: raw.bearer_format,
            },
            "oauth2" => SchemeKind::OAuth2 { flows: raw.flows },
            "openIdConnect" => SchemeKind::OpenIdConnect {
                open_id_connect_url: raw.open_id_connect_url,
            },
            "mutualTLS" => SchemeKind::MutualTls,
            other => SchemeKind::Other(other.to_string()),
        };

        SecurityScheme {
            description: raw.description,
            kind,
        }
    }
}
