//! # openapi-surface
//!
//! Read-only projections of a parsed OpenAPI 3.x document for tool-calling agents:
//!
//! - [`detect_auth`] summarizes the declared security schemes
//! - [`list_endpoints`] flattens every path/method pair into an [`EndpointSummary`]
//! - [`get_endpoint_by_id`] returns the full [`EndpointDetail`] behind an endpoint id
//!
//! Endpoint ids are derived from method and path by [`endpoint_id`]. Output records
//! carry JSON Schemas ([`BoundarySchema`]) for validation at the tool boundary.

mod auth;
mod document;
mod endpoints;
mod error;
mod ident;
mod loader;
mod schema;
mod types;

pub use auth::detect_auth;
pub use document::*;
pub use endpoints::{get_endpoint_by_id, list_endpoints};
pub use error::{SchemaViolations, SurfaceError, SurfaceResult, Violation};
pub use ident::{endpoint_id, method_of, path_id};
pub use loader::DocumentLoader;
pub use schema::{validate_against, BoundarySchema};
pub use types::*;
