//! Endpoint index and detail lookup

use tracing::debug;

use crate::document::{ApiDocument, Operation};
use crate::ident;
use crate::types::{EndpointDetail, EndpointSummary, HttpMethod};

/// List every operation of a document
///
/// Paths come in declaration order; within a path, methods follow
/// [`HttpMethod::ALL`] regardless of how the path item declares them.
/// `null` path items contribute nothing.
pub fn list_endpoints(document: &ApiDocument) -> Vec<EndpointSummary> {
    let mut endpoints = Vec::new();

    for (path, item) in document.path_items() {
        for method in HttpMethod::ALL {
            if let Some(operation) = item.operation(method) {
                endpoints.push(summarize(ident::endpoint_id(method, path), path, method, operation));
            }
        }
    }

    debug!("Listed {} endpoints", endpoints.len());

    endpoints
}

/// Full detail of the operation an id refers to
///
/// The first path whose recomputed id equals `id` and that declares the id's method
/// wins. Returns `None` when the document has no paths, the id is malformed, or
/// nothing matches.
pub fn get_endpoint_by_id(document: &ApiDocument, id: &str) -> Option<EndpointDetail> {
    let Some(method) = ident::method_of(id) else {
        debug!("Malformed endpoint id: {}", id);
        return None;
    };

    // Paths that only collide after normalization may lack the method; keep scanning
    let found = document.path_items().find_map(|(path, item)| {
        if !ident::matches(id, method, path) {
            return None;
        }
        item.operation(method).map(|operation| (path, operation))
    });

    match found {
        Some((path, operation)) => Some(EndpointDetail {
            summary: summarize(id.to_string(), path, method, operation),
            parameters: operation.parameters.clone(),
            request_body: operation.request_body.clone(),
            responses: operation.responses.clone(),
            security: operation.security.clone(),
        }),
        None => {
            debug!("No endpoint matches id {}", id);
            None
        }
    }
}

fn summarize(id: String, path: &str, method: HttpMethod, operation: &Operation) -> EndpointSummary {
    EndpointSummary {
        id,
        path: path.to_string(),
        method,
        summary: operation.summary.clone(),
        description: operation.description.clone(),
        operation_id: operation.operation_id.clone(),
        tags: operation.tags.clone(),
    }
}
