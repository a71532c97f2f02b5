//! Endpoint identifiers
//!
//! An endpoint id is `METHOD_pathId`, where `pathId` is the path with every character
//! outside `[A-Za-z0-9]` replaced by `_` and trailing underscores removed:
//!
//! | method | path                | id                      |
//! |--------|---------------------|-------------------------|
//! | get    | `/pet/{petId}`      | `GET__pet__petId`       |
//! | put    | `/pet`              | `PUT__pet`              |
//! | get    | `/pet/findByStatus` | `GET__pet_findByStatus` |
//!
//! The mapping is lossy: `/a-b` and `/a.b` share an id. Lookups therefore recompute
//! the id for each candidate path and compare, rather than decoding the id.

use crate::types::HttpMethod;

/// Separator between the method and the path part of an id
const SEPARATOR: char = '_';

/// Normalized form of a path template
pub fn path_id(path: &str) -> String {
    let mut id = String::with_capacity(path.len());

    for c in path.chars() {
        if c.is_ascii_alphanumeric() {
            id.push(c);
        } else {
            // One underscore per UTF-16 code unit, so ids agree with JavaScript tooling
            for _ in 0..c.len_utf16() {
                id.push(SEPARATOR);
            }
        }
    }

    let trimmed = id.trim_end_matches(SEPARATOR).len();
    id.truncate(trimmed);
    id
}

/// Identifier of the operation `method` on `path`
pub fn endpoint_id(method: HttpMethod, path: &str) -> String {
    format!("{}{}{}", method.as_str(), SEPARATOR, path_id(path))
}

/// Method an id refers to
///
/// Returns `None` for malformed ids: fewer than two `_`-separated parts, or a first
/// part that is not an HTTP method. The method part is matched case-insensitively.
pub fn method_of(id: &str) -> Option<HttpMethod> {
    let (method, _) = id.split_once(SEPARATOR)?;
    method.parse().ok()
}

/// Whether `id` names the operation `method` on `path`
pub fn matches(id: &str, method: HttpMethod, path: &str) -> bool {
    endpoint_id(method, path) == id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_id_examples() {
        assert_eq!(endpoint_id(HttpMethod::Get, "/pet/{petId}"), "GET__pet__petId");
        assert_eq!(endpoint_id(HttpMethod::Put, "/pet"), "PUT__pet");
        assert_eq!(
            endpoint_id(HttpMethod::Get, "/pet/findByStatus"),
            "GET__pet_findByStatus"
        );
    }

    #[test]
    fn test_trailing_underscores_collapse() {
        assert_eq!(path_id("/users/{id}/"), "_users__id");
        assert_eq!(path_id("/"), "");
        assert_eq!(endpoint_id(HttpMethod::Get, "/"), "GET_");
    }

    #[test]
    fn test_non_ascii_counts_utf16_units() {
        assert_eq!(path_id("/caf\u{e9}/x"), "_caf__x");
        assert_eq!(path_id("/\u{1F600}/x"), "____x");
    }

    #[test]
    fn test_lossy_paths_share_an_id() {
        assert_eq!(path_id("/a-b"), path_id("/a.b"));
    }

    #[test]
    fn test_method_of() {
        assert_eq!(method_of("GET__pet__petId"), Some(HttpMethod::Get));
        assert_eq!(method_of("delete__pet"), Some(HttpMethod::Delete));
        assert_eq!(method_of("GET_"), Some(HttpMethod::Get));
        assert_eq!(method_of("INVALID"), None);
        assert_eq!(method_of("INVALID_ID"), None);
        assert_eq!(method_of("_pet"), None);
    }

    #[test]
    fn test_matches_is_exact() {
        assert!(matches("PUT__pet", HttpMethod::Put, "/pet"));
        assert!(!matches("put__pet", HttpMethod::Put, "/pet"));
        assert!(!matches("PUT__pet_", HttpMethod::Put, "/pet"));
    }
}
