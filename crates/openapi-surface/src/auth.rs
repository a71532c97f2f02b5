//! Authentication scheme inventory

use tracing::debug;

use crate::document::{ApiDocument, RefOr, SchemeKind, SecurityScheme};
use crate::types::{AuthSchemeInfo, AuthSummary, AuthType, SchemeDetails};

/// Summarize the security schemes and global requirements of a document
///
/// Never fails. `$ref` schemes are skipped without a record. The overall type is
/// `none` for zero schemes, the scheme's own type for a single recognised scheme,
/// and `multiple` for two or more schemes of any type.
///
/// A lone scheme of a type the summary cannot name (e.g. `mutualTLS`) also yields
/// `none`, even though a scheme is listed.
pub fn detect_auth(document: &ApiDocument) -> AuthSummary {
    let mut kinds = Vec::new();
    let mut schemes = Vec::new();

    if let Some(declared) = document.security_schemes() {
        for (name, scheme) in declared {
            match scheme {
                RefOr::Reference { reference } => {
                    debug!("Skipping security scheme {} -> {}", name, reference);
                }
                RefOr::Item(scheme) => {
                    kinds.push(&scheme.kind);
                    schemes.push(scheme_info(name, scheme));
                }
            }
        }
    }

    let auth_type = match kinds.as_slice() {
        [] => AuthType::None,
        [only] => single_scheme_type(only),
        _ => AuthType::Multiple,
    };

    debug!("Detected {} security schemes ({:?})", schemes.len(), auth_type);

    AuthSummary {
        auth_type,
        schemes,
        global_security: document.security.clone(),
    }
}

/// Summary type of a document declaring exactly one scheme
fn single_scheme_type(kind: &SchemeKind) -> AuthType {
    match kind {
        SchemeKind::ApiKey { .. } => AuthType::ApiKey,
        SchemeKind::Http { .. } => AuthType::Http,
        SchemeKind::OAuth2 { .. } => AuthType::OAuth2,
        SchemeKind::OpenIdConnect { .. } => AuthType::OpenIdConnect,
        SchemeKind::MutualTls | SchemeKind::Other(_) => AuthType::None,
    }
}

fn scheme_info(name: &str, scheme: &SecurityScheme) -> AuthSchemeInfo {
    let details = match &scheme.kind {
        SchemeKind::ApiKey { location, name } => SchemeDetails::ApiKey {
            location: location.clone(),
            parameter_name: name.clone(),
        },
        SchemeKind::Http {
            scheme,
            bearer_format,
        } => SchemeDetails::Http {
            scheme: scheme.clone(),
            bearer_format: bearer_format.clone(),
        },
        SchemeKind::OAuth2 { flows } => SchemeDetails::OAuth2 {
            flows: flows.clone(),
        },
        SchemeKind::OpenIdConnect {
            open_id_connect_url,
        } => SchemeDetails::OpenIdConnect {
            open_id_connect_url: open_id_connect_url.clone(),
        },
        SchemeKind::MutualTls | SchemeKind::Other(_) => SchemeDetails::Empty {},
    };

    AuthSchemeInfo {
        name: name.to_string(),
        scheme_type: scheme.type_name().to_string(),
        description: scheme.description.clone(),
        details,
    }
}
