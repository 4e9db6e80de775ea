//! Authentication gate for the notes routes.
//!
//! Resolves the `Authorization` header through the configured
//! `CredentialResolver` and attaches the resulting `Identity` to the request.
//! Requests without a known credential stop here with 401.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use scribe_core::{CredentialResolver, Identity};

use crate::http::{ErrorResponse, HttpState};

/// Resolve the identity behind a raw header value, if any. The whole value is
/// the credential: no scheme prefix is stripped and nothing is normalised.
pub fn authenticate(resolver: &dyn CredentialResolver, header: Option<&str>) -> Option<Identity> {
    header.and_then(|credential| resolver.resolve(credential))
}

pub async fn require_identity(
    State(state): State<Arc<HttpState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    match authenticate(state.credentials.as_ref(), header) {
        Some(identity) => {
            tracing::info!(user_id = identity.user_id, "Identity resolved");
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        None => {
            tracing::warn!(
                method = %request.method(),
                path = %request.uri().path(),
                "Unauthorized request"
            );
            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("Unauthorized")),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_core::StaticCredentials;

    #[test]
    fn test_authenticate_known_and_unknown() {
        let creds = StaticCredentials::default();
        assert_eq!(
            authenticate(&creds, Some("token2")),
            Some(Identity { user_id: 2 })
        );
        assert_eq!(authenticate(&creds, Some("nope")), None);
        assert_eq!(authenticate(&creds, None), None);
    }

    #[test]
    fn test_authenticate_requires_exact_value() {
        let creds = StaticCredentials::default();
        for header in ["Bearer token1", "bearer token1", "Token1", "token1 ", "token"] {
            assert_eq!(authenticate(&creds, Some(header)), None, "{:?}", header);
        }
    }
}
