//! Admin gate for pages and API writes

use axum::async_trait;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use super::error::ApiError;
use super::SharedState;
use crate::auth;

/// Admin pages need a session, except the resource pages
fn is_gated_page(path: &str) -> bool {
    path.starts_with("/admin") && !path.starts_with("/admin/resources")
}

/// Whether the request carries a valid session cookie
pub fn is_authenticated(state: &SharedState, headers: &HeaderMap) -> bool {
    auth::token_from_headers(headers)
        .map(|token| state.cms.jwt.verify_token(&token))
        .unwrap_or(false)
}

/// Redirect anonymous visitors of admin pages to the login page
pub async fn admin_gate(State(state): State<SharedState>, request: Request, next: Next) -> Response {
    let path = request.uri().path();
    if is_gated_page(path) && !is_authenticated(&state, request.headers()) {
        tracing::debug!("Redirecting anonymous request for {} to /login", path);
        return Redirect::temporary("/login").into_response();
    }
    next.run(request).await
}

/// Extractor for handlers that change content
pub struct AdminSession;

#[async_trait]
impl FromRequestParts<SharedState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        if is_authenticated(state, &parts.headers) {
            Ok(AdminSession)
        } else {
            tracing::debug!("Rejected unauthenticated {} {}", parts.method, parts.uri.path());
            Err(ApiError::Unauthorized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gated_pages() {
        assert!(is_gated_page("/admin"));
        assert!(is_gated_page("/admin/articles/edit"));
        assert!(is_gated_page("/admin/categories"));
        assert!(!is_gated_page("/admin/resources"));
        assert!(!is_gated_page("/admin/resources/create"));
        assert!(!is_gated_page("/posts/hello"));
        assert!(!is_gated_page("/login"));
    }
}
