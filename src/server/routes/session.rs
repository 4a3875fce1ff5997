use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::auth;
use crate::server::error::ApiError;
use crate::server::extract::ApiJson;
use crate::server::middleware::is_authenticated;
use crate::server::SharedState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub password: String,
}

/// `POST /api/login`: set the session cookie when the password matches
pub async fn login(
    State(state): State<SharedState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Response, ApiError> {
    let config = &state.cms.config;
    if !auth::password_matches(config.auth.access_password.as_deref(), &request.password) {
        tracing::warn!("Rejected admin login attempt");
        return Ok((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid password" })),
        )
            .into_response());
    }

    let token = state.cms.jwt.create_token().map_err(|e| {
        tracing::error!("Failed to sign session token: {}", e);
        ApiError::Internal("Failed to create session".to_string())
    })?;
    let cookie = auth::session_cookie(
        &token,
        state.cms.jwt.ttl(),
        config.environment.is_production(),
    );
    tracing::info!("Admin logged in");

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "message": "Login successful" })),
    )
        .into_response())
}

/// `POST /api/logout`: expire the session cookie
pub async fn logout(State(state): State<SharedState>) -> Response {
    let cookie = auth::clear_cookie(state.cms.config.environment.is_production());
    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "message": "Logged out successfully" })),
    )
        .into_response()
}

/// `GET /api/check-auth`
pub async fn check_auth(
    State(state): State<SharedState>,
    headers: axum::http::HeaderMap,
) -> Json<serde_json::Value> {
    Json(json!({ "isLoggedIn": is_authenticated(&state, &headers) }))
}
