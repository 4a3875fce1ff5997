use axum::extract::{Path, State};
use axum::Json;

use crate::content::{Article, Post};
use crate::server::error::ApiError;
use crate::server::SharedState;

/// `GET /api/posts`, newest first
pub async fn list(State(state): State<SharedState>) -> Result<Json<Vec<Article>>, ApiError> {
    let posts = state
        .cms
        .articles()
        .list_posts()
        .await
        .map_err(|e| ApiError::from_cms("Failed to fetch posts", e))?;
    Ok(Json(posts))
}

/// `GET /api/posts/:slug`
pub async fn show(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
) -> Result<Json<Post>, ApiError> {
    let post = state
        .cms
        .articles()
        .get_post(&slug, &state.renderer)
        .await
        .map_err(|e| ApiError::from_cms("Failed to fetch post", e))?;
    Ok(Json(post))
}
