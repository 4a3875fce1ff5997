use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::content::{ArticleUpdate, NewArticle};
use crate::server::error::ApiError;
use crate::server::extract::{ApiJson, ApiQuery};
use crate::server::middleware::AdminSession;
use crate::server::SharedState;

#[derive(Debug, Default, Deserialize)]
pub struct ArticlesQuery {
    pub sync: Option<String>,
    pub path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateArticleRequest {
    pub article: ArticleUpdate,
}

/// `GET /api/articles`: one article for `?path=`, otherwise the index
/// (rebuilt first for `?sync=true`)
pub async fn list_or_get(
    State(state): State<SharedState>,
    ApiQuery(query): ApiQuery<ArticlesQuery>,
) -> Result<Response, ApiError> {
    let store = state.cms.articles();

    if let Some(path) = query.path.as_deref().filter(|p| !p.is_empty()) {
        let article = store
            .get(path)
            .await
            .map_err(|e| ApiError::from_cms("Failed to fetch article", e))?;
        return Ok(Json(article).into_response());
    }

    let sync = query.sync.as_deref() == Some("true");
    let articles = store
        .list(sync)
        .await
        .map_err(|e| ApiError::from_cms("Failed to fetch articles", e))?;
    Ok(Json(articles).into_response())
}

/// `POST /api/articles`
pub async fn update(
    _admin: AdminSession,
    State(state): State<SharedState>,
    ApiJson(request): ApiJson<UpdateArticleRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .cms
        .articles()
        .update(&request.article)
        .await
        .map_err(|e| ApiError::from_cms("Failed to update article", e))?;
    Ok(Json(json!({ "message": "Article updated successfully" })))
}

/// `POST /api/articles/create`
pub async fn create(
    _admin: AdminSession,
    State(state): State<SharedState>,
    ApiJson(article): ApiJson<NewArticle>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .cms
        .articles()
        .create(&article)
        .await
        .map_err(|e| ApiError::from_cms("Failed to create article", e))?;
    Ok(Json(json!({ "message": "Article created successfully" })))
}
