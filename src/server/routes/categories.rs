use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::content::Category;
use crate::server::error::ApiError;
use crate::server::extract::ApiJson;
use crate::server::middleware::AdminSession;
use crate::server::SharedState;

#[derive(Debug, Deserialize)]
pub struct DeleteCategory {
    pub name: String,
}

/// `GET /api/categories`
pub async fn list(State(state): State<SharedState>) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = state
        .cms
        .categories()
        .load()
        .await
        .map_err(|e| ApiError::from_cms("Failed to fetch categories", e))?;
    Ok(Json(categories))
}

/// `POST /api/categories` appends one category
pub async fn add(
    _admin: AdminSession,
    State(state): State<SharedState>,
    ApiJson(category): ApiJson<Category>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let saved = state
        .cms
        .categories()
        .append(category)
        .await
        .map_err(|e| ApiError::from_cms("Failed to save categories", e))?;
    Ok(Json(saved))
}

/// `PUT /api/categories` replaces the whole list
pub async fn replace(
    _admin: AdminSession,
    State(state): State<SharedState>,
    ApiJson(categories): ApiJson<Vec<Category>>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let saved = state
        .cms
        .categories()
        .replace(categories)
        .await
        .map_err(|e| ApiError::from_cms("Failed to save categories", e))?;
    Ok(Json(saved))
}

/// `DELETE /api/categories` removes every category with the given name
pub async fn remove(
    _admin: AdminSession,
    State(state): State<SharedState>,
    ApiJson(request): ApiJson<DeleteCategory>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let saved = state
        .cms
        .categories()
        .remove_where(|c| c.name == request.name)
        .await
        .map_err(|e| ApiError::from_cms("Failed to delete category", e))?;
    Ok(Json(saved))
}
