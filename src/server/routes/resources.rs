use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::content::Resource;
use crate::server::error::ApiError;
use crate::server::extract::{ApiJson, ApiQuery};
use crate::server::middleware::AdminSession;
use crate::server::SharedState;

#[derive(Debug, Default, Deserialize)]
pub struct ResourcesQuery {
    pub source: Option<String>,
}

/// A full list replaces the stored one, a single resource is appended
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ResourcePayload {
    Many(Vec<Resource>),
    One(Resource),
}

/// `GET /api/resources`: the local checkout unless `?source=github`
pub async fn list(
    State(state): State<SharedState>,
    ApiQuery(query): ApiQuery<ResourcesQuery>,
) -> Result<Json<Vec<Resource>>, ApiError> {
    let resources = state.cms.resources();
    let from_github = query.source.as_deref() == Some("github");

    let items = match &state.cms.config.content.local_dir {
        Some(dir) if !from_github => resources.load_local(dir).await,
        _ => resources.load().await,
    }
    .map_err(|e| ApiError::from_cms("Failed to fetch resources", e))?;

    Ok(Json(items))
}

/// `POST /api/resources`, responds with the saved list
pub async fn save(
    _admin: AdminSession,
    State(state): State<SharedState>,
    ApiJson(payload): ApiJson<ResourcePayload>,
) -> Result<Json<Vec<Resource>>, ApiError> {
    let resources = state.cms.resources();
    let saved = match payload {
        ResourcePayload::Many(items) => resources.replace(items).await,
        ResourcePayload::One(item) => resources.append(item).await,
    }
    .map_err(|e| ApiError::from_cms("Failed to update resources", e))?;

    Ok(Json(saved))
}
