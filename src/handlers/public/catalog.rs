use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::catalog::{parse_page, Category, MediaType};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub page: Option<String>,
}

/// GET /api/movies/:type?page= - One page of a category row
///
/// Unknown category keys are served as `trending`.
pub async fn movies(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Value>, ApiError> {
    let category = Category::from_key(&kind);
    tracing::info!("Fetching {} movies (requested '{}')", category.key(), kind);

    let payload = state
        .catalog
        .movies(category, parse_page(query.page.as_deref()))
        .await?;
    Ok(Json(payload))
}

/// GET /api/search?q=&page= - Multi-search
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Value>, ApiError> {
    let q = query.q.unwrap_or_default();
    let payload = state
        .catalog
        .search(&q, parse_page(query.page.as_deref()))
        .await?;
    Ok(Json(payload))
}

/// GET /api/details/:type/:id - Movie or TV record with videos, credits and similar
pub async fn details(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let media_type = MediaType::normalize(&kind);
    let id: u64 = id
        .trim()
        .parse()
        .map_err(|_| ApiError::validation_error(format!("Invalid catalog id '{}'", id)))?;

    let payload = state.catalog.details(media_type, id).await?;
    Ok(Json(payload))
}
