use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde_json::Value;

use crate::database::models::watchlist::movie_id_of;
use crate::error::ApiError;
use crate::middleware::{ApiJson, AuthUser};
use crate::state::AppState;

/// GET /api/watchlist - The caller's saved movies, oldest first
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let movies = state.storage.list_watchlist(&user.uid).await?;
    Ok(Json(movies))
}

/// POST /api/watchlist - Save a movie object; returns the updated list
///
/// The body is the catalog movie itself and must carry an integer `id`.
/// Saving an already-listed id leaves the list unchanged.
pub async fn add(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(movie): ApiJson<Value>,
) -> Result<Json<Vec<Value>>, ApiError> {
    if !movie.is_object() {
        return Err(ApiError::validation_error("Movie must be a JSON object"));
    }
    let movie_id = movie_id_of(&movie)
        .ok_or_else(|| ApiError::validation_error("Movie must have an integer `id`"))?;

    tracing::debug!("Adding {} to watchlist of {}", movie_id, user.uid);
    let movies = state
        .storage
        .add_to_watchlist(&user.uid, movie_id, movie)
        .await?;
    Ok(Json(movies))
}

/// DELETE /api/watchlist/:id - Drop a movie; returns the updated list
///
/// Removing an id that is not listed returns the list unchanged.
pub async fn remove(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let movie_id: i64 = id
        .trim()
        .parse()
        .map_err(|_| ApiError::validation_error(format!("Invalid movie id '{}'", id)))?;

    tracing::debug!("Removing {} from watchlist of {}", movie_id, user.uid);
    let movies = state
        .storage
        .remove_from_watchlist(&user.uid, movie_id)
        .await?;
    Ok(Json(movies))
}
