use axum::{extract::State, Extension, Json};

use crate::database::PublicUser;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

/// GET /api/auth/whoami - Get current authenticated user details
///
/// Looks the token subject up again, so a token for a user that no longer
/// exists answers 401.
pub async fn whoami(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<PublicUser>, ApiError> {
    let profile = state.auth.whoami(&user.uid).await?;
    Ok(Json(profile))
}
