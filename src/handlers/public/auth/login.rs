// handlers/public/auth/login.rs - POST /api/auth/login handler

use axum::{extract::State, Json};

use crate::auth::{LoginRequest, Session};
use crate::error::ApiError;
use crate::middleware::ApiJson;
use crate::state::AppState;

/// POST /api/auth/login - Authenticate user and receive JWT token
///
/// Expected Input:
/// ```json
/// { "email": "string", "password": "string" }
/// ```
///
/// Expected Output (Success):
/// ```json
/// {
///   "token": "eyJhbGciOiJIUzI1NiI...",
///   "user": { "uid": "kod3f9a...", "uname": "ana", "email": "ana@example.com", "phone": null }
/// }
/// ```
///
/// An unknown email and a wrong password both answer 401 "Invalid credentials".
pub async fn login_post(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<Session>, ApiError> {
    tracing::info!("Login attempt for {}", payload.email);

    let session = state.auth.login(payload).await?;
    Ok(Json(session))
}
