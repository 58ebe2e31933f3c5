// handlers/public/auth/signup.rs - POST /api/auth/signup handler

use axum::{extract::State, http::StatusCode, Json};

use crate::auth::{Session, SignupRequest};
use crate::error::ApiError;
use crate::middleware::ApiJson;
use crate::state::AppState;

/// POST /api/auth/signup - Register new user account
///
/// Expected Input:
/// ```json
/// { "uname": "string", "email": "string", "password": "string", "phone": "string" }
/// ```
///
/// Answers 201 with the same `{token, user}` shape as login. A taken email
/// answers 400 "User already exists".
pub async fn signup_post(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SignupRequest>,
) -> Result<(StatusCode, Json<Session>), ApiError> {
    tracing::info!("Signup attempt for {}", payload.email);

    let session = state.auth.signup(payload).await?;
    Ok((StatusCode::CREATED, Json(session)))
}
