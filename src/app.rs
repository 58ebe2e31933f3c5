use axum::{
    http::{HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post},
    Router,
};
use serde_json::{json, Value};
use std::any::Any;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as CorsAny, CorsLayer},
    trace::TraceLayer,
};

use crate::error::ApiError;
use crate::handlers;
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// Full router with middleware, bound to `state`
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.security.cors_origins);

    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_public_routes())
        .merge(catalog_routes())
        // Protected
        .merge(protected_routes(state.clone()))
        // Global middleware
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    use handlers::public::auth;

    Router::new()
        .route("/api/auth/signup", post(auth::signup_post))
        .route("/api/auth/login", post(auth::login_post))
}

fn catalog_routes() -> Router<AppState> {
    use handlers::public::catalog;

    Router::new()
        .route("/api/movies/:type", get(catalog::movies))
        .route("/api/search", get(catalog::search))
        .route("/api/details/:type/:id", get(catalog::details))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::{auth, watchlist};

    Router::new()
        .route("/api/auth/whoami", get(auth::session_whoami))
        .route("/api/watchlist", get(watchlist::list).post(watchlist::add))
        .route("/api/watchlist/:id", delete(watchlist::remove))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(CorsAny)
        .allow_headers(CorsAny)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!("Handler panicked: {}", detail);

    ApiError::internal_server_error("Internal server error").into_response()
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Kodflix API",
            "version": version,
            "description": "Streaming catalog backend built with Rust (Axum)",
            "endpoints": {
                "auth": "/api/auth/signup, /api/auth/login (public), /api/auth/whoami (protected)",
                "movies": "/api/movies/:type?page= (public)",
                "search": "/api/search?q= (public)",
                "details": "/api/details/:type/:id (public)",
                "watchlist": "/api/watchlist[/:id] (protected)",
                "health": "/health (public)",
            }
        }
    }))
}

async fn health(axum::extract::State(state): axum::extract::State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();
    let backend = state.storage.backend();

    match state.storage.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "storage": backend,
                    "catalog_configured": state.catalog.has_api_key()
                }
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "storage unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now,
                        "storage": backend
                    }
                })),
            )
        }
    }
}
