// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Every handler here receives the token subject as `Extension<AuthUser>`,
// injected by `middleware::jwt_auth_middleware`.

pub mod auth;
pub mod watchlist;
