// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition and the catalog proxy. Catalog responses are not
// user-specific, so they stay outside the JWT layer.

pub mod auth;
pub mod catalog;
