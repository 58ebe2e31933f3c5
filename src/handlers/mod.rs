// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (bearer JWT required)
pub mod public; // /api/auth/signup, /api/auth/login, catalog proxy
pub mod protected; // /api/auth/whoami, /api/watchlist
