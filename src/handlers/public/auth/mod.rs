// handlers/public/auth/mod.rs - Public authentication handlers
//
// Token acquisition endpoints that do not require authentication.

pub mod login; // POST /api/auth/login - authenticate and get JWT
pub mod signup; // POST /api/auth/signup - create account and get JWT

pub use login::login_post;
pub use signup::signup_post;
