pub mod user;
pub mod watchlist;

pub use user::{NewUser, PublicUser, User};
pub use watchlist::WatchlistEntry;
