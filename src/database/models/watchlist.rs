use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One saved movie. `movie` is the catalog object exactly as the client sent it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistEntry {
    pub user_id: String,
    pub movie_id: i64,
    pub movie: Value,
}

/// Integer `id` of a catalog movie object.
pub fn movie_id_of(movie: &Value) -> Option<i64> {
    movie.get("id").and_then(Value::as_i64)
}
