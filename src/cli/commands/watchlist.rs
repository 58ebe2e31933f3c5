use clap::Subcommand;
use serde_json::{Map, Value};

use crate::catalog::MediaType;
use crate::cli::guard::require_user;
use crate::cli::utils::output_items;
use crate::cli::Context;

#[derive(Subcommand)]
pub enum WatchlistCommands {
    #[command(about = "Show My List")]
    List,

    #[command(about = "Add a movie or show to My List")]
    Add {
        #[arg(help = "movie or tv")]
        media_type: String,
        #[arg(help = "Catalog id")]
        id: u64,
    },

    #[command(about = "Remove an id from My List")]
    Remove {
        #[arg(help = "Catalog id")]
        id: i64,
    },
}

/// Fields kept when a catalog record is saved to the list
const SAVED_FIELDS: [&str; 10] = [
    "id",
    "title",
    "name",
    "overview",
    "poster_path",
    "backdrop_path",
    "vote_average",
    "release_date",
    "first_air_date",
    "genre_ids",
];

/// Row-sized copy of a details record, tagged with its media type
pub fn saved_movie(record: &Value, media_type: MediaType) -> Value {
    let mut movie = Map::new();
    for field in SAVED_FIELDS {
        if let Some(value) = record.get(field) {
            movie.insert(field.to_string(), value.clone());
        }
    }
    movie.insert(
        "media_type".to_string(),
        Value::String(media_type.as_str().to_string()),
    );
    Value::Object(movie)
}

/// The list shown after a mutation is always the one the server returned.
pub async fn handle(ctx: &Context, cmd: WatchlistCommands) -> anyhow::Result<()> {
    require_user(&ctx.session)?;
    let client = ctx.client()?;

    let movies = match cmd {
        WatchlistCommands::List => client.watchlist().await?,
        WatchlistCommands::Add { media_type, id } => {
            let media_type = MediaType::normalize(&media_type);
            let record = client.details(media_type.as_str(), id).await?;
            client
                .add_to_watchlist(&saved_movie(&record, media_type))
                .await?
        }
        WatchlistCommands::Remove { id } => client.remove_from_watchlist(id).await?,
    };

    output_items(&ctx.output, "My List", &movies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn saved_movie_drops_appended_blocks() {
        let record = json!({
            "id": 1399,
            "name": "Game of Thrones",
            "poster_path": "/p.jpg",
            "credits": {"cast": []},
            "videos": {"results": []},
            "similar": {"results": []}
        });

        let movie = saved_movie(&record, MediaType::Tv);
        assert_eq!(movie["id"], 1399);
        assert_eq!(movie["name"], "Game of Thrones");
        assert_eq!(movie["media_type"], "tv");
        assert!(movie.get("credits").is_none());
        assert!(movie.get("videos").is_none());
    }
}
