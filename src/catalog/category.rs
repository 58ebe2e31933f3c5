use serde::{Deserialize, Serialize};

/// Row categories served by `/api/movies/:type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Trending,
    Originals,
    TopRated,
    Action,
    Comedy,
    Horror,
    Romance,
    Documentaries,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Trending,
        Category::Originals,
        Category::TopRated,
        Category::Action,
        Category::Comedy,
        Category::Horror,
        Category::Romance,
        Category::Documentaries,
    ];

    /// Unknown keys map to `Trending`.
    pub fn from_key(key: &str) -> Self {
        match key {
            "originals" => Category::Originals,
            "top_rated" => Category::TopRated,
            "action" => Category::Action,
            "comedy" => Category::Comedy,
            "horror" => Category::Horror,
            "romance" => Category::Romance,
            "documentaries" => Category::Documentaries,
            _ => Category::Trending,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Category::Trending => "trending",
            Category::Originals => "originals",
            Category::TopRated => "top_rated",
            Category::Action => "action",
            Category::Comedy => "comedy",
            Category::Horror => "horror",
            Category::Romance => "romance",
            Category::Documentaries => "documentaries",
        }
    }

    /// Upstream path relative to the API base
    pub fn path(self) -> &'static str {
        match self {
            Category::Trending => "/trending/all/week",
            Category::Originals => "/discover/tv",
            Category::TopRated => "/movie/top_rated",
            Category::Action
            | Category::Comedy
            | Category::Horror
            | Category::Romance
            | Category::Documentaries => "/discover/movie",
        }
    }

    /// Extra upstream query parameters
    pub fn params(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Category::Trending | Category::TopRated => &[],
            // 213 is Netflix's network id
            Category::Originals => &[("with_networks", "213")],
            Category::Action => &[("with_genres", "28")],
            Category::Comedy => &[("with_genres", "35")],
            Category::Horror => &[("with_genres", "27")],
            Category::Romance => &[("with_genres", "10749")],
            Category::Documentaries => &[("with_genres", "99")],
        }
    }
}

/// `tv` or `movie`; anything other than exactly `tv` is a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    pub fn normalize(raw: &str) -> Self {
        if raw == "tv" {
            MediaType::Tv
        } else {
            MediaType::Movie
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_key(category.key()), category);
        }
    }

    #[test]
    fn unknown_key_is_trending() {
        assert_eq!(Category::from_key("westerns"), Category::Trending);
        assert_eq!(Category::from_key(""), Category::Trending);
        assert_eq!(Category::from_key("TOP_RATED"), Category::Trending);
    }

    #[test]
    fn genre_filters() {
        assert_eq!(Category::Originals.path(), "/discover/tv");
        assert_eq!(Category::Originals.params(), &[("with_networks", "213")]);
        assert_eq!(Category::Romance.params(), &[("with_genres", "10749")]);
        assert!(Category::Trending.params().is_empty());
    }

    #[test]
    fn media_type_normalization() {
        assert_eq!(MediaType::normalize("tv"), MediaType::Tv);
        assert_eq!(MediaType::normalize("movie"), MediaType::Movie);
        assert_eq!(MediaType::normalize("person"), MediaType::Movie);
        assert_eq!(MediaType::normalize("TV"), MediaType::Movie);
    }
}
