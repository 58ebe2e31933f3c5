use serde_json::Value;

use crate::catalog::Category;

/// Where a home-screen row gets its movies from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSource {
    MyList,
    Catalog(Category),
}

#[derive(Debug, Clone, Copy)]
pub struct Row {
    pub title: &'static str,
    pub source: RowSource,
}

/// Home rows, top to bottom
pub const HOME_ROWS: [Row; 9] = [
    Row { title: "My List", source: RowSource::MyList },
    Row { title: "Originals", source: RowSource::Catalog(Category::Originals) },
    Row { title: "Trending Now", source: RowSource::Catalog(Category::Trending) },
    Row { title: "Top Rated", source: RowSource::Catalog(Category::TopRated) },
    Row { title: "Action", source: RowSource::Catalog(Category::Action) },
    Row { title: "Comedy", source: RowSource::Catalog(Category::Comedy) },
    Row { title: "Horror", source: RowSource::Catalog(Category::Horror) },
    Row { title: "Romance", source: RowSource::Catalog(Category::Romance) },
    Row { title: "Documentaries", source: RowSource::Catalog(Category::Documentaries) },
];

/// Rows while the search box is empty, the results grid otherwise
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMode {
    Rows,
    Search(String),
}

impl ViewMode {
    pub fn from_query(query: &str) -> Self {
        let query = query.trim();
        if query.is_empty() {
            ViewMode::Rows
        } else {
            ViewMode::Search(query.to_string())
        }
    }
}

/// Display title of a catalog item; movies carry `title`, shows carry `name`
pub fn display_title(item: &Value) -> &str {
    ["title", "name", "original_name", "original_title"]
        .iter()
        .find_map(|key| item.get(*key).and_then(|v| v.as_str()))
        .filter(|t| !t.is_empty())
        .unwrap_or("Untitled")
}

/// `movie` or `tv`, from `media_type` when the upstream tagged the item
pub fn media_type_of(item: &Value) -> &str {
    match item.get("media_type").and_then(|v| v.as_str()) {
        Some("tv") => "tv",
        Some(_) => "movie",
        None if item.get("name").is_some() && item.get("title").is_none() => "tv",
        None => "movie",
    }
}

/// The `results` array of a paged catalog payload
pub fn results(payload: &Value) -> Vec<Value> {
    payload
        .get("results")
        .and_then(|r| r.as_array())
        .cloned()
        .unwrap_or_default()
}

/// One line per item: id, type and title
pub fn item_line(item: &Value) -> String {
    let id = item
        .get("id")
        .map(|v| v.to_string())
        .unwrap_or_else(|| "?".to_string());
    format!("{:>8}  {:<5}  {}", id, media_type_of(item), display_title(item))
}
