//! TMDB pass-through client.
//!
//! Only query parameters are shaped here; upstream payloads are returned as-is.

pub mod category;

use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::config::CatalogConfig;

pub use category::{Category, MediaType};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("TMDB API Key missing")]
    MissingApiKey,

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Upstream returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

#[derive(Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    language: String,
}

impl CatalogClient {
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            language: config.language.clone(),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// One page of a category row
    pub async fn movies(&self, category: Category, page: u32) -> Result<Value, CatalogError> {
        let mut params = vec![
            ("language", self.language.clone()),
            ("page", page.to_string()),
        ];
        params.extend(
            category
                .params()
                .iter()
                .map(|(key, value)| (*key, value.to_string())),
        );

        self.get(category.path(), params).await
    }

    /// Multi-search across movies, TV and people
    pub async fn search(&self, query: &str, page: u32) -> Result<Value, CatalogError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CatalogError::InvalidRequest("Search query is required".to_string()));
        }

        let params = vec![
            ("language", self.language.clone()),
            ("query", query.to_string()),
            ("include_adult", "false".to_string()),
            ("page", page.to_string()),
        ];

        self.get("/search/multi", params).await
    }

    /// Full record with videos, credits and similar titles appended
    pub async fn details(&self, media_type: MediaType, id: u64) -> Result<Value, CatalogError> {
        let path = format!("/{}/{}", media_type.as_str(), id);
        let params = vec![("append_to_response", "videos,credits,similar".to_string())];

        self.get(&path, params).await
    }

    async fn get(&self, path: &str, mut params: Vec<(&str, String)>) -> Result<Value, CatalogError> {
        let api_key = self.api_key.as_ref().ok_or(CatalogError::MissingApiKey)?;
        params.insert(0, ("api_key", api_key.clone()));

        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("Catalog request: {}", url);

        let response = self.http.get(&url).query(&params).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = upstream_message(response.json::<Value>().await.ok().as_ref())
                .unwrap_or_else(|| format!("Upstream request failed with status {}", status.as_u16()));
            return Err(CatalogError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

/// TMDB reports failures as `{"status_code": .., "status_message": ".."}`.
fn upstream_message(body: Option<&Value>) -> Option<String> {
    let body = body?;
    body.get("status_message")
        .or_else(|| body.get("error"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Page numbers start at 1; anything unparsable falls back to the first page.
pub fn parse_page(raw: Option<&str>) -> u32 {
    raw.and_then(|p| p.trim().parse::<u32>().ok())
        .filter(|p| *p > 0)
        .unwrap_or(1)
}
