use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::auth::Session as AuthSession;
use crate::database::PublicUser;

pub const FALLBACK_ERROR: &str = "Something went wrong. Please try again.";

/// The server's `error` field, or the generic fallback when the body has none
pub fn error_message(body: &Value) -> String {
    body.get("error")
        .and_then(|e| e.as_str())
        .filter(|e| !e.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| FALLBACK_ERROR.to_string())
}

/// Thin HTTP client over the Kodflix REST surface
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<&str>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(str::to_string),
        })
    }

    pub async fn signup(
        &self,
        uname: &str,
        email: &str,
        password: &str,
        phone: Option<&str>,
    ) -> anyhow::Result<AuthSession> {
        let body = json!({ "uname": uname, "email": email, "password": password, "phone": phone });
        self.send(self.request(Method::POST, "/api/auth/signup").json(&body))
            .await
    }

    pub async fn login(&self, email: &str, password: &str) -> anyhow::Result<AuthSession> {
        let body = json!({ "email": email, "password": password });
        self.send(self.request(Method::POST, "/api/auth/login").json(&body))
            .await
    }

    pub async fn whoami(&self) -> anyhow::Result<PublicUser> {
        self.send(self.request(Method::GET, "/api/auth/whoami")).await
    }

    pub async fn movies(&self, category: &str, page: u32) -> anyhow::Result<Value> {
        let path = format!("/api/movies/{}", category);
        self.send(self.request(Method::GET, &path).query(&[("page", page)]))
            .await
    }

    pub async fn search(&self, query: &str, page: u32) -> anyhow::Result<Value> {
        let page = page.to_string();
        self.send(
            self.request(Method::GET, "/api/search")
                .query(&[("q", query), ("page", page.as_str())]),
        )
        .await
    }

    pub async fn details(&self, media_type: &str, id: u64) -> anyhow::Result<Value> {
        let path = format!("/api/details/{}/{}", media_type, id);
        self.send(self.request(Method::GET, &path)).await
    }

    pub async fn watchlist(&self) -> anyhow::Result<Vec<Value>> {
        self.send(self.request(Method::GET, "/api/watchlist")).await
    }

    pub async fn add_to_watchlist(&self, movie: &Value) -> anyhow::Result<Vec<Value>> {
        self.send(self.request(Method::POST, "/api/watchlist").json(movie))
            .await
    }

    pub async fn remove_from_watchlist(&self, id: i64) -> anyhow::Result<Vec<Value>> {
        let path = format!("/api/watchlist/{}", id);
        self.send(self.request(Method::DELETE, &path)).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> anyhow::Result<T> {
        let response = builder.send().await.map_err(|e| {
            tracing::debug!("Request failed: {}", e);
            anyhow::anyhow!(FALLBACK_ERROR)
        })?;
        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);

        if !status.is_success() {
            tracing::debug!("Server answered {}: {}", status, body);
            return Err(anyhow::anyhow!(error_message(&body)));
        }

        serde_json::from_value(body).map_err(|e| {
            tracing::debug!("Unexpected response shape: {}", e);
            anyhow::anyhow!(FALLBACK_ERROR)
        })
    }
}
