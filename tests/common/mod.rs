#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use kodflix_api::database::{FileStorage, Storage};
use kodflix_api::{app, AppConfig, AppState};

pub const TEST_API_KEY: &str = "test-api-key";

/// In-process server over file storage in a throwaway directory
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    _data_dir: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    /// Catalog requests go to `catalog_url`; `api_key: None` leaves the key unconfigured
    pub async fn spawn(catalog_url: &str, api_key: Option<&str>) -> Result<Self> {
        let data_dir = tempfile::tempdir()?;

        let mut config = AppConfig::development();
        config.storage.data_dir = data_dir.path().to_path_buf();
        config.security.jwt_secret = "integration-test-secret".to_string();
        config.security.bcrypt_cost = 4;
        config.catalog.base_url = catalog_url.to_string();
        config.catalog.api_key = api_key.map(str::to_string);

        let storage: Arc<dyn Storage> = Arc::new(FileStorage::open(data_dir.path()).await?);
        let state = AppState::new(config, storage)?;

        Ok(Self {
            router: app(state.clone()),
            state,
            _data_dir: data_dir,
        })
    }

    /// App whose catalog points nowhere; enough for auth and watchlist tests
    pub async fn offline() -> Result<Self> {
        Self::spawn("http://127.0.0.1:9", Some(TEST_API_KEY)).await
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> Result<TestResponse> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };

        Ok(TestResponse { status, body })
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Result<TestResponse> {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> Result<TestResponse> {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> Result<TestResponse> {
        self.request(Method::DELETE, uri, token, None).await
    }

    /// Sign up and return the issued token
    pub async fn signup(&self, uname: &str, email: &str, password: &str) -> Result<String> {
        let res = self
            .post(
                "/api/auth/signup",
                None,
                json!({ "uname": uname, "email": email, "password": password }),
            )
            .await?;
        anyhow::ensure!(res.status == StatusCode::CREATED, "signup failed: {}", res.body);

        res.body["token"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("signup response has no token: {}", res.body))
    }
}
