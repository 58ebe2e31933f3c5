use anyhow::Context;
use std::sync::Arc;

use crate::auth::{AuthService, TokenKeys};
use crate::catalog::CatalogClient;
use crate::config::AppConfig;
use crate::database::{self, Storage};

/// Everything a request handler needs, built once at startup and cloned per
/// request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub storage: Arc<dyn Storage>,
    pub auth: AuthService,
    pub catalog: CatalogClient,
}

impl AppState {
    /// Wire services around an already-selected storage backend
    pub fn new(config: AppConfig, storage: Arc<dyn Storage>) -> anyhow::Result<Self> {
        let tokens = TokenKeys::from_config(&config.security)
            .context("invalid JWT settings (JWT_SECRET, SECURITY_JWT_EXPIRY_HOURS)")?;
        let auth = AuthService::new(Arc::clone(&storage), tokens, config.security.bcrypt_cost);
        let catalog = CatalogClient::new(&config.catalog).context("failed to build catalog client")?;

        Ok(Self {
            config: Arc::new(config),
            storage,
            auth,
            catalog,
        })
    }

    /// Select the storage backend from configuration, then wire services
    pub async fn build(config: AppConfig) -> anyhow::Result<Self> {
        let storage = database::connect(&config)
            .await
            .context("failed to initialize storage")?;
        tracing::info!("Using {} storage backend", storage.backend());

        Self::new(config, storage)
    }
}
