use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Signing secret used when `JWT_SECRET` is unset outside production.
const DEVELOPMENT_JWT_SECRET: &str = "kodflix-development-secret";
const PLACEHOLDER_API_KEY: &str = "YOUR_TMDB_API_KEY_HERE";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub security: SecurityConfig,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Postgres connection string. `None` selects the JSON-file backend.
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    pub bcrypt_cost: u32,
    /// Empty means permissive CORS.
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub language: String,
    pub timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            let v = v.trim();
            self.database.url = (!v.is_empty()).then(|| v.to_string());
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        if let Ok(v) = env::var("STORAGE_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(v);
        }

        // Security overrides
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("SECURITY_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
        if let Ok(v) = env::var("SECURITY_BCRYPT_COST") {
            self.security.bcrypt_cost = v.parse().unwrap_or(self.security.bcrypt_cost);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // Catalog overrides
        if let Ok(v) = env::var("TMDB_API_KEY") {
            self.catalog.api_key = usable_api_key(&v);
        }
        if let Ok(v) = env::var("CATALOG_BASE_URL") {
            self.catalog.base_url = v.trim_end_matches('/').to_string();
        }
        if let Ok(v) = env::var("CATALOG_LANGUAGE") {
            self.catalog.language = v;
        }
        if let Ok(v) = env::var("CATALOG_TIMEOUT_SECS") {
            self.catalog.timeout_secs = v.parse().unwrap_or(self.catalog.timeout_secs);
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig { port: 5000 },
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 30,
            },
            storage: StorageConfig {
                data_dir: PathBuf::from("data"),
            },
            security: SecurityConfig {
                jwt_secret: DEVELOPMENT_JWT_SECRET.to_string(),
                jwt_expiry_hours: 24 * 7, // 1 week
                bcrypt_cost: bcrypt::DEFAULT_COST,
                cors_origins: Vec::new(),
            },
            catalog: CatalogConfig::default(),
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig { port: 5000 },
            database: DatabaseConfig {
                url: None,
                max_connections: 50,
                connection_timeout: 5,
            },
            storage: StorageConfig {
                data_dir: PathBuf::from("data"),
            },
            security: SecurityConfig {
                // Must come from JWT_SECRET; an empty secret refuses to start.
                jwt_secret: String::new(),
                jwt_expiry_hours: 24 * 7,
                bcrypt_cost: bcrypt::DEFAULT_COST,
                cors_origins: Vec::new(),
            },
            catalog: CatalogConfig::default(),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn uses_development_secret(&self) -> bool {
        self.security.jwt_secret == DEVELOPMENT_JWT_SECRET
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.themoviedb.org/3".to_string(),
            language: "en-US".to_string(),
            timeout_secs: 10,
        }
    }
}

/// The sample-env placeholder counts as unset.
fn usable_api_key(raw: &str) -> Option<String> {
    let key = raw.trim();
    if key.is_empty() || key == PLACEHOLDER_API_KEY {
        return None;
    }
    Some(key.to_string())
}

impl CatalogConfig {
    /// Key rendered as `abcd...wxyz` for startup logs.
    pub fn masked_api_key(&self) -> Option<String> {
        let key = self.api_key.as_deref()?;
        if key.len() <= 8 || !key.is_ascii() {
            return Some("****".to_string());
        }
        Some(format!("{}...{}", &key[..4], &key[key.len() - 4..]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.server.port, 5000);
        assert!(config.database.url.is_none());
        assert!(config.uses_development_secret());
        assert_eq!(config.security.jwt_expiry_hours, 168);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert!(config.is_production());
        assert!(config.security.jwt_secret.is_empty());
        assert_eq!(config.database.max_connections, 50);
    }

    #[test]
    fn masks_api_key() {
        let mut catalog = CatalogConfig::default();
        assert_eq!(catalog.masked_api_key(), None);

        catalog.api_key = Some("0123456789abcdef".to_string());
        assert_eq!(catalog.masked_api_key().as_deref(), Some("0123...cdef"));

        catalog.api_key = Some("short".to_string());
        assert_eq!(catalog.masked_api_key().as_deref(), Some("****"));
    }

    #[test]
    fn placeholder_key_is_unset() {
        assert_eq!(usable_api_key(""), None);
        assert_eq!(usable_api_key("  "), None);
        assert_eq!(usable_api_key(PLACEHOLDER_API_KEY), None);
        assert_eq!(usable_api_key(" abc123 ").as_deref(), Some("abc123"));
    }

    #[test]
    fn secrets_are_not_serialized() {
        let mut config = AppConfig::development();
        config.catalog.api_key = Some("super-secret-key".to_string());
        let rendered = serde_json::to_string(&config).unwrap();
        assert!(!rendered.contains("super-secret-key"));
        assert!(!rendered.contains("kodflix-development-secret"));
    }
}
