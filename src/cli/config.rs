use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::database::PublicUser;

pub const DEFAULT_SERVER: &str = "http://localhost:5000";
const SESSION_FILE: &str = "session.json";

/// What the CLI remembers between invocations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub server: String,
    pub user: Option<PublicUser>,
    pub token: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            user: None,
            token: None,
        }
    }
}

impl Session {
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    pub fn sign_in(&mut self, user: PublicUser, token: String) {
        self.user = Some(user);
        self.token = Some(token);
    }

    pub fn sign_out(&mut self) {
        self.user = None;
        self.token = None;
    }
}

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("KODFLIX_CLI_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME")
            .map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("kodflix").join("cli")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

/// `session.json` inside a config directory
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn open() -> anyhow::Result<Self> {
        Ok(Self::at(get_config_dir()?))
    }

    pub fn at(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> anyhow::Result<Session> {
        if !self.path.exists() {
            return Ok(Session::default());
        }

        let content = fs::read_to_string(&self.path)?;
        let session: Session = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Corrupt session file {}: {}", self.path.display(), e))?;
        Ok(session)
    }

    pub fn save(&self, session: &Session) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}
