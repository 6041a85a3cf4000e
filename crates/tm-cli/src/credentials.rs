//! Local storage for the access/refresh token pair.
//!
//! Tokens live in `credentials.toml` under the config directory
//! (`TM_CONFIG_DIR` or `./.tm/`). The file holds bearer secrets, so it is
//! created before the tokens are written and removed on logout.

use crate::client::error::ClientError;
use crate::client::CliClientResult;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct CredentialsStore {
    path: PathBuf,
}

impl CredentialsStore {
    /// Store under the standard config directory.
    pub fn from_config_dir() -> CliClientResult<Self> {
        let dir = tm_config::Config::config_dir()
            .map_err(|e| ClientError::credentials(format!("Cannot resolve config dir: {}", e)))?;
        Ok(Self {
            path: dir.join("credentials.toml"),
        })
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the stored pair, if any.
    pub fn load(&self) -> CliClientResult<Option<Credentials>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| ClientError::credentials(format!("Cannot read {}: {}", self.path.display(), e)))?;

        let credentials = toml::from_str(&contents)
            .map_err(|e| ClientError::credentials(format!("Malformed {}: {}", self.path.display(), e)))?;

        Ok(Some(credentials))
    }

    /// Persist a new pair, replacing any previous one.
    pub fn save(&self, credentials: &Credentials) -> CliClientResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::credentials(format!("Cannot create {}: {}", parent.display(), e)))?;
        }

        let contents = toml::to_string(credentials)
            .map_err(|e| ClientError::credentials(format!("Cannot serialize credentials: {}", e)))?;

        std::fs::write(&self.path, contents)
            .map_err(|e| ClientError::credentials(format!("Cannot write {}: {}", self.path.display(), e)))?;

        Ok(())
    }

    /// Forget the stored pair. Idempotent.
    pub fn clear(&self) -> CliClientResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::credentials(format!(
                "Cannot remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}
