use crate::error::ConfigError;
use crate::registry::BallotRegistry;
use crate::snapshot::RegistrySnapshot;
use crate::types::PrincipalId;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Host-supplied bootstrap settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Identity of the creator; becomes the administrator for the registry's lifetime.
    pub administrator: PrincipalId,
    /// Optional JSON snapshot to resume from when it exists.
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
}

impl RegistryConfig {
    pub fn new(administrator: PrincipalId) -> Self {
        Self {
            administrator,
            snapshot_path: None,
        }
    }

    pub fn load_from_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let cfg: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.administrator.is_empty() {
            return Err(ConfigError::EmptyAdministrator);
        }
        Ok(())
    }
}

impl BallotRegistry {
    /// Resume from the configured snapshot if present, otherwise start fresh
    /// with the configured administrator.
    pub fn bootstrap(cfg: &RegistryConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;

        let snapshot_path = match &cfg.snapshot_path {
            Some(p) if p.exists() => p,
            _ => return Ok(Self::initialize(cfg.administrator.clone())),
        };

        let snapshot = RegistrySnapshot::load_from_json(snapshot_path)?;
        if snapshot.administrator != cfg.administrator {
            return Err(ConfigError::AdministratorMismatch {
                expected: cfg.administrator.clone(),
                found: snapshot.administrator,
            });
        }
        info!(
            "[BALLOT] resuming from snapshot {}",
            snapshot_path.display()
        );
        Ok(Self::from_snapshot(snapshot)?)
    }
}
