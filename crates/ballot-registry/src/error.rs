use crate::types::PrincipalId;
use thiserror::Error;

/// Rejections raised by guarded registry operations. A rejected call never
/// mutates state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Only the owner can perform this action")]
    Unauthorized,
    #[error("You are not a registered voter")]
    NotRegistered,
    #[error("You have already voted")]
    AlreadyVoted,
}

/// Errors restoring or persisting a registry snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot administrator is empty")]
    EmptyAdministrator,
    #[error("participant {0} marked as voted but not registered")]
    VotedWithoutRegistration(PrincipalId),
    #[error("tally total {tally_total} does not match {voted} voted participants")]
    TallyMismatch { tally_total: u64, voted: u64 },
    #[error("snapshot io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors loading bootstrap configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read failed {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("parse failed {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("administrator must not be empty")]
    EmptyAdministrator,
    #[error("snapshot administrator {found} does not match configured {expected}")]
    AdministratorMismatch {
        expected: PrincipalId,
        found: PrincipalId,
    },
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
}
