//! Permissioned ballot registry.
//!
//! A single administrator, fixed when the registry is created, registers
//! participants. Every registered participant may cast exactly one vote for
//! any candidate identifier, and the registry keeps a running tally per
//! candidate. This is a guarded counter, not a cryptographic voting protocol:
//! there is no ballot secrecy and no tallying proof.

pub mod config;
pub mod error;
pub mod registry;
pub mod snapshot;
pub mod store;
pub mod types;

pub use config::RegistryConfig;
pub use error::{ConfigError, RegistryError, SnapshotError};
pub use registry::BallotRegistry;
pub use snapshot::RegistrySnapshot;
pub use store::{BallotStore, SharedBallotRegistry};
pub use types::{CandidateId, ParticipantRecord, ParticipantStatus, PrincipalId};
