//! Persisted state layout.
//!
//! One scalar administrator, one table keyed by participant and one keyed by
//! candidate. Absent rows read as unregistered/not-voted and zero votes.

use crate::error::SnapshotError;
use crate::types::{CandidateId, ParticipantRecord, PrincipalId};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub administrator: PrincipalId,
    #[serde(default)]
    pub participants: BTreeMap<PrincipalId, ParticipantRecord>,
    #[serde(default)]
    pub tally: BTreeMap<CandidateId, u64>,
}

impl RegistrySnapshot {
    /// Check the registry invariants a restored state must satisfy.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.administrator.is_empty() {
            return Err(SnapshotError::EmptyAdministrator);
        }

        let mut voted: u64 = 0;
        for (id, rec) in &self.participants {
            if rec.has_voted && !rec.registered {
                return Err(SnapshotError::VotedWithoutRegistration(id.clone()));
            }
            if rec.has_voted {
                voted += 1;
            }
        }

        let tally_total = self
            .tally
            .values()
            .try_fold(0u64, |acc, n| acc.checked_add(*n))
            .unwrap_or(u64::MAX);
        if tally_total != voted {
            return Err(SnapshotError::TallyMismatch { tally_total, voted });
        }

        Ok(())
    }

    pub fn load_from_json(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let text = fs::read_to_string(path.as_ref())?;
        let snapshot: Self = serde_json::from_str(&text)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn save_to_json(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), text)?;
        info!(
            "[BALLOT] snapshot saved to {} ({} participants, {} candidates)",
            path.as_ref().display(),
            self.participants.len(),
            self.tally.len()
        );
        Ok(())
    }
}
