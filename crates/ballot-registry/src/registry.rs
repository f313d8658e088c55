//! The ballot registry state machine.
//!
//! Each guarded operation checks every precondition before its first write,
//! so a rejected call leaves state untouched and a successful `vote` flips
//! the participant flag and bumps the tally together.

use crate::error::{RegistryError, SnapshotError};
use crate::snapshot::RegistrySnapshot;
use crate::types::{CandidateId, ParticipantRecord, ParticipantStatus, PrincipalId};
use log::{debug, info, warn};
use std::collections::HashMap;

#[derive(Clone, Debug)]
pub struct BallotRegistry {
    administrator: PrincipalId,
    participants: HashMap<PrincipalId, ParticipantRecord>,
    tally: HashMap<CandidateId, u64>,
}

impl BallotRegistry {
    /// Create the registry with `creator` as its administrator for life.
    pub fn initialize(creator: PrincipalId) -> Self {
        info!("[BALLOT] registry initialized, administrator={}", creator);
        Self {
            administrator: creator,
            participants: HashMap::new(),
            tally: HashMap::new(),
        }
    }

    /// Restore a registry from a persisted snapshot after checking its invariants.
    pub fn from_snapshot(snapshot: RegistrySnapshot) -> Result<Self, SnapshotError> {
        snapshot.validate()?;
        let RegistrySnapshot {
            administrator,
            participants,
            tally,
        } = snapshot;

        let registry = Self {
            administrator,
            participants: participants
                .into_iter()
                .filter(|(_, rec)| !rec.is_default())
                .collect(),
            tally: tally.into_iter().filter(|(_, n)| *n > 0).collect(),
        };
        info!(
            "[BALLOT] registry restored, administrator={} registered={} votes={}",
            registry.administrator,
            registry.registered_count(),
            registry.total_votes()
        );
        Ok(registry)
    }

    /// Admin-gated, idempotent registration of `target`.
    pub fn register_voter(
        &mut self,
        caller: &PrincipalId,
        target: &PrincipalId,
    ) -> Result<(), RegistryError> {
        if *caller != self.administrator {
            warn!(
                "[BALLOT] register_voter rejected: caller={} target={} reason={:?}",
                caller,
                target,
                RegistryError::Unauthorized
            );
            return Err(RegistryError::Unauthorized);
        }

        let record = self.participants.entry(target.clone()).or_default();
        if record.registered {
            debug!("[BALLOT] voter {} already registered", target);
        } else {
            record.registered = true;
            info!("[BALLOT] voter {} registered by {}", target, caller);
        }
        Ok(())
    }

    /// Cast the caller's single vote for `candidate`.
    pub fn vote(
        &mut self,
        caller: &PrincipalId,
        candidate: CandidateId,
    ) -> Result<(), RegistryError> {
        let current = self.participant(caller);
        if !current.registered {
            warn!(
                "[BALLOT] vote rejected: caller={} candidate={} reason={:?}",
                caller,
                candidate,
                RegistryError::NotRegistered
            );
            return Err(RegistryError::NotRegistered);
        }
        if current.has_voted {
            warn!(
                "[BALLOT] vote rejected: caller={} candidate={} reason={:?}",
                caller,
                candidate,
                RegistryError::AlreadyVoted
            );
            return Err(RegistryError::AlreadyVoted);
        }

        // Both preconditions hold; commit the flag and the increment together.
        self.participants.entry(caller.clone()).or_default().has_voted = true;
        let count = self.tally.entry(candidate).or_insert(0);
        *count += 1;
        info!(
            "[BALLOT] vote recorded: voter={} candidate={} count={}",
            caller, candidate, *count
        );
        Ok(())
    }

    pub fn is_registered(&self, who: &PrincipalId) -> bool {
        self.participant(who).registered
    }

    pub fn get_current_vote_count(&self, candidate: CandidateId) -> u64 {
        self.tally.get(&candidate).copied().unwrap_or(0)
    }

    pub fn administrator(&self) -> &PrincipalId {
        &self.administrator
    }

    pub fn participant(&self, who: &PrincipalId) -> ParticipantRecord {
        self.participants.get(who).copied().unwrap_or_default()
    }

    pub fn status(&self, who: &PrincipalId) -> ParticipantStatus {
        self.participant(who).status()
    }

    pub fn has_voted(&self, who: &PrincipalId) -> bool {
        self.participant(who).has_voted
    }

    /// Sum of all tallies. Equals the number of participants who have voted.
    pub fn total_votes(&self) -> u64 {
        self.tally.values().sum()
    }

    pub fn registered_count(&self) -> usize {
        self.participants.values().filter(|rec| rec.registered).count()
    }

    /// Consistent copy of the full state in its persisted layout.
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            administrator: self.administrator.clone(),
            participants: self
                .participants
                .iter()
                .filter(|(_, rec)| !rec.is_default())
                .map(|(id, rec)| (id.clone(), *rec))
                .collect(),
            tally: self
                .tally
                .iter()
                .filter(|(_, n)| **n > 0)
                .map(|(k, n)| (*k, *n))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANDIDATE: CandidateId = 1;

    fn owner() -> PrincipalId {
        PrincipalId::from("owner")
    }

    fn registry_with(voters: &[&str]) -> BallotRegistry {
        let mut reg = BallotRegistry::initialize(owner());
        for v in voters {
            reg.register_voter(&owner(), &PrincipalId::from(*v)).unwrap();
        }
        reg
    }

    #[test]
    fn owner_registers_voter() {
        let reg = registry_with(&["voter1"]);
        assert!(reg.is_registered(&"voter1".into()));
        assert_eq!(reg.status(&"voter1".into()), ParticipantStatus::Registered);
    }

    #[test]
    fn non_owner_cannot_register() {
        let mut reg = registry_with(&["voter1"]);
        let err = reg
            .register_voter(&"voter1".into(), &"voter2".into())
            .unwrap_err();
        assert_eq!(err, RegistryError::Unauthorized);
        assert!(!reg.is_registered(&"voter2".into()));
    }

    #[test]
    fn registration_is_idempotent() {
        let mut reg = registry_with(&["voter1"]);
        reg.register_voter(&owner(), &"voter1".into()).unwrap();
        assert!(reg.is_registered(&"voter1".into()));
        assert_eq!(reg.registered_count(), 1);
    }

    #[test]
    fn re_registering_a_voter_keeps_voted_flag() {
        let mut reg = registry_with(&["voter1"]);
        reg.vote(&"voter1".into(), CANDIDATE).unwrap();
        reg.register_voter(&owner(), &"voter1".into()).unwrap();
        assert_eq!(reg.status(&"voter1".into()), ParticipantStatus::Voted);
        assert_eq!(
            reg.vote(&"voter1".into(), CANDIDATE),
            Err(RegistryError::AlreadyVoted)
        );
    }

    #[test]
    fn registered_voter_votes_once() {
        let mut reg = registry_with(&["voter1"]);
        reg.vote(&"voter1".into(), CANDIDATE).unwrap();
        assert_eq!(reg.get_current_vote_count(CANDIDATE), 1);
        assert!(reg.has_voted(&"voter1".into()));

        let err = reg.vote(&"voter1".into(), CANDIDATE).unwrap_err();
        assert_eq!(err, RegistryError::AlreadyVoted);
        assert_eq!(reg.get_current_vote_count(CANDIDATE), 1);
    }

    #[test]
    fn unregistered_caller_cannot_vote() {
        let mut reg = registry_with(&["voter1"]);
        let err = reg.vote(&"voter3".into(), CANDIDATE).unwrap_err();
        assert_eq!(err, RegistryError::NotRegistered);
        assert_eq!(reg.get_current_vote_count(CANDIDATE), 0);
        assert_eq!(reg.participant(&"voter3".into()), ParticipantRecord::default());
    }

    #[test]
    fn admin_must_register_self_to_vote() {
        let mut reg = registry_with(&[]);
        assert_eq!(reg.vote(&owner(), CANDIDATE), Err(RegistryError::NotRegistered));
        reg.register_voter(&owner(), &owner()).unwrap();
        reg.vote(&owner(), CANDIDATE).unwrap();
        assert_eq!(reg.get_current_vote_count(CANDIDATE), 1);
    }

    #[test]
    fn any_candidate_id_is_a_bucket() {
        let mut reg = registry_with(&["a", "b"]);
        reg.vote(&"a".into(), 0).unwrap();
        reg.vote(&"b".into(), u64::MAX).unwrap();
        assert_eq!(reg.get_current_vote_count(0), 1);
        assert_eq!(reg.get_current_vote_count(u64::MAX), 1);
        assert_eq!(reg.get_current_vote_count(42), 0);
        assert_eq!(reg.total_votes(), 2);
    }

    #[test]
    fn snapshot_omits_default_rows() {
        let mut reg = registry_with(&["voter1", "voter2"]);
        reg.vote(&"voter1".into(), 7).unwrap();
        // Unregistered caller probes must not leave rows behind.
        let _ = reg.vote(&"ghost".into(), 7);

        let snap = reg.snapshot();
        assert_eq!(snap.participants.len(), 2);
        assert!(!snap.participants.contains_key(&PrincipalId::from("ghost")));
        assert_eq!(snap.tally.get(&7), Some(&1));
        assert_eq!(snap.tally.len(), 1);
    }

    #[test]
    fn restore_reproduces_state() {
        let mut reg = registry_with(&["voter1", "voter2"]);
        reg.vote(&"voter2".into(), 3).unwrap();

        let restored = BallotRegistry::from_snapshot(reg.snapshot()).unwrap();
        assert_eq!(restored.administrator(), &owner());
        assert!(restored.is_registered(&"voter1".into()));
        assert!(restored.has_voted(&"voter2".into()));
        assert_eq!(restored.get_current_vote_count(3), 1);
        assert_eq!(restored.snapshot(), reg.snapshot());
    }
}
