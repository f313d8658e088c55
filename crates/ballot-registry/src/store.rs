//! Shared handle for concurrent callers.
//!
//! Mutations hold the write lock across the precondition check and the write,
//! so no caller observes or acts on intermediate state. Queries take the read
//! lock and see a consistent view.

use crate::error::RegistryError;
use crate::registry::BallotRegistry;
use crate::snapshot::RegistrySnapshot;
use crate::types::{CandidateId, PrincipalId};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Caller-facing operation surface of the registry.
pub trait BallotStore: Send + Sync {
    fn register_voter(&self, caller: &PrincipalId, target: &PrincipalId)
        -> Result<(), RegistryError>;
    fn vote(&self, caller: &PrincipalId, candidate: CandidateId) -> Result<(), RegistryError>;
    fn is_registered(&self, who: &PrincipalId) -> bool;
    fn get_current_vote_count(&self, candidate: CandidateId) -> u64;
    fn snapshot(&self) -> RegistrySnapshot;
}

#[derive(Clone, Debug)]
pub struct SharedBallotRegistry {
    inner: Arc<RwLock<BallotRegistry>>,
}

impl SharedBallotRegistry {
    pub fn new(registry: BallotRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    pub fn initialize(creator: PrincipalId) -> Self {
        Self::new(BallotRegistry::initialize(creator))
    }

    // Writes check every precondition before mutating, so a poisoned lock
    // still guards consistent state.
    fn read(&self) -> RwLockReadGuard<'_, BallotRegistry> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BallotRegistry> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run a read-only query against a consistent view.
    pub fn with_registry<R>(&self, f: impl FnOnce(&BallotRegistry) -> R) -> R {
        f(&self.read())
    }
}

impl BallotStore for SharedBallotRegistry {
    fn register_voter(
        &self,
        caller: &PrincipalId,
        target: &PrincipalId,
    ) -> Result<(), RegistryError> {
        self.write().register_voter(caller, target)
    }

    fn vote(&self, caller: &PrincipalId, candidate: CandidateId) -> Result<(), RegistryError> {
        self.write().vote(caller, candidate)
    }

    fn is_registered(&self, who: &PrincipalId) -> bool {
        self.read().is_registered(who)
    }

    fn get_current_vote_count(&self, candidate: CandidateId) -> u64 {
        self.read().get_current_vote_count(candidate)
    }

    fn snapshot(&self) -> RegistrySnapshot {
        self.read().snapshot()
    }
}
