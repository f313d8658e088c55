use serde::{Deserialize, Serialize};
use std::fmt;

/// Externally defined tally bucket. Not validated against any candidate list.
pub type CandidateId = u64;

/// Opaque, already-authenticated caller identity.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(String);

impl PrincipalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PrincipalId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PrincipalId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Per-participant bookkeeping. Unseen identities read as the default
/// (unregistered, not voted).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    pub registered: bool,
    pub has_voted: bool,
}

impl ParticipantRecord {
    pub fn status(&self) -> ParticipantStatus {
        match (self.registered, self.has_voted) {
            (false, _) => ParticipantStatus::Unregistered,
            (true, false) => ParticipantStatus::Registered,
            (true, true) => ParticipantStatus::Voted,
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Participant lifecycle: `Unregistered -> Registered -> Voted`.
/// `Voted` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticipantStatus {
    Unregistered,
    Registered,
    Voted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_is_unregistered() {
        let rec = ParticipantRecord::default();
        assert_eq!(rec.status(), ParticipantStatus::Unregistered);
        assert!(rec.is_default());
    }

    #[test]
    fn status_follows_flags() {
        let registered = ParticipantRecord {
            registered: true,
            has_voted: false,
        };
        let voted = ParticipantRecord {
            registered: true,
            has_voted: true,
        };
        assert_eq!(registered.status(), ParticipantStatus::Registered);
        assert_eq!(voted.status(), ParticipantStatus::Voted);
    }

    #[test]
    fn principal_serializes_as_plain_string() {
        let id = PrincipalId::from("voter-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"voter-1\"");
        assert_eq!(id.to_string(), "voter-1");
    }

    #[test]
    fn blank_principal_is_empty() {
        assert!(PrincipalId::from("   ").is_empty());
        assert!(!PrincipalId::from("owner").is_empty());
    }
}
