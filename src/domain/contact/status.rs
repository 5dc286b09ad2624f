//! Contact workflow status.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Triage status of an inbound inquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    #[default]
    Pending,
    Read,
    Responded,
}

impl ContactStatus {
    /// Parses English or Portuguese status names.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "pending" | "pendente" => Some(ContactStatus::Pending),
            "read" | "lido" => Some(ContactStatus::Read),
            "responded" | "respondido" => Some(ContactStatus::Responded),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactStatus::Pending => "pending",
            ContactStatus::Read => "read",
            ContactStatus::Responded => "responded",
        }
    }
}

impl StateMachine for ContactStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ContactStatus::*;
        matches!(
            (self, target),
            (Pending, Read) | (Pending, Responded) | (Read, Responded) | (Read, Pending)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ContactStatus::*;
        match self {
            Pending => vec![Read, Responded],
            Read => vec![Responded, Pending],
            Responded => vec![],
        }
    }
}
