//! Registration intake validation
//!
//! Single entry point that turns the raw `data` form field into a
//! [`RegistrationDraft`]. Only structure and team size are checked; email,
//! mobile and duplicate-leader checks are intentionally absent.

use shared::{Registration, RegistrationId, RegistrationPayload};
use thiserror::Error;

/// Members besides the leader (leader + 4 = team of 5)
pub const TEAM_MEMBER_COUNT: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntakeError {
    #[error("Malformed registration payload: {0}")]
    MalformedPayload(String),
    #[error("Team must have exactly 1 leader and 4 members (got {members} members)")]
    InvalidTeamComposition { members: usize },
}

/// A payload that passed intake; the only way to build a [`Registration`]
#[derive(Debug, Clone)]
pub struct RegistrationDraft {
    payload: RegistrationPayload,
}

impl RegistrationDraft {
    pub fn leader_email(&self) -> &str {
        &self.payload.leader.email
    }

    /// Attach the generated id and the stored proof reference
    pub fn into_registration(
        self,
        id: RegistrationId,
        proof_reference: Option<String>,
    ) -> Registration {
        Registration::from_payload(id, self.payload, proof_reference)
    }
}

/// Parse and validate the raw JSON payload
pub fn admit(raw: &str) -> Result<RegistrationDraft, IntakeError> {
    let payload: RegistrationPayload =
        serde_json::from_str(raw).map_err(|e| IntakeError::MalformedPayload(e.to_string()))?;
    validate(payload)
}

/// Validate an already-typed payload
pub fn validate(payload: RegistrationPayload) -> Result<RegistrationDraft, IntakeError> {
    if payload.members.len() != TEAM_MEMBER_COUNT {
        return Err(IntakeError::InvalidTeamComposition {
            members: payload.members.len(),
        });
    }
    Ok(RegistrationDraft { payload })
}
