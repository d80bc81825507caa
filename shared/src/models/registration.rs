//! Registration Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Opaque registration identifier (UUID v4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrationId(Uuid);

impl RegistrationId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Text that is not an identifier this service issued
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a registration id: {0:?}")]
pub struct InvalidRegistrationId(pub String);

impl FromStr for RegistrationId {
    type Err = InvalidRegistrationId;

    /// Accepts only the lowercase hyphenated form embedded in scan links.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::try_parse(s)
            .ok()
            .map(Self)
            .filter(|id| id.to_string() == s)
            .ok_or_else(|| InvalidRegistrationId(s.to_string()))
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Team leader contact details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leader {
    pub name: String,
    pub email: String,
    #[serde(deserialize_with = "string_or_number")]
    pub mobile: String,
    /// College / university registration number
    #[serde(rename = "reg", deserialize_with = "string_or_number")]
    pub registration_number: String,
    /// Any further fields the form sent, kept as submitted
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Team member; fields other than `name` are kept as submitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Registration form payload (the `data` part of `POST /register`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationPayload {
    #[serde(rename = "team")]
    pub team_name: String,
    pub leader: Leader,
    pub members: Vec<Member>,
    /// Payment transaction reference, never verified
    #[serde(rename = "txn", deserialize_with = "string_or_number")]
    pub transaction_id: String,
}

/// An admitted team registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub id: RegistrationId,
    pub team_name: String,
    pub leader: Leader,
    pub members: Vec<Member>,
    pub transaction_id: String,
    /// Stored filename of the uploaded payment proof
    pub proof_reference: Option<String>,
    pub scanned: bool,
    pub registered_at: DateTime<Utc>,
}

impl Registration {
    /// Build an unscanned registration from a validated payload
    pub fn from_payload(
        id: RegistrationId,
        payload: RegistrationPayload,
        proof_reference: Option<String>,
    ) -> Self {
        Self {
            id,
            team_name: payload.team_name,
            leader: payload.leader,
            members: payload.members,
            transaction_id: payload.transaction_id,
            proof_reference,
            scanned: false,
            registered_at: Utc::now(),
        }
    }

    /// Member names joined for display, e.g. `"Ann, Bob, Cy, Dee"`
    pub fn member_names(&self) -> String {
        self.members
            .iter()
            .map(|m| m.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Form builders often send phone numbers and ids as JSON numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Num(n) => n.to_string(),
    })
}
