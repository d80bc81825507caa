//! Unified error codes for the event registration service
//!
//! Error codes are organized by category:
//! - 1xxx: Registration intake errors
//! - 3xxx: Access errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so they serialize
/// compactly and can be matched by non-Rust clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 1xxx: Registration ====================
    /// Registration payload could not be parsed against the schema
    MalformedPayload = 1001,
    /// Team does not consist of a leader plus exactly four members
    InvalidTeamComposition = 1002,
    /// Uploaded payment proof was rejected (size, format)
    ProofRejected = 1003,
    /// Registration identifier already present in the store
    DuplicateId = 1004,

    // ==================== 3xxx: Access ====================
    /// Caller is not the administrator identity
    AccessDenied = 3001,
    /// Too many requests from the same client
    TooManyRequests = 3002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// QR code could not be encoded
    QrEncodingFailed = 9101,
    /// Outbound mail could not be delivered
    MailDeliveryFailed = 9102,
    /// Spreadsheet export could not be rendered or written
    ExportRenderFailed = 9103,
    /// Uploaded file could not be stored
    UploadFailed = 9104,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default user-facing message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // Registration
            ErrorCode::MalformedPayload => "Malformed registration payload",
            ErrorCode::InvalidTeamComposition => "Team must have exactly 1 leader and 4 members",
            ErrorCode::ProofRejected => "Payment proof rejected",
            ErrorCode::DuplicateId => "Registration identifier already exists",

            // Access
            ErrorCode::AccessDenied => "Access denied",
            ErrorCode::TooManyRequests => "Too many requests, try again later",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::QrEncodingFailed => "Registration failed: QR code could not be generated",
            ErrorCode::MailDeliveryFailed => "Registration failed: email could not be delivered",
            ErrorCode::ExportRenderFailed => "Registration failed: export could not be generated",
            ErrorCode::UploadFailed => "Registration failed: payment proof could not be stored",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            1001 => Ok(ErrorCode::MalformedPayload),
            1002 => Ok(ErrorCode::InvalidTeamComposition),
            1003 => Ok(ErrorCode::ProofRejected),
            1004 => Ok(ErrorCode::DuplicateId),
            3001 => Ok(ErrorCode::AccessDenied),
            3002 => Ok(ErrorCode::TooManyRequests),
            9001 => Ok(ErrorCode::InternalError),
            9101 => Ok(ErrorCode::QrEncodingFailed),
            9102 => Ok(ErrorCode::MailDeliveryFailed),
            9103 => Ok(ErrorCode::ExportRenderFailed),
            9104 => Ok(ErrorCode::UploadFailed),
            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::MalformedPayload.code(), 1001);
        assert_eq!(ErrorCode::InvalidTeamComposition.code(), 1002);
        assert_eq!(ErrorCode::AccessDenied.code(), 3001);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
        assert_eq!(ErrorCode::MailDeliveryFailed.code(), 9102);
    }

    #[test]
    fn test_try_from_roundtrips_every_code() {
        let all = [
            ErrorCode::MalformedPayload,
            ErrorCode::InvalidTeamComposition,
            ErrorCode::ProofRejected,
            ErrorCode::DuplicateId,
            ErrorCode::AccessDenied,
            ErrorCode::TooManyRequests,
            ErrorCode::InternalError,
            ErrorCode::QrEncodingFailed,
            ErrorCode::MailDeliveryFailed,
            ErrorCode::ExportRenderFailed,
            ErrorCode::UploadFailed,
        ];
        for code in all {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
        assert_eq!(ErrorCode::try_from(0), Err(InvalidErrorCode(0)));
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::AccessDenied).unwrap();
        assert_eq!(json, "3001");
        let code: ErrorCode = serde_json::from_str("1002").unwrap();
        assert_eq!(code, ErrorCode::InvalidTeamComposition);
    }

    #[test]
    fn test_access_denied_wording() {
        assert_eq!(ErrorCode::AccessDenied.message(), "Access denied");
    }
}
