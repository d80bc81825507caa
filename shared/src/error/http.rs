//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 409 Conflict
            Self::DuplicateId => StatusCode::CONFLICT,

            // 403 Forbidden
            Self::AccessDenied => StatusCode::FORBIDDEN,

            // 429 Too Many Requests
            Self::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,

            // 500 Internal Server Error
            Self::InternalError
            | Self::QrEncodingFailed
            | Self::MailDeliveryFailed
            | Self::ExportRenderFailed
            | Self::UploadFailed => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (intake errors)
            Self::MalformedPayload | Self::InvalidTeamComposition | Self::ProofRejected => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}
