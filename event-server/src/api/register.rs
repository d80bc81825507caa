//! POST /register
//!
//! Multipart form: `data` carries the JSON payload, `screenshot` the
//! optional payment proof file.

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use shared::{AppError, AppResult, ErrorCode, MessageResponse};

use crate::services::registration;
use crate::state::AppState;
use crate::uploads::ProofUpload;

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::with_message(ErrorCode::ProofRejected, "File too large")
    } else {
        AppError::with_message(
            ErrorCode::MalformedPayload,
            format!("Invalid multipart request: {e}"),
        )
    }
}

pub async fn register(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<MessageResponse> {
    let mut data: Option<String> = None;
    let mut proof: Option<ProofUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("data") => {
                data = Some(field.text().await.map_err(multipart_error)?);
            }
            Some("screenshot") => {
                let original_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                proof = Some(ProofUpload {
                    original_name,
                    data: bytes.to_vec(),
                });
            }
            // Unknown fields are ignored
            _ => {}
        }
    }

    registration::register(&state, data.as_deref(), proof).await?;
    Ok(MessageResponse::new("Registration successful"))
}
