//! GET /download?email=<admin identity>

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use shared::{AppError, AppResult};

use crate::email::XLSX_CONTENT_TYPE;
use crate::export::EXPORT_FILENAME;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    pub email: Option<String>,
}

pub async fn download(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> AppResult<Response> {
    if query.email.as_deref() != Some(state.config.admin_email.as_str()) {
        tracing::warn!(email = ?query.email, "Export download denied");
        return Err(AppError::access_denied());
    }

    let bytes = state.exporter.read_current().await.map_err(|e| {
        AppError::internal(format!("Failed to read export file: {e}"))
    })?;

    match bytes {
        None => Ok("No registrations yet".into_response()),
        Some(bytes) => Ok((
            [
                (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{EXPORT_FILENAME}\""),
                ),
            ],
            bytes,
        )
            .into_response()),
    }
}
