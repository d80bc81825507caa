//! GET /scan?id=<registration id>

use axum::extract::{Query, State};
use serde::Deserialize;

use crate::services::attendance;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScanQuery {
    pub id: Option<String>,
}

/// Always 200; the body tells the scanner what happened
pub async fn scan(State(state): State<AppState>, Query(query): Query<ScanQuery>) -> &'static str {
    attendance::scan(&state, query.id.as_deref()).await.message()
}
