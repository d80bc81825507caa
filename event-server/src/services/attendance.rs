//! Attendance scanning

use shared::RegistrationId;

use crate::registry::ScanOutcome;
use crate::state::AppState;

/// Redeem a scanned id; missing or unparseable ids are treated as unknown
pub async fn scan(state: &AppState, raw_id: Option<&str>) -> ScanOutcome {
    let Some(id) = raw_id.and_then(|raw| raw.parse::<RegistrationId>().ok()) else {
        tracing::info!(raw_id = ?raw_id, "Scan with unknown id");
        return ScanOutcome::NotFound;
    };

    let outcome = state.store.mark_scanned(&id);
    tracing::info!(registration_id = %id, outcome = ?outcome, "Scan processed");

    if outcome == ScanOutcome::Marked && state.config.export_on_scan {
        // Scan already committed; a failed refresh does not change the reply
        if let Err(e) = state.exporter.sync(&state.store).await {
            tracing::warn!(registration_id = %id, error = %e, "Export refresh after scan failed");
        }
    }

    outcome
}
