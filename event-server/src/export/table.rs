//! Tabular snapshot of the registration store

use serde::Serialize;
use shared::Registration;

/// Export column: header and spreadsheet width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub header: &'static str,
    pub width: f64,
}

pub const COLUMNS: [Column; 8] = [
    Column { header: "Team Name", width: 20.0 },
    Column { header: "Leader Name", width: 20.0 },
    Column { header: "Leader Email", width: 25.0 },
    Column { header: "Leader Mobile", width: 15.0 },
    Column { header: "Leader Reg No", width: 18.0 },
    Column { header: "Member Names", width: 30.0 },
    Column { header: "Transaction ID", width: 25.0 },
    Column { header: "Scanned", width: 10.0 },
];

/// One row per registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub team_name: String,
    pub leader_name: String,
    pub leader_email: String,
    pub leader_mobile: String,
    pub leader_registration_number: String,
    pub member_names: String,
    pub transaction_id: String,
    pub scanned: &'static str,
}

impl ExportRow {
    /// Cells in [`COLUMNS`] order
    pub fn cells(&self) -> [&str; 8] {
        [
            &self.team_name,
            &self.leader_name,
            &self.leader_email,
            &self.leader_mobile,
            &self.leader_registration_number,
            &self.member_names,
            &self.transaction_id,
            self.scanned,
        ]
    }
}

impl From<&Registration> for ExportRow {
    fn from(reg: &Registration) -> Self {
        Self {
            team_name: reg.team_name.clone(),
            leader_name: reg.leader.name.clone(),
            leader_email: reg.leader.email.clone(),
            leader_mobile: reg.leader.mobile.clone(),
            leader_registration_number: reg.leader.registration_number.clone(),
            member_names: reg.member_names(),
            transaction_id: reg.transaction_id.clone(),
            scanned: if reg.scanned { "Yes" } else { "No" },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportTable {
    pub rows: Vec<ExportRow>,
}

impl ExportTable {
    pub fn from_snapshot(records: &[Registration]) -> Self {
        Self {
            rows: records.iter().map(ExportRow::from).collect(),
        }
    }

    pub fn headers() -> impl Iterator<Item = &'static str> {
        COLUMNS.iter().map(|c| c.header)
    }
}
