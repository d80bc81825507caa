//! Attendance state machine
//!
//! ```text
//! Registered ──scan──▶ Scanned ──scan──▶ (rejected, stays Scanned)
//! ```

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceState {
    Registered,
    Scanned,
}

impl AttendanceState {
    pub fn from_scanned(scanned: bool) -> Self {
        if scanned { Self::Scanned } else { Self::Registered }
    }

    pub fn is_scanned(self) -> bool {
        matches!(self, Self::Scanned)
    }

    /// Apply a scan. `None` means the transition is not allowed.
    pub fn on_scan(self) -> Option<Self> {
        match self {
            Self::Registered => Some(Self::Scanned),
            Self::Scanned => None,
        }
    }
}

/// Result of redeeming a scan code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanOutcome {
    /// First valid scan; the registration is now scanned
    Marked,
    /// The registration was scanned before; nothing changed
    AlreadyScanned,
    /// No registration carries this identifier
    NotFound,
}

impl ScanOutcome {
    /// Plain-text message returned by `GET /scan`
    pub fn message(self) -> &'static str {
        match self {
            Self::Marked => "Attendance marked successfully",
            Self::AlreadyScanned => "Already scanned",
            Self::NotFound => "Invalid QR code",
        }
    }
}
