//! Administrator spreadsheet export
//!
//! After every admitted registration the full store is snapshotted, rendered
//! to `.xlsx`, written over the export file and mailed to the admin identity.

pub mod table;
pub mod workbook;

pub use table::{COLUMNS, Column, ExportRow, ExportTable};
pub use workbook::render_xlsx;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::email::{self, MailError, Mailer};
use crate::registry::RegistrationStore;

/// Attachment / download filename
pub const EXPORT_FILENAME: &str = "Registrations.xlsx";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Export rendering failed: {0}")]
    Render(String),
    #[error("Export file could not be written: {0}")]
    Write(#[from] std::io::Error),
    #[error("Export delivery failed: {0}")]
    Delivery(#[from] MailError),
}

/// Summary of one export run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportReport {
    pub rows: usize,
    pub bytes: usize,
}

pub struct ExportSynchronizer {
    path: PathBuf,
    admin_email: String,
    mailer: Arc<dyn Mailer>,
    timeout: Duration,
    /// Serializes runs so the file on disk is always the newest snapshot
    run_lock: Mutex<()>,
}

impl ExportSynchronizer {
    pub fn new(
        path: impl Into<PathBuf>,
        admin_email: impl Into<String>,
        mailer: Arc<dyn Mailer>,
        timeout: Duration,
    ) -> Self {
        Self {
            path: path.into(),
            admin_email: admin_email.into(),
            mailer,
            timeout,
            run_lock: Mutex::new(()),
        }
    }

    /// Snapshot, render, overwrite the export file, mail it to the admin
    pub async fn sync(&self, store: &RegistrationStore) -> Result<ExportReport, ExportError> {
        let _run = self.run_lock.lock().await;

        // Snapshot under the export lock so a later run never writes older data
        let table = ExportTable::from_snapshot(&store.all_records());
        let rows = table.rows.len();

        let bytes = tokio::task::spawn_blocking(move || render_xlsx(&table))
            .await
            .map_err(|e| ExportError::Render(e.to_string()))?
            .map_err(|e| ExportError::Render(e.to_string()))?;

        self.write_file(&bytes).await?;

        let report = ExportReport {
            rows,
            bytes: bytes.len(),
        };
        let message = email::export_email(&self.admin_email, EXPORT_FILENAME, bytes);
        email::deliver(self.mailer.as_ref(), message, self.timeout).await?;

        tracing::info!(rows, bytes = report.bytes, path = %self.path.display(), "Export synchronized");
        Ok(report)
    }

    /// Current export bytes, `None` before the first registration
    pub async fn read_current(&self) -> std::io::Result<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Write to a sibling temp file, then rename over the export
    async fn write_file(&self, bytes: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await
    }
}
