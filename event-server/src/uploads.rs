//! Payment proof storage
//!
//! Proof files arrive as the optional `screenshot` multipart field and are
//! written under the upload directory, which is also served at `/uploads`.

use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

/// Accepted proof file extensions
pub const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp", "pdf"];

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("{0}")]
    Rejected(String),
    #[error("Failed to store proof file: {0}")]
    Io(#[from] std::io::Error),
}

/// Proof file received with a registration, not yet stored
#[derive(Debug, Clone)]
pub struct ProofUpload {
    pub original_name: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct ProofStorage {
    dir: PathBuf,
    max_bytes: usize,
}

impl ProofStorage {
    pub fn new(dir: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            dir: dir.into(),
            max_bytes,
        }
    }

    /// Check size and extension, returning the normalized extension
    pub fn check(&self, upload: &ProofUpload) -> Result<String, UploadError> {
        if upload.data.len() > self.max_bytes {
            return Err(UploadError::Rejected(format!(
                "File too large. Maximum size is {} bytes ({}MB)",
                self.max_bytes,
                self.max_bytes / 1024 / 1024
            )));
        }

        let ext = Path::new(&upload.original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .ok_or_else(|| {
                UploadError::Rejected(format!(
                    "Invalid file extension for: {}",
                    upload.original_name
                ))
            })?;

        if !SUPPORTED_FORMATS.contains(&ext.as_str()) {
            return Err(UploadError::Rejected(format!(
                "Unsupported file format '{}'. Supported: {}",
                ext,
                SUPPORTED_FORMATS.join(", ")
            )));
        }
        Ok(ext)
    }

    /// Store the file and return its reference (the stored file name)
    pub async fn save(&self, upload: &ProofUpload) -> Result<String, UploadError> {
        let ext = self.check(upload)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        let filename = stored_name(&ext);
        tokio::fs::write(self.dir.join(&filename), &upload.data).await?;

        tracing::info!(
            original_name = %upload.original_name,
            stored_as = %filename,
            size = upload.data.len(),
            "Proof file stored"
        );
        Ok(filename)
    }
}

/// `<millis>-<8 hex>.<ext>`
fn stored_name(ext: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}.{}", millis, &suffix[..8], ext)
}
