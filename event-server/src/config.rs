//! Event server configuration

use std::path::PathBuf;
use std::time::Duration;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Default proof upload limit (5MB)
const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Outbound mail backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailBackend {
    /// AWS SES v2 (raw MIME messages)
    Ses,
    /// Log messages instead of sending them (development)
    Log,
}

impl MailBackend {
    fn parse(value: &str) -> Result<Self, BoxError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ses" => Ok(Self::Ses),
            "log" => Ok(Self::Log),
            other => Err(format!("Unknown MAIL_BACKEND: {other} (expected ses | log)").into()),
        }
    }
}

/// Event server configuration
///
/// | Variable | Default |
/// |----------|---------|
/// | ENVIRONMENT | development |
/// | HTTP_PORT | 3000 |
/// | PUBLIC_BASE_URL | http://localhost:3000 |
/// | ADMIN_EMAIL | required outside development |
/// | MAIL_FROM | noreply@localhost |
/// | MAIL_BACKEND | log (development) / ses |
/// | EXPORT_PATH | Registrations.xlsx |
/// | UPLOAD_DIR | uploads |
/// | MAX_UPLOAD_BYTES | 5242880 |
/// | DELIVERY_TIMEOUT_SECS | 30 |
/// | EXPORT_ON_SCAN | false |
/// | REGISTER_RATE_LIMIT | 10 |
/// | LOG_LEVEL | unset (RUST_LOG / built-in filter) |
/// | LOG_DIR | unset |
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment: development | staging | production
    pub environment: String,
    /// HTTP port
    pub http_port: u16,
    /// Public base URL embedded in scan links
    pub public_base_url: String,
    /// The single administrator identity (receives exports, may download)
    pub admin_email: String,
    /// Sender address for all outbound mail
    pub mail_from: String,
    pub mail_backend: MailBackend,
    /// Spreadsheet export file, overwritten on every registration
    pub export_path: PathBuf,
    /// Directory for uploaded payment proofs
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    /// Upper bound for each outbound delivery
    pub delivery_timeout: Duration,
    /// Also refresh the export after a successful scan
    pub export_on_scan: bool,
    /// Registrations per minute per client IP (0 disables)
    pub register_rate_limit: u32,
    pub log_level: Option<String>,
    pub log_dir: Option<String>,
}

impl Config {
    /// Require a variable outside development; fall back to `dev_default` in development.
    fn require(name: &str, environment: &str, dev_default: &str) -> Result<String, BoxError> {
        match std::env::var(name) {
            Ok(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
            _ if environment == "development" => Ok(dev_default.to_string()),
            Ok(_) => Err(format!("{name} must not be empty in {environment} environment").into()),
            Err(_) => Err(format!("{name} must be set in {environment} environment").into()),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let mail_backend = match std::env::var("MAIL_BACKEND") {
            Ok(v) => MailBackend::parse(&v)?,
            Err(_) if environment == "development" => MailBackend::Log,
            Err(_) => MailBackend::Ses,
        };

        Ok(Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            admin_email: Self::require("ADMIN_EMAIL", &environment, "admin@localhost")?,
            mail_from: std::env::var("MAIL_FROM").unwrap_or_else(|_| "noreply@localhost".into()),
            mail_backend,
            export_path: std::env::var("EXPORT_PATH")
                .unwrap_or_else(|_| "Registrations.xlsx".into())
                .into(),
            upload_dir: std::env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "uploads".into())
                .into(),
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            delivery_timeout: Duration::from_secs(
                std::env::var("DELIVERY_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(30),
            ),
            export_on_scan: std::env::var("EXPORT_ON_SCAN")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            register_rate_limit: std::env::var("REGISTER_RATE_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            log_level: std::env::var("LOG_LEVEL").ok().filter(|s| !s.is_empty()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            environment,
        })
    }

    /// Development configuration rooted at `work_dir`
    ///
    /// Used by tests; does not read the environment.
    pub fn for_work_dir(work_dir: impl Into<PathBuf>) -> Self {
        let work_dir = work_dir.into();
        Self {
            environment: "development".into(),
            http_port: 3000,
            public_base_url: "http://localhost:3000".into(),
            admin_email: "admin@example.com".into(),
            mail_from: "noreply@example.com".into(),
            mail_backend: MailBackend::Log,
            export_path: work_dir.join("Registrations.xlsx"),
            upload_dir: work_dir.join("uploads"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            delivery_timeout: Duration::from_secs(5),
            export_on_scan: false,
            register_rate_limit: 0,
            log_level: None,
            log_dir: None,
        }
    }
}
