//! Application state for event-server

use std::sync::Arc;

use crate::config::{Config, MailBackend};
use crate::email::{LogMailer, Mailer, SesMailer};
use crate::export::ExportSynchronizer;
use crate::rate_limit::RateLimiter;
use crate::registry::RegistrationStore;
use crate::uploads::ProofStorage;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// All registrations for the process lifetime
    pub store: Arc<RegistrationStore>,
    /// Outbound mail backend (leader QR mail)
    pub mailer: Arc<dyn Mailer>,
    /// Spreadsheet export + admin mail
    pub exporter: Arc<ExportSynchronizer>,
    /// Payment proof files
    pub proofs: ProofStorage,
    /// Rate limiter for the registration route
    pub rate_limiter: RateLimiter,
}

impl AppState {
    /// Build state with the mail backend selected by `MAIL_BACKEND`
    pub async fn new(config: Config) -> Self {
        let mailer: Arc<dyn Mailer> = match config.mail_backend {
            MailBackend::Ses => Arc::new(SesMailer::from_env(&config.mail_from).await),
            MailBackend::Log => Arc::new(LogMailer::new(&config.mail_from)),
        };
        tracing::info!(backend = ?config.mail_backend, from = %config.mail_from, "Mail backend ready");
        Self::with_mailer(config, mailer)
    }

    /// Build state around an explicit mailer
    pub fn with_mailer(config: Config, mailer: Arc<dyn Mailer>) -> Self {
        let exporter = ExportSynchronizer::new(
            config.export_path.clone(),
            config.admin_email.clone(),
            mailer.clone(),
            config.delivery_timeout,
        );
        let proofs = ProofStorage::new(config.upload_dir.clone(), config.max_upload_bytes);
        let rate_limiter = RateLimiter::per_minute(config.register_rate_limit);

        Self {
            config: Arc::new(config),
            store: Arc::new(RegistrationStore::new()),
            mailer,
            exporter: Arc::new(exporter),
            proofs,
            rate_limiter,
        }
    }
}
