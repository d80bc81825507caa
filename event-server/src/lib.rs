//! Event registration server
//!
//! Teams register through a multipart form, the leader receives a QR code
//! that encodes a scan link, scans mark attendance, and the administrator
//! receives an updated spreadsheet after every registration.
//!
//! ```text
//! event-server/src/
//! ├── api/        # HTTP routes and handlers
//! ├── services/   # registration and attendance workflows
//! ├── registry/   # in-memory store, attendance transition
//! ├── export/     # spreadsheet table, xlsx rendering, admin sync
//! ├── email/      # Mailer trait, SES and log backends, MIME assembly
//! ├── intake.rs   # payload validation
//! ├── token.rs    # scan URL + QR PNG
//! └── uploads.rs  # payment proof storage
//! ```

pub mod api;
pub mod config;
pub mod email;
pub mod export;
pub mod intake;
pub mod logger;
pub mod rate_limit;
pub mod registry;
pub mod services;
pub mod state;
pub mod token;
pub mod uploads;

pub use api::create_router;
pub use config::{Config, MailBackend};
pub use logger::init_logger;
pub use registry::{RegistrationStore, ScanOutcome};
pub use state::AppState;
