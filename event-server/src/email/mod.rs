//! Outbound mail
//!
//! Messages are composed here and handed to a [`Mailer`] backend:
//! [`SesMailer`] in deployed environments, [`LogMailer`] in development.

mod log;
mod mime;
mod ses;

pub use log::LogMailer;
pub use mime::build_mime;
pub use ses::SesMailer;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// MIME type of the spreadsheet export
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Invalid message: {0}")]
    Compose(String),
    #[error("Mail transport error: {0}")]
    Transport(BoxError),
    #[error("Mail delivery timed out after {0:?}")]
    Timeout(Duration),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailBody {
    Html(String),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailAttachment {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// A fully composed message, backend-agnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    /// Display name placed in front of the configured sender address
    pub sender_name: String,
    pub to: String,
    pub subject: String,
    pub body: MailBody,
    pub attachments: Vec<MailAttachment>,
}

/// Mail delivery backend
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError>;
}

/// Send through `mailer`, treating expiry of `timeout` as a delivery failure
pub async fn deliver(
    mailer: &dyn Mailer,
    email: OutgoingEmail,
    timeout: Duration,
) -> Result<(), MailError> {
    match tokio::time::timeout(timeout, mailer.send(email)).await {
        Ok(result) => result,
        Err(_) => Err(MailError::Timeout(timeout)),
    }
}

/// QR code mail for the team leader
pub fn qr_code_email(to: &str, qr_data_uri: &str, scan_url: &str, qr_png: Vec<u8>) -> OutgoingEmail {
    let html = format!(
        "<p>Thank you for registering.</p>\n\
         <p>Please show this QR code at the event.</p>\n\
         <img src=\"{qr_data_uri}\" alt=\"Event QR code\" /><br><br>\n\
         <a href=\"{scan_url}\">{scan_url}</a>\n"
    );

    OutgoingEmail {
        sender_name: "Event Team".into(),
        to: to.into(),
        subject: "Your Event QR Code".into(),
        body: MailBody::Html(html),
        attachments: vec![MailAttachment {
            filename: "event-qr.png".into(),
            content_type: "image/png".into(),
            data: qr_png,
        }],
    }
}

/// Spreadsheet export mail for the administrator
pub fn export_email(to: &str, filename: &str, workbook: Vec<u8>) -> OutgoingEmail {
    OutgoingEmail {
        sender_name: "Event Admin".into(),
        to: to.into(),
        subject: "Updated Registrations Excel".into(),
        body: MailBody::Text("Latest participant registrations are attached.".into()),
        attachments: vec![MailAttachment {
            filename: filename.into(),
            content_type: XLSX_CONTENT_TYPE.into(),
            data: workbook,
        }],
    }
}
