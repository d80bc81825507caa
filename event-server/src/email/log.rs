use async_trait::async_trait;

use super::{MailError, Mailer, OutgoingEmail, build_mime};

/// Development backend: composes the message, logs it, sends nothing
#[derive(Debug, Clone)]
pub struct LogMailer {
    from: String,
}

impl LogMailer {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        // Compose anyway so address errors surface in development too
        let raw = build_mime(&email, &self.from)?;
        let attachments: Vec<&str> = email
            .attachments
            .iter()
            .map(|a| a.filename.as_str())
            .collect();

        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            ?attachments,
            bytes = raw.len(),
            "Email not sent (log backend)"
        );
        Ok(())
    }
}
