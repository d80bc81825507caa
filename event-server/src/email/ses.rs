use async_trait::async_trait;
use aws_sdk_sesv2::Client as SesClient;
use aws_sdk_sesv2::primitives::Blob;
use aws_sdk_sesv2::types::{Destination, EmailContent, RawMessage};

use super::{MailError, Mailer, OutgoingEmail, build_mime};

/// AWS SES v2 backend; messages go out as raw MIME so attachments survive
#[derive(Clone)]
pub struct SesMailer {
    ses: SesClient,
    from: String,
}

impl SesMailer {
    pub fn new(ses: SesClient, from: impl Into<String>) -> Self {
        Self {
            ses,
            from: from.into(),
        }
    }

    /// Build a client from the default AWS config chain, honouring `SES_REGION`
    pub async fn from_env(from: impl Into<String>) -> Self {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let ses = if let Ok(ses_region) = std::env::var("SES_REGION") {
            let ses_config = aws_config
                .to_builder()
                .region(aws_config::Region::new(ses_region))
                .build();
            SesClient::new(&ses_config)
        } else {
            SesClient::new(&aws_config)
        };
        Self::new(ses, from)
    }
}

#[async_trait]
impl Mailer for SesMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        let raw = build_mime(&email, &self.from)?;
        let raw_message = RawMessage::builder()
            .data(Blob::new(raw))
            .build()
            .map_err(|e| MailError::Compose(e.to_string()))?;

        self.ses
            .send_email()
            .from_email_address(&self.from)
            .destination(Destination::builder().to_addresses(&email.to).build())
            .content(EmailContent::builder().raw(raw_message).build())
            .send()
            .await
            .map_err(|e| MailError::Transport(e.into()))?;

        tracing::info!(to = %email.to, subject = %email.subject, "Email sent via SES");
        Ok(())
    }
}
