//! MIME assembly with lettre's message builder

use lettre::Message;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};

use super::{MailBody, MailError, OutgoingEmail};

fn compose_err(e: impl std::fmt::Display) -> MailError {
    MailError::Compose(e.to_string())
}

/// Render `email` as RFC 5322 bytes sent from `from_address`
pub fn build_mime(email: &OutgoingEmail, from_address: &str) -> Result<Vec<u8>, MailError> {
    let from = Mailbox::new(
        Some(email.sender_name.clone()),
        from_address.parse().map_err(compose_err)?,
    );
    let to: Mailbox = email.to.parse().map_err(compose_err)?;

    let builder = Message::builder()
        .from(from)
        .to(to)
        .subject(email.subject.as_str());

    let body = match &email.body {
        MailBody::Html(html) => SinglePart::html(html.clone()),
        MailBody::Text(text) => SinglePart::plain(text.clone()),
    };

    let message = if email.attachments.is_empty() {
        builder.singlepart(body)
    } else {
        let mut parts = MultiPart::mixed().singlepart(body);
        for attachment in &email.attachments {
            let content_type = ContentType::parse(&attachment.content_type).map_err(compose_err)?;
            parts = parts.singlepart(
                Attachment::new(attachment.filename.clone())
                    .body(attachment.data.clone(), content_type),
            );
        }
        builder.multipart(parts)
    }
    .map_err(compose_err)?;

    Ok(message.formatted())
}
