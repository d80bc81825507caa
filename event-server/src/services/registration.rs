//! Registration workflow
//!
//! admit → proof check → id + QR → store proof → insert → leader mail → export.
//! Everything that can be rejected is checked before the store insert; failures
//! after the insert surface as 500 while the record stays stored.

use shared::{AppError, ErrorCode, RegistrationId};
use thiserror::Error;

use crate::email::{self, MailError};
use crate::export::ExportError;
use crate::intake::{self, IntakeError};
use crate::registry::StoreError;
use crate::state::AppState;
use crate::token::{self, QrToken, TokenError};
use crate::uploads::{ProofUpload, UploadError};

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Leader email delivery failed: {0}")]
    Mail(#[from] MailError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl From<RegistrationError> for AppError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::Intake(IntakeError::MalformedPayload(detail)) => {
                AppError::with_message(
                    ErrorCode::MalformedPayload,
                    format!("Malformed registration payload: {detail}"),
                )
            }
            RegistrationError::Intake(IntakeError::InvalidTeamComposition { .. }) => {
                AppError::new(ErrorCode::InvalidTeamComposition)
            }
            RegistrationError::Upload(UploadError::Rejected(reason)) => {
                AppError::with_message(ErrorCode::ProofRejected, reason)
            }
            RegistrationError::Upload(UploadError::Io(_)) => AppError::new(ErrorCode::UploadFailed),
            RegistrationError::Token(_) => AppError::new(ErrorCode::QrEncodingFailed),
            RegistrationError::Store(StoreError::DuplicateId(_)) => {
                AppError::new(ErrorCode::DuplicateId)
            }
            RegistrationError::Mail(_) | RegistrationError::Export(ExportError::Delivery(_)) => {
                AppError::new(ErrorCode::MailDeliveryFailed)
            }
            RegistrationError::Export(_) => AppError::new(ErrorCode::ExportRenderFailed),
        }
    }
}

/// Run one registration end to end, returning the new id
pub async fn register(
    state: &AppState,
    raw_payload: Option<&str>,
    proof: Option<ProofUpload>,
) -> Result<RegistrationId, RegistrationError> {
    let raw_payload = raw_payload.ok_or_else(|| {
        IntakeError::MalformedPayload("missing `data` field".to_string())
    })?;
    let draft = intake::admit(raw_payload)?;

    // Empty file parts count as no upload
    let proof = proof.filter(|p| !p.data.is_empty());
    if let Some(proof) = &proof {
        state.proofs.check(proof)?;
    }

    let id = RegistrationId::generate();
    let qr = QrToken::encode(token::scan_url(&state.config.public_base_url, &id))?;

    let proof_reference = match &proof {
        Some(proof) => Some(state.proofs.save(proof).await?),
        None => None,
    };

    let leader_email = draft.leader_email().to_string();
    let registration = draft.into_registration(id, proof_reference);
    let team_name = registration.team_name.clone();
    state.store.insert(registration)?;

    tracing::info!(
        registration_id = %id,
        team = %team_name,
        total = state.store.len(),
        "Registration stored"
    );

    let message = email::qr_code_email(&leader_email, &qr.data_uri(), &qr.scan_url, qr.png);
    if let Err(e) = email::deliver(state.mailer.as_ref(), message, state.config.delivery_timeout).await
    {
        tracing::error!(registration_id = %id, error = %e, "Leader email failed; registration kept");
        return Err(e.into());
    }

    if let Err(e) = state.exporter.sync(&state.store).await {
        tracing::error!(registration_id = %id, error = %e, "Export sync failed; registration kept");
        return Err(e.into());
    }

    Ok(id)
}
