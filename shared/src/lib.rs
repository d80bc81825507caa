//! Shared types for the event registration service
//!
//! Domain models and the unified error system used by the HTTP server
//! and its tests.

pub mod error;
pub mod models;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode, MessageResponse};
pub use models::{
    InvalidRegistrationId, Leader, Member, Registration, RegistrationId, RegistrationPayload,
};
