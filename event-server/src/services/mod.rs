//! Request workflows, independent of the HTTP layer

pub mod attendance;
pub mod registration;

pub use registration::RegistrationError;
