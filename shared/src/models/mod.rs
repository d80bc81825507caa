//! Domain models

pub mod registration;

pub use registration::{
    InvalidRegistrationId, Leader, Member, Registration, RegistrationId, RegistrationPayload,
};
