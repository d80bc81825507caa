//! Registration registry: the in-memory store and the attendance transition

pub mod attendance;
pub mod store;

pub use attendance::{AttendanceState, ScanOutcome};
pub use store::{RegistrationStore, StoreError};
