//! In-memory registration store
//!
//! Records live for the lifetime of the process; a restart discards them.
//! Every operation takes the same mutex and never performs I/O while holding
//! it, so callers copy what they need and work outside the lock.

use parking_lot::Mutex;
use shared::{Registration, RegistrationId};
use std::collections::HashMap;
use thiserror::Error;

use super::attendance::{AttendanceState, ScanOutcome};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Registration {0} already exists")]
    DuplicateId(RegistrationId),
}

#[derive(Default)]
struct StoreInner {
    /// Insertion order
    records: Vec<Registration>,
    /// id -> index into `records`
    index: HashMap<RegistrationId, usize>,
}

/// Registration store, shared through `AppState`
#[derive(Default)]
pub struct RegistrationStore {
    inner: Mutex<StoreInner>,
}

impl std::fmt::Debug for RegistrationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationStore")
            .field("records", &self.len())
            .finish()
    }
}

impl RegistrationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record; an existing id is never overwritten
    pub fn insert(&self, record: Registration) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        if inner.index.contains_key(&record.id) {
            return Err(StoreError::DuplicateId(record.id));
        }
        let position = inner.records.len();
        inner.index.insert(record.id, position);
        inner.records.push(record);
        Ok(())
    }

    pub fn find_by_id(&self, id: &RegistrationId) -> Option<Registration> {
        let inner = self.inner.lock();
        inner
            .index
            .get(id)
            .map(|&position| inner.records[position].clone())
    }

    /// Registered → Scanned; unknown and already-scanned ids leave the store untouched
    pub fn mark_scanned(&self, id: &RegistrationId) -> ScanOutcome {
        let mut inner = self.inner.lock();
        let Some(&position) = inner.index.get(id) else {
            return ScanOutcome::NotFound;
        };
        let record = &mut inner.records[position];
        match AttendanceState::from_scanned(record.scanned).on_scan() {
            Some(next) => {
                record.scanned = next.is_scanned();
                ScanOutcome::Marked
            }
            None => ScanOutcome::AlreadyScanned,
        }
    }

    /// Consistent copy of every record, in insertion order
    pub fn all_records(&self) -> Vec<Registration> {
        self.inner.lock().records.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
