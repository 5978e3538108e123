//! Persistence service
//!
//! Generic save/load for business records. Saving assigns persisted
//! identity — recursively, since owned children are persisted with their
//! parent. Storage format and transactions are outside this crate; the
//! in-memory implementation here backs tests and embedded use.

use gantry_record::{BusinessRecord, RecordId};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Persistence failures
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// No record stored under the given identity
    #[error("record not found: {0}")]
    NotFound(RecordId),
}

/// Save/load contract for business records
#[cfg_attr(test, mockall::automock)]
pub trait PersistenceService: Send + Sync {
    /// Load a record by persisted identity
    ///
    /// # Errors
    /// [`PersistenceError::NotFound`] if nothing is stored under `id`.
    fn load(&self, id: RecordId) -> Result<BusinessRecord, PersistenceError>;

    /// Persist a record, assigning identity where unset
    ///
    /// Returns the record as persisted, with every identity filled in.
    fn save(&self, record: BusinessRecord) -> Result<BusinessRecord, PersistenceError>;
}

/// In-memory record store
#[derive(Debug, Default)]
pub struct InMemoryPersistence {
    store: RwLock<HashMap<RecordId, BusinessRecord>>,
}

impl InMemoryPersistence {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    /// Whether the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.read().is_empty()
    }
}

/// Assign identity to the record and every owned child record
///
/// Returns the root record's identity.
fn assign_ids(record: &mut BusinessRecord) -> RecordId {
    let id = record.core().id().unwrap_or_else(RecordId::new);
    record.core_mut().assign_id(id);
    match record {
        BusinessRecord::Deliverable(d) => {
            for child in &mut d.children {
                assign_ids(child);
            }
        }
        BusinessRecord::Product(p) => {
            for child in &mut p.children {
                assign_ids(child);
            }
            if let Some(plan) = p.launch_plan.as_deref_mut() {
                assign_ids(plan);
            }
        }
        BusinessRecord::Milestone(_) | BusinessRecord::Team(_) => {}
    }
    id
}

impl PersistenceService for InMemoryPersistence {
    fn load(&self, id: RecordId) -> Result<BusinessRecord, PersistenceError> {
        self.store
            .read()
            .get(&id)
            .cloned()
            .ok_or(PersistenceError::NotFound(id))
    }

    fn save(&self, mut record: BusinessRecord) -> Result<BusinessRecord, PersistenceError> {
        let id = assign_ids(&mut record);
        tracing::debug!(%id, variant = %record.kind(), "saving record");
        self.store.write().insert(id, record.clone());
        Ok(record)
    }
}
