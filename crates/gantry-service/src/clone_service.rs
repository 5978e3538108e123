//! Clone facade
//!
//! Drives a full clone operation against the collaborator services:
//! load the source, default an unset scope from the session, run the
//! clone coordinator, optionally duplicate attachment bytes, and persist
//! the result.

use crate::persistence::{PersistenceError, PersistenceService};
use crate::session::SessionService;
use crate::storage::AttachmentStorage;
use gantry_clone::{CloneCoordinator, CloneError, ClonePolicy};
use gantry_record::{BusinessRecord, RecordId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A request to clone a persisted record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloneRequest {
    /// Identity of the record to clone
    pub source_id: RecordId,
    /// Inclusion policy for the clone
    pub policy: ClonePolicy,
}

impl CloneRequest {
    /// Create a request
    #[must_use]
    pub fn new(source_id: RecordId, policy: ClonePolicy) -> Self {
        Self { source_id, policy }
    }
}

/// Facade failures
///
/// Storage failures during binary duplication are recovered locally (the
/// clone keeps pointing at the original blob) and therefore never appear
/// here.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The clone engine rejected the operation
    #[error("clone failed: {0}")]
    Clone(#[from] CloneError),

    /// Loading or saving failed
    #[error("persistence failed: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Entry point for record duplication
pub struct CloneService {
    session: Arc<dyn SessionService>,
    persistence: Arc<dyn PersistenceService>,
    storage: Arc<dyn AttachmentStorage>,
    coordinator: CloneCoordinator,
}

impl CloneService {
    /// Create a facade over the given collaborators
    #[must_use]
    pub fn new(
        session: Arc<dyn SessionService>,
        persistence: Arc<dyn PersistenceService>,
        storage: Arc<dyn AttachmentStorage>,
    ) -> Self {
        Self {
            session,
            persistence,
            storage,
            coordinator: CloneCoordinator::new(),
        }
    }

    /// Replace the clone coordinator
    #[must_use]
    pub fn with_coordinator(mut self, coordinator: CloneCoordinator) -> Self {
        self.coordinator = coordinator;
        self
    }

    /// Clone a persisted record and persist the copy
    ///
    /// The caller receives either a fully valid cloned record or exactly
    /// one actionable error.
    ///
    /// # Errors
    /// [`ServiceError::Persistence`] if the source cannot be loaded or the
    /// copy cannot be saved; [`ServiceError::Clone`] if the engine rejects
    /// the operation.
    pub fn clone_record(&self, request: &CloneRequest) -> Result<BusinessRecord, ServiceError> {
        tracing::info!(source = %request.source_id, "cloning record");
        let mut source = self.persistence.load(request.source_id)?;

        if source.core().scope().is_none() {
            let scope = self.session.current_scope();
            tracing::debug!(scope = %scope.name, "defaulting unset scope from session");
            source.core_mut().set_scope(scope);
        }

        let mut copy = self.coordinator.clone_record(&source, &request.policy)?;

        if request.policy.duplicates_binary_content() {
            duplicate_content(self.storage.as_ref(), &mut copy);
        }

        let persisted = self.persistence.save(copy)?;
        tracing::info!(
            source = %request.source_id,
            clone = ?persisted.core().id(),
            "clone persisted"
        );
        Ok(persisted)
    }
}

/// Re-point every cloned attachment at a duplicated blob
///
/// A failed copy keeps the original path: one bad blob never blocks the
/// clone.
fn duplicate_content(storage: &dyn AttachmentStorage, record: &mut BusinessRecord) {
    for attachment in record.core_mut().attachments_mut().values_mut() {
        match storage.copy_content(&attachment.content_path) {
            Ok(new_path) => attachment.content_path = new_path,
            Err(error) => {
                tracing::warn!(
                    file = %attachment.file_name,
                    %error,
                    "binary duplication failed; keeping original content path"
                );
            }
        }
    }
    match record {
        BusinessRecord::Deliverable(d) => {
            for child in &mut d.children {
                duplicate_content(storage, child);
            }
        }
        BusinessRecord::Product(p) => {
            for child in &mut p.children {
                duplicate_content(storage, child);
            }
            if let Some(plan) = p.launch_plan.as_deref_mut() {
                duplicate_content(storage, plan);
            }
        }
        BusinessRecord::Milestone(_) | BusinessRecord::Team(_) => {}
    }
}
