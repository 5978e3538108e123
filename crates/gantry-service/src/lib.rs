//! Gantry Services
//!
//! Collaborator contracts around the clone engine — session scope
//! resolution, persistence, attachment content storage — plus the
//! [`CloneService`] facade that drives a full clone operation.

#![warn(unreachable_pub)]

mod clone_service;
mod persistence;
mod session;
mod storage;

pub use clone_service::{CloneRequest, CloneService, ServiceError};
pub use persistence::{InMemoryPersistence, PersistenceError, PersistenceService};
pub use session::{FixedSession, SessionService};
pub use storage::{
    AttachmentStorage, FsAttachmentStorage, InMemoryAttachmentStorage, StorageError,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
