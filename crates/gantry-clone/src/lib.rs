//! Gantry Clone Engine
//!
//! Policy-driven duplication of business record graphs.
//!
//! # Core Concepts
//!
//! - [`ClonePolicy`]: immutable inclusion toggles (comments, attachments,
//!   relations, children, binary content)
//! - [`ContributorRegistry`]: per-variant field-copy functions, applied
//!   ancestor-first
//! - [`OwnedCollectionCloner`]: per-item failure isolation for owned
//!   collections
//! - [`ReferenceResolver`]: explicit shared/owned/omit decision per field
//! - [`CloneCoordinator`]: the entry point — populate, validate, return
//! - [`InvariantValidator`]: fail-fast post-population consistency checks
//!
//! # Example
//!
//! ```rust
//! use gantry_clone::{CloneCoordinator, ClonePolicy};
//! use gantry_record::{BusinessRecord, Deliverable, ScopeRef};
//!
//! let mut deliverable = Deliverable::new("Spec v1");
//! deliverable.core.set_scope(ScopeRef::new("Acme"));
//! let source = BusinessRecord::from(deliverable);
//!
//! let coordinator = CloneCoordinator::new();
//! let policy = ClonePolicy::builder().include_attachments(true).build();
//! let copy = coordinator.clone_record(&source, &policy).unwrap();
//!
//! assert!(copy.core().is_new());
//! assert_eq!(copy.core().name(), "Spec v1");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod chain;
mod collection;
mod contributors;
mod coordinator;
mod error;
mod policy;
mod resolver;
mod validator;

pub use chain::{ContributorEntry, ContributorFn, ContributorId, ContributorRegistry};
pub use collection::OwnedCollectionCloner;
pub use coordinator::{CloneContext, CloneCoordinator};
pub use error::{CloneError, RegistryError};
pub use policy::{ClonePolicy, ClonePolicyBuilder, CollectionKind};
pub use resolver::{RefDisposition, ReferenceResolver};
pub use validator::{CheckFn, InvariantCheck, InvariantValidator, Violation};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
