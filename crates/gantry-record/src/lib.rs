//! Gantry Record Model
//!
//! Domain model for the multi-tenant PLM record core.
//!
//! # Core Concepts
//!
//! - [`BusinessRecord`]: tagged union over the duplicable record variants
//! - [`RecordCore`]: the field block every variant shares
//! - [`Attachment`]/[`Comment`]/[`Step`]: owned composition items whose
//!   lifetime is bound to exactly one parent record
//! - [`ScopeRef`]/[`ProjectRef`]/[`TypeRef`]: shared references, copied
//!   verbatim and never deep-cloned
//! - [`RecordId`] vs [`RecordKey`]: persisted identity vs transient
//!   in-memory graph handle

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod core;
mod id;
mod item;
mod record;
mod refs;

pub use crate::core::RecordCore;
pub use id::{ItemId, RecordId, RecordKey};
pub use item::{Attachment, Comment, ItemCloneError, Link, LinkKind, OwnedItem, Step};
pub use record::{BusinessRecord, Deliverable, Milestone, Product, Team, VariantKind};
pub use refs::{ProjectRef, ScopeRef, StatusRef, TemplateRef, TypeRef, UserRef};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
