//! Reference resolver
//!
//! Decides, per field, whether a reference is copied verbatim (shared),
//! deep-cloned through the coordinator (owned composition), or left unset.
//! The disposition is declared explicitly by each variant's contributor —
//! never inferred structurally, because some single-valued references
//! (a deliverable's template, say) are semantically shared despite looking
//! like composition.

use crate::coordinator::CloneContext;
use gantry_record::BusinessRecord;

/// Per-field reference disposition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefDisposition {
    /// Copy the reference verbatim; identity preserved in the new graph
    Shared,
    /// Deep-clone by recursing into the coordinator
    Owned,
    /// Leave the target's default value
    Omit,
}

/// Resolves single-valued reference fields during contribution
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceResolver;

impl ReferenceResolver {
    /// Create a resolver
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Copy a shared reference verbatim
    #[must_use]
    pub fn shared<T: Clone>(&self, field: &'static str, value: Option<&T>) -> Option<T> {
        tracing::trace!(field, "copying shared reference");
        value.cloned()
    }

    /// Leave a reference unset on the target
    #[must_use]
    pub fn omit<T>(&self, field: &'static str) -> Option<T> {
        tracing::trace!(field, "omitting reference");
        None
    }

    /// Deep-clone an owned single composition
    ///
    /// Recurses into the coordinator. A failed child clone is logged and
    /// resolved to `None` — the same isolation owned collections get.
    #[must_use]
    pub fn owned_record(
        &self,
        ctx: &CloneContext<'_>,
        field: &'static str,
        value: Option<&BusinessRecord>,
    ) -> Option<Box<BusinessRecord>> {
        let child = value?;
        match ctx.clone_child(child) {
            Ok(cloned) => Some(Box::new(cloned)),
            Err(error) => {
                tracing::warn!(field, %error, "skipping owned composition that failed to clone");
                None
            }
        }
    }
}
