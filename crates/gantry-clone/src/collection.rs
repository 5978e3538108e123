//! Owned collection cloner
//!
//! Clones collection members one by one, isolating per-item failure: a
//! malformed attachment or comment is logged and skipped, and the parent
//! clone proceeds. The only escalation path is a collection the policy
//! marked mandatory whose items *all* failed.

use crate::error::CloneError;
use crate::policy::CollectionKind;
use gantry_record::{ItemId, OwnedItem};
use indexmap::IndexMap;

/// Clones owned collections with per-item failure isolation
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnedCollectionCloner;

impl OwnedCollectionCloner {
    /// Create a cloner
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Clone a keyed, insertion-ordered collection
    ///
    /// With `create_new`, every member is cloned independently through
    /// `clone_item` and collected into a fresh map keyed by the clones'
    /// new identities; a member whose clone fails is logged and skipped.
    /// Without `create_new` the entries are reused verbatim (shared, not
    /// duplicated). Insertion order is preserved either way.
    ///
    /// # Errors
    /// [`CloneError::AllChildrenFailed`] if `mandatory` is set, the source
    /// was non-empty, and no member survived.
    pub fn clone_keyed<T, E>(
        &self,
        kind: CollectionKind,
        source: &IndexMap<ItemId, T>,
        create_new: bool,
        mandatory: bool,
        clone_item: impl Fn(&T) -> Result<T, E>,
    ) -> Result<IndexMap<ItemId, T>, CloneError>
    where
        T: OwnedItem + Clone,
        E: std::fmt::Display,
    {
        if !create_new {
            return Ok(source.clone());
        }

        let mut target = IndexMap::with_capacity(source.len());
        for item in source.values() {
            match clone_item(item) {
                Ok(cloned) => {
                    target.insert(cloned.item_id(), cloned);
                }
                Err(error) => {
                    tracing::warn!(
                        collection = %kind,
                        item = %item.item_id(),
                        %error,
                        "skipping item that failed to clone"
                    );
                }
            }
        }

        if mandatory && !source.is_empty() && target.is_empty() {
            return Err(CloneError::AllChildrenFailed(kind));
        }
        Ok(target)
    }

    /// Clone an ordered sequence
    ///
    /// Same failure semantics as [`clone_keyed`](Self::clone_keyed);
    /// surviving members keep their source order.
    pub fn clone_ordered<T, E>(
        &self,
        kind: CollectionKind,
        source: &[T],
        create_new: bool,
        mandatory: bool,
        clone_item: impl Fn(&T) -> Result<T, E>,
    ) -> Result<Vec<T>, CloneError>
    where
        T: Clone,
        E: std::fmt::Display,
    {
        if !create_new {
            return Ok(source.to_vec());
        }

        let mut target = Vec::with_capacity(source.len());
        for (index, item) in source.iter().enumerate() {
            match clone_item(item) {
                Ok(cloned) => target.push(cloned),
                Err(error) => {
                    tracing::warn!(
                        collection = %kind,
                        index,
                        %error,
                        "skipping item that failed to clone"
                    );
                }
            }
        }

        if mandatory && !source.is_empty() && target.is_empty() {
            return Err(CloneError::AllChildrenFailed(kind));
        }
        Ok(target)
    }
}
