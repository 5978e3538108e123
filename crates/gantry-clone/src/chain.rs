//! Contributor chain
//!
//! Each record variant registers a contribution function responsible only
//! for the fields introduced at its own level. The registry maps a
//! contributor to its parent level; invoking a chain walks parent links
//! leaf-to-root, then applies the contributions root-first. This replaces
//! inheritance-based "call super, then extend" with explicit data.
//!
//! # Contract
//! Contribution functions must be idempotent under repeated application
//! and must only mutate the target, never the source.

use crate::coordinator::CloneContext;
use crate::error::{CloneError, RegistryError};
use gantry_record::{BusinessRecord, VariantKind};
use std::collections::{HashMap, HashSet};

/// Identifier of one level in a contributor chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContributorId {
    /// Fields every record shares (name, scope, common collections)
    Base,
    /// Fields of project-bound records (project, type, nested children)
    ProjectScoped,
    /// Variant-specific fields
    Leaf(VariantKind),
}

impl std::fmt::Display for ContributorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Base => f.write_str("base"),
            Self::ProjectScoped => f.write_str("project-scoped"),
            Self::Leaf(kind) => write!(f, "leaf:{kind}"),
        }
    }
}

/// A contribution function
///
/// Copies the fields introduced at one level from `source` into `target`,
/// honoring the policy carried by the context.
pub type ContributorFn = Box<
    dyn Fn(&CloneContext<'_>, &BusinessRecord, &mut BusinessRecord) -> Result<(), CloneError>
        + Send
        + Sync,
>;

/// Registry entry: a contribution function and its parent level
pub struct ContributorEntry {
    parent: Option<ContributorId>,
    apply: ContributorFn,
}

impl ContributorEntry {
    /// Create an entry
    #[must_use]
    pub fn new(parent: Option<ContributorId>, apply: ContributorFn) -> Self {
        Self { parent, apply }
    }

    /// Parent level, if any
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<ContributorId> {
        self.parent
    }

    /// Run the contribution function
    pub fn apply(
        &self,
        ctx: &CloneContext<'_>,
        source: &BusinessRecord,
        target: &mut BusinessRecord,
    ) -> Result<(), CloneError> {
        (self.apply)(ctx, source, target)
    }
}

impl std::fmt::Debug for ContributorEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContributorEntry")
            .field("parent", &self.parent)
            .finish_non_exhaustive()
    }
}

/// Registry of contribution functions keyed by chain level
///
/// Injected into the coordinator rather than looked up through any global
/// state; tests swap in partial or failing registries freely.
#[derive(Debug, Default)]
pub struct ContributorRegistry {
    entries: HashMap<ContributorId, ContributorEntry>,
}

impl ContributorRegistry {
    /// Create an empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Create a registry with contributors for every built-in variant
    #[must_use]
    pub fn with_defaults() -> Self {
        crate::contributors::default_registry()
    }

    /// Register a contribution function for a level
    pub fn register(
        &mut self,
        id: ContributorId,
        parent: Option<ContributorId>,
        apply: ContributorFn,
    ) {
        self.entries.insert(id, ContributorEntry::new(parent, apply));
    }

    /// Whether a level is registered
    #[inline]
    #[must_use]
    pub fn contains(&self, id: ContributorId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Number of registered levels
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve the contributor chain for a variant, root-first
    ///
    /// Walks parent links starting at `Leaf(kind)`, then reverses so the
    /// ancestor contribution always runs before the variant's own.
    ///
    /// # Errors
    /// - [`CloneError::ContributorNotFound`] if the variant has no leaf
    ///   entry
    /// - [`RegistryError::MissingParent`] / [`RegistryError::Cycle`] for a
    ///   misconfigured registry
    pub fn chain_for(&self, kind: VariantKind) -> Result<Vec<&ContributorEntry>, CloneError> {
        let leaf = ContributorId::Leaf(kind);
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = leaf;

        loop {
            if !seen.insert(current) {
                return Err(RegistryError::Cycle(current).into());
            }
            let entry = self.entries.get(&current).ok_or_else(|| {
                if current == leaf {
                    CloneError::ContributorNotFound(kind)
                } else {
                    RegistryError::MissingParent {
                        child: chain_tail(&seen, current),
                        parent: current,
                    }
                    .into()
                }
            })?;
            chain.push(entry);
            match entry.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        chain.reverse();
        Ok(chain)
    }
}

/// Best-effort child id for the missing-parent diagnostic
///
/// The walk only keeps the visited set, so the immediate child is the last
/// visited id that is not the missing parent itself.
fn chain_tail(seen: &HashSet<ContributorId>, missing: ContributorId) -> ContributorId {
    seen.iter()
        .copied()
        .find(|id| *id != missing)
        .unwrap_or(missing)
}
