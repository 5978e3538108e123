//! Clone coordinator
//!
//! The engine's entry point. Allocates an empty target of the source's
//! variant, walks the contributor chain ancestor-first, re-validates the
//! populated target, and returns a detached, not-yet-persisted copy.
//!
//! The coordinator never touches storage. Per-child failures inside owned
//! collections are logged and skipped by the collection cloner; the only
//! failure modes here are registry misconfiguration and invariant
//! violations.

use crate::chain::ContributorRegistry;
use crate::error::CloneError;
use crate::policy::ClonePolicy;
use crate::validator::InvariantValidator;
use gantry_record::BusinessRecord;

/// Orchestrates policy-driven record duplication
#[derive(Debug)]
pub struct CloneCoordinator {
    registry: ContributorRegistry,
    validator: InvariantValidator,
}

impl CloneCoordinator {
    /// Create a coordinator with the default registry and validator
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: ContributorRegistry::with_defaults(),
            validator: InvariantValidator::with_defaults(),
        }
    }

    /// Replace the contributor registry
    #[must_use]
    pub fn with_registry(mut self, registry: ContributorRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the invariant validator
    #[must_use]
    pub fn with_validator(mut self, validator: InvariantValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Clone a record under the given policy
    ///
    /// Returns a fully populated, unpersisted copy: fresh graph key, no
    /// persisted identity, owned items re-wired to the copy. The caller
    /// persists it through the persistence service.
    ///
    /// # Errors
    /// - [`CloneError::InvariantViolation`] if the populated copy fails a
    ///   consistency check; nothing is silently dropped or auto-corrected
    /// - [`CloneError::ContributorNotFound`] / registry errors for a
    ///   misconfigured registry
    /// - [`CloneError::AllChildrenFailed`] if a mandatory collection lost
    ///   every item
    pub fn clone_record(
        &self,
        source: &BusinessRecord,
        policy: &ClonePolicy,
    ) -> Result<BusinessRecord, CloneError> {
        let kind = source.kind();
        tracing::debug!(variant = %kind, name = source.core().name(), "cloning record");

        let chain = self.registry.chain_for(kind)?;
        let mut target = BusinessRecord::empty(kind);
        let ctx = CloneContext::new(policy, self);

        for entry in chain {
            entry.apply(&ctx, source, &mut target)?;
        }

        self.validator.validate(&target)?;
        tracing::debug!(variant = %kind, "clone populated and validated");
        Ok(target)
    }
}

impl Default for CloneCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-invocation context handed to contribution functions
///
/// Carries the active policy and a handle back into the coordinator so
/// contributors can recurse for owned sub-records.
pub struct CloneContext<'a> {
    policy: &'a ClonePolicy,
    coordinator: &'a CloneCoordinator,
}

impl<'a> CloneContext<'a> {
    /// Create a context for one clone invocation
    #[must_use]
    pub fn new(policy: &'a ClonePolicy, coordinator: &'a CloneCoordinator) -> Self {
        Self {
            policy,
            coordinator,
        }
    }

    /// The active policy
    #[inline]
    #[must_use]
    pub fn policy(&self) -> &ClonePolicy {
        self.policy
    }

    /// Recursively clone an owned child record under the same policy
    ///
    /// # Errors
    /// Whatever the nested clone reports; callers inside collections catch
    /// and skip per item.
    pub fn clone_child(&self, child: &BusinessRecord) -> Result<BusinessRecord, CloneError> {
        self.coordinator.clone_record(child, self.policy)
    }
}
