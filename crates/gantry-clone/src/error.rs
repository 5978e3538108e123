//! Clone engine error types
//!
//! Two classes of failure exist:
//! - programmer/configuration errors ([`CloneError::ContributorNotFound`],
//!   [`RegistryError`]) — fatal, surfaced immediately, never retried;
//! - business invariant violations — recoverable at the caller, who adjusts
//!   inputs and retries.
//!
//! Per-item failures inside owned collections are deliberately absent here:
//! they are caught, logged and skipped at the narrowest scope and never
//! propagate to the top-level call.

use crate::chain::ContributorId;
use crate::policy::CollectionKind;
use gantry_record::VariantKind;

/// Top-level clone failure
#[derive(Debug, thiserror::Error)]
pub enum CloneError {
    /// A post-population consistency check failed
    #[error("invariant violation ({check}): {message}")]
    InvariantViolation {
        /// Name of the violated check
        check: &'static str,
        /// Actionable description for the caller
        message: String,
    },

    /// No contributor registered for the source's variant
    ///
    /// Defensive; unreachable with the default registry.
    #[error("no contributor registered for variant '{0}'")]
    ContributorNotFound(VariantKind),

    /// Every item of a mandatory collection failed to clone
    #[error("every item of mandatory collection '{0}' failed to clone")]
    AllChildrenFailed(CollectionKind),

    /// The contributor registry is misconfigured
    #[error("contributor registry misconfigured: {0}")]
    Registry(#[from] RegistryError),
}

/// Contributor registry configuration errors
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// An entry names a parent that is not registered
    #[error("contributor '{child}' names unregistered parent '{parent}'")]
    MissingParent {
        /// The entry whose parent is missing
        child: ContributorId,
        /// The missing parent
        parent: ContributorId,
    },

    /// Walking parent links revisited an entry
    #[error("contributor chain through '{0}' contains a cycle")]
    Cycle(ContributorId),
}
