//! Session context
//!
//! Supplies the caller's current tenant scope. The clone facade uses it to
//! default an unset scope reference before cloning.

use gantry_record::ScopeRef;

/// Resolves the current tenant scope of the calling session
pub trait SessionService: Send + Sync {
    /// The scope the current session operates in
    fn current_scope(&self) -> ScopeRef;
}

/// Session pinned to one scope
///
/// The common case for background jobs and tests; interactive resolution
/// lives outside this crate.
#[derive(Debug, Clone)]
pub struct FixedSession {
    scope: ScopeRef,
}

impl FixedSession {
    /// Create a session pinned to the given scope
    #[must_use]
    pub fn new(scope: ScopeRef) -> Self {
        Self { scope }
    }
}

impl SessionService for FixedSession {
    fn current_scope(&self) -> ScopeRef {
        self.scope.clone()
    }
}
