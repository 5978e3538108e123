//! Invariant validator
//!
//! Runs a fixed, ordered set of cross-field consistency checks against a
//! populated record and stops at the first violation. The checks run after
//! cloning — not only at first creation — because a clone can inherit a
//! type reference whose scope diverges from its new owner's scope.

use crate::error::CloneError;
use gantry_record::BusinessRecord;

/// A single violated invariant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Name of the violated check
    pub check: &'static str,
    /// Actionable description for the caller
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.check, self.message)
    }
}

impl From<Violation> for CloneError {
    fn from(violation: Violation) -> Self {
        CloneError::InvariantViolation {
            check: violation.check,
            message: violation.message,
        }
    }
}

/// A consistency check function
///
/// Returns `Ok(())` or the violation message.
pub type CheckFn = fn(&BusinessRecord) -> Result<(), String>;

/// One entry in the validator's ordered check list
pub struct InvariantCheck {
    name: &'static str,
    run: CheckFn,
}

impl InvariantCheck {
    /// Create a named check
    #[inline]
    #[must_use]
    pub fn new(name: &'static str, run: CheckFn) -> Self {
        Self { name, run }
    }

    /// Check name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl std::fmt::Debug for InvariantCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvariantCheck")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Ordered, fail-fast consistency validator
#[derive(Debug, Default)]
pub struct InvariantValidator {
    checks: Vec<InvariantCheck>,
}

impl InvariantValidator {
    /// Create a validator with no checks
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Create a validator with the standard check set
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut validator = Self::new();
        validator.push(InvariantCheck::new("scope_is_set", scope_is_set));
        validator.push(InvariantCheck::new(
            "type_scope_matches_project",
            type_scope_matches_project,
        ));
        validator.push(InvariantCheck::new(
            "back_references_point_at_owner",
            back_references_point_at_owner,
        ));
        validator.push(InvariantCheck::new(
            "step_sequences_increase",
            step_sequences_increase,
        ));
        validator.push(InvariantCheck::new(
            "children_share_scope",
            children_share_scope,
        ));
        validator
    }

    /// Append a check; checks run in insertion order
    pub fn push(&mut self, check: InvariantCheck) {
        self.checks.push(check);
    }

    /// Number of registered checks
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Whether no checks are registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Run the checks in order, stopping at the first violation
    ///
    /// # Errors
    /// The first [`Violation`] encountered.
    pub fn validate(&self, record: &BusinessRecord) -> Result<(), Violation> {
        for check in &self.checks {
            if let Err(message) = (check.run)(record) {
                tracing::debug!(check = check.name, %message, "invariant violated");
                return Err(Violation {
                    check: check.name,
                    message,
                });
            }
        }
        Ok(())
    }
}

fn scope_is_set(record: &BusinessRecord) -> Result<(), String> {
    if record.core().scope().is_none() {
        return Err(format!("record '{}' has no scope", record.core().name()));
    }
    Ok(())
}

fn type_scope_matches_project(record: &BusinessRecord) -> Result<(), String> {
    if let (Some(record_type), Some(project)) = (record.record_type(), record.project()) {
        if !record_type.scope.same_tenant(&project.scope) {
            return Err(format!(
                "type '{}' belongs to scope '{}' but project '{}' belongs to scope '{}'",
                record_type.name, record_type.scope.name, project.name, project.scope.name
            ));
        }
    }
    Ok(())
}

fn back_references_point_at_owner(record: &BusinessRecord) -> Result<(), String> {
    let key = record.core().key();
    for attachment in record.core().attachments().values() {
        if attachment.owner() != key {
            return Err(format!(
                "attachment '{}' points at a foreign owner",
                attachment.file_name
            ));
        }
    }
    for comment in record.core().comments().values() {
        if comment.owner() != key {
            return Err(format!("comment {} points at a foreign owner", comment.id()));
        }
    }
    for step in record.steps() {
        if step.owner() != key {
            return Err(format!("step '{}' points at a foreign owner", step.name));
        }
    }
    Ok(())
}

fn step_sequences_increase(record: &BusinessRecord) -> Result<(), String> {
    for pair in record.steps().windows(2) {
        if pair[1].sequence <= pair[0].sequence {
            return Err(format!(
                "step '{}' (sequence {}) does not follow step '{}' (sequence {})",
                pair[1].name, pair[1].sequence, pair[0].name, pair[0].sequence
            ));
        }
    }
    Ok(())
}

fn children_share_scope(record: &BusinessRecord) -> Result<(), String> {
    let Some(scope) = record.core().scope() else {
        // Covered by scope_is_set; nothing to compare against here.
        return Ok(());
    };
    for child in record.owned_children() {
        match child.core().scope() {
            Some(child_scope) if child_scope.same_tenant(scope) => {}
            Some(child_scope) => {
                return Err(format!(
                    "child '{}' belongs to scope '{}' but its parent belongs to scope '{}'",
                    child.core().name(),
                    child_scope.name,
                    scope.name
                ));
            }
            None => {
                return Err(format!("child '{}' has no scope", child.core().name()));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantry_record::{
        Attachment, BusinessRecord, Deliverable, ProjectRef, ScopeRef, Step, TypeRef,
    };

    fn scoped_deliverable(name: &str) -> Deliverable {
        let mut d = Deliverable::new(name);
        d.core.set_scope(ScopeRef::new("Acme"));
        d
    }

    #[test]
    fn valid_record_passes() {
        let record = BusinessRecord::from(scoped_deliverable("Spec v1"));
        let validator = InvariantValidator::with_defaults();
        assert!(validator.validate(&record).is_ok());
    }

    #[test]
    fn missing_scope_is_first_violation() {
        let record = BusinessRecord::from(Deliverable::new("Spec v1"));
        let validator = InvariantValidator::with_defaults();
        let violation = validator.validate(&record).unwrap_err();
        assert_eq!(violation.check, "scope_is_set");
    }

    #[test]
    fn scope_mismatch_is_rejected() {
        let acme = ScopeRef::new("Acme");
        let rival = ScopeRef::new("Rival");

        let mut d = scoped_deliverable("Spec v1");
        d.project = Some(ProjectRef::new("ProjectX", acme));
        d.record_type = Some(TypeRef::new("Doc", rival));

        let validator = InvariantValidator::with_defaults();
        let violation = validator.validate(&BusinessRecord::from(d)).unwrap_err();
        assert_eq!(violation.check, "type_scope_matches_project");
        assert!(violation.message.contains("Doc"));
    }

    #[test]
    fn foreign_back_reference_is_rejected() {
        let mut d = scoped_deliverable("Spec v1");
        let foreign_owner = gantry_record::RecordKey::new();
        d.core
            .add_attachment(Attachment::new(foreign_owner, "a.pdf", 1, "blobs/a"));

        let validator = InvariantValidator::with_defaults();
        let violation = validator.validate(&BusinessRecord::from(d)).unwrap_err();
        assert_eq!(violation.check, "back_references_point_at_owner");
    }

    #[test]
    fn non_increasing_steps_are_rejected() {
        let mut d = scoped_deliverable("Spec v1");
        let key = d.core.key();
        d.steps.push(Step::new(key, 2, "write"));
        d.steps.push(Step::new(key, 1, "review"));

        let validator = InvariantValidator::with_defaults();
        let violation = validator.validate(&BusinessRecord::from(d)).unwrap_err();
        assert_eq!(violation.check, "step_sequences_increase");
    }

    #[test]
    fn child_in_foreign_scope_is_rejected() {
        let mut child = Deliverable::new("Sub");
        child.core.set_scope(ScopeRef::new("Rival"));

        let mut parent = scoped_deliverable("Spec v1");
        parent.children.push(child.into());

        let validator = InvariantValidator::with_defaults();
        let violation = validator
            .validate(&BusinessRecord::from(parent))
            .unwrap_err();
        assert_eq!(violation.check, "children_share_scope");
    }

    #[test]
    fn validation_stops_at_first_violation() {
        // No scope AND bad steps: only the scope violation surfaces.
        let mut d = Deliverable::new("Spec v1");
        let key = d.core.key();
        d.steps.push(Step::new(key, 5, "b"));
        d.steps.push(Step::new(key, 1, "a"));

        let validator = InvariantValidator::with_defaults();
        let violation = validator.validate(&BusinessRecord::from(d)).unwrap_err();
        assert_eq!(violation.check, "scope_is_set");
    }
}
