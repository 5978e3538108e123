//! Shared references
//!
//! A shared reference points at a record owned by many others: the tenant
//! scope, a project, a type definition, a status definition, a user, a
//! template. Cloning a record copies these references verbatim — the
//! referenced record itself is never deep-cloned.
//!
//! Identity comparisons go through the `id` field; two refs with the same
//! id denote the same underlying record even if display names diverge.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reference to the multi-tenant owning unit (company-equivalent)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeRef {
    /// Scope identity
    pub id: Uuid,
    /// Display name
    pub name: String,
}

impl ScopeRef {
    /// Create a scope reference with a fresh identity
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }

    /// Whether both refs point at the same tenant
    #[inline]
    #[must_use]
    pub fn same_tenant(&self, other: &ScopeRef) -> bool {
        self.id == other.id
    }
}

/// Reference to a project within a scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    /// Project identity
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Scope the project belongs to
    pub scope: ScopeRef,
}

impl ProjectRef {
    /// Create a project reference in the given scope
    #[must_use]
    pub fn new(name: impl Into<String>, scope: ScopeRef) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            scope,
        }
    }
}

/// Reference to a record type definition
///
/// Type definitions are scoped: a record's type must belong to the same
/// scope as the record's project. The clone engine re-checks this after
/// every clone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    /// Type definition identity
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Scope the type definition belongs to
    pub scope: ScopeRef,
}

impl TypeRef {
    /// Create a type reference in the given scope
    #[must_use]
    pub fn new(name: impl Into<String>, scope: ScopeRef) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            scope,
        }
    }
}

/// Reference to a workflow status definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRef {
    /// Status definition identity
    pub id: Uuid,
    /// Display name
    pub name: String,
}

impl StatusRef {
    /// Create a status reference
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// Reference to a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    /// User identity
    pub id: Uuid,
    /// Display name
    pub name: String,
}

impl UserRef {
    /// Create a user reference
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// Reference to a document template
///
/// Single-valued, but semantically shared: many deliverables point at the
/// same template, so cloning copies the reference and never the template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRef {
    /// Template identity
    pub id: Uuid,
    /// Display name
    pub name: String,
}

impl TemplateRef {
    /// Create a template reference
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}
