//! Business record variants
//!
//! [`BusinessRecord`] is a tagged union over the duplicable record types.
//! Adding a variant requires a new enum case here plus a contributor
//! registry entry in the clone engine; the exhaustive matches below make
//! the compiler point at every site that needs updating.

use crate::core::RecordCore;
use crate::item::Step;
use crate::refs::{ProjectRef, TemplateRef, TypeRef, UserRef};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Tag identifying the concrete record variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantKind {
    /// Work product delivered within a project
    Deliverable,
    /// Project milestone
    Milestone,
    /// Product definition
    Product,
    /// Team of users at scope level
    Team,
}

impl VariantKind {
    /// Stable lowercase name of the variant
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deliverable => "deliverable",
            Self::Milestone => "milestone",
            Self::Product => "product",
            Self::Team => "team",
        }
    }
}

impl std::fmt::Display for VariantKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Work product delivered within a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deliverable {
    /// Common record state
    pub core: RecordCore,
    /// Owning project (shared reference)
    pub project: Option<ProjectRef>,
    /// Type definition (shared reference, scope-checked)
    pub record_type: Option<TypeRef>,
    /// Due date
    pub due_date: Option<NaiveDate>,
    /// Version label
    pub version: Option<String>,
    /// Most recently used template — shared despite being single-valued
    pub template: Option<TemplateRef>,
    /// Ordered work steps (owned)
    pub steps: Vec<Step>,
    /// Nested sub-deliverables (owned)
    pub children: Vec<BusinessRecord>,
}

impl Deliverable {
    /// Create an empty deliverable
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            core: RecordCore::new(name),
            project: None,
            record_type: None,
            due_date: None,
            version: None,
            template: None,
            steps: Vec::new(),
            children: Vec::new(),
        }
    }
}

/// Project milestone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Common record state
    pub core: RecordCore,
    /// Owning project (shared reference)
    pub project: Option<ProjectRef>,
    /// Type definition (shared reference, scope-checked)
    pub record_type: Option<TypeRef>,
    /// Target date
    pub target_date: Option<NaiveDate>,
}

impl Milestone {
    /// Create an empty milestone
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            core: RecordCore::new(name),
            project: None,
            record_type: None,
            target_date: None,
        }
    }
}

/// Product definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Common record state
    pub core: RecordCore,
    /// Owning project (shared reference)
    pub project: Option<ProjectRef>,
    /// Type definition (shared reference, scope-checked)
    pub record_type: Option<TypeRef>,
    /// Stock keeping unit
    pub sku: Option<String>,
    /// Version label
    pub version: Option<String>,
    /// Launch plan — owned single composition, deep-cloned
    pub launch_plan: Option<Box<BusinessRecord>>,
    /// Nested component records (owned)
    pub children: Vec<BusinessRecord>,
}

impl Product {
    /// Create an empty product
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            core: RecordCore::new(name),
            project: None,
            record_type: None,
            sku: None,
            version: None,
            launch_plan: None,
            children: Vec::new(),
        }
    }
}

/// Team of users at scope level
///
/// Teams are not bound to a project; their members are shared user
/// references included under the relations toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Common record state
    pub core: RecordCore,
    /// Team members (shared references)
    pub members: Vec<UserRef>,
}

impl Team {
    /// Create an empty team
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            core: RecordCore::new(name),
            members: Vec::new(),
        }
    }
}

/// A duplicable business record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum BusinessRecord {
    /// Deliverable variant
    Deliverable(Deliverable),
    /// Milestone variant
    Milestone(Milestone),
    /// Product variant
    Product(Product),
    /// Team variant
    Team(Team),
}

impl BusinessRecord {
    /// Allocate an empty record of the given variant
    ///
    /// The allocation carries a fresh graph key, no persisted identity, and
    /// default-valued fields; population is the contributor chain's job.
    #[must_use]
    pub fn empty(kind: VariantKind) -> Self {
        match kind {
            VariantKind::Deliverable => Self::Deliverable(Deliverable::new("")),
            VariantKind::Milestone => Self::Milestone(Milestone::new("")),
            VariantKind::Product => Self::Product(Product::new("")),
            VariantKind::Team => Self::Team(Team::new("")),
        }
    }

    /// Concrete variant tag
    #[must_use]
    pub fn kind(&self) -> VariantKind {
        match self {
            Self::Deliverable(_) => VariantKind::Deliverable,
            Self::Milestone(_) => VariantKind::Milestone,
            Self::Product(_) => VariantKind::Product,
            Self::Team(_) => VariantKind::Team,
        }
    }

    /// Common record state
    #[must_use]
    pub fn core(&self) -> &RecordCore {
        match self {
            Self::Deliverable(d) => &d.core,
            Self::Milestone(m) => &m.core,
            Self::Product(p) => &p.core,
            Self::Team(t) => &t.core,
        }
    }

    /// Mutable common record state
    pub fn core_mut(&mut self) -> &mut RecordCore {
        match self {
            Self::Deliverable(d) => &mut d.core,
            Self::Milestone(m) => &mut m.core,
            Self::Product(p) => &mut p.core,
            Self::Team(t) => &mut t.core,
        }
    }

    /// Owning project, for project-bound variants
    #[must_use]
    pub fn project(&self) -> Option<&ProjectRef> {
        match self {
            Self::Deliverable(d) => d.project.as_ref(),
            Self::Milestone(m) => m.project.as_ref(),
            Self::Product(p) => p.project.as_ref(),
            Self::Team(_) => None,
        }
    }

    /// Type definition reference, for typed variants
    #[must_use]
    pub fn record_type(&self) -> Option<&TypeRef> {
        match self {
            Self::Deliverable(d) => d.record_type.as_ref(),
            Self::Milestone(m) => m.record_type.as_ref(),
            Self::Product(p) => p.record_type.as_ref(),
            Self::Team(_) => None,
        }
    }

    /// Ordered steps, empty for variants without steps
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        match self {
            Self::Deliverable(d) => &d.steps,
            _ => &[],
        }
    }

    /// All owned child records: nested children plus owned singletons
    pub fn owned_children(&self) -> impl Iterator<Item = &BusinessRecord> {
        let (children, singleton): (&[BusinessRecord], Option<&BusinessRecord>) = match self {
            Self::Deliverable(d) => (&d.children, None),
            Self::Product(p) => (&p.children, p.launch_plan.as_deref()),
            Self::Milestone(_) | Self::Team(_) => (&[], None),
        };
        children.iter().chain(singleton)
    }
}

impl From<Deliverable> for BusinessRecord {
    fn from(value: Deliverable) -> Self {
        Self::Deliverable(value)
    }
}

impl From<Milestone> for BusinessRecord {
    fn from(value: Milestone) -> Self {
        Self::Milestone(value)
    }
}

impl From<Product> for BusinessRecord {
    fn from(value: Product) -> Self {
        Self::Product(value)
    }
}

impl From<Team> for BusinessRecord {
    fn from(value: Team) -> Self {
        Self::Team(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refs::ScopeRef;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_allocation_matches_kind() {
        for kind in [
            VariantKind::Deliverable,
            VariantKind::Milestone,
            VariantKind::Product,
            VariantKind::Team,
        ] {
            let record = BusinessRecord::empty(kind);
            assert_eq!(record.kind(), kind);
            assert!(record.core().is_new());
        }
    }

    #[test]
    fn empty_allocations_have_distinct_keys() {
        let a = BusinessRecord::empty(VariantKind::Deliverable);
        let b = BusinessRecord::empty(VariantKind::Deliverable);
        assert_ne!(a.core().key(), b.core().key());
    }

    #[test]
    fn team_has_no_project() {
        let team = BusinessRecord::from(Team::new("Platform"));
        assert!(team.project().is_none());
        assert!(team.record_type().is_none());
    }

    #[test]
    fn owned_children_includes_launch_plan() {
        let mut product = Product::new("Widget");
        product.children.push(Deliverable::new("Manual").into());
        product.launch_plan = Some(Box::new(Deliverable::new("Launch").into()));

        let record = BusinessRecord::from(product);
        let names: Vec<_> = record
            .owned_children()
            .map(|c| c.core().name().to_string())
            .collect();
        assert_eq!(names, vec!["Manual", "Launch"]);
    }

    #[test]
    fn serde_roundtrip_keeps_variant() {
        let mut deliverable = Deliverable::new("Spec v1");
        deliverable.core.set_scope(ScopeRef::new("Acme"));
        let record = BusinessRecord::from(deliverable);

        let json = serde_json::to_string(&record).unwrap();
        let back: BusinessRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind(), VariantKind::Deliverable);
        assert_eq!(back, record);
    }
}
