//! Built-in contribution functions
//!
//! One function per chain level. Each copies only the fields introduced at
//! its own level; the registry wiring in [`default_registry`] makes the
//! ancestor's function run first.

use crate::chain::{ContributorId, ContributorRegistry};
use crate::collection::OwnedCollectionCloner;
use crate::coordinator::CloneContext;
use crate::error::CloneError;
use crate::policy::CollectionKind;
use crate::resolver::ReferenceResolver;
use gantry_record::{BusinessRecord, VariantKind};
use indexmap::IndexMap;

/// Registry wiring for the built-in variants
///
/// Deliverable, Milestone and Product chain through the project-scoped
/// level; Team sits directly under base.
pub(crate) fn default_registry() -> ContributorRegistry {
    let mut registry = ContributorRegistry::new();
    registry.register(ContributorId::Base, None, Box::new(base));
    registry.register(
        ContributorId::ProjectScoped,
        Some(ContributorId::Base),
        Box::new(project_scoped),
    );
    registry.register(
        ContributorId::Leaf(VariantKind::Deliverable),
        Some(ContributorId::ProjectScoped),
        Box::new(deliverable),
    );
    registry.register(
        ContributorId::Leaf(VariantKind::Milestone),
        Some(ContributorId::ProjectScoped),
        Box::new(milestone),
    );
    registry.register(
        ContributorId::Leaf(VariantKind::Product),
        Some(ContributorId::ProjectScoped),
        Box::new(product),
    );
    registry.register(
        ContributorId::Leaf(VariantKind::Team),
        Some(ContributorId::Base),
        Box::new(team),
    );
    registry
}

/// Base level: common scalars, shared refs, common collections
fn base(
    ctx: &CloneContext<'_>,
    source: &BusinessRecord,
    target: &mut BusinessRecord,
) -> Result<(), CloneError> {
    let resolver = ReferenceResolver::new();
    let cloner = OwnedCollectionCloner::new();
    let policy = ctx.policy();
    let src = source.core();
    let owner = target.core().key();

    let attachments = if policy.includes_attachments() {
        cloner.clone_keyed(
            CollectionKind::Attachments,
            src.attachments(),
            true,
            policy.is_mandatory(CollectionKind::Attachments),
            |a| a.duplicate_for(owner),
        )?
    } else {
        IndexMap::new()
    };

    let comments = if policy.includes_comments() {
        cloner.clone_keyed(
            CollectionKind::Comments,
            src.comments(),
            true,
            policy.is_mandatory(CollectionKind::Comments),
            |c| c.duplicate_for(owner),
        )?
    } else {
        IndexMap::new()
    };

    // Link entries are shared cross-references: reused verbatim inside a
    // fresh collection.
    let links = if policy.includes_relations() {
        cloner.clone_keyed(
            CollectionKind::Links,
            src.links(),
            false,
            policy.is_mandatory(CollectionKind::Links),
            |l| Ok::<_, CloneError>(l.clone()),
        )?
    } else {
        IndexMap::new()
    };

    let core = target.core_mut();
    core.set_name(src.name());
    core.set_description(src.description());
    core.set_active(src.active());
    if let Some(scope) = resolver.shared("scope", src.scope()) {
        core.set_scope(scope);
    }
    core.set_status(resolver.shared("status", src.status()));
    core.set_assignee(resolver.shared("assignee", src.assignee()));
    core.set_attachments(attachments);
    core.set_comments(comments);
    core.set_links(links);
    Ok(())
}

/// Project-scoped level: project, type reference, nested children
fn project_scoped(
    ctx: &CloneContext<'_>,
    source: &BusinessRecord,
    target: &mut BusinessRecord,
) -> Result<(), CloneError> {
    let resolver = ReferenceResolver::new();

    // The coordinator allocates the target from the source's kind, so the
    // variants always match.
    match (source, target) {
        (BusinessRecord::Deliverable(s), BusinessRecord::Deliverable(t)) => {
            t.project = resolver.shared("project", s.project.as_ref());
            t.record_type = resolver.shared("record_type", s.record_type.as_ref());
            t.children = clone_children(ctx, &s.children)?;
        }
        (BusinessRecord::Milestone(s), BusinessRecord::Milestone(t)) => {
            t.project = resolver.shared("project", s.project.as_ref());
            t.record_type = resolver.shared("record_type", s.record_type.as_ref());
        }
        (BusinessRecord::Product(s), BusinessRecord::Product(t)) => {
            t.project = resolver.shared("project", s.project.as_ref());
            t.record_type = resolver.shared("record_type", s.record_type.as_ref());
            t.children = clone_children(ctx, &s.children)?;
        }
        _ => {}
    }
    Ok(())
}

/// Nested sub-records, cloned by recursing into the coordinator
fn clone_children(
    ctx: &CloneContext<'_>,
    children: &[BusinessRecord],
) -> Result<Vec<BusinessRecord>, CloneError> {
    let policy = ctx.policy();
    if !policy.includes_children() {
        return Ok(Vec::new());
    }
    OwnedCollectionCloner::new().clone_ordered(
        CollectionKind::Children,
        children,
        true,
        policy.is_mandatory(CollectionKind::Children),
        |child| ctx.clone_child(child),
    )
}

/// Deliverable leaf: dates, version, shared template, owned steps
fn deliverable(
    ctx: &CloneContext<'_>,
    source: &BusinessRecord,
    target: &mut BusinessRecord,
) -> Result<(), CloneError> {
    let resolver = ReferenceResolver::new();
    let cloner = OwnedCollectionCloner::new();
    let policy = ctx.policy();

    if let (BusinessRecord::Deliverable(s), BusinessRecord::Deliverable(t)) = (source, target) {
        t.due_date = s.due_date;
        t.version = s.version.clone();
        // Single-valued but semantically shared: copy the reference, never
        // the template.
        t.template = resolver.shared("template", s.template.as_ref());
        t.steps = if policy.includes_children() {
            let owner = t.core.key();
            cloner.clone_ordered(
                CollectionKind::Children,
                &s.steps,
                true,
                policy.is_mandatory(CollectionKind::Children),
                |step| step.duplicate_for(owner),
            )?
        } else {
            Vec::new()
        };
    }
    Ok(())
}

/// Milestone leaf: target date
fn milestone(
    _ctx: &CloneContext<'_>,
    source: &BusinessRecord,
    target: &mut BusinessRecord,
) -> Result<(), CloneError> {
    if let (BusinessRecord::Milestone(s), BusinessRecord::Milestone(t)) = (source, target) {
        t.target_date = s.target_date;
    }
    Ok(())
}

/// Product leaf: sku, version, owned launch plan
fn product(
    ctx: &CloneContext<'_>,
    source: &BusinessRecord,
    target: &mut BusinessRecord,
) -> Result<(), CloneError> {
    let resolver = ReferenceResolver::new();
    let policy = ctx.policy();

    if let (BusinessRecord::Product(s), BusinessRecord::Product(t)) = (source, target) {
        t.sku = s.sku.clone();
        t.version = s.version.clone();
        t.launch_plan = if policy.includes_children() {
            resolver.owned_record(ctx, "launch_plan", s.launch_plan.as_deref())
        } else {
            resolver.omit("launch_plan")
        };
    }
    Ok(())
}

/// Team leaf: member references
fn team(
    ctx: &CloneContext<'_>,
    source: &BusinessRecord,
    target: &mut BusinessRecord,
) -> Result<(), CloneError> {
    if let (BusinessRecord::Team(s), BusinessRecord::Team(t)) = (source, target) {
        // Members are shared user references; the collection itself is
        // fresh.
        t.members = if ctx.policy().includes_relations() {
            s.members.clone()
        } else {
            Vec::new()
        };
    }
    Ok(())
}
