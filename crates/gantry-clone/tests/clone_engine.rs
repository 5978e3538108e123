//! End-to-end clone engine tests over the full contributor chain.

use chrono::NaiveDate;
use gantry_clone::{CloneCoordinator, CloneError, ClonePolicy, CollectionKind};
use gantry_record::{
    Attachment, BusinessRecord, Comment, Deliverable, Link, LinkKind, Milestone, Product,
    ProjectRef, RecordId, ScopeRef, Step, Team, TemplateRef, TypeRef, UserRef,
};
use pretty_assertions::assert_eq;

fn acme() -> ScopeRef {
    ScopeRef::new("Acme")
}

/// The worked example: deliverable "Spec v1" in scope "Acme", project
/// "ProjectX", type "Doc", 2 attachments, 1 comment, 1 link.
fn spec_v1(scope: &ScopeRef) -> Deliverable {
    let mut d = Deliverable::new("Spec v1");
    d.core.set_scope(scope.clone());
    d.core.set_description("initial specification");
    let project = ProjectRef::new("ProjectX", scope.clone());
    d.project = Some(project);
    d.record_type = Some(TypeRef::new("Doc", scope.clone()));
    d.due_date = NaiveDate::from_ymd_opt(2026, 3, 1);
    d.version = Some("1.0".to_string());
    d.template = Some(TemplateRef::new("Standard Doc"));

    let key = d.core.key();
    d.core
        .add_attachment(Attachment::new(key, "spec.pdf", 2048, "blobs/spec"));
    d.core
        .add_attachment(Attachment::new(key, "notes.txt", 512, "blobs/notes"));
    d.core
        .add_comment(Comment::new(key, "looks good").with_author(UserRef::new("dana")));
    d.core
        .add_link(Link::new(LinkKind::RelatesTo, RecordId::new(), "old spec"));
    d.steps.push(Step::new(key, 1, "draft"));
    d.steps.push(Step::new(key, 2, "review"));
    d.steps.push(Step::new(key, 3, "publish"));
    d
}

#[test]
fn scalar_idempotence_under_minimal_policy() {
    let scope = acme();
    let source = BusinessRecord::from(spec_v1(&scope));
    let coordinator = CloneCoordinator::new();

    let copy = coordinator
        .clone_record(&source, &ClonePolicy::minimal())
        .unwrap();

    assert!(copy.core().id().is_none());
    assert_eq!(copy.core().name(), source.core().name());
    assert_eq!(copy.core().description(), source.core().description());
    assert_eq!(copy.core().active(), source.core().active());
    assert_eq!(copy.core().scope(), source.core().scope());
    assert_eq!(copy.project(), source.project());
    assert_eq!(copy.record_type(), source.record_type());
}

#[test]
fn excluded_collections_stay_empty() {
    let scope = acme();
    let source = BusinessRecord::from(spec_v1(&scope));
    let coordinator = CloneCoordinator::new();

    let copy = coordinator
        .clone_record(&source, &ClonePolicy::minimal())
        .unwrap();

    assert!(copy.core().attachments().is_empty());
    assert!(copy.core().comments().is_empty());
    assert!(copy.core().links().is_empty());
    assert!(copy.steps().is_empty());
}

#[test]
fn cloned_attachments_do_not_alias_the_source() {
    let scope = acme();
    let source = BusinessRecord::from(spec_v1(&scope));
    let coordinator = CloneCoordinator::new();
    let policy = ClonePolicy::builder().include_attachments(true).build();

    let copy = coordinator.clone_record(&source, &policy).unwrap();

    assert_eq!(copy.core().attachments().len(), 2);
    for (id, attachment) in copy.core().attachments() {
        // Fresh identity, never one of the source's.
        assert!(!source.core().attachments().contains_key(id));
        // Back-reference re-wired to the clone, never the original.
        assert_eq!(attachment.owner(), copy.core().key());
        assert_ne!(attachment.owner(), source.core().key());
    }
}

#[test]
fn partial_failure_keeps_surviving_children() {
    let scope = acme();
    let mut d = spec_v1(&scope);
    let key = d.core.key();
    // Rebuild the attachment collection as good / broken / good.
    let mut core_attachments = indexmap::IndexMap::new();
    for a in [
        Attachment::new(key, "one.pdf", 1, "blobs/one"),
        Attachment::new(key, "", 0, "blobs/broken"),
        Attachment::new(key, "three.pdf", 3, "blobs/three"),
    ] {
        core_attachments.insert(a.id(), a);
    }
    d.core.set_attachments(core_attachments);

    let coordinator = CloneCoordinator::new();
    let policy = ClonePolicy::builder().include_attachments(true).build();
    let copy = coordinator
        .clone_record(&BusinessRecord::from(d), &policy)
        .unwrap();

    let names: Vec<_> = copy
        .core()
        .attachments()
        .values()
        .map(|a| a.file_name.as_str())
        .collect();
    assert_eq!(names, vec!["one.pdf", "three.pdf"]);
}

#[test]
fn mandatory_collection_failure_aborts() {
    let scope = acme();
    let mut d = Deliverable::new("Spec v1");
    d.core.set_scope(scope);
    let key = d.core.key();
    d.core.add_attachment(Attachment::new(key, "", 0, ""));

    let coordinator = CloneCoordinator::new();
    let policy = ClonePolicy::builder()
        .include_attachments(true)
        .mandatory(CollectionKind::Attachments)
        .build();

    let err = coordinator
        .clone_record(&BusinessRecord::from(d), &policy)
        .unwrap_err();
    assert!(matches!(
        err,
        CloneError::AllChildrenFailed(CollectionKind::Attachments)
    ));
}

#[test]
fn inherited_scope_mismatch_is_rejected() {
    let acme = acme();
    let rival = ScopeRef::new("Rival");

    // Contrived, already-inconsistent source: type belongs to a foreign
    // scope.
    let mut d = Deliverable::new("Spec v1");
    d.core.set_scope(acme.clone());
    d.project = Some(ProjectRef::new("ProjectX", acme));
    d.record_type = Some(TypeRef::new("Doc", rival));

    let coordinator = CloneCoordinator::new();
    let err = coordinator
        .clone_record(&BusinessRecord::from(d), &ClonePolicy::minimal())
        .unwrap_err();

    match err {
        CloneError::InvariantViolation { check, .. } => {
            assert_eq!(check, "type_scope_matches_project");
        }
        other => panic!("expected invariant violation, got {other}"),
    }
}

#[test]
fn step_order_is_preserved() {
    let scope = acme();
    let source = BusinessRecord::from(spec_v1(&scope));
    let coordinator = CloneCoordinator::new();
    let policy = ClonePolicy::builder().include_children(true).build();

    let copy = coordinator.clone_record(&source, &policy).unwrap();

    let names: Vec<_> = copy.steps().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["draft", "review", "publish"]);
    let sequences: Vec<_> = copy.steps().iter().map(|s| s.sequence).collect();
    assert_eq!(sequences, vec![1, 2, 3]);
    for step in copy.steps() {
        assert_eq!(step.owner(), copy.core().key());
    }
}

#[test]
fn nested_children_are_cloned_recursively() {
    let scope = acme();
    let mut child = Deliverable::new("Appendix");
    child.core.set_scope(scope.clone());
    let child_key = child.core.key();
    child
        .core
        .add_attachment(Attachment::new(child_key, "appendix.pdf", 7, "blobs/app"));

    let mut parent = spec_v1(&scope);
    parent.children.push(child.into());

    let coordinator = CloneCoordinator::new();
    let policy = ClonePolicy::full();
    let copy = coordinator
        .clone_record(&BusinessRecord::from(parent), &policy)
        .unwrap();

    let BusinessRecord::Deliverable(copy) = &copy else {
        panic!("variant changed during clone");
    };
    assert_eq!(copy.children.len(), 1);
    let cloned_child = &copy.children[0];
    assert!(cloned_child.core().is_new());
    assert_ne!(cloned_child.core().key(), child_key);
    // The nested clone's own attachments point at the nested clone.
    for attachment in cloned_child.core().attachments().values() {
        assert_eq!(attachment.owner(), cloned_child.core().key());
    }
}

#[test]
fn owned_launch_plan_is_deep_cloned_and_template_stays_shared() {
    let scope = acme();
    let mut plan = Deliverable::new("Launch Plan");
    plan.core.set_scope(scope.clone());
    let plan_key = plan.core.key();

    let mut product = Product::new("Widget");
    product.core.set_scope(scope.clone());
    product.project = Some(ProjectRef::new("ProjectX", scope.clone()));
    product.record_type = Some(TypeRef::new("Hardware", scope.clone()));
    product.sku = Some("W-100".to_string());
    product.launch_plan = Some(Box::new(plan.into()));

    let coordinator = CloneCoordinator::new();
    let copy = coordinator
        .clone_record(&BusinessRecord::from(product), &ClonePolicy::full())
        .unwrap();

    let BusinessRecord::Product(copy) = &copy else {
        panic!("variant changed during clone");
    };
    let cloned_plan = copy.launch_plan.as_deref().unwrap();
    assert_ne!(cloned_plan.core().key(), plan_key);
    assert!(cloned_plan.core().is_new());
    assert_eq!(cloned_plan.core().name(), "Launch Plan");
}

#[test]
fn worked_example_policy_mix() {
    let scope = acme();
    let source = BusinessRecord::from(spec_v1(&scope));
    let coordinator = CloneCoordinator::new();
    let policy = ClonePolicy::builder()
        .include_attachments(true)
        .include_comments(true)
        .include_relations(false)
        .build();

    let copy = coordinator.clone_record(&source, &policy).unwrap();

    assert_eq!(copy.core().name(), "Spec v1");
    assert!(copy.core().id().is_none());
    assert_eq!(copy.core().scope().unwrap().name, "Acme");
    assert_eq!(copy.project().unwrap().name, "ProjectX");
    // Shared references preserve identity.
    assert_eq!(copy.project().unwrap().id, source.project().unwrap().id);
    assert_eq!(copy.core().attachments().len(), 2);
    assert_eq!(copy.core().comments().len(), 1);
    // Zero copied links even though the source has one.
    assert!(copy.core().links().is_empty());
}

#[test]
fn relations_policy_reuses_link_entries() {
    let scope = acme();
    let source = BusinessRecord::from(spec_v1(&scope));
    let coordinator = CloneCoordinator::new();
    let policy = ClonePolicy::builder().include_relations(true).build();

    let copy = coordinator.clone_record(&source, &policy).unwrap();

    assert_eq!(copy.core().links(), source.core().links());
}

/// Structural equality ignoring identity fields (keys, ids, timestamps).
fn assert_same_content(a: &BusinessRecord, b: &BusinessRecord) {
    assert_eq!(a.kind(), b.kind());
    assert_eq!(a.core().name(), b.core().name());
    assert_eq!(a.core().description(), b.core().description());
    assert_eq!(a.core().active(), b.core().active());
    assert_eq!(a.core().scope(), b.core().scope());
    assert_eq!(a.core().status(), b.core().status());
    assert_eq!(a.core().assignee(), b.core().assignee());
    assert_eq!(a.project(), b.project());
    assert_eq!(a.record_type(), b.record_type());

    let a_files: Vec<_> = a
        .core()
        .attachments()
        .values()
        .map(|x| (x.file_name.clone(), x.file_size, x.content_path.clone()))
        .collect();
    let b_files: Vec<_> = b
        .core()
        .attachments()
        .values()
        .map(|x| (x.file_name.clone(), x.file_size, x.content_path.clone()))
        .collect();
    assert_eq!(a_files, b_files);

    let a_comments: Vec<_> = a.core().comments().values().map(|c| c.text.clone()).collect();
    let b_comments: Vec<_> = b.core().comments().values().map(|c| c.text.clone()).collect();
    assert_eq!(a_comments, b_comments);

    assert_eq!(a.core().links(), b.core().links());

    let a_steps: Vec<_> = a.steps().iter().map(|s| (s.sequence, s.name.clone())).collect();
    let b_steps: Vec<_> = b.steps().iter().map(|s| (s.sequence, s.name.clone())).collect();
    assert_eq!(a_steps, b_steps);

    let a_children: Vec<_> = a.owned_children().collect();
    let b_children: Vec<_> = b.owned_children().collect();
    assert_eq!(a_children.len(), b_children.len());
    for (ca, cb) in a_children.iter().zip(b_children.iter()) {
        assert_same_content(ca, cb);
    }
}

#[test]
fn full_inclusion_round_trip_for_every_variant() {
    let scope = acme();
    let coordinator = CloneCoordinator::new();

    let deliverable = BusinessRecord::from(spec_v1(&scope));

    let mut milestone = Milestone::new("Beta");
    milestone.core.set_scope(scope.clone());
    milestone.project = Some(ProjectRef::new("ProjectX", scope.clone()));
    milestone.record_type = Some(TypeRef::new("Checkpoint", scope.clone()));
    milestone.target_date = NaiveDate::from_ymd_opt(2026, 6, 1);
    let milestone = BusinessRecord::from(milestone);

    let mut product = Product::new("Widget");
    product.core.set_scope(scope.clone());
    product.project = Some(ProjectRef::new("ProjectX", scope.clone()));
    product.sku = Some("W-100".to_string());
    product.version = Some("2.1".to_string());
    let product = BusinessRecord::from(product);

    let mut team = Team::new("Platform");
    team.core.set_scope(scope.clone());
    team.members.push(UserRef::new("dana"));
    team.members.push(UserRef::new("kim"));
    let team = BusinessRecord::from(team);

    for source in [deliverable, milestone, product, team] {
        let copy = coordinator
            .clone_record(&source, &ClonePolicy::full())
            .unwrap();
        assert!(copy.core().is_new(), "{} clone kept identity", source.kind());
        assert_same_content(&source, &copy);
        if let (BusinessRecord::Team(s), BusinessRecord::Team(c)) = (&source, &copy) {
            assert_eq!(s.members, c.members);
        }
    }

    // Team members are relations: excluded under the minimal policy.
    let mut team = Team::new("Platform");
    team.core.set_scope(scope);
    team.members.push(UserRef::new("dana"));
    let copy = coordinator
        .clone_record(&BusinessRecord::from(team), &ClonePolicy::minimal())
        .unwrap();
    let BusinessRecord::Team(copy) = copy else {
        panic!("variant changed during clone");
    };
    assert!(copy.members.is_empty());
}
