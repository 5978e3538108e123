//! Property tests for the contributor chain contract:
//! repeated application converges, and the source is never mutated.

use gantry_clone::{CloneCoordinator, ClonePolicy};
use gantry_record::{Attachment, BusinessRecord, Comment, Deliverable, ScopeRef, Step, UserRef};
use proptest::prelude::*;

fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ]{0,24}"
}

fn record_strategy() -> impl Strategy<Value = BusinessRecord> {
    (
        name_strategy(),
        name_strategy(),
        any::<bool>(),
        0usize..4,
        0usize..4,
        0usize..4,
    )
        .prop_map(|(name, description, active, attachments, comments, steps)| {
            let mut d = Deliverable::new(name);
            d.core.set_description(description);
            d.core.set_active(active);
            d.core.set_scope(ScopeRef::new("Acme"));
            d.core.set_assignee(Some(UserRef::new("dana")));
            let key = d.core.key();
            for i in 0..attachments {
                d.core.add_attachment(Attachment::new(
                    key,
                    format!("file-{i}.pdf"),
                    i as u64,
                    format!("blobs/{i}"),
                ));
            }
            for i in 0..comments {
                d.core.add_comment(Comment::new(key, format!("comment {i}")));
            }
            for i in 0..steps {
                d.steps.push(Step::new(key, i as u32 + 1, format!("step {i}")));
            }
            BusinessRecord::from(d)
        })
}

fn policy_strategy() -> impl Strategy<Value = ClonePolicy> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(attachments, comments, relations, children)| {
            ClonePolicy::builder()
                .include_attachments(attachments)
                .include_comments(comments)
                .include_relations(relations)
                .include_children(children)
                .build()
        },
    )
}

/// Structural fingerprint ignoring generated identities and timestamps.
fn fingerprint(record: &BusinessRecord) -> impl PartialEq + std::fmt::Debug {
    let core = record.core();
    (
        record.kind(),
        core.name().to_string(),
        core.description().to_string(),
        core.active(),
        core.scope().cloned(),
        core.assignee().cloned(),
        core.attachments()
            .values()
            .map(|a| (a.file_name.clone(), a.file_size, a.content_path.clone()))
            .collect::<Vec<_>>(),
        core.comments()
            .values()
            .map(|c| c.text.clone())
            .collect::<Vec<_>>(),
        record
            .steps()
            .iter()
            .map(|s| (s.sequence, s.name.clone()))
            .collect::<Vec<_>>(),
    )
}

proptest! {
    #[test]
    fn cloning_twice_converges_structurally(
        source in record_strategy(),
        policy in policy_strategy(),
    ) {
        let coordinator = CloneCoordinator::new();
        let once = coordinator.clone_record(&source, &policy).unwrap();
        let twice = coordinator.clone_record(&source, &policy).unwrap();
        prop_assert_eq!(fingerprint(&once), fingerprint(&twice));
    }

    #[test]
    fn clone_never_mutates_source(
        source in record_strategy(),
        policy in policy_strategy(),
    ) {
        let before = source.clone();
        let coordinator = CloneCoordinator::new();
        let _ = coordinator.clone_record(&source, &policy).unwrap();
        prop_assert_eq!(source, before);
    }

    #[test]
    fn clone_identity_is_always_unset(
        source in record_strategy(),
        policy in policy_strategy(),
    ) {
        let coordinator = CloneCoordinator::new();
        let copy = coordinator.clone_record(&source, &policy).unwrap();
        prop_assert!(copy.core().is_new());
        prop_assert_ne!(copy.core().key(), source.core().key());
    }

    #[test]
    fn excluded_collections_are_always_empty(source in record_strategy()) {
        let coordinator = CloneCoordinator::new();
        let copy = coordinator.clone_record(&source, &ClonePolicy::minimal()).unwrap();
        prop_assert!(copy.core().attachments().is_empty());
        prop_assert!(copy.core().comments().is_empty());
        prop_assert!(copy.core().links().is_empty());
        prop_assert!(copy.steps().is_empty());
    }
}
