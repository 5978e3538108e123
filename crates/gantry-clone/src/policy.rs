//! Clone policy
//!
//! An immutable set of inclusion toggles queried by every other part of
//! the engine and never mutated mid-clone. The default policy duplicates
//! only scalars and the minimum reference set required for validity; heavy
//! collections are excluded unless explicitly requested.

use serde::{Deserialize, Serialize};

/// Child collection identifier, used for mandatory-collection bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    /// File attachments
    Attachments,
    /// Comments
    Comments,
    /// Non-owned cross-links
    Links,
    /// Nested sub-records and ordered steps
    Children,
}

impl CollectionKind {
    /// Stable lowercase name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Attachments => "attachments",
            Self::Comments => "comments",
            Self::Links => "links",
            Self::Children => "children",
        }
    }
}

impl std::fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusion toggles controlling what a clone carries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClonePolicy {
    include_comments: bool,
    include_attachments: bool,
    include_relations: bool,
    include_children: bool,
    duplicate_binary_content: bool,
    mandatory: Vec<CollectionKind>,
}

impl ClonePolicy {
    /// The minimal policy: scalars and required references only
    #[inline]
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            include_comments: false,
            include_attachments: false,
            include_relations: false,
            include_children: false,
            duplicate_binary_content: false,
            mandatory: Vec::new(),
        }
    }

    /// Full-inclusion policy: every optional collection is carried over
    ///
    /// Binary content still re-points at the original blobs; true byte
    /// duplication stays opt-in.
    #[must_use]
    pub fn full() -> Self {
        Self::builder()
            .include_comments(true)
            .include_attachments(true)
            .include_relations(true)
            .include_children(true)
            .build()
    }

    /// Start building a policy from the minimal baseline
    #[inline]
    #[must_use]
    pub fn builder() -> ClonePolicyBuilder {
        ClonePolicyBuilder {
            policy: Self::minimal(),
        }
    }

    /// Whether comments are carried over
    #[inline]
    #[must_use]
    pub fn includes_comments(&self) -> bool {
        self.include_comments
    }

    /// Whether attachments are carried over
    #[inline]
    #[must_use]
    pub fn includes_attachments(&self) -> bool {
        self.include_attachments
    }

    /// Whether non-owned cross-links are carried over
    #[inline]
    #[must_use]
    pub fn includes_relations(&self) -> bool {
        self.include_relations
    }

    /// Whether nested sub-items and sub-records are carried over
    #[inline]
    #[must_use]
    pub fn includes_children(&self) -> bool {
        self.include_children
    }

    /// Whether attachment bytes are duplicated in storage
    #[inline]
    #[must_use]
    pub fn duplicates_binary_content(&self) -> bool {
        self.duplicate_binary_content
    }

    /// Whether total clone failure of the given collection aborts the clone
    #[inline]
    #[must_use]
    pub fn is_mandatory(&self, kind: CollectionKind) -> bool {
        self.mandatory.contains(&kind)
    }
}

impl Default for ClonePolicy {
    fn default() -> Self {
        Self::minimal()
    }
}

/// Builder for [`ClonePolicy`]
#[derive(Debug, Clone)]
pub struct ClonePolicyBuilder {
    policy: ClonePolicy,
}

impl ClonePolicyBuilder {
    /// Carry comments over
    #[inline]
    #[must_use]
    pub fn include_comments(mut self, include: bool) -> Self {
        self.policy.include_comments = include;
        self
    }

    /// Carry attachments over
    #[inline]
    #[must_use]
    pub fn include_attachments(mut self, include: bool) -> Self {
        self.policy.include_attachments = include;
        self
    }

    /// Carry non-owned cross-links over
    #[inline]
    #[must_use]
    pub fn include_relations(mut self, include: bool) -> Self {
        self.policy.include_relations = include;
        self
    }

    /// Carry nested sub-items and sub-records over
    #[inline]
    #[must_use]
    pub fn include_children(mut self, include: bool) -> Self {
        self.policy.include_children = include;
        self
    }

    /// Duplicate attachment bytes in storage instead of re-pointing
    #[inline]
    #[must_use]
    pub fn duplicate_binary_content(mut self, duplicate: bool) -> Self {
        self.policy.duplicate_binary_content = duplicate;
        self
    }

    /// Mark a collection as mandatory: if every one of its items fails to
    /// clone, the whole operation fails
    #[must_use]
    pub fn mandatory(mut self, kind: CollectionKind) -> Self {
        if !self.policy.mandatory.contains(&kind) {
            self.policy.mandatory.push(kind);
        }
        self
    }

    /// Finish building
    #[inline]
    #[must_use]
    pub fn build(self) -> ClonePolicy {
        self.policy
    }
}
