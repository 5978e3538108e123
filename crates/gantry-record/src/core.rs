//! Common record state shared by every variant
//!
//! # Invariants
//! - `key` is generated at construction and never changes.
//! - `id` stays `None` until the persistence service assigns it.
//! - Mutation goes through accessors that refresh `modified_at`.

use crate::id::{ItemId, RecordId, RecordKey};
use crate::item::{Attachment, Comment, Link};
use crate::refs::{ScopeRef, StatusRef, UserRef};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Field block every business record variant carries
///
/// Mirrors the base level of the record hierarchy: identity, tenancy,
/// naming, audit timestamps, and the common owned collections (attachments,
/// comments) plus non-owned cross-links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordCore {
    key: RecordKey,
    id: Option<RecordId>,
    name: String,
    description: String,
    active: bool,
    scope: Option<ScopeRef>,
    status: Option<StatusRef>,
    assignee: Option<UserRef>,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
    attachments: IndexMap<ItemId, Attachment>,
    comments: IndexMap<ItemId, Comment>,
    links: IndexMap<ItemId, Link>,
}

impl RecordCore {
    /// Create a new, unpersisted record core
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            key: RecordKey::new(),
            id: None,
            name: name.into(),
            description: String::new(),
            active: true,
            scope: None,
            status: None,
            assignee: None,
            created_at: now,
            modified_at: now,
            attachments: IndexMap::new(),
            comments: IndexMap::new(),
            links: IndexMap::new(),
        }
    }

    /// Transient graph handle of this instance
    #[inline]
    #[must_use]
    pub fn key(&self) -> RecordKey {
        self.key
    }

    /// Persisted identity, if assigned
    #[inline]
    #[must_use]
    pub fn id(&self) -> Option<RecordId> {
        self.id
    }

    /// Whether this record has never been persisted
    #[inline]
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Assign persisted identity
    ///
    /// Called by the persistence service when the record is saved.
    pub fn assign_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    /// Record name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the record name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    /// Free-form description
    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Set the description
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
        self.touch();
    }

    /// Whether the record is active
    #[inline]
    #[must_use]
    pub fn active(&self) -> bool {
        self.active
    }

    /// Set the active flag
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        self.touch();
    }

    /// Owning scope, if set
    #[inline]
    #[must_use]
    pub fn scope(&self) -> Option<&ScopeRef> {
        self.scope.as_ref()
    }

    /// Set the owning scope
    pub fn set_scope(&mut self, scope: ScopeRef) {
        self.scope = Some(scope);
        self.touch();
    }

    /// Workflow status, if set
    #[inline]
    #[must_use]
    pub fn status(&self) -> Option<&StatusRef> {
        self.status.as_ref()
    }

    /// Set the workflow status
    pub fn set_status(&mut self, status: Option<StatusRef>) {
        self.status = status;
        self.touch();
    }

    /// Assigned user, if set
    #[inline]
    #[must_use]
    pub fn assignee(&self) -> Option<&UserRef> {
        self.assignee.as_ref()
    }

    /// Set the assigned user
    pub fn set_assignee(&mut self, assignee: Option<UserRef>) {
        self.assignee = assignee;
        self.touch();
    }

    /// Creation timestamp
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification timestamp
    #[inline]
    #[must_use]
    pub fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }

    /// Refresh the modification timestamp
    pub fn touch(&mut self) {
        self.modified_at = Utc::now();
    }

    /// Attachments, in insertion order
    #[inline]
    #[must_use]
    pub fn attachments(&self) -> &IndexMap<ItemId, Attachment> {
        &self.attachments
    }

    /// Add an attachment
    pub fn add_attachment(&mut self, attachment: Attachment) {
        self.attachments.insert(attachment.id(), attachment);
        self.touch();
    }

    /// Replace the whole attachment collection
    pub fn set_attachments(&mut self, attachments: IndexMap<ItemId, Attachment>) {
        self.attachments = attachments;
        self.touch();
    }

    /// Comments, in insertion order
    #[inline]
    #[must_use]
    pub fn comments(&self) -> &IndexMap<ItemId, Comment> {
        &self.comments
    }

    /// Add a comment
    pub fn add_comment(&mut self, comment: Comment) {
        self.comments.insert(comment.id(), comment);
        self.touch();
    }

    /// Replace the whole comment collection
    pub fn set_comments(&mut self, comments: IndexMap<ItemId, Comment>) {
        self.comments = comments;
        self.touch();
    }

    /// Cross-links, in insertion order
    #[inline]
    #[must_use]
    pub fn links(&self) -> &IndexMap<ItemId, Link> {
        &self.links
    }

    /// Add a cross-link
    pub fn add_link(&mut self, link: Link) {
        self.links.insert(link.id(), link);
        self.touch();
    }

    /// Replace the whole link collection
    pub fn set_links(&mut self, links: IndexMap<ItemId, Link>) {
        self.links = links;
        self.touch();
    }

    /// Mutable access to the attachment collection
    ///
    /// Used when re-pointing content paths after binary duplication.
    pub fn attachments_mut(&mut self) -> &mut IndexMap<ItemId, Attachment> {
        &mut self.attachments
    }
}
