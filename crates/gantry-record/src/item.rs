//! Owned composition items
//!
//! An owned composition item is a sub-record whose lifetime is 1:1 bound to
//! a single parent record: attachments, comments, steps. Duplicating one
//! always creates a new [`ItemId`] and re-wires the back-reference to the
//! new parent, never to the original.
//!
//! [`Link`] entries are different: a link is a non-owned cross-reference to
//! another record and is copied verbatim when the policy includes
//! relations.

use crate::id::{ItemId, RecordId, RecordKey};
use crate::refs::UserRef;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Errors raised when duplicating a single owned item
///
/// These surface malformed items. The collection cloner catches them per
/// item: a malformed attachment never blocks cloning its parent.
#[derive(Debug, thiserror::Error)]
pub enum ItemCloneError {
    /// Attachment has no file name
    #[error("attachment {0} has no file name")]
    MissingFileName(ItemId),

    /// Attachment has no content path
    #[error("attachment {0} has no content path")]
    MissingContentPath(ItemId),

    /// Comment has no text
    #[error("comment {0} is empty")]
    EmptyComment(ItemId),

    /// Step has no name
    #[error("step {0} has no name")]
    UnnamedStep(ItemId),
}

/// Common surface of keyed owned items
///
/// Lets the collection cloner re-key a freshly cloned item under its new
/// identity without knowing the concrete item type.
pub trait OwnedItem {
    /// Item identity
    fn item_id(&self) -> ItemId;
}

/// File attached to a record
///
/// Only metadata lives here; the bytes are referenced through
/// `content_path`. Duplicating the underlying blob is a separate,
/// explicitly requested storage operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    id: ItemId,
    owner: RecordKey,
    /// Original file name
    pub file_name: String,
    /// Size in bytes
    pub file_size: u64,
    /// Storage path or identifier of the content blob
    pub content_path: String,
    /// Who uploaded the file
    pub uploaded_by: Option<UserRef>,
    /// When the file was uploaded
    pub uploaded_at: DateTime<Utc>,
    /// Free-form description
    pub description: String,
}

impl Attachment {
    /// Create an attachment owned by the given record
    #[must_use]
    pub fn new(
        owner: RecordKey,
        file_name: impl Into<String>,
        file_size: u64,
        content_path: impl Into<String>,
    ) -> Self {
        Self {
            id: ItemId::new(),
            owner,
            file_name: file_name.into(),
            file_size,
            content_path: content_path.into(),
            uploaded_by: None,
            uploaded_at: Utc::now(),
            description: String::new(),
        }
    }

    /// Set the uploader
    #[inline]
    #[must_use]
    pub fn with_uploader(mut self, user: UserRef) -> Self {
        self.uploaded_by = Some(user);
        self
    }

    /// Set the description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Item identity
    #[inline]
    #[must_use]
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Back-reference to the owning record
    #[inline]
    #[must_use]
    pub fn owner(&self) -> RecordKey {
        self.owner
    }

    /// Duplicate this attachment for a new owner
    ///
    /// The duplicate gets a fresh identity and its back-reference points at
    /// `new_owner`. The content path is copied verbatim; re-pointing it at
    /// a duplicated blob is the caller's decision.
    ///
    /// # Errors
    /// Fails if the attachment is malformed (empty file name or content
    /// path).
    pub fn duplicate_for(&self, new_owner: RecordKey) -> Result<Self, ItemCloneError> {
        if self.file_name.is_empty() {
            return Err(ItemCloneError::MissingFileName(self.id));
        }
        if self.content_path.is_empty() {
            return Err(ItemCloneError::MissingContentPath(self.id));
        }
        Ok(Self {
            id: ItemId::new(),
            owner: new_owner,
            file_name: self.file_name.clone(),
            file_size: self.file_size,
            content_path: self.content_path.clone(),
            uploaded_by: self.uploaded_by.clone(),
            uploaded_at: self.uploaded_at,
            description: self.description.clone(),
        })
    }
}

impl OwnedItem for Attachment {
    fn item_id(&self) -> ItemId {
        self.id
    }
}

/// Comment on a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: ItemId,
    owner: RecordKey,
    /// Comment author
    pub author: Option<UserRef>,
    /// Comment body
    pub text: String,
    /// When the comment was written
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a comment owned by the given record
    #[must_use]
    pub fn new(owner: RecordKey, text: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            owner,
            author: None,
            text: text.into(),
            created_at: Utc::now(),
        }
    }

    /// Set the author
    #[inline]
    #[must_use]
    pub fn with_author(mut self, user: UserRef) -> Self {
        self.author = Some(user);
        self
    }

    /// Item identity
    #[inline]
    #[must_use]
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Back-reference to the owning record
    #[inline]
    #[must_use]
    pub fn owner(&self) -> RecordKey {
        self.owner
    }

    /// Duplicate this comment for a new owner
    ///
    /// # Errors
    /// Fails if the comment text is empty.
    pub fn duplicate_for(&self, new_owner: RecordKey) -> Result<Self, ItemCloneError> {
        if self.text.is_empty() {
            return Err(ItemCloneError::EmptyComment(self.id));
        }
        Ok(Self {
            id: ItemId::new(),
            owner: new_owner,
            author: self.author.clone(),
            text: self.text.clone(),
            created_at: self.created_at,
        })
    }
}

impl OwnedItem for Comment {
    fn item_id(&self) -> ItemId {
        self.id
    }
}

/// Ordered work step inside a deliverable
///
/// Steps carry explicit sequence numbers; cloning preserves their order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    id: ItemId,
    owner: RecordKey,
    /// Position within the parent's step list
    pub sequence: u32,
    /// Step name
    pub name: String,
    /// Whether the step is completed
    pub done: bool,
}

impl Step {
    /// Create a step owned by the given record
    #[must_use]
    pub fn new(owner: RecordKey, sequence: u32, name: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            owner,
            sequence,
            name: name.into(),
            done: false,
        }
    }

    /// Item identity
    #[inline]
    #[must_use]
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Back-reference to the owning record
    #[inline]
    #[must_use]
    pub fn owner(&self) -> RecordKey {
        self.owner
    }

    /// Duplicate this step for a new owner
    ///
    /// The duplicate keeps its sequence number; completion state carries
    /// over.
    ///
    /// # Errors
    /// Fails if the step has no name.
    pub fn duplicate_for(&self, new_owner: RecordKey) -> Result<Self, ItemCloneError> {
        if self.name.is_empty() {
            return Err(ItemCloneError::UnnamedStep(self.id));
        }
        Ok(Self {
            id: ItemId::new(),
            owner: new_owner,
            sequence: self.sequence,
            name: self.name.clone(),
            done: self.done,
        })
    }
}

impl OwnedItem for Step {
    fn item_id(&self) -> ItemId {
        self.id
    }
}

/// Kind of a cross-record link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// Generic relation
    RelatesTo,
    /// This record blocks the target
    Blocks,
    /// This record depends on the target
    DependsOn,
    /// This record duplicates the target
    DuplicateOf,
}

/// Non-owned cross-link to another record
///
/// The target record is shared, not owned: cloning a record copies link
/// entries verbatim (same target, same entry identity) into a fresh
/// collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    id: ItemId,
    /// Relation kind
    pub kind: LinkKind,
    /// Persisted identity of the linked record
    pub target: RecordId,
    /// Display label
    pub label: String,
}

impl Link {
    /// Create a link to the given record
    #[must_use]
    pub fn new(kind: LinkKind, target: RecordId, label: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            kind,
            target,
            label: label.into(),
        }
    }

    /// Entry identity
    #[inline]
    #[must_use]
    pub fn id(&self) -> ItemId {
        self.id
    }
}

impl OwnedItem for Link {
    fn item_id(&self) -> ItemId {
        self.id
    }
}
