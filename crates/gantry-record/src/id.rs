//! Identity newtypes for records and owned items
//!
//! Three distinct identities exist in the record graph:
//! - [`RecordId`]: persisted identity, assigned by the persistence service.
//!   A record carries `Option<RecordId>` and stays `None` until saved.
//! - [`RecordKey`]: transient in-memory graph handle, generated at
//!   construction. Owned items point back at their parent through its key,
//!   so back-references can be re-wired before persistence ever runs.
//! - [`ItemId`]: identity of an owned composition item, generated when the
//!   item is constructed. Cloning an item always generates a fresh one.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Persisted record identity
///
/// Only the persistence service hands these out; a freshly constructed or
/// freshly cloned record has no `RecordId` yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub Uuid);

impl RecordId {
    /// Generate a new record identity
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Transient in-memory graph handle
///
/// Every in-memory record instance gets a fresh key at construction. The
/// key is what owned items store as their back-reference; it is never used
/// as persisted identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordKey(pub Uuid);

impl RecordKey {
    /// Generate a new graph handle
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordKey {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecordKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of an owned composition item
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub Uuid);

impl ItemId {
    /// Generate a new item identity
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
