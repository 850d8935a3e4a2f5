//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use dataroom_core::types::{FolderId, UserId};

/// A folder in the data room hierarchy.
///
/// Only the child-to-parent edge is stored; children are always derived
/// by looking up folders whose `parent_id` matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier. Never changes after creation.
    pub id: FolderId,
    /// Folder name, unique among its siblings.
    pub name: String,
    /// Parent folder ID (null for root folders).
    pub parent_id: Option<FolderId>,
    /// The user who created the folder.
    pub created_by: UserId,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// Free-text description.
    pub description: Option<String>,
}

impl Folder {
    /// Check if this is a root folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Folder name.
    pub name: String,
    /// Parent folder (None for root).
    pub parent_id: Option<FolderId>,
    /// The creating user.
    pub created_by: UserId,
    /// Free-text description.
    pub description: Option<String>,
}

/// Partial update of a folder. `None` leaves a field untouched.
///
/// The nested options distinguish "not provided" from "set to null":
/// `parent_id: Some(None)` moves the folder to root and
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolderPatch {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<Option<String>>,
    /// New parent.
    pub parent_id: Option<Option<FolderId>>,
}

impl FolderPatch {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.parent_id.is_none()
    }
}
