//! Derived folder views returned to callers.

use serde::{Deserialize, Serialize};

use dataroom_core::types::FolderId;

use super::model::Folder;
use crate::document::Document;

/// A folder together with values derived from the current tree state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderView {
    /// The stored folder record.
    #[serde(flatten)]
    pub folder: Folder,
    /// Name of the parent folder, if any.
    pub parent_name: Option<String>,
    /// Ancestor names joined with `/`, ending in this folder's name.
    pub path: String,
    /// Number of direct subfolders.
    pub subfolder_count: u64,
    /// Number of documents attached directly to this folder.
    pub document_count: u64,
}

/// A folder with its direct contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderDetail {
    /// The folder itself.
    #[serde(flatten)]
    pub view: FolderView,
    /// Direct subfolders.
    pub subfolders: Vec<FolderView>,
    /// Documents attached directly to this folder.
    pub documents: Vec<Document>,
}

/// One step of a breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadcrumbEntry {
    /// Folder ID.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
}

impl From<&Folder> for BreadcrumbEntry {
    fn from(folder: &Folder) -> Self {
        Self {
            id: folder.id,
            name: folder.name.clone(),
        }
    }
}

/// What a folder directly holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderContents {
    /// At least one folder has this folder as parent.
    pub has_subfolders: bool,
    /// At least one document is attached to this folder.
    pub has_documents: bool,
}

impl FolderContents {
    /// Whether the folder holds nothing.
    pub fn is_empty(&self) -> bool {
        !self.has_subfolders && !self.has_documents
    }
}

/// Result of a successful folder deletion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteOutcome {
    /// Folders removed, including the target.
    pub folders_deleted: u64,
    /// Documents reattached to root.
    pub documents_reassigned: u64,
}
