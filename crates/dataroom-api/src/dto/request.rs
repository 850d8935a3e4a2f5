//! Request DTOs with validation.

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use dataroom_core::types::FolderId;
use dataroom_entity::document::DocumentPatch;
use dataroom_entity::folder::FolderPatch;
use dataroom_service::{
    CreateFolderRequest as SvcCreateFolder, RegisterDocumentRequest as SvcRegisterDocument,
};

/// Create folder request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(min = 1, max = 255, message = "Folder name must be 1-255 characters"))]
    pub name: String,
    /// Parent folder (absent for root level).
    #[serde(default)]
    pub parent_id: Option<FolderId>,
    /// Description.
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

impl From<CreateFolderRequest> for SvcCreateFolder {
    fn from(req: CreateFolderRequest) -> Self {
        Self {
            name: req.name,
            parent_id: req.parent_id,
            description: req.description,
        }
    }
}

/// Update folder request body.
///
/// Absent fields are left untouched. An explicit `null` clears the
/// description, or for `parent_id` moves the folder to root.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateFolderRequest {
    /// New name.
    #[validate(length(min = 1, max = 255, message = "Folder name must be 1-255 characters"))]
    pub name: Option<String>,
    /// New description.
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    /// New parent.
    #[serde(default, deserialize_with = "present")]
    pub parent_id: Option<Option<FolderId>>,
}

impl From<UpdateFolderRequest> for FolderPatch {
    fn from(req: UpdateFolderRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            parent_id: req.parent_id,
        }
    }
}

/// Query for `GET /folders`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListFoldersQuery {
    /// Parent whose children to list (root folders when absent).
    pub parent_id: Option<FolderId>,
}

/// Query for `DELETE /folders/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteFolderQuery {
    /// Delete the folder together with everything beneath it.
    #[serde(default)]
    pub force: bool,
}

/// Query for `GET /documents`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListDocumentsQuery {
    /// Folder to list (root-level documents when absent).
    pub folder_id: Option<FolderId>,
}

/// Register document request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterDocumentRequest {
    /// File name.
    #[validate(length(min = 1, max = 255))]
    pub filename: String,
    /// MIME type.
    pub mime_type: Option<String>,
    /// Size in bytes.
    #[validate(range(min = 0))]
    pub size_bytes: i64,
    /// Description.
    pub description: Option<String>,
    /// Folder to attach to.
    #[serde(default)]
    pub folder_id: Option<FolderId>,
}

impl From<RegisterDocumentRequest> for SvcRegisterDocument {
    fn from(req: RegisterDocumentRequest) -> Self {
        Self {
            filename: req.filename,
            mime_type: req.mime_type,
            size_bytes: req.size_bytes,
            description: req.description,
            folder_id: req.folder_id,
        }
    }
}

/// Move document request body. A missing or `null` folder moves to root.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoveDocumentRequest {
    /// Destination folder.
    #[serde(default)]
    pub folder_id: Option<FolderId>,
}

/// Update document request body. Same absent/`null` rules as folders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDocumentRequest {
    /// New description.
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    /// New folder.
    #[serde(default, deserialize_with = "present")]
    pub folder_id: Option<Option<FolderId>>,
}

impl From<UpdateDocumentRequest> for DocumentPatch {
    fn from(req: UpdateDocumentRequest) -> Self {
        Self {
            description: req.description,
            folder_id: req.folder_id,
        }
    }
}

/// Marks a field as present, keeping an explicit `null` as `Some(None)`.
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
