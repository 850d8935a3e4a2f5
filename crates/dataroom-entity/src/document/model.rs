//! Document entity model.
//!
//! Only the fields the folder hierarchy needs are modelled here; file bytes
//! live with the storage collaborator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use dataroom_core::types::{DocumentId, FolderId, UserId};

/// A document record, optionally attached to a folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Document {
    /// Unique document identifier.
    pub id: DocumentId,
    /// The file name (including extension).
    pub filename: String,
    /// MIME type of the file.
    pub mime_type: Option<String>,
    /// File size in bytes.
    pub size_bytes: i64,
    /// Free-text description.
    pub description: Option<String>,
    /// The folder holding this document (None = root level).
    pub folder_id: Option<FolderId>,
    /// The uploading user.
    pub uploaded_by: UserId,
    /// When the document was registered.
    pub uploaded_at: DateTime<Utc>,
}

impl Document {
    /// Whether the document sits at root level.
    pub fn is_at_root(&self) -> bool {
        self.folder_id.is_none()
    }

    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.filename
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.filename)
            .map(|ext| ext.to_lowercase())
    }
}

/// Data required to create a new document record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDocument {
    /// The file name.
    pub filename: String,
    /// MIME type.
    pub mime_type: Option<String>,
    /// File size in bytes.
    pub size_bytes: i64,
    /// Free-text description.
    pub description: Option<String>,
    /// The folder to attach to.
    pub folder_id: Option<FolderId>,
    /// The uploading user.
    pub uploaded_by: UserId,
}

/// Partial update of a document record. `None` leaves a field untouched.
///
/// `folder_id: Some(None)` detaches the document to root and
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentPatch {
    /// New description.
    pub description: Option<Option<String>>,
    /// New folder.
    pub folder_id: Option<Option<FolderId>>,
}

impl DocumentPatch {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.folder_id.is_none()
    }
}
