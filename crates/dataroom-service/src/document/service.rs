//! Document registration and folder attachment.
//!
//! Only the record side of a document lives here; file bytes are handled
//! by the storage collaborator.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use dataroom_core::error::AppError;
use dataroom_core::result::AppResult;
use dataroom_core::types::{DocumentId, FolderId};
use dataroom_database::{HierarchyStore, StoreTransaction};
use dataroom_entity::document::{CreateDocument, Document, DocumentPatch};

use crate::context::RequestContext;

/// Manages document records and their folder attachment.
#[derive(Debug, Clone)]
pub struct DocumentService {
    store: Arc<dyn HierarchyStore>,
}

/// Request to register a document record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterDocumentRequest {
    /// The file name.
    pub filename: String,
    /// MIME type.
    pub mime_type: Option<String>,
    /// File size in bytes.
    pub size_bytes: i64,
    /// Free-text description.
    pub description: Option<String>,
    /// Folder to attach to (None for root level).
    pub folder_id: Option<FolderId>,
}

impl DocumentService {
    /// Creates a new document service.
    pub fn new(store: Arc<dyn HierarchyStore>) -> Self {
        Self { store }
    }

    /// Lists documents in a folder, or at root level when `folder_id` is `None`.
    pub async fn list_documents(
        &self,
        _ctx: &RequestContext,
        folder_id: Option<FolderId>,
    ) -> AppResult<Vec<Document>> {
        let mut tx = self.store.begin().await?;
        if let Some(folder_id) = folder_id {
            require_folder(tx.as_mut(), folder_id).await?;
        }
        let documents = tx.list_documents_by_folder(folder_id).await?;
        tx.commit().await?;
        Ok(documents)
    }

    /// Gets a document by ID.
    pub async fn get_document(
        &self,
        _ctx: &RequestContext,
        document_id: DocumentId,
    ) -> AppResult<Document> {
        let mut tx = self.store.begin().await?;
        let document = require_document(tx.as_mut(), document_id).await?;
        tx.commit().await?;
        Ok(document)
    }

    /// Registers a document uploaded by the caller.
    pub async fn register_document(
        &self,
        ctx: &RequestContext,
        req: RegisterDocumentRequest,
    ) -> AppResult<Document> {
        if req.filename.trim().is_empty() {
            return Err(AppError::validation("Filename cannot be empty"));
        }
        if req.size_bytes < 0 {
            return Err(AppError::validation("Document size cannot be negative"));
        }

        let mut tx = self.store.begin().await?;
        if let Some(folder_id) = req.folder_id {
            lock_folder(tx.as_mut(), folder_id).await?;
        }

        let document = tx
            .insert_document(&CreateDocument {
                filename: req.filename,
                mime_type: req.mime_type,
                size_bytes: req.size_bytes,
                description: req.description,
                folder_id: req.folder_id,
                uploaded_by: ctx.user_id,
            })
            .await?;
        tx.commit().await?;

        info!(
            user_id = %ctx.user_id,
            document_id = %document.id,
            folder_id = ?document.folder_id,
            filename = %document.filename,
            "Document registered"
        );

        Ok(document)
    }

    /// Attaches a document to another folder, or to root when `folder_id` is `None`.
    pub async fn move_document(
        &self,
        ctx: &RequestContext,
        document_id: DocumentId,
        folder_id: Option<FolderId>,
    ) -> AppResult<Document> {
        let patch = DocumentPatch {
            folder_id: Some(folder_id),
            ..Default::default()
        };
        self.update_document(ctx, document_id, patch).await
    }

    /// Changes a document's description and/or folder.
    ///
    /// Only the uploader or an admin may modify a document, and a new folder
    /// must exist.
    pub async fn update_document(
        &self,
        ctx: &RequestContext,
        document_id: DocumentId,
        patch: DocumentPatch,
    ) -> AppResult<Document> {
        if patch.is_empty() {
            return Err(AppError::validation("No changes provided"));
        }

        let mut tx = self.store.begin().await?;
        let mut document = require_document(tx.as_mut(), document_id).await?;
        require_modify(ctx, &document)?;

        if let Some(Some(folder_id)) = patch.folder_id {
            lock_folder(tx.as_mut(), folder_id).await?;
        }
        if let Some(description) = patch.description {
            document.description = description;
        }
        if let Some(folder_id) = patch.folder_id {
            document.folder_id = folder_id;
        }

        let document = tx.update_document(&document).await?;
        tx.commit().await?;

        info!(
            user_id = %ctx.user_id,
            document_id = %document_id,
            folder_id = ?document.folder_id,
            "Document updated"
        );

        Ok(document)
    }

    /// Deletes a document record. Only the uploader or an admin may do so.
    pub async fn delete_document(
        &self,
        ctx: &RequestContext,
        document_id: DocumentId,
    ) -> AppResult<Document> {
        let mut tx = self.store.begin().await?;
        let document = require_document(tx.as_mut(), document_id).await?;
        require_modify(ctx, &document)?;

        if !tx.delete_document(document_id).await? {
            return Err(AppError::not_found(format!(
                "Document {document_id} not found"
            )));
        }
        tx.commit().await?;

        info!(
            user_id = %ctx.user_id,
            document_id = %document_id,
            filename = %document.filename,
            "Document deleted"
        );

        Ok(document)
    }
}

async fn require_folder(tx: &mut dyn StoreTransaction, id: FolderId) -> AppResult<()> {
    tx.find_folder(id)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))
}

async fn lock_folder(tx: &mut dyn StoreTransaction, id: FolderId) -> AppResult<()> {
    tx.lock_folder(id)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))
}

fn require_modify(ctx: &RequestContext, document: &Document) -> AppResult<()> {
    if ctx.can_modify(document.uploaded_by) {
        Ok(())
    } else {
        Err(AppError::permission_denied(
            "Only the uploader or an admin may modify this document",
        ))
    }
}

async fn require_document(tx: &mut dyn StoreTransaction, id: DocumentId) -> AppResult<Document> {
    tx.find_document(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Document {id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataroom_core::config::HierarchyConfig;
    use dataroom_core::error::ErrorKind;
    use dataroom_database::MemoryStore;

    use crate::folder::{CreateFolderRequest, FolderService};
    use crate::testing::{admin, member};

    fn services() -> (FolderService, DocumentService) {
        let store: Arc<dyn HierarchyStore> = Arc::new(MemoryStore::new());
        (
            FolderService::new(Arc::clone(&store), HierarchyConfig::default()),
            DocumentService::new(store),
        )
    }

    fn register(folder_id: Option<FolderId>) -> RegisterDocumentRequest {
        RegisterDocumentRequest {
            filename: "term-sheet.pdf".to_string(),
            mime_type: Some("application/pdf".to_string()),
            size_bytes: 4096,
            description: None,
            folder_id,
        }
    }

    async fn folder(folders: &FolderService, ctx: &RequestContext, name: &str) -> FolderId {
        folders
            .create_folder(
                ctx,
                CreateFolderRequest {
                    name: name.to_string(),
                    parent_id: None,
                    description: None,
                },
            )
            .await
            .unwrap()
            .folder
            .id
    }

    #[tokio::test]
    async fn test_register_and_list() {
        let (folders, documents) = services();
        let ctx = member();
        let deals = folder(&folders, &ctx, "Deals").await;

        let in_folder = documents
            .register_document(&ctx, register(Some(deals)))
            .await
            .unwrap();
        let at_root = documents.register_document(&ctx, register(None)).await.unwrap();
        assert_eq!(in_folder.uploaded_by, ctx.user_id);

        let listed = documents.list_documents(&ctx, Some(deals)).await.unwrap();
        assert_eq!(listed, vec![in_folder.clone()]);
        let listed = documents.list_documents(&ctx, None).await.unwrap();
        assert_eq!(listed, vec![at_root]);

        let fetched = documents.get_document(&ctx, in_folder.id).await.unwrap();
        assert_eq!(fetched.filename, "term-sheet.pdf");
    }

    #[tokio::test]
    async fn test_register_into_missing_folder() {
        let (_, documents) = services();
        let err = documents
            .register_document(&member(), register(Some(FolderId::new())))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_register_rejects_blank_filename() {
        let (_, documents) = services();
        let req = RegisterDocumentRequest {
            filename: " ".to_string(),
            ..register(None)
        };
        let err = documents.register_document(&member(), req).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_move_requires_uploader_or_admin() {
        let (folders, documents) = services();
        let uploader = member();
        let target = folder(&folders, &uploader, "Target").await;
        let doc = documents
            .register_document(&uploader, register(None))
            .await
            .unwrap();

        let err = documents
            .move_document(&member(), doc.id, Some(target))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);

        let moved = documents
            .move_document(&uploader, doc.id, Some(target))
            .await
            .unwrap();
        assert_eq!(moved.folder_id, Some(target));

        let moved = documents.move_document(&admin(), doc.id, None).await.unwrap();
        assert!(moved.is_at_root());
    }

    #[tokio::test]
    async fn test_move_to_missing_folder() {
        let (_, documents) = services();
        let ctx = member();
        let doc = documents.register_document(&ctx, register(None)).await.unwrap();

        let err = documents
            .move_document(&ctx, doc.id, Some(FolderId::new()))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        let err = documents
            .get_document(&ctx, DocumentId::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_update_description_and_folder() {
        let (folders, documents) = services();
        let uploader = member();
        let target = folder(&folders, &uploader, "Target").await;
        let doc = documents
            .register_document(&uploader, register(None))
            .await
            .unwrap();

        let err = documents
            .update_document(&uploader, doc.id, DocumentPatch::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let patch = DocumentPatch {
            description: Some(Some("Signed copy".to_string())),
            folder_id: Some(Some(target)),
        };
        let err = documents
            .update_document(&member(), doc.id, patch.clone())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);

        let updated = documents
            .update_document(&uploader, doc.id, patch)
            .await
            .unwrap();
        assert_eq!(updated.description.as_deref(), Some("Signed copy"));
        assert_eq!(updated.folder_id, Some(target));

        // Absent fields are untouched; an explicit None clears.
        let cleared = documents
            .update_document(
                &admin(),
                doc.id,
                DocumentPatch {
                    description: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(cleared.description, None);
        assert_eq!(cleared.folder_id, Some(target));

        let err = documents
            .update_document(
                &uploader,
                doc.id,
                DocumentPatch {
                    folder_id: Some(Some(FolderId::new())),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_delete_last_document_empties_folder() {
        let (folders, documents) = services();
        let uploader = member();
        let deals = folder(&folders, &uploader, "Deals").await;
        let doc = documents
            .register_document(&uploader, register(Some(deals)))
            .await
            .unwrap();

        let err = folders.delete_folder(&uploader, deals, false).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotEmpty);

        let err = documents
            .delete_document(&member(), doc.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);

        let deleted = documents.delete_document(&uploader, doc.id).await.unwrap();
        assert_eq!(deleted.id, doc.id);
        let err = documents.get_document(&uploader, doc.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        let err = documents.delete_document(&admin(), doc.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let outcome = folders.delete_folder(&uploader, deals, false).await.unwrap();
        assert_eq!(outcome.folders_deleted, 1);
        assert_eq!(outcome.documents_reassigned, 0);
    }
}
