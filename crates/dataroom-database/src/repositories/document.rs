//! Document repository implementation.

use sqlx::PgExecutor;

use dataroom_core::error::{AppError, ErrorKind};
use dataroom_core::result::AppResult;
use dataroom_core::types::{DocumentId, FolderId};
use dataroom_entity::document::model::{CreateDocument, Document};

const DOCUMENT_COLUMNS: &str =
    "id, filename, mime_type, size_bytes, description, folder_id, uploaded_by, uploaded_at";

/// Queries over the `documents` table.
#[derive(Debug, Clone, Copy)]
pub struct DocumentRepository;

impl DocumentRepository {
    /// Find a document by ID.
    pub async fn find_by_id<'e, E>(executor: E, id: DocumentId) -> AppResult<Option<Document>>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Document>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find document", e))
    }

    /// List documents attached to a folder, or root-level documents when `None`.
    pub async fn find_by_folder<'e, E>(
        executor: E,
        folder_id: Option<FolderId>,
    ) -> AppResult<Vec<Document>>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Document>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents \
             WHERE folder_id IS NOT DISTINCT FROM $1 ORDER BY uploaded_at ASC, id ASC"
        ))
        .bind(folder_id)
        .fetch_all(executor)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list documents", e))
    }

    /// Count documents attached directly to a folder.
    pub async fn count_by_folder<'e, E>(executor: E, folder_id: FolderId) -> AppResult<u64>
    where
        E: PgExecutor<'e>,
    {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM documents WHERE folder_id = $1")
                .bind(folder_id)
                .fetch_one(executor)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count documents", e)
                })?;
        Ok(count as u64)
    }

    /// Create a new document record.
    pub async fn create<'e, E>(executor: E, data: &CreateDocument) -> AppResult<Document>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Document>(&format!(
            "INSERT INTO documents (id, filename, mime_type, size_bytes, description, folder_id, uploaded_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {DOCUMENT_COLUMNS}"
        ))
        .bind(DocumentId::new())
        .bind(&data.filename)
        .bind(&data.mime_type)
        .bind(data.size_bytes)
        .bind(&data.description)
        .bind(data.folder_id)
        .bind(data.uploaded_by)
        .fetch_one(executor)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create document", e))
    }

    /// Point a document at another folder (or root).
    pub async fn set_folder<'e, E>(
        executor: E,
        id: DocumentId,
        folder_id: Option<FolderId>,
    ) -> AppResult<bool>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("UPDATE documents SET folder_id = $2 WHERE id = $1")
            .bind(id)
            .bind(folder_id)
            .execute(executor)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to move document", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Persist description and folder of a document.
    pub async fn update<'e, E>(executor: E, document: &Document) -> AppResult<Document>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Document>(&format!(
            "UPDATE documents SET description = $2, folder_id = $3 \
             WHERE id = $1 RETURNING {DOCUMENT_COLUMNS}"
        ))
        .bind(document.id)
        .bind(&document.description)
        .bind(document.folder_id)
        .fetch_optional(executor)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update document", e))?
        .ok_or_else(|| AppError::not_found(format!("Document {} not found", document.id)))
    }

    /// Delete a document record.
    pub async fn delete<'e, E>(executor: E, id: DocumentId) -> AppResult<bool>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete document", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
