//! PostgreSQL-backed hierarchy store.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use dataroom_core::error::{AppError, ErrorKind};
use dataroom_core::result::AppResult;
use dataroom_core::types::{DocumentId, FolderId};
use dataroom_entity::document::{CreateDocument, Document};
use dataroom_entity::folder::{CreateFolder, Folder};

use super::{HierarchyStore, StoreTransaction};
use crate::repositories::{DocumentRepository, FolderRepository};

/// Hierarchy store running each unit of work in a PostgreSQL transaction.
#[derive(Debug, Clone)]
pub struct PgHierarchyStore {
    pool: PgPool,
}

impl PgHierarchyStore {
    /// Create a store over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HierarchyStore for PgHierarchyStore {
    async fn begin(&self) -> AppResult<Box<dyn StoreTransaction>> {
        let tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;
        Ok(Box::new(PgStoreTransaction { tx }))
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }
}

/// An open PostgreSQL transaction. Rolled back by sqlx when dropped uncommitted.
pub struct PgStoreTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl StoreTransaction for PgStoreTransaction {
    async fn find_folder(&mut self, id: FolderId) -> AppResult<Option<Folder>> {
        FolderRepository::find_by_id(&mut *self.tx, id).await
    }

    async fn lock_folder(&mut self, id: FolderId) -> AppResult<Option<Folder>> {
        FolderRepository::lock_by_id(&mut *self.tx, id).await
    }

    async fn share_folder(&mut self, id: FolderId) -> AppResult<Option<Folder>> {
        FolderRepository::share_by_id(&mut *self.tx, id).await
    }

    async fn list_folders(&mut self, parent_id: Option<FolderId>) -> AppResult<Vec<Folder>> {
        FolderRepository::find_children(&mut *self.tx, parent_id).await
    }

    async fn find_sibling_by_name(
        &mut self,
        parent_id: Option<FolderId>,
        name: &str,
        exclude_id: Option<FolderId>,
    ) -> AppResult<Option<Folder>> {
        FolderRepository::find_sibling_by_name(&mut *self.tx, parent_id, name, exclude_id).await
    }

    async fn insert_folder(&mut self, data: &CreateFolder) -> AppResult<Folder> {
        FolderRepository::create(&mut *self.tx, data).await
    }

    async fn update_folder(&mut self, folder: &Folder) -> AppResult<Folder> {
        FolderRepository::update(&mut *self.tx, folder).await
    }

    async fn delete_folder(&mut self, id: FolderId) -> AppResult<bool> {
        FolderRepository::delete(&mut *self.tx, id).await
    }

    async fn count_subfolders(&mut self, id: FolderId) -> AppResult<u64> {
        FolderRepository::count_children(&mut *self.tx, id).await
    }

    async fn find_document(&mut self, id: DocumentId) -> AppResult<Option<Document>> {
        DocumentRepository::find_by_id(&mut *self.tx, id).await
    }

    async fn list_documents_by_folder(
        &mut self,
        folder_id: Option<FolderId>,
    ) -> AppResult<Vec<Document>> {
        DocumentRepository::find_by_folder(&mut *self.tx, folder_id).await
    }

    async fn count_documents(&mut self, folder_id: FolderId) -> AppResult<u64> {
        DocumentRepository::count_by_folder(&mut *self.tx, folder_id).await
    }

    async fn insert_document(&mut self, data: &CreateDocument) -> AppResult<Document> {
        DocumentRepository::create(&mut *self.tx, data).await
    }

    async fn move_document(
        &mut self,
        id: DocumentId,
        folder_id: Option<FolderId>,
    ) -> AppResult<bool> {
        DocumentRepository::set_folder(&mut *self.tx, id, folder_id).await
    }

    async fn update_document(&mut self, document: &Document) -> AppResult<Document> {
        DocumentRepository::update(&mut *self.tx, document).await
    }

    async fn delete_document(&mut self, id: DocumentId) -> AppResult<bool> {
        DocumentRepository::delete(&mut *self.tx, id).await
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })
    }
}
