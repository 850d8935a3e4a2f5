//! Test doubles for the service layer.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use dataroom_core::error::AppError;
use dataroom_core::result::AppResult;
use dataroom_core::types::{DocumentId, FolderId, UserId};
use dataroom_database::{HierarchyStore, MemoryStore, StoreTransaction};
use dataroom_entity::document::{CreateDocument, Document};
use dataroom_entity::folder::{CreateFolder, Folder};
use dataroom_entity::user::UserRole;

use crate::context::RequestContext;

pub(crate) fn member() -> RequestContext {
    RequestContext::new(UserId::new(), UserRole::Member, "member".to_string())
}

pub(crate) fn admin() -> RequestContext {
    RequestContext::new(UserId::new(), UserRole::Admin, "admin".to_string())
}

/// Memory store whose transactions fail the N-th folder deletion and count
/// shared folder locks.
#[derive(Debug, Clone)]
pub(crate) struct FailingStore {
    pub inner: MemoryStore,
    deletes_before_failure: Arc<AtomicUsize>,
    shared_locks: Arc<AtomicUsize>,
}

impl FailingStore {
    pub fn new(inner: MemoryStore, deletes_before_failure: usize) -> Self {
        Self {
            inner,
            deletes_before_failure: Arc::new(AtomicUsize::new(deletes_before_failure)),
            shared_locks: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared folder locks taken so far across all transactions.
    pub fn shared_locks(&self) -> usize {
        self.shared_locks.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HierarchyStore for FailingStore {
    async fn begin(&self) -> AppResult<Box<dyn StoreTransaction>> {
        Ok(Box::new(FailingTransaction {
            inner: self.inner.begin().await?,
            deletes_before_failure: Arc::clone(&self.deletes_before_failure),
            shared_locks: Arc::clone(&self.shared_locks),
        }))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(false)
    }
}

struct FailingTransaction {
    inner: Box<dyn StoreTransaction>,
    deletes_before_failure: Arc<AtomicUsize>,
    shared_locks: Arc<AtomicUsize>,
}

#[async_trait]
impl StoreTransaction for FailingTransaction {
    async fn find_folder(&mut self, id: FolderId) -> AppResult<Option<Folder>> {
        self.inner.find_folder(id).await
    }

    async fn lock_folder(&mut self, id: FolderId) -> AppResult<Option<Folder>> {
        self.inner.lock_folder(id).await
    }

    async fn share_folder(&mut self, id: FolderId) -> AppResult<Option<Folder>> {
        self.shared_locks.fetch_add(1, Ordering::SeqCst);
        self.inner.share_folder(id).await
    }

    async fn list_folders(&mut self, parent_id: Option<FolderId>) -> AppResult<Vec<Folder>> {
        self.inner.list_folders(parent_id).await
    }

    async fn find_sibling_by_name(
        &mut self,
        parent_id: Option<FolderId>,
        name: &str,
        exclude_id: Option<FolderId>,
    ) -> AppResult<Option<Folder>> {
        self.inner
            .find_sibling_by_name(parent_id, name, exclude_id)
            .await
    }

    async fn insert_folder(&mut self, data: &CreateFolder) -> AppResult<Folder> {
        self.inner.insert_folder(data).await
    }

    async fn update_folder(&mut self, folder: &Folder) -> AppResult<Folder> {
        self.inner.update_folder(folder).await
    }

    async fn delete_folder(&mut self, id: FolderId) -> AppResult<bool> {
        let remaining = self.deletes_before_failure.load(Ordering::SeqCst);
        if remaining == 0 {
            return Err(AppError::database("Injected store failure"));
        }
        self.deletes_before_failure
            .store(remaining - 1, Ordering::SeqCst);
        self.inner.delete_folder(id).await
    }

    async fn count_subfolders(&mut self, id: FolderId) -> AppResult<u64> {
        self.inner.count_subfolders(id).await
    }

    async fn find_document(&mut self, id: DocumentId) -> AppResult<Option<Document>> {
        self.inner.find_document(id).await
    }

    async fn list_documents_by_folder(
        &mut self,
        folder_id: Option<FolderId>,
    ) -> AppResult<Vec<Document>> {
        self.inner.list_documents_by_folder(folder_id).await
    }

    async fn count_documents(&mut self, folder_id: FolderId) -> AppResult<u64> {
        self.inner.count_documents(folder_id).await
    }

    async fn insert_document(&mut self, data: &CreateDocument) -> AppResult<Document> {
        self.inner.insert_document(data).await
    }

    async fn move_document(
        &mut self,
        id: DocumentId,
        folder_id: Option<FolderId>,
    ) -> AppResult<bool> {
        self.inner.move_document(id, folder_id).await
    }

    async fn update_document(&mut self, document: &Document) -> AppResult<Document> {
        self.inner.update_document(document).await
    }

    async fn delete_document(&mut self, id: DocumentId) -> AppResult<bool> {
        self.inner.delete_document(id).await
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.inner.commit().await
    }
}
