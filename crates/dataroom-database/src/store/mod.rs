//! Transactional access to the folder forest and document attachments.
//!
//! Every hierarchy operation opens one [`StoreTransaction`], performs all
//! of its reads and writes through it, and calls
//! [`StoreTransaction::commit`] once. A transaction dropped without commit
//! is rolled back, which is how a failed cascade leaves no partial state.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use dataroom_core::result::AppResult;
use dataroom_core::types::{DocumentId, FolderId};
use dataroom_entity::document::{CreateDocument, Document};
use dataroom_entity::folder::{CreateFolder, Folder};

pub use memory::MemoryStore;
pub use postgres::PgHierarchyStore;

/// Source of transactions over the folder forest.
#[async_trait]
pub trait HierarchyStore: Send + Sync + std::fmt::Debug + 'static {
    /// Open a new transaction.
    async fn begin(&self) -> AppResult<Box<dyn StoreTransaction>>;

    /// Check that the store is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}

/// One atomic unit of work against the store.
#[async_trait]
pub trait StoreTransaction: Send {
    /// Find a folder by ID.
    async fn find_folder(&mut self, id: FolderId) -> AppResult<Option<Folder>>;

    /// Find a folder and keep it locked against concurrent writers until
    /// the transaction ends.
    async fn lock_folder(&mut self, id: FolderId) -> AppResult<Option<Folder>>;

    /// Find a folder and hold a shared lock on it until the transaction
    /// ends, so it cannot be re-parented concurrently.
    async fn share_folder(&mut self, id: FolderId) -> AppResult<Option<Folder>>;

    /// Direct children of `parent_id`, or root folders when `None`.
    async fn list_folders(&mut self, parent_id: Option<FolderId>) -> AppResult<Vec<Folder>>;

    /// A folder under `parent_id` named exactly `name`, other than `exclude_id`.
    async fn find_sibling_by_name(
        &mut self,
        parent_id: Option<FolderId>,
        name: &str,
        exclude_id: Option<FolderId>,
    ) -> AppResult<Option<Folder>>;

    /// Insert a folder and return the stored record.
    async fn insert_folder(&mut self, data: &CreateFolder) -> AppResult<Folder>;

    /// Persist name, parent and description of an existing folder.
    async fn update_folder(&mut self, folder: &Folder) -> AppResult<Folder>;

    /// Delete a single folder record. Returns `false` if it did not exist.
    async fn delete_folder(&mut self, id: FolderId) -> AppResult<bool>;

    /// Number of folders whose parent is `id`.
    async fn count_subfolders(&mut self, id: FolderId) -> AppResult<u64>;

    /// Find a document by ID.
    async fn find_document(&mut self, id: DocumentId) -> AppResult<Option<Document>>;

    /// Documents attached to `folder_id`, or root-level documents when `None`.
    async fn list_documents_by_folder(
        &mut self,
        folder_id: Option<FolderId>,
    ) -> AppResult<Vec<Document>>;

    /// Number of documents attached directly to `folder_id`.
    async fn count_documents(&mut self, folder_id: FolderId) -> AppResult<u64>;

    /// Insert a document record.
    async fn insert_document(&mut self, data: &CreateDocument) -> AppResult<Document>;

    /// Attach a document to `folder_id`, or to root when `None`.
    async fn move_document(
        &mut self,
        id: DocumentId,
        folder_id: Option<FolderId>,
    ) -> AppResult<bool>;

    /// Persist description and folder of an existing document.
    async fn update_document(&mut self, document: &Document) -> AppResult<Document>;

    /// Delete a document record. Returns `false` if it did not exist.
    async fn delete_document(&mut self, id: DocumentId) -> AppResult<bool>;

    /// Detach a document from its folder so it resides at root.
    async fn reassign_to_root(&mut self, id: DocumentId) -> AppResult<bool> {
        self.move_document(id, None).await
    }

    /// Make every change in this transaction visible.
    async fn commit(self: Box<Self>) -> AppResult<()>;
}
