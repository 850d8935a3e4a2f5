//! In-memory hierarchy store.
//!
//! Transactions are serialised: `begin` takes the store lock and works on a
//! private copy of the state, which replaces the shared state on commit.
//! Dropping the transaction discards the copy. Writes are checked against
//! the same constraints the PostgreSQL schema enforces.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

use dataroom_core::error::AppError;
use dataroom_core::result::AppResult;
use dataroom_core::types::{DocumentId, FolderId};
use dataroom_entity::document::{CreateDocument, Document};
use dataroom_entity::folder::{CreateFolder, Folder};

use super::{HierarchyStore, StoreTransaction};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    /// Folders in insertion order.
    folders: Vec<Folder>,
    /// Documents in insertion order.
    documents: Vec<Document>,
}

impl MemoryState {
    fn folder(&self, id: FolderId) -> Option<&Folder> {
        self.folders.iter().find(|f| f.id == id)
    }

    fn sibling_named(
        &self,
        parent_id: Option<FolderId>,
        name: &str,
        exclude_id: Option<FolderId>,
    ) -> Option<&Folder> {
        self.folders
            .iter()
            .find(|f| f.parent_id == parent_id && f.name == name && Some(f.id) != exclude_id)
    }

    fn require_parent(&self, parent_id: Option<FolderId>) -> AppResult<()> {
        match parent_id {
            Some(pid) if self.folder(pid).is_none() => Err(AppError::database(format!(
                "Foreign key violation: folder {pid} does not exist"
            ))),
            _ => Ok(()),
        }
    }

    fn require_unique_name(
        &self,
        parent_id: Option<FolderId>,
        name: &str,
        exclude_id: Option<FolderId>,
    ) -> AppResult<()> {
        if self.sibling_named(parent_id, name, exclude_id).is_some() {
            return Err(AppError::name_collision(format!(
                "A folder named '{name}' already exists in this location"
            )));
        }
        Ok(())
    }
}

/// Process-local store used in development mode and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HierarchyStore for MemoryStore {
    async fn begin(&self) -> AppResult<Box<dyn StoreTransaction>> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(MemoryTransaction { guard, working }))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

/// A serialised unit of work over a private copy of the state.
pub struct MemoryTransaction {
    guard: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
}

#[async_trait]
impl StoreTransaction for MemoryTransaction {
    async fn find_folder(&mut self, id: FolderId) -> AppResult<Option<Folder>> {
        Ok(self.working.folder(id).cloned())
    }

    async fn lock_folder(&mut self, id: FolderId) -> AppResult<Option<Folder>> {
        // The whole store is already held by this transaction.
        self.find_folder(id).await
    }

    async fn share_folder(&mut self, id: FolderId) -> AppResult<Option<Folder>> {
        self.find_folder(id).await
    }

    async fn list_folders(&mut self, parent_id: Option<FolderId>) -> AppResult<Vec<Folder>> {
        Ok(self
            .working
            .folders
            .iter()
            .filter(|f| f.parent_id == parent_id)
            .cloned()
            .collect())
    }

    async fn find_sibling_by_name(
        &mut self,
        parent_id: Option<FolderId>,
        name: &str,
        exclude_id: Option<FolderId>,
    ) -> AppResult<Option<Folder>> {
        Ok(self.working.sibling_named(parent_id, name, exclude_id).cloned())
    }

    async fn insert_folder(&mut self, data: &CreateFolder) -> AppResult<Folder> {
        self.working.require_parent(data.parent_id)?;
        self.working
            .require_unique_name(data.parent_id, &data.name, None)?;

        let folder = Folder {
            id: FolderId::new(),
            name: data.name.clone(),
            parent_id: data.parent_id,
            created_by: data.created_by,
            created_at: Utc::now(),
            description: data.description.clone(),
        };
        self.working.folders.push(folder.clone());
        Ok(folder)
    }

    async fn update_folder(&mut self, folder: &Folder) -> AppResult<Folder> {
        if folder.parent_id == Some(folder.id) {
            return Err(AppError::database(format!(
                "Check violation: folder {} cannot be its own parent",
                folder.id
            )));
        }
        self.working.require_parent(folder.parent_id)?;
        self.working
            .require_unique_name(folder.parent_id, &folder.name, Some(folder.id))?;

        let stored = self
            .working
            .folders
            .iter_mut()
            .find(|f| f.id == folder.id)
            .ok_or_else(|| AppError::not_found(format!("Folder {} not found", folder.id)))?;
        stored.name = folder.name.clone();
        stored.parent_id = folder.parent_id;
        stored.description = folder.description.clone();
        Ok(stored.clone())
    }

    async fn delete_folder(&mut self, id: FolderId) -> AppResult<bool> {
        let referenced = self.working.folders.iter().any(|f| f.parent_id == Some(id))
            || self.working.documents.iter().any(|d| d.folder_id == Some(id));
        if referenced {
            return Err(AppError::database(format!(
                "Foreign key violation: folder {id} is still referenced"
            )));
        }

        let before = self.working.folders.len();
        self.working.folders.retain(|f| f.id != id);
        Ok(self.working.folders.len() < before)
    }

    async fn count_subfolders(&mut self, id: FolderId) -> AppResult<u64> {
        Ok(self
            .working
            .folders
            .iter()
            .filter(|f| f.parent_id == Some(id))
            .count() as u64)
    }

    async fn find_document(&mut self, id: DocumentId) -> AppResult<Option<Document>> {
        Ok(self.working.documents.iter().find(|d| d.id == id).cloned())
    }

    async fn list_documents_by_folder(
        &mut self,
        folder_id: Option<FolderId>,
    ) -> AppResult<Vec<Document>> {
        Ok(self
            .working
            .documents
            .iter()
            .filter(|d| d.folder_id == folder_id)
            .cloned()
            .collect())
    }

    async fn count_documents(&mut self, folder_id: FolderId) -> AppResult<u64> {
        Ok(self
            .working
            .documents
            .iter()
            .filter(|d| d.folder_id == Some(folder_id))
            .count() as u64)
    }

    async fn insert_document(&mut self, data: &CreateDocument) -> AppResult<Document> {
        self.working.require_parent(data.folder_id)?;

        let document = Document {
            id: DocumentId::new(),
            filename: data.filename.clone(),
            mime_type: data.mime_type.clone(),
            size_bytes: data.size_bytes,
            description: data.description.clone(),
            folder_id: data.folder_id,
            uploaded_by: data.uploaded_by,
            uploaded_at: Utc::now(),
        };
        self.working.documents.push(document.clone());
        Ok(document)
    }

    async fn move_document(
        &mut self,
        id: DocumentId,
        folder_id: Option<FolderId>,
    ) -> AppResult<bool> {
        self.working.require_parent(folder_id)?;

        match self.working.documents.iter_mut().find(|d| d.id == id) {
            Some(document) => {
                document.folder_id = folder_id;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_document(&mut self, document: &Document) -> AppResult<Document> {
        self.working.require_parent(document.folder_id)?;

        let stored = self
            .working
            .documents
            .iter_mut()
            .find(|d| d.id == document.id)
            .ok_or_else(|| AppError::not_found(format!("Document {} not found", document.id)))?;
        stored.description = document.description.clone();
        stored.folder_id = document.folder_id;
        Ok(stored.clone())
    }

    async fn delete_document(&mut self, id: DocumentId) -> AppResult<bool> {
        let before = self.working.documents.len();
        self.working.documents.retain(|d| d.id != id);
        Ok(self.working.documents.len() < before)
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let MemoryTransaction { mut guard, working } = *self;
        debug!(
            folders = working.folders.len(),
            documents = working.documents.len(),
            "Committing in-memory transaction"
        );
        *guard = working;
        Ok(())
    }
}
