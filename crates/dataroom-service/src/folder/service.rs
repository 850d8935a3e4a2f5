//! Folder CRUD operations with creator/admin enforcement.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use dataroom_core::config::HierarchyConfig;
use dataroom_core::error::AppError;
use dataroom_core::result::AppResult;
use dataroom_core::types::FolderId;
use dataroom_database::{HierarchyStore, StoreTransaction};
use dataroom_entity::folder::{
    BreadcrumbEntry, CreateFolder, DeleteOutcome, Folder, FolderDetail, FolderPatch, FolderView,
};

use super::{cascade, hierarchy};
use crate::context::RequestContext;

/// Manages folder CRUD operations over the folder forest.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Transactional store.
    store: Arc<dyn HierarchyStore>,
    /// Traversal bounds.
    config: HierarchyConfig,
}

/// Request to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolderRequest {
    /// Folder name.
    pub name: String,
    /// Parent folder ID (None for root-level).
    pub parent_id: Option<FolderId>,
    /// Free-text description.
    pub description: Option<String>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(store: Arc<dyn HierarchyStore>, config: HierarchyConfig) -> Self {
        Self { store, config }
    }

    /// Lists the direct children of `parent_id`, or root folders when `None`.
    pub async fn list_folders(
        &self,
        _ctx: &RequestContext,
        parent_id: Option<FolderId>,
    ) -> AppResult<Vec<FolderView>> {
        let mut tx = self.store.begin().await?;
        if let Some(parent_id) = parent_id {
            require_folder(tx.as_mut(), parent_id).await?;
        }

        let folders = tx.list_folders(parent_id).await?;
        let mut views = Vec::with_capacity(folders.len());
        for folder in folders {
            views.push(hierarchy::folder_view(tx.as_mut(), folder, self.config.max_depth).await?);
        }
        tx.commit().await?;

        Ok(views)
    }

    /// Gets a folder with its direct subfolders and documents.
    pub async fn get_folder(
        &self,
        _ctx: &RequestContext,
        folder_id: FolderId,
    ) -> AppResult<FolderDetail> {
        let mut tx = self.store.begin().await?;
        let folder = require_folder(tx.as_mut(), folder_id).await?;
        let max_depth = self.config.max_depth;

        let view = hierarchy::folder_view(tx.as_mut(), folder, max_depth).await?;
        let mut subfolders = Vec::new();
        for child in tx.list_folders(Some(folder_id)).await? {
            subfolders.push(hierarchy::folder_view(tx.as_mut(), child, max_depth).await?);
        }
        let documents = tx.list_documents_by_folder(Some(folder_id)).await?;
        tx.commit().await?;

        Ok(FolderDetail {
            view,
            subfolders,
            documents,
        })
    }

    /// Creates a new folder owned by the caller.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        req: CreateFolderRequest,
    ) -> AppResult<FolderView> {
        validate_name(&req.name)?;

        let mut tx = self.store.begin().await?;
        if let Some(parent_id) = req.parent_id {
            tx.lock_folder(parent_id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Parent folder {parent_id} not found")))?;
        }

        if hierarchy::check_name_collision(tx.as_mut(), &req.name, req.parent_id, None).await? {
            return Err(collision(&req.name));
        }

        let folder = tx
            .insert_folder(&CreateFolder {
                name: req.name,
                parent_id: req.parent_id,
                created_by: ctx.user_id,
                description: req.description,
            })
            .await?;
        let view = hierarchy::folder_view(tx.as_mut(), folder, self.config.max_depth).await?;
        tx.commit().await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %view.folder.id,
            path = %view.path,
            "Folder created"
        );

        Ok(view)
    }

    /// Renames, re-describes and/or moves a folder.
    ///
    /// A new name is checked against the siblings under the parent in effect
    /// at call time. When the same call also moves the folder, the resulting
    /// name is checked against the destination's children as well.
    pub async fn update_folder(
        &self,
        ctx: &RequestContext,
        folder_id: FolderId,
        patch: FolderPatch,
    ) -> AppResult<FolderView> {
        if patch.is_empty() {
            return Err(AppError::validation("No changes provided"));
        }

        let mut tx = self.store.begin().await?;
        let mut folder = lock_folder(tx.as_mut(), folder_id).await?;
        require_modify(ctx, &folder)?;

        if let Some(name) = &patch.name {
            validate_name(name)?;
            if *name != folder.name
                && hierarchy::check_name_collision(
                    tx.as_mut(),
                    name,
                    folder.parent_id,
                    Some(folder_id),
                )
                .await?
            {
                return Err(collision(name));
            }
        }

        let new_parent = patch
            .parent_id
            .filter(|parent_id| *parent_id != folder.parent_id);
        if let Some(parent_id) = new_parent {
            self.check_move(tx.as_mut(), folder_id, parent_id).await?;

            let name = patch.name.as_deref().unwrap_or(&folder.name);
            if hierarchy::check_name_collision(tx.as_mut(), name, parent_id, Some(folder_id))
                .await?
            {
                return Err(collision(name));
            }
        }

        if let Some(name) = patch.name {
            folder.name = name;
        }
        if let Some(description) = patch.description {
            folder.description = description;
        }
        if let Some(parent_id) = new_parent {
            folder.parent_id = parent_id;
        }

        let folder = tx.update_folder(&folder).await?;
        let view = hierarchy::folder_view(tx.as_mut(), folder, self.config.max_depth).await?;
        tx.commit().await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder_id,
            path = %view.path,
            moved = new_parent.is_some(),
            "Folder updated"
        );

        Ok(view)
    }

    /// Deletes a folder.
    ///
    /// A folder with subfolders or documents is only removed when `force`
    /// is set, in which case the whole subtree goes and every document in
    /// it is reattached to root. All of it commits or none of it does.
    pub async fn delete_folder(
        &self,
        ctx: &RequestContext,
        folder_id: FolderId,
        force: bool,
    ) -> AppResult<DeleteOutcome> {
        let mut tx = self.store.begin().await?;
        let folder = lock_folder(tx.as_mut(), folder_id).await?;
        require_modify(ctx, &folder)?;

        let contents = hierarchy::folder_contents(tx.as_mut(), folder_id).await?;
        if !contents.is_empty() && !force {
            return Err(AppError::not_empty(
                contents.has_subfolders,
                contents.has_documents,
            ));
        }

        let outcome = cascade::delete_subtree(tx.as_mut(), folder_id, self.config.max_depth).await?;
        tx.commit().await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder_id,
            name = %folder.name,
            force,
            folders_deleted = outcome.folders_deleted,
            documents_reassigned = outcome.documents_reassigned,
            "Folder deleted"
        );

        Ok(outcome)
    }

    /// Gets the breadcrumb trail from the root ancestor to the folder.
    pub async fn breadcrumb(
        &self,
        _ctx: &RequestContext,
        folder_id: FolderId,
    ) -> AppResult<Vec<BreadcrumbEntry>> {
        let mut tx = self.store.begin().await?;
        let folder = require_folder(tx.as_mut(), folder_id).await?;
        let crumbs = hierarchy::breadcrumb(tx.as_mut(), &folder, self.config.max_depth).await?;
        tx.commit().await?;
        Ok(crumbs)
    }

    async fn check_move(
        &self,
        tx: &mut dyn StoreTransaction,
        folder_id: FolderId,
        parent_id: Option<FolderId>,
    ) -> AppResult<()> {
        let Some(parent_id) = parent_id else {
            return Ok(());
        };
        if parent_id == folder_id {
            return Err(AppError::self_parent("A folder cannot be its own parent"));
        }

        tx.lock_folder(parent_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Parent folder {parent_id} not found")))?;

        if hierarchy::check_circular(tx, folder_id, Some(parent_id), self.config.max_depth).await? {
            return Err(AppError::circular_reference(
                "Cannot move a folder into one of its own descendants",
            ));
        }
        Ok(())
    }
}

async fn require_folder(tx: &mut dyn StoreTransaction, id: FolderId) -> AppResult<Folder> {
    tx.find_folder(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))
}

async fn lock_folder(tx: &mut dyn StoreTransaction, id: FolderId) -> AppResult<Folder> {
    tx.lock_folder(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))
}

fn require_modify(ctx: &RequestContext, folder: &Folder) -> AppResult<()> {
    if ctx.can_modify(folder.created_by) {
        Ok(())
    } else {
        Err(AppError::permission_denied(
            "Only the folder's creator or an admin may modify it",
        ))
    }
}

fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::validation("Folder name cannot be empty"));
    }
    Ok(())
}

fn collision(name: &str) -> AppError {
    AppError::name_collision(format!(
        "A folder named '{name}' already exists in this location"
    ))
}
