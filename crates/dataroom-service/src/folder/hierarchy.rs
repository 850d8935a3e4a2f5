//! Hierarchy engine: ancestor walks, path and breadcrumb resolution, and
//! the collision and cycle checks shared by folder mutations.
//!
//! Every function works inside the caller's transaction and follows
//! child-to-parent references only. Ancestor walks are bounded by
//! `max_depth` and track visited IDs, so a corrupted parent chain yields a
//! `CYCLE_DETECTED` error instead of looping.

use std::collections::HashSet;

use dataroom_core::error::AppError;
use dataroom_core::result::AppResult;
use dataroom_core::types::FolderId;
use dataroom_database::StoreTransaction;
use dataroom_entity::folder::{BreadcrumbEntry, Folder, FolderContents, FolderView};

/// Separator between names in a folder path.
pub const PATH_SEPARATOR: &str = "/";

/// The folder followed by each of its ancestors, ending at a root.
pub async fn ancestor_chain(
    tx: &mut dyn StoreTransaction,
    folder: &Folder,
    max_depth: usize,
) -> AppResult<Vec<Folder>> {
    let mut visited = HashSet::from([folder.id]);
    let mut chain = vec![folder.clone()];

    while let Some(parent_id) = chain.last().and_then(|f| f.parent_id) {
        if !visited.insert(parent_id) {
            return Err(AppError::cycle_detected(format!(
                "Folder {} appears twice in the ancestry of {}",
                parent_id, folder.id
            )));
        }
        if chain.len() > max_depth {
            return Err(AppError::cycle_detected(format!(
                "Ancestry of folder {} exceeds {max_depth} levels",
                folder.id
            )));
        }

        let parent = tx.find_folder(parent_id).await?.ok_or_else(|| {
            AppError::database(format!("Folder {parent_id} is referenced as a parent but missing"))
        })?;
        chain.push(parent);
    }

    Ok(chain)
}

/// Slash-joined names from the root ancestor down to `folder`.
pub async fn folder_path(
    tx: &mut dyn StoreTransaction,
    folder: &Folder,
    max_depth: usize,
) -> AppResult<String> {
    let chain = ancestor_chain(tx, folder, max_depth).await?;
    Ok(path_of(&chain))
}

/// `(id, name)` pairs from the root ancestor down to `folder`, inclusive.
pub async fn breadcrumb(
    tx: &mut dyn StoreTransaction,
    folder: &Folder,
    max_depth: usize,
) -> AppResult<Vec<BreadcrumbEntry>> {
    let chain = ancestor_chain(tx, folder, max_depth).await?;
    Ok(chain.iter().rev().map(BreadcrumbEntry::from).collect())
}

/// Whether a sibling under `parent_id` other than `exclude_id` is named `name`.
pub async fn check_name_collision(
    tx: &mut dyn StoreTransaction,
    name: &str,
    parent_id: Option<FolderId>,
    exclude_id: Option<FolderId>,
) -> AppResult<bool> {
    Ok(tx
        .find_sibling_by_name(parent_id, name, exclude_id)
        .await?
        .is_some())
}

/// Whether placing `folder_id` under `proposed_parent_id` would make the
/// folder its own ancestor. Moving to root is always safe.
///
/// Each ancestor visited is share-locked, so a concurrent move of any of
/// them waits for this transaction and then sees the new parent.
pub async fn check_circular(
    tx: &mut dyn StoreTransaction,
    folder_id: FolderId,
    proposed_parent_id: Option<FolderId>,
    max_depth: usize,
) -> AppResult<bool> {
    let mut visited = HashSet::new();
    let mut current = proposed_parent_id;

    while let Some(id) = current {
        if id == folder_id {
            return Ok(true);
        }
        if !visited.insert(id) || visited.len() > max_depth {
            return Err(AppError::cycle_detected(format!(
                "Ancestry walk from folder {id} did not reach a root"
            )));
        }

        current = tx
            .share_folder(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?
            .parent_id;
    }

    Ok(false)
}

/// Which kinds of direct contents a folder has.
pub async fn folder_contents(
    tx: &mut dyn StoreTransaction,
    folder_id: FolderId,
) -> AppResult<FolderContents> {
    Ok(FolderContents {
        has_subfolders: tx.count_subfolders(folder_id).await? > 0,
        has_documents: tx.count_documents(folder_id).await? > 0,
    })
}

/// Decorate a folder with its path, parent name and content counts.
pub async fn folder_view(
    tx: &mut dyn StoreTransaction,
    folder: Folder,
    max_depth: usize,
) -> AppResult<FolderView> {
    let chain = ancestor_chain(tx, &folder, max_depth).await?;
    let path = path_of(&chain);
    let parent_name = chain.get(1).map(|parent| parent.name.clone());
    let subfolder_count = tx.count_subfolders(folder.id).await?;
    let document_count = tx.count_documents(folder.id).await?;

    Ok(FolderView {
        folder,
        parent_name,
        path,
        subfolder_count,
        document_count,
    })
}

fn path_of(chain: &[Folder]) -> String {
    chain
        .iter()
        .rev()
        .map(|f| f.name.as_str())
        .collect::<Vec<_>>()
        .join(PATH_SEPARATOR)
}
