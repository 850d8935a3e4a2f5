//! Cascading folder deletion.
//!
//! The subtree is traversed with an explicit stack rather than recursion.
//! Each folder is visited twice: first to push its children, then, once
//! every child has been removed, to reattach its documents to root and
//! delete the record. Children therefore always go before their parent
//! and the target folder goes last.

use std::collections::HashSet;

use tracing::debug;

use dataroom_core::error::AppError;
use dataroom_core::result::AppResult;
use dataroom_core::types::FolderId;
use dataroom_database::StoreTransaction;
use dataroom_entity::folder::DeleteOutcome;

#[derive(Debug, Clone, Copy)]
struct Frame {
    id: FolderId,
    depth: usize,
    expanded: bool,
}

/// Delete `root_id` and every folder beneath it, moving all of their
/// documents to root.
///
/// Runs entirely inside `tx`; the caller commits. Any error leaves the
/// transaction to be rolled back.
pub async fn delete_subtree(
    tx: &mut dyn StoreTransaction,
    root_id: FolderId,
    max_depth: usize,
) -> AppResult<DeleteOutcome> {
    let mut outcome = DeleteOutcome::default();
    let mut visited = HashSet::new();
    let mut stack = vec![Frame {
        id: root_id,
        depth: 0,
        expanded: false,
    }];

    while let Some(frame) = stack.pop() {
        if frame.expanded {
            outcome.documents_reassigned += detach_documents(tx, frame.id).await?;
            if !tx.delete_folder(frame.id).await? {
                return Err(AppError::database(format!(
                    "Folder {} disappeared during cascade",
                    frame.id
                )));
            }
            outcome.folders_deleted += 1;
            debug!(folder_id = %frame.id, depth = frame.depth, "Cascade removed folder");
            continue;
        }

        if !visited.insert(frame.id) {
            return Err(AppError::cycle_detected(format!(
                "Folder {} reached twice while cascading from {root_id}",
                frame.id
            )));
        }
        if frame.depth > max_depth {
            return Err(AppError::cycle_detected(format!(
                "Subtree of folder {root_id} exceeds {max_depth} levels"
            )));
        }

        stack.push(Frame {
            expanded: true,
            ..frame
        });
        let children = tx.list_folders(Some(frame.id)).await?;
        stack.extend(children.into_iter().rev().map(|child| Frame {
            id: child.id,
            depth: frame.depth + 1,
            expanded: false,
        }));
    }

    Ok(outcome)
}

/// Reattach every document in `folder_id` to root.
async fn detach_documents(tx: &mut dyn StoreTransaction, folder_id: FolderId) -> AppResult<u64> {
    let documents = tx.list_documents_by_folder(Some(folder_id)).await?;
    let mut moved = 0;
    for document in &documents {
        if tx.reassign_to_root(document.id).await? {
            moved += 1;
        }
    }
    Ok(moved)
}
