//! Folder repository implementation.

use sqlx::PgExecutor;

use dataroom_core::error::{AppError, ErrorKind};
use dataroom_core::result::AppResult;
use dataroom_core::types::FolderId;
use dataroom_entity::folder::model::{CreateFolder, Folder};

/// Unique index enforcing sibling name uniqueness.
const SIBLING_NAME_INDEX: &str = "folders_sibling_name_key";

const FOLDER_COLUMNS: &str = "id, name, parent_id, created_by, created_at, description";

/// Queries over the `folders` table.
#[derive(Debug, Clone, Copy)]
pub struct FolderRepository;

impl FolderRepository {
    /// Find a folder by ID.
    pub async fn find_by_id<'e, E>(executor: E, id: FolderId) -> AppResult<Option<Folder>>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Folder>(&format!("SELECT {FOLDER_COLUMNS} FROM folders WHERE id = $1"))
            .bind(id)
            .fetch_optional(executor)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    /// Find a folder by ID and hold a row lock until the transaction ends.
    pub async fn lock_by_id<'e, E>(executor: E, id: FolderId) -> AppResult<Option<Folder>>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Folder>(&format!(
            "SELECT {FOLDER_COLUMNS} FROM folders WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock folder", e))
    }

    /// Find a folder and take a shared row lock on it (`FOR SHARE`).
    pub async fn share_by_id<'e, E>(executor: E, id: FolderId) -> AppResult<Option<Folder>>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Folder>(&format!(
            "SELECT {FOLDER_COLUMNS} FROM folders WHERE id = $1 FOR SHARE"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock folder", e))
    }

    /// List direct children of a folder, or root folders when `parent_id` is `None`.
    pub async fn find_children<'e, E>(
        executor: E,
        parent_id: Option<FolderId>,
    ) -> AppResult<Vec<Folder>>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Folder>(&format!(
            "SELECT {FOLDER_COLUMNS} FROM folders \
             WHERE parent_id IS NOT DISTINCT FROM $1 ORDER BY created_at ASC, id ASC"
        ))
        .bind(parent_id)
        .fetch_all(executor)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folders", e))
    }

    /// Find a sibling with exactly this name, ignoring `exclude_id`.
    pub async fn find_sibling_by_name<'e, E>(
        executor: E,
        parent_id: Option<FolderId>,
        name: &str,
        exclude_id: Option<FolderId>,
    ) -> AppResult<Option<Folder>>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Folder>(&format!(
            "SELECT {FOLDER_COLUMNS} FROM folders \
             WHERE parent_id IS NOT DISTINCT FROM $1 AND name = $2 \
             AND ($3::uuid IS NULL OR id <> $3) LIMIT 1"
        ))
        .bind(parent_id)
        .bind(name)
        .bind(exclude_id)
        .fetch_optional(executor)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check sibling names", e)
        })
    }

    /// Create a new folder.
    pub async fn create<'e, E>(executor: E, data: &CreateFolder) -> AppResult<Folder>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Folder>(&format!(
            "INSERT INTO folders (id, name, parent_id, created_by, description) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {FOLDER_COLUMNS}"
        ))
        .bind(FolderId::new())
        .bind(&data.name)
        .bind(data.parent_id)
        .bind(data.created_by)
        .bind(&data.description)
        .fetch_one(executor)
        .await
        .map_err(|e| map_write_error(e, &data.name, "Failed to create folder"))
    }

    /// Persist the mutable fields (name, parent, description) of a folder.
    pub async fn update<'e, E>(executor: E, folder: &Folder) -> AppResult<Folder>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Folder>(&format!(
            "UPDATE folders SET name = $2, parent_id = $3, description = $4 \
             WHERE id = $1 RETURNING {FOLDER_COLUMNS}"
        ))
        .bind(folder.id)
        .bind(&folder.name)
        .bind(folder.parent_id)
        .bind(&folder.description)
        .fetch_optional(executor)
        .await
        .map_err(|e| map_write_error(e, &folder.name, "Failed to update folder"))?
        .ok_or_else(|| AppError::not_found(format!("Folder {} not found", folder.id)))
    }

    /// Delete a single folder record.
    pub async fn delete<'e, E>(executor: E, id: FolderId) -> AppResult<bool>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM folders WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete folder", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Count child folders.
    pub async fn count_children<'e, E>(executor: E, id: FolderId) -> AppResult<u64>
    where
        E: PgExecutor<'e>,
    {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM folders WHERE parent_id = $1")
            .bind(id)
            .fetch_one(executor)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count children", e)
            })?;
        Ok(count as u64)
    }
}

/// Translate the sibling-name index violation into a collision error.
fn map_write_error(err: sqlx::Error, name: &str, context: &str) -> AppError {
    match err {
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(SIBLING_NAME_INDEX) => {
            AppError::name_collision(format!(
                "A folder named '{name}' already exists in this location"
            ))
        }
        _ => AppError::with_source(ErrorKind::Database, context.to_string(), err),
    }
}
