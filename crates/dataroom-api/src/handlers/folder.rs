//! Folder CRUD and breadcrumb handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use validator::Validate;

use dataroom_core::types::FolderId;
use dataroom_entity::folder::{BreadcrumbEntry, DeleteOutcome, FolderDetail, FolderView};

use crate::dto::request::{
    CreateFolderRequest, DeleteFolderQuery, ListFoldersQuery, UpdateFolderRequest,
};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiPath, ApiQuery, AuthUser};
use crate::state::AppState;

/// GET /api/folders?parent_id=...
pub async fn list_folders(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<ListFoldersQuery>,
) -> Result<Json<ApiResponse<Vec<FolderView>>>, ApiError> {
    let folders = state
        .folder_service
        .list_folders(&auth, query.parent_id)
        .await?;
    Ok(Json(ApiResponse::ok(folders)))
}

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<CreateFolderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<FolderView>>), ApiError> {
    req.validate()?;
    let folder = state.folder_service.create_folder(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(folder))))
}

/// GET /api/folders/{id}
pub async fn get_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<FolderId>,
) -> Result<Json<ApiResponse<FolderDetail>>, ApiError> {
    let folder = state.folder_service.get_folder(&auth, id).await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// PUT /api/folders/{id}
pub async fn update_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<FolderId>,
    ApiJson(req): ApiJson<UpdateFolderRequest>,
) -> Result<Json<ApiResponse<FolderView>>, ApiError> {
    req.validate()?;
    let folder = state
        .folder_service
        .update_folder(&auth, id, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// DELETE /api/folders/{id}?force=true
pub async fn delete_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<FolderId>,
    ApiQuery(query): ApiQuery<DeleteFolderQuery>,
) -> Result<Json<ApiResponse<DeleteOutcome>>, ApiError> {
    let outcome = state
        .folder_service
        .delete_folder(&auth, id, query.force)
        .await?;
    Ok(Json(ApiResponse::ok(outcome)))
}

/// GET /api/folders/{id}/breadcrumb
pub async fn breadcrumb(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<FolderId>,
) -> Result<Json<ApiResponse<Vec<BreadcrumbEntry>>>, ApiError> {
    let crumbs = state.folder_service.breadcrumb(&auth, id).await?;
    Ok(Json(ApiResponse::ok(crumbs)))
}
