//! Document attachment handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use validator::Validate;

use dataroom_core::types::DocumentId;
use dataroom_entity::document::Document;

use crate::dto::request::{
    ListDocumentsQuery, MoveDocumentRequest, RegisterDocumentRequest, UpdateDocumentRequest,
};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiPath, ApiQuery, AuthUser};
use crate::state::AppState;

/// GET /api/documents?folder_id=...
pub async fn list_documents(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<ListDocumentsQuery>,
) -> Result<Json<ApiResponse<Vec<Document>>>, ApiError> {
    let documents = state
        .document_service
        .list_documents(&auth, query.folder_id)
        .await?;
    Ok(Json(ApiResponse::ok(documents)))
}

/// POST /api/documents
pub async fn register_document(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<RegisterDocumentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Document>>), ApiError> {
    req.validate()?;
    let document = state
        .document_service
        .register_document(&auth, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(document))))
}

/// GET /api/documents/{id}
pub async fn get_document(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<DocumentId>,
) -> Result<Json<ApiResponse<Document>>, ApiError> {
    let document = state.document_service.get_document(&auth, id).await?;
    Ok(Json(ApiResponse::ok(document)))
}

/// POST /api/documents/{id}/move
pub async fn move_document(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<DocumentId>,
    ApiJson(req): ApiJson<MoveDocumentRequest>,
) -> Result<Json<ApiResponse<Document>>, ApiError> {
    let document = state
        .document_service
        .move_document(&auth, id, req.folder_id)
        .await?;
    Ok(Json(ApiResponse::ok(document)))
}

/// PUT /api/documents/{id}
pub async fn update_document(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<DocumentId>,
    ApiJson(req): ApiJson<UpdateDocumentRequest>,
) -> Result<Json<ApiResponse<Document>>, ApiError> {
    let document = state
        .document_service
        .update_document(&auth, id, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(document)))
}

/// DELETE /api/documents/{id}
pub async fn delete_document(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<DocumentId>,
) -> Result<Json<ApiResponse<Document>>, ApiError> {
    let document = state.document_service.delete_document(&auth, id).await?;
    Ok(Json(ApiResponse::ok(document)))
}
