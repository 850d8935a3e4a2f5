//! Body, path and query extractors whose rejections use the API error body.
//!
//! Axum's own `Json`, `Path` and `Query` reject with plain text. These
//! wrappers delegate to them and turn any rejection into a
//! `VALIDATION_ERROR`.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use tracing::debug;

use dataroom_core::error::AppError;

use crate::error::ApiError;

/// JSON request body.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

/// Typed path parameters.
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

/// Typed query string.
#[derive(Debug, Clone)]
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(json_rejection(rejection)),
        }
    }
}

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => Err(path_rejection(rejection)),
        }
    }
}

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(query_rejection(rejection)),
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> ApiError {
    let message = match &rejection {
        JsonRejection::JsonDataError(_) => "Invalid JSON data",
        JsonRejection::JsonSyntaxError(_) => "Malformed JSON",
        JsonRejection::MissingJsonContentType(_) => {
            "Missing or invalid Content-Type header. Expected 'application/json'"
        }
        _ => "Invalid JSON request",
    };
    debug!(detail = %rejection.body_text(), "Rejected request body");
    ApiError(AppError::validation(format!(
        "{message}: {}",
        rejection.body_text()
    )))
}

fn path_rejection(rejection: PathRejection) -> ApiError {
    debug!(detail = %rejection.body_text(), "Rejected path parameters");
    ApiError(AppError::validation(format!(
        "Invalid path parameter: {}",
        rejection.body_text()
    )))
}

fn query_rejection(rejection: QueryRejection) -> ApiError {
    debug!(detail = %rejection.body_text(), "Rejected query string");
    ApiError(AppError::validation(format!(
        "Invalid query string: {}",
        rejection.body_text()
    )))
}
