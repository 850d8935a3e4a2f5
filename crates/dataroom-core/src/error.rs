//! Unified application error types for DataRoom.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Every [`ErrorKind`] carries a stable
//! reason code so callers can branch on failures without parsing messages.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The caller could not be authenticated.
    Authentication,
    /// The caller is authenticated but may not perform the action.
    Authorization,
    /// The requested resource was not found.
    NotFound,
    /// Input validation failed (e.g. an empty folder name).
    Validation,
    /// A sibling folder with the same name already exists.
    NameCollision,
    /// A folder was asked to become its own parent.
    SelfParent,
    /// A folder was asked to move beneath one of its own descendants.
    CircularReference,
    /// A folder still holds subfolders or documents.
    NotEmpty,
    /// A parent chain looped or exceeded the traversal bound.
    CycleDetected,
    /// The backing store failed.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal server error occurred.
    Internal,
}

impl ErrorKind {
    /// Machine-readable reason code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Authentication => "UNAUTHENTICATED",
            Self::Authorization => "PERMISSION_DENIED",
            Self::NotFound => "NOT_FOUND",
            Self::Validation => "VALIDATION_ERROR",
            Self::NameCollision => "NAME_COLLISION",
            Self::SelfParent => "SELF_PARENT",
            Self::CircularReference => "CIRCULAR_REFERENCE",
            Self::NotEmpty => "NOT_EMPTY",
            Self::CycleDetected => "CYCLE_DETECTED",
            Self::Database => "STORE_FAILURE",
            Self::Configuration => "CONFIGURATION",
            Self::Serialization => "SERIALIZATION",
            Self::Internal => "INTERNAL",
        }
    }

    /// Whether this kind is a caller mistake rather than a server fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Authentication
                | Self::Authorization
                | Self::NotFound
                | Self::Validation
                | Self::NameCollision
                | Self::SelfParent
                | Self::CircularReference
                | Self::NotEmpty
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The unified application error used throughout DataRoom.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. `details` holds structured data for the
/// caller, such as which contents block a folder deletion.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional structured details for the caller.
    pub details: Option<serde_json::Value>,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
            source: Some(Box::new(source)),
        }
    }

    /// Attach structured details to this error.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Create an authentication error.
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    /// Create an authorization error.
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a sibling name collision error.
    pub fn name_collision(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NameCollision, message)
    }

    /// Create a self-parent error.
    pub fn self_parent(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SelfParent, message)
    }

    /// Create a circular reference error.
    pub fn circular_reference(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CircularReference, message)
    }

    /// Create a not-empty error reporting which contents block the deletion.
    pub fn not_empty(has_subfolders: bool, has_documents: bool) -> Self {
        Self::new(
            ErrorKind::NotEmpty,
            "Folder is not empty; use force=true to delete the folder and all its contents",
        )
        .with_details(serde_json::json!({
            "has_subfolders": has_subfolders,
            "has_documents": has_documents,
        }))
    }

    /// Create a cycle-detected error.
    pub fn cycle_detected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CycleDetected, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            details: self.details.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Internal, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
