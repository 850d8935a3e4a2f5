//! Convenience result type alias for DataRoom.

use crate::error::AppError;

/// A specialized `Result` type for DataRoom operations.
pub type AppResult<T> = Result<T, AppError>;
