//! Convenience result type alias for Torum.

use crate::error::AppError;

/// A specialized `Result` type for Torum operations.
pub type AppResult<T> = Result<T, AppError>;
