//! Result type aliases for the Users API.

use crate::UsersError;

/// A specialized `Result` type for Users API operations.
pub type UsersResult<T> = Result<T, UsersError>;
