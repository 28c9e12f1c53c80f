//! Result type alias for decoco operations

use crate::Error;

/// Result type alias for decoco operations
pub type Result<T> = std::result::Result<T, Error>;
