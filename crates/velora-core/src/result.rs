//! Result type aliases for Velora.

use crate::VeloraError;

/// A specialized `Result` type for Velora operations.
pub type VeloraResult<T> = Result<T, VeloraError>;
