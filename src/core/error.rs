//! Errors reported while a MIP map is configured.
//!
//! Building and filtering never fail: broken invariants are checked
//! with `assert!` and numeric corner cases have explicit fallbacks.

use thiserror::Error;

use crate::core::pbrt::Float;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MipMapError {
    /// The `"wrap"` parameter names no known wrap mode.
    #[error("{0:?} is not a wrap mode, use \"repeat\", \"black\" or \"clamp\"")]
    UnknownWrapMode(String),

    /// The anisotropy limit has to be a positive, finite number.
    #[error("invalid max anisotropy {0}")]
    InvalidMaxAnisotropy(Float),

    /// Work partitions need at least one row or column.
    #[error("invalid {name} chunk size {size}")]
    InvalidChunkSize { name: &'static str, size: usize },
}

pub type Result<T> = std::result::Result<T, MipMapError>;
