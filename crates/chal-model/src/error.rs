//! Error types for model construction.

use thiserror::Error;

/// A field failed validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// A required string field is empty.
    #[error("{field} is an empty string")]
    Empty { field: String },

    /// A required list has no elements.
    #[error("{field} has no elements")]
    NoElements { field: String },

    /// An element of a string list is empty.
    #[error("{field}[{index}] is an empty string")]
    EmptyElement { field: String, index: usize },

    /// A required value is JSON `null`.
    #[error("{field} is null")]
    NullValue { field: String },
}

/// Convenience type alias for model operations.
pub type ModelResult<T> = std::result::Result<T, ModelError>;
