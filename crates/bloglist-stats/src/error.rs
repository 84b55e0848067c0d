//! Errors raised while turning untyped input into blog records.

use thiserror::Error;

/// Result type for record conversion.
pub type Result<T> = std::result::Result<T, RecordError>;

/// A blog record that cannot take part in aggregation.
///
/// Each variant names the offending record by its position in the input
/// so the upstream producer can be fixed instead of the data being
/// silently coerced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("expected a JSON array of blog records")]
    NotAnArray,

    #[error("record {index}: expected a JSON object")]
    NotAnObject { index: usize },

    #[error("record {index}: missing field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("record {index}: field `{field}` must be {expected}")]
    InvalidField {
        index: usize,
        field: &'static str,
        expected: &'static str,
    },
}
