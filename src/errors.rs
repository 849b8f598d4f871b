//! Errors

use thiserror::Error;

/// Validation failures raised while adding tags.
///
/// These are expected user-input conditions. They are stored as the widget's
/// last error and shown to the user; they never abort an interaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    /// The submitted input was empty or whitespace only.
    #[error("input must not be empty")]
    EmptyInput,

    /// The tag is already in the collection.
    #[error("tag \"{0}\" already exists")]
    DuplicateTag(String),

    /// The collection already holds `limit` tags.
    #[error("tag limit of {limit} exceeded")]
    LimitExceeded {
        /// Maximum number of tags the collection accepts
        limit: usize,
    },
}

/// Returned by mutating operations while the widget is read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ModeError {
    /// The widget is disabled; the collection was left untouched.
    #[error("tag input is disabled")]
    Disabled,
}
