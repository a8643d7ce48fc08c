//! Error types for claim grading.
//!
//! Input problems the user can correct are kept apart from catalog failures
//! so callers can report them differently.

use thiserror::Error;

/// The input text is missing one of the required assertions, or one of them
/// does not decode into a valid value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid input format, please check your input string")]
pub struct FormatError;

/// Errors that can end a grading request.
#[derive(Debug, Error)]
pub enum GradeError {
    /// The claim text could not be parsed.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The catalog could not be fetched.
    #[error("failed to fetch models")]
    Catalog(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl GradeError {
    /// Returns `true` if the user can fix this by editing their input.
    pub fn is_user_error(&self) -> bool {
        matches!(self, GradeError::Format(_))
    }
}
