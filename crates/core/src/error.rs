//! Errors raised while interpreting what the player said.

use thiserror::Error;

/// Why a recognition result could not be used.
///
/// Neither variant ends a session; both mean the question is asked again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecognitionError {
    /// Nothing was understood within the listening window.
    #[error("no speech was recognized")]
    Absent,
    /// Something was heard, but it is not an answer to the question.
    #[error("could not interpret answer: {text:?}")]
    Ambiguous { text: String },
}
