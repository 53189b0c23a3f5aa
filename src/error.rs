use thiserror::Error;

/// Failure taxonomy for attendance computations.
///
/// These are local computation errors with no recovery semantics; the caller
/// re-prompts for corrected input.
#[derive(Debug, Error)]
pub enum AttendanceError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// The classes-needed solver is undefined for targets at or above 100%.
    #[error("invalid target {target}: must be a finite percentage below 100")]
    InvalidTarget { target: f64 },
}

impl AttendanceError {
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AttendanceError>;
