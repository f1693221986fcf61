//! Errors raised while supplying level data.

use thiserror::Error;

/// Level data could not be supplied or failed validation.
///
/// These are precondition violations: the engine reports them and does not retry.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level {index} is not defined")]
    Missing { index: u32 },
    #[error("level {index} is invalid: {reason}")]
    Invalid { index: u32, reason: String },
    #[error("failed to parse level data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read level data: {0}")]
    Io(#[from] std::io::Error),
}

impl LevelError {
    pub fn invalid(index: u32, reason: impl Into<String>) -> Self {
        LevelError::Invalid {
            index,
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = LevelError> = std::result::Result<T, E>;
