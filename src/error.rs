//! @ai:module:intent Define error types for timing and statistics queries
//! @ai:module:layer domain
//! @ai:module:public_api Error, Result
//! @ai:module:stateless true

use thiserror::Error;

/// @ai:intent Unified error type for all timekeeper operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Degrees of freedom must be positive, got {0}")]
    InvalidDegreesOfFreedom(usize),

    #[error("At least {required} data points are required, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Unknown task: {0}")]
    UnknownTask(String),

    #[error("No unique mode: several values share the highest frequency")]
    NoUniqueMode,

    #[error("Command for task {task} failed: {reason}")]
    CommandFailed { task: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// @ai:intent Build an insufficient-data error when fewer than `required` samples exist
    pub(crate) fn require(required: usize, actual: usize) -> Result<()> {
        if actual < required {
            Err(Error::InsufficientData { required, actual })
        } else {
            Ok(())
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
