use thiserror::Error;

#[derive(Debug, Error)]
pub enum AutoDdError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for AutoDdError {
    fn from(e: serde_json::Error) -> Self {
        AutoDdError::SerializationError(e.to_string())
    }
}
