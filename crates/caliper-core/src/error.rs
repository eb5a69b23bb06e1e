use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown independence level: {0}")]
    UnknownIndependenceLevel(String),

    #[error("unknown detail level: {0}")]
    UnknownDetailLevel(String),
}
