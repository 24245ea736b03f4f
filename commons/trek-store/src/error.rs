use thiserror::Error;

/// Failure of an entity reader. Absence of an entity is not an error at
/// this layer; readers signal it with `None`.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn unavailable<T: ToString>(msg: T) -> Self {
        Self::Unavailable(msg.to_string())
    }

    pub fn backend<T: ToString>(msg: T) -> Self {
        Self::Backend(msg.to_string())
    }
}

/// Result type for entity reader operations.
pub type StoreResult<T> = Result<T, StoreError>;
