use thiserror::Error;

/// Errors raised by a [`KeyValueStore`](super::KeyValueStore)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CacheError {
    #[error("Cache connection error: {message}")]
    Connection { message: String },

    #[error("Cache operation failed: {operation}: {message}")]
    Operation { operation: String, message: String },
}

impl CacheError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn operation(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Operation {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

pub type CacheResult<T> = Result<T, CacheError>;
