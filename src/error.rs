// src/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("connection error: {0}")]
    Connection(#[source] mongodb::error::Error),

    #[error("index error: {0}")]
    Index(#[source] mongodb::error::Error),

    #[error("session error: {0}")]
    Session(String),

    #[error("document not found")]
    NotFound,

    #[error("write error: {0}")]
    Write(#[source] mongodb::error::Error),

    #[error("query error: {0}")]
    Query(#[source] mongodb::error::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        assert_eq!(StoreError::NotFound.to_string(), "document not found");
    }

    #[test]
    fn test_session_display_carries_context() {
        let err = StoreError::Session("unknown transaction 'tx-1'".to_string());
        assert_eq!(err.to_string(), "session error: unknown transaction 'tx-1'");
    }
}
