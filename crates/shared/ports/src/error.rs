use thiserror::Error;

/// Errors raised by a storage adapter
///
/// Feature generation never retries: any of these aborts the whole run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Storage connection failed: {0}")]
    Connection(String),

    #[error("Query on '{collection}' failed: {reason}")]
    Query { collection: String, reason: String },

    #[error("Malformed record: {0}")]
    Malformed(String),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;
