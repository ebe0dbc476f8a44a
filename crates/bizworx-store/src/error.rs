use thiserror::Error;

/// Errors that can occur within the store subsystem.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying SQLite / rusqlite error.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// No job with the given ID exists.
    #[error("Job not found: {id}")]
    JobNotFound { id: String },

    /// No business with the given ID exists.
    #[error("Business not found: {id}")]
    BusinessNotFound { id: String },
}

pub type Result<T> = std::result::Result<T, StoreError>;
