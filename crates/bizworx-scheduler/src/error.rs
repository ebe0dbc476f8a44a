use thiserror::Error;

/// Errors that can occur within the scheduler subsystem.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The job store failed while listing or updating.
    #[error("Store error: {0}")]
    Store(#[from] bizworx_store::StoreError),
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
