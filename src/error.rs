//! Error Types
//!
//! Failures that can occur while persisting the task list.

use thiserror::Error;

pub type TaskResult<T> = Result<T, TaskError>;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("browser storage: {0}")]
    Storage(#[from] gloo_storage::errors::StorageError),

    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}
