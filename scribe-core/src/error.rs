use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScribeError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Note store failures. None of these are retried.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store operation timed out after {0:?}")]
    Timeout(Duration),
}
