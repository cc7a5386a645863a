//! Error types for repository operations.
//!
//! Missing rows are not errors: the CRUD operations report absence through
//! `Option`/`bool`.

use thiserror::Error;

/// Main error type for repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database operation error from diesel
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),

    /// Connection pool error
    #[error("Pool error: {0}")]
    Pool(String),
}

/// Type alias for Results that may fail with RepositoryError
pub type RepositoryResult<T> = Result<T, RepositoryError>;
