//! Lifecycle-level error types.

use thiserror::Error;

/// Errors produced by the report lifecycle (validation + mutation).
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// A status string from the outside world didn't parse.
    #[error("unknown report status: '{0}'")]
    UnknownStatus(String),

    /// A required field was missing or empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The validation or notification service failed.
    #[error("service error: {0}")]
    Service(#[from] services::ServiceError),

    /// Persistence error from the db crate.
    #[error("database error: {0}")]
    Database(#[from] db::DbError),
}
