//! Service-level error type.

use thiserror::Error;

/// Errors returned by the validation and notification services.
#[derive(Debug, Error, Clone)]
pub enum ServiceError {
    /// The image validation backend failed or returned garbage.
    #[error("image validation error: {0}")]
    Validation(String),

    /// A notification could not be delivered.
    #[error("notification delivery error: {0}")]
    Delivery(String),
}
