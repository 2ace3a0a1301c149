//! The `ImageValidator` and `Notifier` traits — contracts for the two
//! side-effecting steps of the report lifecycle.
//!
//! Defined here (in the services crate) so both the lifecycle orchestrator
//! and individual implementations can import them without a circular
//! dependency.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ServiceError;

/// Result of analysing a report photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAnalysis {
    /// Whether the image plausibly shows a civic issue at all.
    pub valid: bool,
    /// The category the model believes the image shows.
    pub category: String,
    /// Model confidence in `[0, 1]`.
    pub confidence: f64,
}

/// Validates report photos before they enter the triage queue.
#[async_trait]
pub trait ImageValidator: Send + Sync {
    /// Analyse the image behind `image_url` and classify it.
    async fn analyze(&self, image_url: &str) -> Result<ImageAnalysis, ServiceError>;
}

/// Delivers status updates to citizens and alerts to officials.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Tell the submitting user that their report changed status.
    async fn send_status_update(
        &self,
        user_id: Uuid,
        report_id: Uuid,
        status: &str,
    ) -> Result<(), ServiceError>;

    /// Alert a department that a new report landed on its desk.
    async fn notify_official(&self, department: &str, report_id: Uuid)
        -> Result<(), ServiceError>;
}
