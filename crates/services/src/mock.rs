//! Test doubles for `ImageValidator` and `Notifier`.
//!
//! Useful in unit and integration tests where the real implementations are
//! either too slow (the stub validator sleeps) or irrelevant.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::traits::{ImageAnalysis, ImageValidator, Notifier};
use crate::ServiceError;

// ---------------------------------------------------------------------------
// MockValidator
// ---------------------------------------------------------------------------

/// A validator that records every analysed URL and returns a
/// programmer-specified result.
pub struct MockValidator {
    /// What `analyze` will return.
    pub result: Result<ImageAnalysis, ServiceError>,
    /// All image URLs seen by this validator (in call order).
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockValidator {
    /// Create a mock that always succeeds with the given analysis.
    pub fn returning(analysis: ImageAnalysis) -> Self {
        Self {
            result: Ok(analysis),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock that classifies everything as a valid issue of
    /// `category` with fixed confidence.
    pub fn accepting(category: impl Into<String>) -> Self {
        Self::returning(ImageAnalysis {
            valid: true,
            category: category.into(),
            confidence: 0.9,
        })
    }

    /// Create a mock that flags everything as invalid.
    pub fn rejecting(category: impl Into<String>) -> Self {
        Self::returning(ImageAnalysis {
            valid: false,
            category: category.into(),
            confidence: 0.9,
        })
    }

    /// Number of times this validator has been called.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ImageValidator for MockValidator {
    async fn analyze(&self, image_url: &str) -> Result<ImageAnalysis, ServiceError> {
        self.calls.lock().unwrap().push(image_url.to_string());
        self.result.clone()
    }
}

// ---------------------------------------------------------------------------
// MockNotifier
// ---------------------------------------------------------------------------

/// A single recorded status-update delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentUpdate {
    pub user_id: Uuid,
    pub report_id: Uuid,
    pub status: String,
}

/// A notifier that records every delivery instead of sending anything.
#[derive(Default)]
pub struct MockNotifier {
    /// All status updates sent through this notifier (in call order).
    pub status_updates: Arc<Mutex<Vec<SentUpdate>>>,
    /// All `(department, report_id)` official alerts (in call order).
    pub official_alerts: Arc<Mutex<Vec<(String, Uuid)>>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Status updates recorded so far.
    pub fn updates(&self) -> Vec<SentUpdate> {
        self.status_updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn send_status_update(
        &self,
        user_id: Uuid,
        report_id: Uuid,
        status: &str,
    ) -> Result<(), ServiceError> {
        self.status_updates.lock().unwrap().push(SentUpdate {
            user_id,
            report_id,
            status: status.to_string(),
        });
        Ok(())
    }

    async fn notify_official(
        &self,
        department: &str,
        report_id: Uuid,
    ) -> Result<(), ServiceError> {
        self.official_alerts
            .lock()
            .unwrap()
            .push((department.to_string(), report_id));
        Ok(())
    }
}
