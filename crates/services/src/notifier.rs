//! `LogNotifier` — log-only notification delivery.
//!
//! Integration points for a real deployment:
//! - FCM push via the user's `fcm_token`
//! - SMS via the user's phone number

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::traits::Notifier;
use crate::ServiceError;

/// A notifier that records every delivery in the application log and does
/// nothing else.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_status_update(
        &self,
        user_id: Uuid,
        report_id: Uuid,
        status: &str,
    ) -> Result<(), ServiceError> {
        info!("[NOTIFICATION SENT] To User {user_id}: Your report {report_id} is now {status}.");
        Ok(())
    }

    async fn notify_official(
        &self,
        department: &str,
        report_id: Uuid,
    ) -> Result<(), ServiceError> {
        info!("[ALERT] New Report {report_id} assigned to Department {department}.");
        Ok(())
    }
}
