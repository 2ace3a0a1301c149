//! The report lifecycle orchestrator.
//!
//! `ReportLifecycle` is the central coordinator for every report mutation:
//! 1. On creation: runs the image validator, persists the report in `OPEN`
//!    status, routes it to a department (logged, alert sent), and confirms
//!    the submission to the citizen.
//! 2. On status change: persists the new status and notifies the citizen.
//! 3. On department assignment / deletion: persists the change.
//!
//! Reads go straight to the `db` repositories; only mutations with side
//! effects flow through here.

use std::sync::Arc;

use tracing::{info, instrument, warn};
use uuid::Uuid;

use db::models::{NewReportRow, ReportRow};
use db::repository::reports as report_repo;
use db::DbPool;
use services::{ImageValidator, Notifier};

use crate::models::{NewReport, ReportStatus};
use crate::routing::department_for;
use crate::LifecycleError;

/// Orchestrates report mutations and their side effects.
///
/// Construct one per process and share it behind an `Arc`; all methods take
/// `&self`.
pub struct ReportLifecycle {
    pool: DbPool,
    validator: Arc<dyn ImageValidator>,
    notifier: Arc<dyn Notifier>,
}

impl ReportLifecycle {
    /// Create a new lifecycle orchestrator.
    pub fn new(pool: DbPool, validator: Arc<dyn ImageValidator>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            pool,
            validator,
            notifier,
        }
    }

    /// Submit a new report.
    ///
    /// The validator's verdict is logged but never blocks the submission;
    /// a flagged report still enters triage in `OPEN` status so an official
    /// can reject it by hand.
    ///
    /// # Errors
    /// Returns `LifecycleError` for empty required fields, validator or
    /// notifier transport failures, or database problems.
    #[instrument(skip(self, new), fields(user_id = %new.user_id, category = %new.category))]
    pub async fn create(&self, new: NewReport) -> Result<ReportRow, LifecycleError> {
        if new.category.trim().is_empty() {
            return Err(LifecycleError::MissingField("category"));
        }
        if new.image_url.trim().is_empty() {
            return Err(LifecycleError::MissingField("image_url"));
        }

        // ------------------------------------------------------------------
        // 1. Image validation.
        // ------------------------------------------------------------------
        let analysis = self.validator.analyze(&new.image_url).await?;
        if analysis.valid {
            info!("AI confidence: {:.2} ({})", analysis.confidence, analysis.category);
        } else {
            warn!("Report flagged by validator as: {}", analysis.category);
        }

        // ------------------------------------------------------------------
        // 2. Persist the report in OPEN status.
        // ------------------------------------------------------------------
        let row = report_repo::create_report(
            &self.pool,
            &NewReportRow {
                user_id: new.user_id,
                category: new.category,
                description: new.description,
                location: new.location,
                image_url: new.image_url,
                latitude: new.latitude,
                longitude: new.longitude,
                ward_id: new.ward_id,
            },
        )
        .await?;

        // ------------------------------------------------------------------
        // 3. Route to a department.  The decision is logged and alerted,
        //    not written to the row.
        // ------------------------------------------------------------------
        let department = department_for(&row.category);
        info!(
            "Report {} ({}) routed to: {department}",
            row.report_id, row.category
        );
        self.notifier
            .notify_official(department, row.report_id)
            .await?;

        // ------------------------------------------------------------------
        // 4. Confirm the submission to the citizen.
        // ------------------------------------------------------------------
        self.notifier
            .send_status_update(row.user_id, row.report_id, ReportStatus::Open.as_str())
            .await?;

        Ok(row)
    }

    /// Move a report to a new status and notify the submitting citizen.
    #[instrument(skip(self), fields(report_id = %id, status = %status))]
    pub async fn update_status(
        &self,
        id: Uuid,
        status: ReportStatus,
    ) -> Result<ReportRow, LifecycleError> {
        let row = report_repo::update_status(&self.pool, id, status.as_str()).await?;

        self.notifier
            .send_status_update(row.user_id, row.report_id, status.as_str())
            .await?;

        Ok(row)
    }

    /// Persist a department assignment on a report.
    #[instrument(skip(self), fields(report_id = %id))]
    pub async fn assign_department(
        &self,
        id: Uuid,
        department: &str,
    ) -> Result<ReportRow, LifecycleError> {
        let row = report_repo::assign_department(&self.pool, id, department).await?;
        self.notifier.notify_official(department, id).await?;
        Ok(row)
    }

    /// Permanently delete a report.
    #[instrument(skip(self), fields(report_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<(), LifecycleError> {
        report_repo::delete_report(&self.pool, id).await?;
        Ok(())
    }
}
