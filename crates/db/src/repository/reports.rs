//! Report CRUD operations.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::{NewReportRow, ReportRow};
use crate::DbError;

const REPORT_COLUMNS: &str = "report_id, user_id, category, description, location, image_url, \
     latitude, longitude, ward_id, status, assigned_department, created_at, updated_at";

/// Insert a new report in `OPEN` status.
pub async fn create_report(pool: &SqlitePool, new: &NewReportRow) -> Result<ReportRow, DbError> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO reports
            (report_id, user_id, category, description, location, image_url,
             latitude, longitude, ward_id, status, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 'OPEN', ?, ?)
        "#,
    )
    .bind(id)
    .bind(new.user_id)
    .bind(&new.category)
    .bind(new.description.as_deref())
    .bind(new.location.as_deref())
    .bind(&new.image_url)
    .bind(new.latitude)
    .bind(new.longitude)
    .bind(new.ward_id)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    get_report(pool, id).await
}

/// Fetch a single report by its primary key.
pub async fn get_report(pool: &SqlitePool, id: Uuid) -> Result<ReportRow, DbError> {
    let query = format!("SELECT {REPORT_COLUMNS} FROM reports WHERE report_id = ?");
    sqlx::query_as::<_, ReportRow>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(DbError::NotFound)
}

/// Return all reports ordered by creation time (newest first).
pub async fn list_reports(pool: &SqlitePool) -> Result<Vec<ReportRow>, DbError> {
    let query = format!("SELECT {REPORT_COLUMNS} FROM reports ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, ReportRow>(&query)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Update a report's `status` and bump `updated_at`.
///
/// Returns `DbError::NotFound` if the report does not exist.
pub async fn update_status(
    pool: &SqlitePool,
    id: Uuid,
    status: &str,
) -> Result<ReportRow, DbError> {
    let result = sqlx::query("UPDATE reports SET status = ?, updated_at = ? WHERE report_id = ?")
        .bind(status)
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }

    get_report(pool, id).await
}

/// Persist the department assignment of a report.
pub async fn assign_department(
    pool: &SqlitePool,
    id: Uuid,
    department: &str,
) -> Result<ReportRow, DbError> {
    let result = sqlx::query(
        "UPDATE reports SET assigned_department = ?, updated_at = ? WHERE report_id = ?",
    )
    .bind(department)
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }

    get_report(pool, id).await
}

/// Permanently delete a report by its primary key.
///
/// Returns `DbError::NotFound` if no row was deleted.
pub async fn delete_report(pool: &SqlitePool, id: Uuid) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM reports WHERE report_id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }

    Ok(())
}
