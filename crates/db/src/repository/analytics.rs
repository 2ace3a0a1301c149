//! Aggregate queries backing the dashboard.
//!
//! Read-only projections over the `reports` table; nothing here mutates state.

use sqlx::{Row, SqlitePool};

use crate::models::{GeoPoint, StatusCounts, WardResolution};
use crate::DbError;

/// Count reports overall and per dashboard status bucket.
pub async fn status_counts(pool: &SqlitePool) -> Result<StatusCounts, DbError> {
    let row = sqlx::query(
        r#"
        SELECT
            COUNT(*)                                                  AS total,
            COALESCE(SUM(CASE WHEN status = 'OPEN'        THEN 1 ELSE 0 END), 0) AS open,
            COALESCE(SUM(CASE WHEN status = 'IN_PROGRESS' THEN 1 ELSE 0 END), 0) AS in_progress,
            COALESCE(SUM(CASE WHEN status = 'RESOLVED'    THEN 1 ELSE 0 END), 0) AS resolved
        FROM reports
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(StatusCounts {
        total: row.try_get("total")?,
        open: row.try_get("open")?,
        in_progress: row.try_get("in_progress")?,
        resolved: row.try_get("resolved")?,
    })
}

/// Mean resolution time in days over `RESOLVED` reports.
///
/// Returns `None` when nothing has been resolved yet.
pub async fn avg_resolution_days(pool: &SqlitePool) -> Result<Option<f64>, DbError> {
    let row = sqlx::query(
        r#"
        SELECT AVG(julianday(updated_at) - julianday(created_at)) AS avg_days
        FROM reports
        WHERE status = 'RESOLVED'
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(row.try_get("avg_days")?)
}

/// Per-ward report totals and resolved counts, for wards that have reports.
pub async fn ward_resolution(pool: &SqlitePool) -> Result<Vec<WardResolution>, DbError> {
    let rows = sqlx::query_as::<_, WardResolution>(
        r#"
        SELECT
            ward_id,
            COUNT(*) AS total,
            COALESCE(SUM(CASE WHEN status = 'RESOLVED' THEN 1 ELSE 0 END), 0) AS resolved
        FROM reports
        WHERE ward_id IS NOT NULL
        GROUP BY ward_id
        ORDER BY ward_id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Coordinates of every report, for the dashboard heatmap.
pub async fn heatmap_points(pool: &SqlitePool) -> Result<Vec<GeoPoint>, DbError> {
    let rows = sqlx::query_as::<_, GeoPoint>("SELECT latitude, longitude FROM reports")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}
