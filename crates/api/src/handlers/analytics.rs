use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;

use db::repository::analytics as analytics_repo;

use crate::{ApiError, AppState};

#[derive(Debug, serde::Serialize)]
pub struct DashboardStats {
    pub total: i64,
    pub open: i64,
    pub in_progress: i64,
    pub resolved: i64,
    /// Mean `updated_at - created_at` over resolved reports, in days.
    pub avg_resolution_days: Option<f64>,
    /// `"Ward {id}"` → percentage of that ward's reports resolved.
    pub ward_performance: BTreeMap<String, f64>,
}

pub async fn dashboard_stats(
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, ApiError> {
    let counts = analytics_repo::status_counts(&state.pool).await?;
    let avg_resolution_days = analytics_repo::avg_resolution_days(&state.pool).await?;

    let ward_performance = analytics_repo::ward_resolution(&state.pool)
        .await?
        .into_iter()
        .map(|w| {
            let pct = if w.total > 0 {
                (w.resolved as f64 / w.total as f64 * 100.0).round()
            } else {
                0.0
            };
            (format!("Ward {}", w.ward_id), pct)
        })
        .collect();

    Ok(Json(DashboardStats {
        total: counts.total,
        open: counts.open,
        in_progress: counts.in_progress,
        resolved: counts.resolved,
        avg_resolution_days,
        ward_performance,
    }))
}

/// `[lat, lng]` pairs for every report.
pub async fn heatmap(State(state): State<AppState>) -> Result<Json<Vec<[f64; 2]>>, ApiError> {
    let points = analytics_repo::heatmap_points(&state.pool).await?;
    Ok(Json(
        points.into_iter().map(|p| [p.latitude, p.longitude]).collect(),
    ))
}
