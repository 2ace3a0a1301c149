//! Row structs that map 1-to-1 onto database tables.
//!
//! These are *persistence* models — they carry no domain behaviour.
//! Domain types (roles, statuses, the lifecycle itself) live in the
//! `lifecycle` crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// users
// ---------------------------------------------------------------------------

/// A persisted user row.
///
/// `password` holds the bcrypt hash and must never be serialised into an API
/// response; the api crate converts rows into a public view before returning
/// them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRow {
    pub user_id: Uuid,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    /// Identity provider: `LOCAL`, `GOOGLE`, `APPLE`.
    pub provider: String,
    pub role: String,
    pub fcm_token: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Partial update applied to a user row.  `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub fcm_token: Option<String>,
    pub role: Option<String>,
}

// ---------------------------------------------------------------------------
// reports
// ---------------------------------------------------------------------------

/// A persisted report row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReportRow {
    pub report_id: Uuid,
    pub user_id: Uuid,
    pub category: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub image_url: String,
    pub latitude: f64,
    pub longitude: f64,
    pub ward_id: Option<i64>,
    pub status: String,
    pub assigned_department: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column values for a new report insert.
#[derive(Debug, Clone)]
pub struct NewReportRow {
    pub user_id: Uuid,
    pub category: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub image_url: String,
    pub latitude: f64,
    pub longitude: f64,
    pub ward_id: Option<i64>,
}

// ---------------------------------------------------------------------------
// analytics projections
// ---------------------------------------------------------------------------

/// Per-status report counts for the dashboard.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatusCounts {
    pub total: i64,
    pub open: i64,
    pub in_progress: i64,
    pub resolved: i64,
}

/// Resolution ratio for a single ward.
#[derive(Debug, Clone, FromRow)]
pub struct WardResolution {
    pub ward_id: i64,
    pub total: i64,
    pub resolved: i64,
}

/// A single heatmap point (report coordinates).
#[derive(Debug, Clone, Copy, FromRow)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}
