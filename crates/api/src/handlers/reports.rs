use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use db::models::ReportRow;
use db::repository::reports as report_repo;
use lifecycle::{NewReport, ReportStatus, UserRole};

use crate::extract::AuthUser;
use crate::{ApiError, AppState};

#[derive(serde::Deserialize)]
pub struct CreateReportDto {
    /// The mobile/SPA clients send this field as `userId`.
    #[serde(alias = "userId")]
    pub user_id: Uuid,
    pub category: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub image_url: String,
    pub latitude: f64,
    pub longitude: f64,
    pub ward_id: Option<i64>,
}

/// Accepted for client compatibility; nearby filtering is not implemented.
#[derive(serde::Deserialize)]
pub struct NearbyQuery {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(serde::Deserialize)]
pub struct UpdateStatusDto {
    pub status: String,
}

#[derive(serde::Deserialize)]
pub struct AssignDepartmentDto {
    pub department: String,
}

pub async fn create(
    State(state): State<AppState>,
    Json(dto): Json<CreateReportDto>,
) -> Result<(StatusCode, Json<ReportRow>), ApiError> {
    let report = state
        .lifecycle
        .create(NewReport {
            user_id: dto.user_id,
            category: dto.category,
            description: dto.description,
            location: dto.location,
            image_url: dto.image_url,
            latitude: dto.latitude,
            longitude: dto.longitude,
            ward_id: dto.ward_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(report)))
}

pub async fn list(
    Query(_nearby): Query<NearbyQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<ReportRow>>, ApiError> {
    let reports = report_repo::list_reports(&state.pool).await?;
    Ok(Json(reports))
}

pub async fn get_one(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<ReportRow>, ApiError> {
    let report = report_repo::get_report(&state.pool, id).await?;
    Ok(Json(report))
}

pub async fn update_status(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(dto): Json<UpdateStatusDto>,
) -> Result<Json<ReportRow>, ApiError> {
    let status = dto
        .status
        .parse::<ReportStatus>()
        .map_err(|_| ApiError::BadRequest(format!("unknown status: {}", dto.status)))?;

    let report = state.lifecycle.update_status(id, status).await?;
    Ok(Json(report))
}

pub async fn assign_department(
    caller: AuthUser,
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(dto): Json<AssignDepartmentDto>,
) -> Result<Json<ReportRow>, ApiError> {
    caller.require_role(&[UserRole::Admin])?;

    if dto.department.trim().is_empty() {
        return Err(ApiError::BadRequest("department must not be empty".into()));
    }

    let report = state.lifecycle.assign_department(id, &dto.department).await?;
    Ok(Json(report))
}

pub async fn remove(
    caller: AuthUser,
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    caller.require_role(&[UserRole::Admin])?;
    state.lifecycle.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
