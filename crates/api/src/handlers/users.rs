use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use db::models::{UserPatch, UserRow};
use db::repository::users as user_repo;
use lifecycle::UserRole;

use crate::extract::AuthUser;
use crate::{ApiError, AppState};

/// A user as exposed over the API — everything except the password hash.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PublicUser {
    pub user_id: Uuid,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub provider: String,
    pub role: String,
    pub fcm_token: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for PublicUser {
    fn from(row: UserRow) -> Self {
        Self {
            user_id: row.user_id,
            phone_number: row.phone_number,
            email: row.email,
            provider: row.provider,
            role: row.role,
            fcm_token: row.fcm_token,
            created_at: row.created_at,
        }
    }
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<PublicUser>>, ApiError> {
    let users = user_repo::list_users(&state.pool).await?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}

pub async fn get_one(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<PublicUser>, ApiError> {
    let user = user_repo::get_user(&state.pool, id).await?;
    Ok(Json(user.into()))
}

pub async fn update(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(patch): Json<UserPatch>,
) -> Result<Json<PublicUser>, ApiError> {
    if let Some(role) = &patch.role {
        role.parse::<UserRole>()
            .map_err(|_| ApiError::BadRequest(format!("unknown role: {role}")))?;
    }

    let user = user_repo::update_user(&state.pool, id, &patch).await?;
    Ok(Json(user.into()))
}

pub async fn remove(
    caller: AuthUser,
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    caller.require_role(&[UserRole::Admin])?;
    user_repo::delete_user(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
