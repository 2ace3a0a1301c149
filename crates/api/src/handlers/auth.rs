use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use auth::password::{hash_password, verify_password};
use db::models::UserRow;
use db::repository::users as user_repo;
use lifecycle::UserRole;

use super::users::PublicUser;
use crate::{ApiError, AppState};

#[derive(serde::Deserialize)]
pub struct RegisterDto {
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
}

/// Either `{phone}` or `{email, password}`.
#[derive(serde::Deserialize)]
pub struct LoginDto {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(serde::Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: PublicUser,
}

/// The SPA sends these fields in camelCase.
#[derive(serde::Deserialize)]
pub struct ChangePasswordDto {
    #[serde(alias = "userId")]
    pub user_id: Uuid,
    #[serde(alias = "oldPassword")]
    pub old_password: String,
    #[serde(alias = "newPassword")]
    pub new_password: String,
}

fn role_of(row: &UserRow) -> Result<UserRole, ApiError> {
    row.role.parse::<UserRole>().map_err(|_| {
        tracing::error!("user {} carries unknown role '{}'", row.user_id, row.role);
        ApiError::Internal
    })
}

fn issue_token(state: &AppState, user: &UserRow) -> Result<LoginResponse, ApiError> {
    let role = role_of(user)?;
    let access_token = state.keys.sign(
        user.user_id,
        user.email.clone(),
        user.phone_number.clone(),
        role,
    )?;
    Ok(LoginResponse {
        access_token,
        user: user.clone().into(),
    })
}

pub async fn register(
    State(state): State<AppState>,
    Json(dto): Json<RegisterDto>,
) -> Result<(StatusCode, Json<PublicUser>), ApiError> {
    if user_repo::find_by_email(&state.pool, &dto.email).await?.is_some() {
        return Err(ApiError::Conflict("Email already exists".into()));
    }
    if let Some(phone) = &dto.phone {
        if user_repo::find_by_phone(&state.pool, phone).await?.is_some() {
            return Err(ApiError::Conflict("Phone number already in use".into()));
        }
    }

    let hash = hash_password(&dto.password)?;
    let user = user_repo::create_user(
        &state.pool,
        Some(&dto.email),
        dto.phone.as_deref(),
        Some(&hash),
        UserRole::Citizen.as_str(),
        "LOCAL",
    )
    .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn login(
    State(state): State<AppState>,
    Json(dto): Json<LoginDto>,
) -> Result<Json<LoginResponse>, ApiError> {
    if let Some(phone) = &dto.phone {
        return login_with_phone(&state, phone).await;
    }

    let (email, password) = match (&dto.email, &dto.password) {
        (Some(e), Some(p)) => (e, p),
        _ => return Err(ApiError::BadRequest("provide phone, or email and password".into())),
    };

    let user = user_repo::find_by_email(&state.pool, email)
        .await?
        .ok_or(ApiError::Unauthorized)?;
    let hash = user.password.as_deref().ok_or(ApiError::Unauthorized)?;
    if !verify_password(password, hash)? {
        return Err(ApiError::Unauthorized);
    }

    Ok(Json(issue_token(&state, &user)?))
}

/// Phone login is find-or-create: unknown numbers get a fresh CITIZEN
/// account (the mobile flow's OTP screen is the only gate).
async fn login_with_phone(state: &AppState, phone: &str) -> Result<Json<LoginResponse>, ApiError> {
    let user = match user_repo::find_by_phone(&state.pool, phone).await? {
        Some(user) => user,
        None => {
            user_repo::create_user(
                &state.pool,
                None,
                Some(phone),
                None,
                UserRole::Citizen.as_str(),
                "LOCAL",
            )
            .await?
        }
    };

    Ok(Json(issue_token(state, &user)?))
}

pub async fn change_password(
    State(state): State<AppState>,
    Json(dto): Json<ChangePasswordDto>,
) -> Result<Json<PublicUser>, ApiError> {
    let user = match user_repo::get_user(&state.pool, dto.user_id).await {
        Ok(user) => user,
        Err(db::DbError::NotFound) => return Err(ApiError::Unauthorized),
        Err(e) => return Err(e.into()),
    };

    let hash = user.password.as_deref().ok_or(ApiError::Unauthorized)?;
    if !verify_password(&dto.old_password, hash)? {
        return Err(ApiError::Unauthorized);
    }

    let new_hash = hash_password(&dto.new_password)?;
    user_repo::update_password(&state.pool, user.user_id, &new_hash).await?;

    let refreshed = user_repo::get_user(&state.pool, user.user_id).await?;
    Ok(Json(refreshed.into()))
}
