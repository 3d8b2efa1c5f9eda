use axum::extract::State;
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::auth::extractor::AuthUser;
use crate::auth::password;
use crate::db;
use crate::error::AppError;
use crate::extract::Json;
use crate::models::User;
use crate::routes::auth::{start_session, AuthResponse};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct UpdateProfile {
    pub name: String,
}

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

async fn load_user(state: &SharedState, auth: AuthUser) -> Result<User, AppError> {
    db::users::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))
}

pub async fn me(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<User>, AppError> {
    Ok(Json(load_user(&state, auth).await?))
}

pub async fn update_me(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<UpdateProfile>,
) -> Result<Json<User>, AppError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }

    let user = db::users::update_name(&state.pool, auth.user_id, name)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::Unauthorized("User not found".to_string()),
            _ => AppError::Database(e),
        })?;
    Ok(Json(user))
}

/// Change password with the current one, revoke every session, start a new one.
pub async fn change_password(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    password::check_strength(&req.new_password).map_err(AppError::BadRequest)?;

    let user = load_user(&state, auth).await?;
    let valid = password::verify(&req.current_password, &user.password_hash)
        .map_err(AppError::Internal)?;
    if !valid {
        return Err(AppError::Unauthorized(
            "Current password is incorrect".to_string(),
        ));
    }

    let pw_hash = password::hash(&req.new_password).map_err(AppError::Internal)?;
    let mut tx = state.pool.begin().await?;
    db::users::update_password(&mut *tx, user.id, &pw_hash).await?;
    db::refresh_tokens::delete_all_for_user(&mut *tx, user.id).await?;
    tx.commit().await?;

    tracing::info!("Password changed for user {}", user.id);
    start_session(&state, user.id).await
}
