use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::jwt::{encode_token, Claims, ACCESS_TOKEN_MINUTES};
use crate::auth::{password, token};
use crate::db;
use crate::email::templates;
use crate::error::{conflict_on_unique, AppError};
use crate::extract::Json;
use crate::services::password_reset::{ResetOutcome, ResetResponse};
use crate::state::SharedState;

const REFRESH_TOKEN_DAYS: i64 = 7;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn auth_cookies(access_token: &str, refresh_token: &str) -> CookieJar {
    let access = Cookie::build(("access_token", access_token.to_string()))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::minutes(ACCESS_TOKEN_MINUTES))
        .build();

    let refresh = Cookie::build(("refresh_token", refresh_token.to_string()))
        .path("/api/v1/auth")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::days(REFRESH_TOKEN_DAYS))
        .build();

    CookieJar::new().add(access).add(refresh)
}

fn clear_auth_cookies() -> CookieJar {
    let access = Cookie::build(("access_token", ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .build();
    let refresh = Cookie::build(("refresh_token", ""))
        .path("/api/v1/auth")
        .max_age(time::Duration::ZERO)
        .build();
    CookieJar::new().add(access).add(refresh)
}

/// Mint an access token and a fresh refresh token for the user.
pub(crate) async fn start_session(
    state: &SharedState,
    user_id: Uuid,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    let access_token =
        encode_token(&Claims::new(user_id), &state.config.jwt_secret).map_err(AppError::Internal)?;

    let refresh = token::generate_secret();
    db::refresh_tokens::create(
        &state.pool,
        user_id,
        &token::hash_token(&refresh),
        Utc::now() + Duration::days(REFRESH_TOKEN_DAYS),
    )
    .await?;

    let jar = auth_cookies(&access_token, &refresh);
    Ok((
        jar,
        Json(AuthResponse {
            access_token,
            refresh_token: refresh,
        }),
    ))
}

pub async fn register(
    State(state): State<SharedState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    let email = req.email.trim();
    let name = req.name.trim();
    if email.is_empty() || req.password.is_empty() || name.is_empty() {
        return Err(AppError::BadRequest("All fields are required".to_string()));
    }
    if !email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    password::check_strength(&req.password).map_err(AppError::BadRequest)?;

    let pw_hash = password::hash(&req.password).map_err(AppError::Internal)?;
    let user = db::users::create(&state.pool, email, &pw_hash, name)
        .await
        .map_err(|e| conflict_on_unique(e, "An account with this email already exists"))?;

    tracing::info!("Registered user {}", user.id);

    // Best effort, the account exists either way.
    let mailer = state.mailer.clone();
    let html = templates::render_welcome(&user.name, &state.config.base_url);
    let to = user.email.clone();
    tokio::spawn(async move {
        if let Err(e) = mailer.send(&to, "Welcome to Shotlog", &html).await {
            tracing::debug!("Welcome email not sent: {e}");
        }
    });

    start_session(&state, user.id).await
}

pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    // Limiter and lookup share this key.
    let email = normalize_email(&req.email);

    if state.login_limiter.check(&email).is_err() {
        return Err(AppError::RateLimited(
            "Too many login attempts. Please try again later.".to_string(),
        ));
    }

    let user = db::users::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    let valid = password::verify(&req.password, &user.password_hash).map_err(AppError::Internal)?;
    if !valid {
        state.login_limiter.record_failure(&email);
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }
    state.login_limiter.clear(&email);

    start_session(&state, user.id).await
}

pub async fn refresh(
    State(state): State<SharedState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    let refresh_value = jar
        .get("refresh_token")
        .map(|c| c.value().to_string())
        .ok_or_else(|| AppError::Unauthorized("Missing refresh token".to_string()))?;

    let stored = db::refresh_tokens::find_by_hash(&state.pool, &token::hash_token(&refresh_value))
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid refresh token".to_string()))?;

    if stored.expires_at <= Utc::now() {
        return Err(AppError::Unauthorized("Refresh token expired".to_string()));
    }

    if !db::refresh_tokens::claim(&state.pool, stored.id).await? {
        tracing::warn!(
            "Refresh token reuse detected for user {}, revoking all sessions",
            stored.user_id
        );
        db::refresh_tokens::delete_all_for_user(&state.pool, stored.user_id).await?;
        return Err(AppError::Unauthorized(
            "Refresh token reuse detected. All sessions revoked.".to_string(),
        ));
    }

    let user = db::users::find_by_id(&state.pool, stored.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    start_session(&state, user.id).await
}

pub async fn logout(
    State(state): State<SharedState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<MessageResponse>), AppError> {
    if let Some(cookie) = jar.get("refresh_token") {
        db::refresh_tokens::delete_by_hash(&state.pool, &token::hash_token(cookie.value())).await?;
    }

    Ok((
        clear_auth_cookies(),
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    ))
}

fn reset_status(outcome: ResetOutcome) -> StatusCode {
    match outcome {
        ResetOutcome::EmailSent | ResetOutcome::PasswordChanged => StatusCode::OK,
        ResetOutcome::InvalidToken | ResetOutcome::WeakPassword | ResetOutcome::UserNotFound => {
            StatusCode::BAD_REQUEST
        }
        ResetOutcome::EmailFailed => StatusCode::SERVICE_UNAVAILABLE,
        ResetOutcome::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub async fn forgot_password(
    State(state): State<SharedState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> (StatusCode, Json<ResetResponse>) {
    let outcome = state.password_reset.request_reset(&req.email).await;
    (reset_status(outcome), Json(outcome.into()))
}

pub async fn reset_password(
    State(state): State<SharedState>,
    Json(req): Json<ResetPasswordRequest>,
) -> (StatusCode, Json<ResetResponse>) {
    let outcome = state
        .password_reset
        .redeem_reset(&req.token, &req.password)
        .await;
    (reset_status(outcome), Json(outcome.into()))
}
