use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::extract::Json;
use crate::models::{PracticeSession, PracticeType, SessionInput, SessionWithExercises};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct SessionFilter {
    pub practice_type: Option<String>,
}

impl SessionFilter {
    pub fn practice_type(&self) -> Result<Option<PracticeType>, AppError> {
        Ok(self
            .practice_type
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::parse::<PracticeType>)
            .transpose()?)
    }
}

pub(crate) async fn find_owned(
    state: &SharedState,
    id: Uuid,
    auth: AuthUser,
) -> Result<PracticeSession, AppError> {
    db::sessions::find_by_id(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
    Query(filter): Query<SessionFilter>,
) -> Result<Json<Vec<PracticeSession>>, AppError> {
    let sessions = db::sessions::list(&state.pool, auth.user_id, filter.practice_type()?).await?;
    Ok(Json(sessions))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<SessionInput>,
) -> Result<Json<PracticeSession>, AppError> {
    req.validate().map_err(AppError::BadRequest)?;
    let session = db::sessions::create(&state.pool, auth.user_id, &req).await?;
    tracing::debug!("Created session {} for user {}", session.id, auth.user_id);
    Ok(Json(session))
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionWithExercises>, AppError> {
    let session = find_owned(&state, id, auth).await?;
    let exercises = db::exercises::list_by_session(&state.pool, session.id).await?;
    Ok(Json(SessionWithExercises { session, exercises }))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SessionInput>,
) -> Result<Json<PracticeSession>, AppError> {
    req.validate().map_err(AppError::BadRequest)?;
    let session = db::sessions::update(&state.pool, id, auth.user_id, &req)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::NotFound("Session not found".to_string()),
            _ => AppError::Database(e),
        })?;
    Ok(Json(session))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !db::sessions::delete(&state.pool, id, auth.user_id).await? {
        return Err(AppError::NotFound("Session not found".to_string()));
    }
    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}
