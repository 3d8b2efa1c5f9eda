use axum::extract::{Path, State};
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::extract::Json;
use crate::models::{Exercise, ExerciseInput};
use crate::routes::sessions::find_owned;
use crate::state::SharedState;

pub async fn list_by_session(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Vec<Exercise>>, AppError> {
    let session = find_owned(&state, session_id, auth).await?;
    let exercises = db::exercises::list_by_session(&state.pool, session.id).await?;
    Ok(Json(exercises))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<ExerciseInput>,
) -> Result<Json<Exercise>, AppError> {
    req.validate().map_err(AppError::BadRequest)?;
    let session = find_owned(&state, session_id, auth).await?;
    let exercise = db::exercises::create(&state.pool, session.id, &req).await?;
    Ok(Json(exercise))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ExerciseInput>,
) -> Result<Json<Exercise>, AppError> {
    req.validate().map_err(AppError::BadRequest)?;
    let exercise = db::exercises::update(&state.pool, id, auth.user_id, &req)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::NotFound("Exercise not found".to_string()),
            _ => AppError::Database(e),
        })?;
    Ok(Json(exercise))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !db::exercises::delete(&state.pool, id, auth.user_id).await? {
        return Err(AppError::NotFound("Exercise not found".to_string()));
    }
    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}
