use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::{Exercise, PracticeType};
use crate::scoring::{self, Metric, SessionScore, StatsSummary, Trend};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct StatsQuery {
    pub practice_type: Option<String>,
    pub metric: Option<String>,
}

impl StatsQuery {
    fn practice_type(&self) -> Result<Option<PracticeType>, AppError> {
        match self.practice_type.as_deref() {
            None | Some("") => Ok(None),
            Some(raw) => Ok(Some(raw.parse()?)),
        }
    }

    fn metric(&self) -> Result<Metric, AppError> {
        match self.metric.as_deref() {
            None | Some("") => Ok(Metric::Accuracy),
            Some(raw) => Ok(raw.parse()?),
        }
    }
}

#[derive(Serialize)]
pub struct TrendResponse {
    pub metric: Metric,
    pub trend: Trend,
    pub sessions_considered: usize,
}

/// Per-session scores for the user, oldest first.
async fn session_scores(
    state: &SharedState,
    user_id: Uuid,
    practice_type: Option<PracticeType>,
) -> Result<Vec<SessionScore>, AppError> {
    let sessions = db::sessions::list_chronological(&state.pool, user_id, practice_type).await?;
    let ids: Vec<Uuid> = sessions.iter().map(|s| s.id).collect();

    let mut by_session: HashMap<Uuid, Vec<Exercise>> = HashMap::new();
    for exercise in db::exercises::list_by_sessions(&state.pool, &ids).await? {
        by_session.entry(exercise.session_id).or_default().push(exercise);
    }

    Ok(sessions
        .iter()
        .map(|s| {
            let exercises = by_session.get(&s.id).map(Vec::as_slice).unwrap_or(&[]);
            SessionScore::from_exercises(s, exercises)
        })
        .collect())
}

pub async fn summary(
    auth: AuthUser,
    State(state): State<SharedState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<StatsSummary>, AppError> {
    let scores = session_scores(&state, auth.user_id, query.practice_type()?).await?;
    Ok(Json(scoring::summarize(&scores)))
}

pub async fn trend(
    auth: AuthUser,
    State(state): State<SharedState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<TrendResponse>, AppError> {
    let metric = query.metric()?;
    let scores = session_scores(&state, auth.user_id, query.practice_type()?).await?;
    Ok(Json(TrendResponse {
        metric,
        trend: scoring::performance_trend(&scores, metric),
        sessions_considered: scores.len().min(scoring::TREND_WINDOW),
    }))
}

pub async fn progress(
    auth: AuthUser,
    State(state): State<SharedState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<Vec<SessionScore>>, AppError> {
    Ok(Json(
        session_scores(&state, auth.user_id, query.practice_type()?).await?,
    ))
}
