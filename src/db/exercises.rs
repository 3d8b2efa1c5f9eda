use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Exercise, ExerciseInput};

pub async fn list_by_session(pool: &PgPool, session_id: Uuid) -> Result<Vec<Exercise>, sqlx::Error> {
    sqlx::query_as::<_, Exercise>(
        "SELECT * FROM exercises WHERE session_id = $1 ORDER BY created_at ASC",
    )
    .bind(session_id)
    .fetch_all(pool)
    .await
}

pub async fn list_by_sessions(
    pool: &PgPool,
    session_ids: &[Uuid],
) -> Result<Vec<Exercise>, sqlx::Error> {
    sqlx::query_as::<_, Exercise>(
        "SELECT * FROM exercises WHERE session_id = ANY($1) ORDER BY created_at ASC",
    )
    .bind(session_ids)
    .fetch_all(pool)
    .await
}

pub async fn create(
    pool: &PgPool,
    session_id: Uuid,
    input: &ExerciseInput,
) -> Result<Exercise, sqlx::Error> {
    sqlx::query_as::<_, Exercise>(
        "INSERT INTO exercises
            (session_id, name, target_type, caliber, distance_meters, shots_fired, hits, score, max_score)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
    )
    .bind(session_id)
    .bind(input.name.trim())
    .bind(input.target_type)
    .bind(input.caliber)
    .bind(input.distance_meters)
    .bind(input.shots_fired)
    .bind(input.hits)
    .bind(input.score)
    .bind(input.max_score)
    .fetch_one(pool)
    .await
}

/// Ownership is checked through the parent session.
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
    input: &ExerciseInput,
) -> Result<Exercise, sqlx::Error> {
    sqlx::query_as::<_, Exercise>(
        "UPDATE exercises e
         SET name = $3, target_type = $4, caliber = $5, distance_meters = $6,
             shots_fired = $7, hits = $8, score = $9, max_score = $10
         FROM practice_sessions s
         WHERE e.id = $1 AND e.session_id = s.id AND s.user_id = $2
         RETURNING e.*",
    )
    .bind(id)
    .bind(user_id)
    .bind(input.name.trim())
    .bind(input.target_type)
    .bind(input.caliber)
    .bind(input.distance_meters)
    .bind(input.shots_fired)
    .bind(input.hits)
    .bind(input.score)
    .bind(input.max_score)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "DELETE FROM exercises e USING practice_sessions s
         WHERE e.id = $1 AND e.session_id = s.id AND s.user_id = $2",
    )
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}
