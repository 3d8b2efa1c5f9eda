use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{PracticeSession, PracticeType, SessionInput};

/// Newest first.
pub async fn list(
    pool: &PgPool,
    user_id: Uuid,
    practice_type: Option<PracticeType>,
) -> Result<Vec<PracticeSession>, sqlx::Error> {
    sqlx::query_as::<_, PracticeSession>(
        "SELECT * FROM practice_sessions
         WHERE user_id = $1 AND ($2::text IS NULL OR practice_type = $2)
         ORDER BY session_date DESC, created_at DESC",
    )
    .bind(user_id)
    .bind(practice_type)
    .fetch_all(pool)
    .await
}

/// Oldest first, as the scoring functions expect.
pub async fn list_chronological(
    pool: &PgPool,
    user_id: Uuid,
    practice_type: Option<PracticeType>,
) -> Result<Vec<PracticeSession>, sqlx::Error> {
    sqlx::query_as::<_, PracticeSession>(
        "SELECT * FROM practice_sessions
         WHERE user_id = $1 AND ($2::text IS NULL OR practice_type = $2)
         ORDER BY session_date ASC, created_at ASC",
    )
    .bind(user_id)
    .bind(practice_type)
    .fetch_all(pool)
    .await
}

pub async fn create(
    pool: &PgPool,
    user_id: Uuid,
    input: &SessionInput,
) -> Result<PracticeSession, sqlx::Error> {
    sqlx::query_as::<_, PracticeSession>(
        "INSERT INTO practice_sessions (user_id, name, practice_type, session_date, location, notes)
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(user_id)
    .bind(input.name.trim())
    .bind(input.practice_type)
    .bind(input.session_date)
    .bind(&input.location)
    .bind(&input.notes)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
) -> Result<Option<PracticeSession>, sqlx::Error> {
    sqlx::query_as::<_, PracticeSession>(
        "SELECT * FROM practice_sessions WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
    input: &SessionInput,
) -> Result<PracticeSession, sqlx::Error> {
    sqlx::query_as::<_, PracticeSession>(
        "UPDATE practice_sessions
         SET name = $3, practice_type = $4, session_date = $5, location = $6, notes = $7,
             updated_at = now()
         WHERE id = $1 AND user_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(user_id)
    .bind(input.name.trim())
    .bind(input.practice_type)
    .bind(input.session_date)
    .bind(&input.location)
    .bind(&input.notes)
    .fetch_one(pool)
    .await
}

/// Returns false when no session of this user had that id.
pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM practice_sessions WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
