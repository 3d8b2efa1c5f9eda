use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Exercise, PracticeType};

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct PracticeSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub practice_type: PracticeType,
    pub session_date: DateTime<Utc>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionWithExercises {
    #[serde(flatten)]
    pub session: PracticeSession,
    pub exercises: Vec<Exercise>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionInput {
    pub name: String,
    pub practice_type: PracticeType,
    pub session_date: DateTime<Utc>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl SessionInput {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Session name is required".to_string());
        }
        if self.name.len() > 200 {
            return Err("Session name must be at most 200 characters".to_string());
        }
        Ok(())
    }
}
