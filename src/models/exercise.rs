use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Caliber, TargetType};

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Exercise {
    pub id: Uuid,
    pub session_id: Uuid,
    pub name: String,
    pub target_type: TargetType,
    pub caliber: Caliber,
    pub distance_meters: f64,
    pub shots_fired: i32,
    pub hits: i32,
    pub score: i32,
    pub max_score: i32,
    pub created_at: DateTime<Utc>,
}

/// Writable fields of an exercise, as accepted by create and update.
#[derive(Debug, Clone, Deserialize)]
pub struct ExerciseInput {
    pub name: String,
    pub target_type: TargetType,
    pub caliber: Caliber,
    pub distance_meters: f64,
    pub shots_fired: i32,
    pub hits: i32,
    pub score: i32,
    pub max_score: i32,
}

impl ExerciseInput {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Exercise name is required".to_string());
        }
        if !(self.distance_meters.is_finite() && self.distance_meters > 0.0) {
            return Err("Distance must be a positive number of meters".to_string());
        }
        if self.shots_fired < 0 {
            return Err("Shots fired cannot be negative".to_string());
        }
        if self.hits < 0 || self.hits > self.shots_fired {
            return Err("Hits must be between 0 and shots fired".to_string());
        }
        if self.max_score < 0 {
            return Err("Max score cannot be negative".to_string());
        }
        if self.score < 0 || self.score > self.max_score {
            return Err("Score must be between 0 and max score".to_string());
        }
        Ok(())
    }
}
