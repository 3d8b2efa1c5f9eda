use axum::Json;
use serde::Serialize;

use crate::models::{Caliber, PracticeType, TagInfo, TargetType};

#[derive(Serialize)]
pub struct Catalog {
    pub practice_types: Vec<TagInfo>,
    pub target_types: Vec<TagInfo>,
    pub calibers: Vec<TagInfo>,
}

pub async fn list() -> Json<Catalog> {
    Json(Catalog {
        practice_types: PracticeType::catalog(),
        target_types: TargetType::catalog(),
        calibers: Caliber::catalog(),
    })
}
