use axum::Json;
use serde::Deserialize;

use crate::extraction::models::SkillRecord;
use crate::profile::skill_sync::merge_skills;

#[derive(Debug, Deserialize)]
pub struct MergeSkillsRequest {
    #[serde(default)]
    pub existing: Vec<SkillRecord>,
    pub extracted: Vec<SkillRecord>,
}

/// POST /api/v1/skills/merge
pub async fn handle_merge_skills(Json(req): Json<MergeSkillsRequest>) -> Json<Vec<SkillRecord>> {
    Json(merge_skills(req.existing, &req.extracted))
}
