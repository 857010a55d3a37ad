use std::collections::HashMap;

use tracing::debug;

use crate::extraction::models::{SkillRecord, SkillSource};

/// Folds freshly extracted skills into an existing skill profile.
///
/// Names compare case-insensitively. A CV-sourced record takes the new level
/// and years; a manually entered one is left alone. Unknown skills are appended
/// as CV-sourced. Existing order is kept.
pub fn merge_skills(existing: Vec<SkillRecord>, extracted: &[SkillRecord]) -> Vec<SkillRecord> {
    let mut merged = existing;
    let mut index: HashMap<String, usize> = merged
        .iter()
        .enumerate()
        .map(|(i, s)| (s.name.to_lowercase(), i))
        // first occurrence wins
        .rev()
        .collect();

    for skill in extracted {
        let key = skill.name.to_lowercase();
        match index.get(&key).copied() {
            Some(i) if merged[i].source == SkillSource::Cv => {
                merged[i].level = skill.level;
                merged[i].years = skill.years;
            }
            Some(_) => debug!("Keeping manually entered skill {}", skill.name),
            None => {
                index.insert(key, merged.len());
                merged.push(SkillRecord {
                    source: SkillSource::Cv,
                    ..skill.clone()
                });
            }
        }
    }

    merged
}
