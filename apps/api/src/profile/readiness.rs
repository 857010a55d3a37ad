use serde::{Deserialize, Serialize};

use crate::extraction::models::{ExtractionResult, SkillLevel};

/// Skill count at which coverage saturates.
pub const SKILL_COVERAGE_TARGET: usize = 20;
pub const TOP_SKILLS: usize = 5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SectionStatus {
    Present,
    Missing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionReadiness {
    pub section: String,
    /// Contribution to `profile_completeness` when present.
    pub weight: f64,
    pub entry_count: usize,
    pub status: SectionStatus,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessReport {
    pub overall_score: f64,
    pub skill_coverage: f64,
    pub profile_completeness: f64,
    pub sections: Vec<SectionReadiness>,
    pub missing_sections: Vec<String>,
    pub top_skills: Vec<String>,
}

/// Section weights summing to 1.0.
const SECTION_WEIGHTS: &[(&str, f64)] = &[
    ("experience", 0.3),
    ("education", 0.2),
    ("skills", 0.3),
    ("summary", 0.2),
];

pub fn compute_readiness(result: &ExtractionResult) -> ReadinessReport {
    let mut sections = Vec::new();
    let mut missing_sections = Vec::new();
    let mut profile_completeness = 0.0;

    for (section_key, weight) in SECTION_WEIGHTS {
        let (present, entry_count) = section_presence(result, section_key);

        let (status, recommendations) = if present {
            (SectionStatus::Present, section_recommendations(result, section_key))
        } else {
            missing_sections.push(section_key.to_string());
            (
                SectionStatus::Missing,
                vec![missing_recommendation(section_key).to_string()],
            )
        };

        if present {
            profile_completeness += weight;
        }
        sections.push(SectionReadiness {
            section: section_key.to_string(),
            weight: *weight,
            entry_count,
            status,
            recommendations,
        });
    }

    let skill_coverage = (result.total_skills as f64 / SKILL_COVERAGE_TARGET as f64).min(1.0);
    let profile_completeness = f64::min(profile_completeness, 1.0);
    let overall_score = ((skill_coverage + profile_completeness) / 2.0).clamp(0.0, 1.0);

    ReadinessReport {
        overall_score,
        skill_coverage,
        profile_completeness,
        sections,
        missing_sections,
        top_skills: top_skills(result),
    }
}

/// Experience counts as present only when it adds up to at least a year.
fn section_presence(result: &ExtractionResult, section: &str) -> (bool, usize) {
    match section {
        "experience" => (
            result.total_experience_years > 0,
            result.experience.len(),
        ),
        "education" => (!result.education.is_empty(), result.education.len()),
        "skills" => (!result.skills.is_empty(), result.skills.len()),
        "summary" => (!result.summary.is_empty(), usize::from(!result.summary.is_empty())),
        _ => (false, 0),
    }
}

fn missing_recommendation(section: &str) -> &'static str {
    match section {
        "experience" => "Add work experience with role, company and a year range (e.g. Engineer - Acme - 2019-2022)",
        "education" => "Add your degree, institution and graduation year",
        "skills" => "Add a SKILLS section listing the technologies you use",
        _ => "Add a short professional summary at the top of your CV",
    }
}

fn section_recommendations(result: &ExtractionResult, section: &str) -> Vec<String> {
    let mut recommendations = Vec::new();
    match section {
        "skills" if result.total_skills < SKILL_COVERAGE_TARGET / 2 => {
            recommendations.push(format!(
                "Only {} recognised skills; list more of the tools you have used",
                result.total_skills
            ));
        }
        "skills" => {
            let without_years = result.skills.iter().filter(|s| s.years == 0).count();
            if without_years > 0 {
                recommendations.push(format!(
                    "{without_years} skills have no stated years of experience"
                ));
            }
        }
        "experience" if result.experience.len() < 2 => {
            recommendations
                .push("Add more experience entries to build a complete picture".to_string());
        }
        _ => {}
    }
    recommendations
}

/// First skills by extraction order, advanced ones first.
fn top_skills(result: &ExtractionResult) -> Vec<String> {
    let advanced = result
        .skills
        .iter()
        .filter(|s| s.level == SkillLevel::Advanced);
    let rest = result
        .skills
        .iter()
        .filter(|s| s.level != SkillLevel::Advanced);
    advanced
        .chain(rest)
        .take(TOP_SKILLS)
        .map(|s| s.name.clone())
        .collect()
}
