use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

/// Where a skill record came from. Manual records are user-entered and never
/// overwritten by a later CV extraction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SkillSource {
    #[default]
    Cv,
    Manual,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillRecord {
    pub name: String,
    pub level: SkillLevel,
    pub years: u32,
    #[serde(default)]
    pub source: SkillSource,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExperienceRecord {
    pub company: String,
    pub role: String,
    pub start_year: Option<i32>,
    /// `None` means the position is ongoing ("Present"/"Current").
    pub end_year: Option<i32>,
    pub duration_years: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EducationRecord {
    pub degree: String,
    pub institution: String,
    pub field: String,
    pub graduation_year: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PersonalInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
}

impl PersonalInfo {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none() && self.location.is_none()
    }
}

/// Structured record produced from one CV.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExtractionResult {
    pub personal_info: PersonalInfo,
    pub skills: Vec<SkillRecord>,
    pub experience: Vec<ExperienceRecord>,
    pub education: Vec<EducationRecord>,
    pub summary: String,
    pub total_experience_years: u32,
    pub total_skills: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStatus {
    /// Every component ran. The record may still be empty for empty input.
    Complete,
    /// At least one component failed; its fields are left empty.
    Partial,
    /// Every fallible component failed. Only experience can fail on input
    /// (a reference year outside 1900..=2100); the others fail only if a
    /// header pattern does not compile, so in practice this is not reached.
    Failed,
}

/// Names the component that failed, for diagnostics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    Skills,
    Experience,
    Education,
    Summary,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractionIssue {
    pub component: Component,
    pub message: String,
}

/// What the pipeline hands back: the (possibly partial) record plus an explicit
/// status so callers can tell "nothing found" apart from "something broke".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractionOutcome {
    pub status: ExtractionStatus,
    pub result: ExtractionResult,
    pub issues: Vec<ExtractionIssue>,
}

impl ExtractionOutcome {
    pub fn succeeded(&self) -> bool {
        self.status != ExtractionStatus::Failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_level_serializes_lowercase() {
        let json = serde_json::to_string(&SkillLevel::Advanced).unwrap();
        assert_eq!(json, r#""advanced""#);
    }

    #[test]
    fn test_skill_source_defaults_to_cv_when_missing() {
        let skill: SkillRecord =
            serde_json::from_str(r#"{"name": "Rust", "level": "beginner", "years": 1}"#).unwrap();
        assert_eq!(skill.source, SkillSource::Cv);
    }

    #[test]
    fn test_extraction_result_field_names() {
        let value = serde_json::to_value(ExtractionResult::default()).unwrap();
        for key in [
            "personal_info",
            "skills",
            "experience",
            "education",
            "summary",
            "total_experience_years",
            "total_skills",
        ] {
            assert!(value.get(key).is_some(), "missing field {key}");
        }
    }

    #[test]
    fn test_open_ended_experience_serializes_null_end_year() {
        let record = ExperienceRecord {
            company: "Acme Corp".to_string(),
            role: "Engineer".to_string(),
            start_year: Some(2021),
            end_year: None,
            duration_years: 3,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert!(value["end_year"].is_null());
    }

    #[test]
    fn test_failed_outcome_is_not_success() {
        let outcome = ExtractionOutcome {
            status: ExtractionStatus::Failed,
            result: ExtractionResult::default(),
            issues: vec![],
        };
        assert!(!outcome.succeeded());
    }

    #[test]
    fn test_partial_outcome_counts_as_success() {
        let outcome = ExtractionOutcome {
            status: ExtractionStatus::Partial,
            result: ExtractionResult::default(),
            issues: vec![],
        };
        assert!(outcome.succeeded());
    }
}
