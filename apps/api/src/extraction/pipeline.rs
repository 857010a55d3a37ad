use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::extraction::education::extract_education;
use crate::extraction::entities::{extract_entities, EntityRecognizer};
use crate::extraction::experience::extract_experience;
use crate::extraction::models::{
    Component, ExtractionIssue, ExtractionOutcome, ExtractionResult, ExtractionStatus,
};
use crate::extraction::normalizer::TextViews;
use crate::extraction::sections::{locate, SUMMARY_HEADERS};
use crate::extraction::skills::extract_skills;
use crate::extraction::vocabulary::SkillVocabulary;
use crate::extraction::ExtractionError;

pub const SUMMARY_MAX_CHARS: usize = 500;
/// A fallback summary paragraph must be longer than this.
pub const SUMMARY_MIN_FALLBACK_CHARS: usize = 50;

/// Number of components whose failure is recorded as an issue.
const FALLIBLE_COMPONENTS: usize = 4;

/// Orchestrates normalization and every extractor into one `ExtractionOutcome`.
///
/// Holds only read-only collaborators, so one instance is shared across
/// requests behind an `Arc`.
pub struct CvExtractionPipeline {
    vocabulary: Arc<SkillVocabulary>,
    recognizer: Option<Arc<dyn EntityRecognizer>>,
}

impl CvExtractionPipeline {
    pub fn new(
        vocabulary: Arc<SkillVocabulary>,
        recognizer: Option<Arc<dyn EntityRecognizer>>,
    ) -> Self {
        Self {
            vocabulary,
            recognizer,
        }
    }

    /// Runs every extractor over `raw_text`. Never fails: component errors are
    /// recorded in `issues` and the component's field is left empty.
    ///
    /// `current_year` resolves "Present"/"Current" in experience date ranges.
    pub fn extract(&self, raw_text: &str, current_year: i32) -> ExtractionOutcome {
        let views = TextViews::new(raw_text);
        if views.is_empty() {
            return ExtractionOutcome {
                status: ExtractionStatus::Complete,
                result: ExtractionResult::default(),
                issues: Vec::new(),
            };
        }

        let mut issues = Vec::new();

        // Step 1: contact fields (infallible, NER optional)
        let personal_info = extract_entities(&views, self.recognizer.as_deref());
        if personal_info.is_empty() {
            debug!("No contact details found");
        }

        // Step 2: section-driven components
        let skills = absorb(
            Component::Skills,
            extract_skills(&views.lines, &self.vocabulary),
            &mut issues,
        );
        let experience = absorb(
            Component::Experience,
            extract_experience(&views.lines, current_year),
            &mut issues,
        );
        let education = absorb(
            Component::Education,
            extract_education(&views.lines),
            &mut issues,
        );
        let summary = absorb(Component::Summary, extract_summary(&views.lines), &mut issues);

        // Step 3: aggregates
        let total_experience_years = experience.iter().map(|e| e.duration_years).sum();
        let total_skills = skills.len();

        let status = match issues.len() {
            0 => ExtractionStatus::Complete,
            n if n >= FALLIBLE_COMPONENTS => ExtractionStatus::Failed,
            _ => ExtractionStatus::Partial,
        };

        info!(
            "Extracted {} skills, {} experience entries ({} years), {} education entries; status={:?}",
            total_skills,
            experience.len(),
            total_experience_years,
            education.len(),
            status
        );

        ExtractionOutcome {
            status,
            result: ExtractionResult {
                personal_info,
                skills,
                experience,
                education,
                summary,
                total_experience_years,
                total_skills,
            },
            issues,
        }
    }
}

/// Unwraps a component result, turning an error into an issue and an empty value.
fn absorb<T: Default>(
    component: Component,
    result: Result<T, ExtractionError>,
    issues: &mut Vec<ExtractionIssue>,
) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!("{:?} extraction failed: {}", component, e);
            issues.push(ExtractionIssue {
                component,
                message: e.to_string(),
            });
            T::default()
        }
    }
}

/// First paragraph of the summary section, or else the first paragraph of the
/// document long enough to read as prose. Capped at `SUMMARY_MAX_CHARS`.
pub fn extract_summary(lines_view: &str) -> Result<String, ExtractionError> {
    if let Some(section) = locate(lines_view, SUMMARY_HEADERS)? {
        let first = collapse(section.body().split("\n\n").next().unwrap_or_default());
        if !first.is_empty() {
            return Ok(truncate_chars(&first, SUMMARY_MAX_CHARS));
        }
    }

    Ok(lines_view
        .split("\n\n")
        .map(collapse)
        .find(|p| p.chars().count() > SUMMARY_MIN_FALLBACK_CHARS)
        .map(|p| truncate_chars(&p, SUMMARY_MAX_CHARS))
        .unwrap_or_default())
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
