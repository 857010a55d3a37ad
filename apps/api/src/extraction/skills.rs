//! Skill extraction against a closed vocabulary.
//!
//! Two passes:
//! 1. skills section: level and years inferred from ±50 chars around the mention
//! 2. whole document: anything not already found, recorded as beginner / 0 years
//!
//! A name appears at most once; section matches always win.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::extraction::models::{SkillLevel, SkillRecord, SkillSource};
use crate::extraction::sections::{find_section, SKILLS_HEADERS};
use crate::extraction::vocabulary::SkillVocabulary;
use crate::extraction::ExtractionError;

/// Characters of context taken on each side of a skill mention.
pub const CONTEXT_WINDOW: usize = 50;

const ADVANCED_KEYWORDS: &[&str] = &["expert", "advanced", "senior", "lead"];
const INTERMEDIATE_KEYWORDS: &[&str] = &["intermediate", "proficient", "experienced"];
const BEGINNER_KEYWORDS: &[&str] = &["beginner", "basic", "learning", "junior"];

static YEARS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\+?\s*years?").expect("valid years regex"));

/// Extracts skills from the line-preserving view of a CV.
pub fn extract_skills(
    text: &str,
    vocabulary: &SkillVocabulary,
) -> Result<Vec<SkillRecord>, ExtractionError> {
    let mut skills = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    let section = find_section(text, SKILLS_HEADERS)?.to_lowercase();
    if !section.is_empty() {
        for term in vocabulary.iter() {
            let needle = term.to_lowercase();
            if let Some(pos) = find_term(&section, &needle) {
                let context = context_window(&section, pos, pos + needle.len(), CONTEXT_WINDOW);
                let (level, years) = infer_proficiency(context);
                seen.insert(needle);
                skills.push(SkillRecord {
                    name: term.to_string(),
                    level,
                    years,
                    source: SkillSource::Cv,
                });
            }
        }
    }

    // Skills are often only mentioned inline in experience bullets.
    let document = text.to_lowercase().replace('\n', " ");
    for term in vocabulary.iter() {
        let needle = term.to_lowercase();
        if seen.contains(&needle) {
            continue;
        }
        if find_term(&document, &needle).is_some() {
            seen.insert(needle);
            skills.push(SkillRecord {
                name: term.to_string(),
                level: SkillLevel::Beginner,
                years: 0,
                source: SkillSource::Cv,
            });
        }
    }

    Ok(skills)
}

/// Infers a proficiency level and years of use from the text around a mention.
/// Level buckets are checked advanced → intermediate → beginner; default is
/// intermediate. Years come from the first "N years" / "N+ years"; default 0.
pub fn infer_proficiency(context: &str) -> (SkillLevel, u32) {
    let lower = context.to_lowercase();
    let has_any = |words: &[&str]| words.iter().any(|w| lower.contains(w));

    let level = if has_any(ADVANCED_KEYWORDS) {
        SkillLevel::Advanced
    } else if has_any(INTERMEDIATE_KEYWORDS) {
        SkillLevel::Intermediate
    } else if has_any(BEGINNER_KEYWORDS) {
        SkillLevel::Beginner
    } else {
        SkillLevel::Intermediate
    };

    let years = YEARS_PATTERN
        .captures(&lower)
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .unwrap_or(0);

    (level, years)
}

/// Byte offset of the first occurrence of `needle` in `haystack` that is not
/// glued to a neighbouring letter or digit. Both inputs are expected lowercase.
/// A one-character needle followed by `.` reads as an initial and is skipped.
pub(crate) fn find_term(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    let single_char = needle.chars().count() == 1;
    haystack.match_indices(needle).map(|(i, _)| i).find(|&i| {
        let before = haystack[..i].chars().next_back();
        let after = haystack[i + needle.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric)
            && !after.is_some_and(char::is_alphanumeric)
            && !(single_char && after == Some('.'))
    })
}

fn context_window(text: &str, start: usize, end: usize, window: usize) -> &str {
    let from = text[..start]
        .char_indices()
        .rev()
        .nth(window.saturating_sub(1))
        .map_or(0, |(i, _)| i);
    let to = text[end..]
        .char_indices()
        .nth(window)
        .map_or(text.len(), |(i, _)| end + i);
    &text[from..to]
}
