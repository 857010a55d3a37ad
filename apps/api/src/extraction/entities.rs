//! Contact/entity extraction: email, phone, candidate name, location.
//!
//! Email and phone are regex matches on the collapsed view. The name heuristic
//! reads the first lines of the line view. An optional NER collaborator fills
//! the remaining gaps; without one those fields simply stay empty.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::extraction::models::PersonalInfo;
use crate::extraction::normalizer::TextViews;
use crate::extraction::skills::find_term;

/// Only the head of the document is handed to the NER collaborator.
pub const NER_PREFIX_CHARS: usize = 1000;
const NAME_SCAN_LINES: usize = 3;
const NAME_MAX_CHARS: usize = 50;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid email regex")
});

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:(\+?\d{1,3})[-.\s]?)?\(?(\d{3})\)?[-.\s]?(\d{3})[-.\s]?(\d{4})")
        .expect("valid phone regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityLabel {
    Person,
    /// Geopolitical entity: city, region, country.
    Gpe,
    Other,
}

impl EntityLabel {
    fn parse(label: &str) -> Self {
        match label.trim().to_ascii_uppercase().as_str() {
            "PERSON" => Self::Person,
            "GPE" | "LOCATION" | "LOC" => Self::Gpe,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedEntity {
    pub text: String,
    pub label: EntityLabel,
}

/// Named-entity recognition collaborator. Implementations must return entities
/// in document order.
pub trait EntityRecognizer: Send + Sync {
    fn recognize(&self, text: &str) -> Vec<RecognizedEntity>;
}

/// Extracts personal info. Never fails: anything not found stays `None`.
pub fn extract_entities(
    views: &TextViews,
    recognizer: Option<&dyn EntityRecognizer>,
) -> PersonalInfo {
    let mut info = PersonalInfo {
        email: extract_email(&views.collapsed),
        phone: extract_phone(&views.collapsed),
        name: extract_name(&views.lines),
        location: None,
    };

    if let Some(recognizer) = recognizer {
        let head = prefix_chars(&views.collapsed, NER_PREFIX_CHARS);
        for entity in recognizer.recognize(head) {
            match entity.label {
                EntityLabel::Person if info.name.is_none() => info.name = Some(entity.text),
                EntityLabel::Gpe if info.location.is_none() => info.location = Some(entity.text),
                _ => {}
            }
        }
    }

    info
}

pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_PATTERN.find(text).map(|m| m.as_str().to_string())
}

/// First phone-shaped match not embedded in a longer digit run, normalized by
/// concatenating its digit groups. A rejected match is retried one character
/// later, so a number overlapping it is still found.
pub fn extract_phone(text: &str) -> Option<String> {
    let mut from = 0;
    while let Some(caps) = PHONE_PATTERN.captures_at(text, from) {
        let whole = caps.get(0)?.range();
        let before = text[..whole.start].chars().next_back();
        let after = text[whole.end..].chars().next();
        if !before.is_some_and(|c| c.is_ascii_digit()) && !after.is_some_and(|c| c.is_ascii_digit()) {
            return Some(
                caps.iter()
                    .skip(1)
                    .flatten()
                    .map(|m| m.as_str())
                    .collect::<String>(),
            );
        }
        from = whole.start + text[whole.start..].chars().next().map_or(1, char::len_utf8);
    }
    None
}

/// A candidate's name is usually alone on one of the first lines: 2–4 words,
/// alphabetic apart from initials' dots.
pub fn extract_name(lines_view: &str) -> Option<String> {
    lines_view
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(NAME_SCAN_LINES)
        .find(|line| looks_like_name(line))
        .map(str::to_string)
}

fn looks_like_name(line: &str) -> bool {
    if line.chars().count() >= NAME_MAX_CHARS {
        return false;
    }
    let words: Vec<&str> = line.split_whitespace().collect();
    (2..=4).contains(&words.len())
        && words.iter().all(|w| {
            w.chars().any(char::is_alphabetic) && w.chars().all(|c| c.is_alphabetic() || c == '.')
        })
}

fn prefix_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((i, _)) => &text[..i],
        None => text,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Dictionary-based NER
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum GazetteerError {
    #[error("failed to read gazetteer '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("gazetteer line {line} is not '<LABEL>\\t<text>'")]
    Malformed { line: usize },
}

/// Recognizes entities by whole-word lookup in a fixed dictionary.
#[derive(Debug, Clone, Default)]
pub struct GazetteerRecognizer {
    entries: Vec<(String, RecognizedEntity)>,
}

impl GazetteerRecognizer {
    pub fn new(entries: impl IntoIterator<Item = RecognizedEntity>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .filter(|e| !e.text.trim().is_empty())
                .map(|e| (e.text.to_lowercase(), e))
                .collect(),
        }
    }

    /// Parses `LABEL<TAB>text` lines; blank lines and `#` comments are skipped.
    pub fn parse(contents: &str) -> Result<Self, GazetteerError> {
        let mut entries = Vec::new();
        for (idx, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (label, text) = line
                .split_once('\t')
                .ok_or(GazetteerError::Malformed { line: idx + 1 })?;
            entries.push(RecognizedEntity {
                text: text.trim().to_string(),
                label: EntityLabel::parse(label),
            });
        }
        Ok(Self::new(entries))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GazetteerError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| GazetteerError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse(&contents)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl EntityRecognizer for GazetteerRecognizer {
    fn recognize(&self, text: &str) -> Vec<RecognizedEntity> {
        let haystack = text.to_lowercase();
        let mut found: Vec<(usize, &RecognizedEntity)> = self
            .entries
            .iter()
            .filter_map(|(needle, entity)| find_term(&haystack, needle).map(|pos| (pos, entity)))
            .collect();
        found.sort_by_key(|(pos, _)| *pos);
        found.into_iter().map(|(_, e)| e.clone()).collect()
    }
}
