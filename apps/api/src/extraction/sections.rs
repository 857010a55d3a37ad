//! Section locator. Resumes have no fixed schema, so a section is found by its
//! header keyword and runs until the next probable header or a blank line.
//!
//! Operates on the line-preserving view (see `normalizer::normalize_lines`).

use regex::Regex;

use crate::extraction::ExtractionError;

// Header lists run specific-to-generic.
pub const SKILLS_HEADERS: &[&str] = &["technical skills", "skills", "competencies", "technologies"];
pub const EXPERIENCE_HEADERS: &[&str] = &[
    "work experience",
    "professional experience",
    "experience",
    "employment",
];
pub const EDUCATION_HEADERS: &[&str] = &["education", "academic background", "qualifications"];
pub const SUMMARY_HEADERS: &[&str] = &["summary", "profile", "objective", "about"];

/// A located section. `text` starts at the header token.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionMatch {
    /// The candidate header that matched.
    pub header: String,
    pub text: String,
    header_len: usize,
}

impl SectionMatch {
    /// Section text without the header token and its trailing separator.
    pub fn body(&self) -> &str {
        self.text[self.header_len..]
            .trim_start_matches(|c: char| c.is_whitespace() || matches!(c, ':' | '-' | ',' | ';'))
    }
}

/// Returns the section text for the first header in `headers` found in `text`,
/// or an empty string when none is present.
pub fn find_section(text: &str, headers: &[&str]) -> Result<String, ExtractionError> {
    Ok(locate(text, headers)?.map(|s| s.text).unwrap_or_default())
}

/// Locates a section. Every header is first tried, in order, for an occurrence
/// standing as a header: at the start of a line or on an all-caps line. Only
/// when none stands as a header does the first mid-sentence mention win.
pub fn locate(text: &str, headers: &[&str]) -> Result<Option<SectionMatch>, ExtractionError> {
    let patterns = headers
        .iter()
        .map(|header| Ok((*header, header_pattern(header)?)))
        .collect::<Result<Vec<_>, ExtractionError>>()?;

    let standing = patterns.iter().find_map(|(header, pattern)| {
        pattern
            .find_iter(text)
            .find(|m| stands_as_header(text, m.start()))
            .map(|m| (*header, m))
    });
    let found = standing.or_else(|| {
        patterns
            .iter()
            .find_map(|(header, pattern)| pattern.find(text).map(|m| (*header, m)))
    });

    Ok(found.map(|(header, m)| {
        let end = section_end(text, m.end());
        SectionMatch {
            header: header.to_string(),
            text: text[m.start()..end].trim_end().to_string(),
            header_len: m.end() - m.start(),
        }
    }))
}

/// Case-insensitive whole-word pattern; multi-word headers tolerate any whitespace run.
fn header_pattern(header: &str) -> Result<Regex, ExtractionError> {
    let words: Vec<String> = header.split_whitespace().map(regex::escape).collect();
    let source = format!(r"(?i)\b{}\b", words.join(r"\s+"));
    Regex::new(&source).map_err(|e| ExtractionError::Pattern {
        header: header.to_string(),
        source: e,
    })
}

fn starts_line(text: &str, pos: usize) -> bool {
    pos == 0 || text[..pos].ends_with('\n')
}

fn stands_as_header(text: &str, pos: usize) -> bool {
    let line_start = text[..pos].rfind('\n').map_or(0, |i| i + 1);
    let line_end = text[pos..].find('\n').map_or(text.len(), |i| pos + i);
    starts_line(text, pos) || is_probable_header(&text[line_start..line_end])
}

/// Byte offset where the section starting at `from` stops: the first blank line
/// after some content, the next all-caps line, or end of text. Blank lines
/// directly under the header are skipped.
fn section_end(text: &str, from: usize) -> usize {
    let header_line_end = text[from..].find('\n').map_or(text.len(), |i| from + i);
    let mut has_content = text[from..header_line_end]
        .chars()
        .any(|c| c.is_alphanumeric());

    let mut cursor = header_line_end;
    while cursor < text.len() {
        let start = cursor + 1;
        let line_end = text[start..].find('\n').map_or(text.len(), |i| start + i);
        let line = &text[start..line_end];

        if line.trim().is_empty() {
            if has_content {
                return cursor;
            }
        } else if is_probable_header(line) {
            return cursor;
        } else {
            has_content = true;
        }
        cursor = line_end;
    }
    text.len()
}

/// An all-caps line such as `EXPERIENCE` or `WORK HISTORY`.
pub(crate) fn is_probable_header(line: &str) -> bool {
    let line = line.trim();
    line.chars().next().is_some_and(char::is_uppercase)
        && line.chars().all(|c| c.is_uppercase() || c == ' ')
}
