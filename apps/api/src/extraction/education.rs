use std::sync::LazyLock;

use regex::Regex;

use crate::extraction::models::EducationRecord;
use crate::extraction::sections::{locate, EDUCATION_HEADERS};
use crate::extraction::ExtractionError;

/// Placeholder used when a line names no field of study.
pub const UNSPECIFIED_FIELD: &str = "Unspecified";

static DEGREE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^A-Za-z])(?P<degree>Bachelor|Master|PhD|B\.S\.|M\.S\.|B\.A\.|M\.A\.|BS|MS|BA|MA)s?(?:[^A-Za-z.]|$)")
        .expect("valid degree regex")
});

static INSTITUTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:[A-Z][A-Za-z&.]*\s+)*(?:University|College|Institute)(?:\s+of(?:\s+[A-Z][A-Za-z&]*)+)?")
        .expect("valid institution regex")
});

static FIELD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bin\s+(?P<field>[A-Z][A-Za-z&]*(?:\s+[A-Z][A-Za-z&]*)*)").expect("valid field regex")
});

static YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("valid year regex"));

/// Extracts one record per education line carrying a degree, an institution
/// and a year. Lines missing any of the three are skipped.
pub fn extract_education(text: &str) -> Result<Vec<EducationRecord>, ExtractionError> {
    let Some(section) = locate(text, EDUCATION_HEADERS)? else {
        return Ok(Vec::new());
    };

    Ok(section.body().lines().filter_map(parse_line).collect())
}

fn parse_line(line: &str) -> Option<EducationRecord> {
    let degree = DEGREE_PATTERN.captures(line)?.name("degree")?;
    let after_degree = &line[degree.end()..];

    let institution = INSTITUTION_PATTERN.find(after_degree)?;
    let graduation_year = YEAR_PATTERN
        .find_iter(line)
        .last()?
        .as_str()
        .parse::<i32>()
        .ok()?;

    let field = FIELD_PATTERN
        .captures(&after_degree[..institution.start()])
        .and_then(|caps| caps.name("field"))
        .map_or(UNSPECIFIED_FIELD, |m| m.as_str().trim());

    Some(EducationRecord {
        degree: degree.as_str().to_string(),
        institution: institution.as_str().trim().to_string(),
        field: field.to_string(),
        graduation_year,
    })
}
