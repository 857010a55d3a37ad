//! Work-experience extraction from the experience section.
//!
//! Entries are recognised by line shape, tried in order at every line:
//! - single line: `Role - Company - 2019-2022`
//! - two lines:   `Role at Company` / `2019 - Present`
//! - stacked:     `Role` / `Company` / `2019-2022`
//!
//! Lines consumed by an entry are not looked at again.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use crate::extraction::models::ExperienceRecord;
use crate::extraction::sections::{locate, EXPERIENCE_HEADERS};
use crate::extraction::ExtractionError;

/// Years outside this range are treated as unparseable.
pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2100;

/// First word of a role or company: capitalised, hyphens only inside the word.
const LEAD_WORD: &str = r"[A-Z][A-Za-z0-9&.,'()/]*(?:-[A-Za-z0-9&.,'()/]+)*";
const WORD: &str = r"[A-Za-z0-9&.,'()/]+(?:-[A-Za-z0-9&.,'()/]+)*";
const SEPARATOR: &str = r"(?:\s+-\s+|\s*@\s*|\s+at\s+)";
const DATES: &str = r"\(?(?P<start>\d{4})\s*-\s*(?P<end>\d{4}|(?i:present|current))\)?";

fn name(group: &str) -> String {
    format!(r"(?P<{group}>{LEAD_WORD}(?: {WORD})*?)")
}

static SINGLE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^{role}{SEPARATOR}{company}(?:{SEPARATOR}|\s*,\s*|\s+){DATES}\s*$",
        role = name("role"),
        company = name("company"),
    ))
    .expect("valid single-line experience regex")
});

static ROLE_AND_COMPANY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^{role}{SEPARATOR}{company}\s*$",
        role = name("role"),
        company = name("company"),
    ))
    .expect("valid role/company regex")
});

static NAME_ONLY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{}\s*$", name("name"))).expect("valid name-only regex")
});

static DATE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{DATES}(?:[\s,;:].*)?$")).expect("valid date-line regex")
});

/// Entry as matched, before the date range is validated.
#[derive(Debug)]
struct RawEntry<'a> {
    role: &'a str,
    company: &'a str,
    start: &'a str,
    end: &'a str,
}

/// Extracts experience records. `current_year` resolves open-ended ranges.
pub fn extract_experience(
    text: &str,
    current_year: i32,
) -> Result<Vec<ExperienceRecord>, ExtractionError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&current_year) {
        return Err(ExtractionError::InvalidReferenceYear(current_year));
    }

    let Some(section) = locate(text, EXPERIENCE_HEADERS)? else {
        return Ok(Vec::new());
    };
    debug!("Experience section found under '{}'", section.header);
    let lines: Vec<&str> = section.body().lines().map(str::trim).collect();

    let mut records = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let Some((entry, consumed)) = match_entry(&lines[i..]) else {
            i += 1;
            continue;
        };
        match into_record(&entry, current_year) {
            Some(record) => records.push(record),
            None => debug!(
                "Dropping experience entry with ambiguous dates: {}-{}",
                entry.start, entry.end
            ),
        }
        i += consumed;
    }

    Ok(records)
}

/// Tries each line shape at the head of `lines`; returns the entry and the
/// number of lines it spans.
fn match_entry<'a>(lines: &[&'a str]) -> Option<(RawEntry<'a>, usize)> {
    let first = *lines.first()?;

    if let Some(caps) = SINGLE_LINE.captures(first) {
        let dates = dates_of(&caps)?;
        return Some((
            RawEntry {
                role: group(&caps, "role"),
                company: group(&caps, "company"),
                start: dates.0,
                end: dates.1,
            },
            1,
        ));
    }

    let second = lines.get(1).copied();
    if let (Some(caps), Some(dates)) = (
        ROLE_AND_COMPANY.captures(first),
        second.and_then(|l| DATE_LINE.captures(l)),
    ) {
        let (start, end) = dates_of(&dates)?;
        return Some((
            RawEntry {
                role: group(&caps, "role"),
                company: group(&caps, "company"),
                start,
                end,
            },
            2,
        ));
    }

    let third = lines.get(2).copied();
    if let (Some(role), Some(company), Some(dates)) = (
        NAME_ONLY.captures(first),
        second.and_then(|l| NAME_ONLY.captures(l)),
        third.and_then(|l| DATE_LINE.captures(l)),
    ) {
        let (start, end) = dates_of(&dates)?;
        return Some((
            RawEntry {
                role: group(&role, "name"),
                company: group(&company, "name"),
                start,
                end,
            },
            3,
        ));
    }

    None
}

fn group<'a>(caps: &Captures<'a>, name: &str) -> &'a str {
    caps.name(name).map_or("", |m| m.as_str().trim())
}

fn dates_of<'a>(caps: &Captures<'a>) -> Option<(&'a str, &'a str)> {
    Some((caps.name("start")?.as_str(), caps.name("end")?.as_str()))
}

fn into_record(entry: &RawEntry<'_>, current_year: i32) -> Option<ExperienceRecord> {
    let (start, end) = parse_date_range(entry.start, entry.end)?;
    Some(ExperienceRecord {
        company: entry.company.to_string(),
        role: entry.role.to_string(),
        start_year: Some(start),
        end_year: end,
        duration_years: duration_years(start, end, current_year),
    })
}

/// Parses `(start, end)` where `end` may be "Present"/"Current" (→ `None`).
/// Returns `None` when either year is outside the plausible range.
pub fn parse_date_range(start: &str, end: &str) -> Option<(i32, Option<i32>)> {
    let start = parse_year(start)?;
    let end = if end.eq_ignore_ascii_case("present") || end.eq_ignore_ascii_case("current") {
        None
    } else {
        Some(parse_year(end)?)
    };
    Some((start, end))
}

/// `max(0, end_or_current - start)`.
pub fn duration_years(start: i32, end: Option<i32>, current_year: i32) -> u32 {
    let end = end.unwrap_or(current_year);
    u32::try_from(end - start).unwrap_or(0)
}

fn parse_year(raw: &str) -> Option<i32> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .filter(|y| (MIN_YEAR..=MAX_YEAR).contains(y))
}
