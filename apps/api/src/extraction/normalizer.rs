//! Text normalization. Produces the two views the rest of the pipeline reads:
//! a collapsed single-line string for substring/regex matching, and a
//! line-preserving string for heuristics that care about line positions
//! (name detection, section headers, paragraph breaks).

/// UTF-8 punctuation that was decoded as Latin-1 somewhere upstream.
/// Longest sequences first so the bare `â€` prefix never shadows them.
const MOJIBAKE_REPAIRS: &[(&str, &str)] = &[
    ("â€™", "'"),
    ("â€˜", "'"),
    ("â€œ", "\""),
    ("â€¢", "•"),
    ("â€\u{201c}", "-"),
    ("â€\u{201d}", "-"),
    ("â€", "\""),
];

/// Typographic separators folded to a plain hyphen so date ranges and
/// `Role | Company` separators survive character filtering.
const SEPARATOR_FOLDS: &[(char, &str)] = &[
    ('\u{2013}', "-"),
    ('\u{2014}', "-"),
    ('|', "-"),
    ('•', "-"),
];

/// Punctuation kept besides letters, digits, underscore and whitespace.
const ALLOWED_PUNCTUATION: &[char] = &['.', ',', ';', ':', '-', '(', ')', '@'];

/// Both text views of one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextViews {
    /// Line breaks kept, intra-line whitespace collapsed, blank-line runs reduced to one.
    pub lines: String,
    /// Every whitespace run collapsed to a single space.
    pub collapsed: String,
}

impl TextViews {
    pub fn new(raw: &str) -> Self {
        Self {
            lines: normalize_lines(raw),
            collapsed: normalize(raw),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.collapsed.is_empty()
    }
}

/// Cleans raw extracted text into a single whitespace-collapsed line.
pub fn normalize(raw: &str) -> String {
    let filtered = filter_chars(&repair_punctuation(raw));
    filtered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Same cleaning as [`normalize`] but keeps line structure.
pub fn normalize_lines(raw: &str) -> String {
    let filtered = filter_chars(&repair_punctuation(raw));
    let mut out: Vec<String> = Vec::new();
    let mut pending_blank = false;

    for line in filtered.lines() {
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            pending_blank = !out.is_empty();
            continue;
        }
        if pending_blank {
            out.push(String::new());
            pending_blank = false;
        }
        out.push(collapsed);
    }

    out.join("\n")
}

pub(crate) fn is_allowed_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c.is_whitespace() || ALLOWED_PUNCTUATION.contains(&c)
}

fn repair_punctuation(raw: &str) -> String {
    let mut text = raw.to_string();
    for (broken, fixed) in MOJIBAKE_REPAIRS {
        if text.contains(broken) {
            text = text.replace(broken, fixed);
        }
    }
    for (separator, hyphen) in SEPARATOR_FOLDS {
        if text.contains(*separator) {
            text = text.replace(*separator, hyphen);
        }
    }
    text
}

fn filter_chars(text: &str) -> String {
    // \r would otherwise survive as whitespace and split lines oddly
    text.chars()
        .filter(|&c| c != '\r' && is_allowed_char(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invariant(out: &str) {
        assert!(!out.contains("  "), "double space in {out:?}");
        assert!(
            out.chars().all(|c| c == ' ' || (is_allowed_char(c) && !c.is_whitespace())),
            "disallowed char in {out:?}"
        );
    }

    #[test]
    fn test_collapses_all_whitespace_runs() {
        let out = normalize("Jane   Doe\n\n\tjane@x.com \r\n");
        assert_eq!(out, "Jane Doe jane@x.com");
        assert_invariant(&out);
    }

    #[test]
    fn test_strips_disallowed_symbols() {
        let out = normalize("C++ & C# * Rust! (5 years) 100% ok?");
        assert_eq!(out, "C C Rust (5 years) 100 ok");
        assert_invariant(&out);
    }

    #[test]
    fn test_keeps_allowed_punctuation() {
        let out = normalize("a.b,c;d:e-f(g)h@i");
        assert_eq!(out, "a.b,c;d:e-f(g)h@i");
    }

    #[test]
    fn test_keeps_unicode_letters() {
        assert_eq!(normalize("José Müller, Zürich"), "José Müller, Zürich");
    }

    #[test]
    fn test_folds_typographic_separators() {
        assert_eq!(normalize("2019\u{2013}2022"), "2019-2022");
        assert_eq!(normalize("Engineer | Acme — Berlin"), "Engineer - Acme - Berlin");
        assert_eq!(normalize("• Shipped v2"), "- Shipped v2");
    }

    #[test]
    fn test_repairs_mojibake_before_filtering() {
        // The repaired apostrophe is itself outside the allowed set.
        assert_eq!(normalize("Janeâ€™s CV"), "Janes CV");
        assert_eq!(normalize("2019â€\u{201c}2022"), "2019-2022");
    }

    #[test]
    fn test_empty_and_symbol_only_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("  !!  ##  "), "");
    }

    #[test]
    fn test_invariant_on_mixed_garbage() {
        let inputs = [
            "\u{00a0}\u{00a0}nbsp\u{2003}em space",
            "tabs\t\tand\n\n\nnewlines",
            "$$$ money {braces} [brackets] <angles>",
            "emoji 🚀 rocket",
        ];
        for input in inputs {
            assert_invariant(&normalize(input));
        }
    }

    #[test]
    fn test_lines_view_keeps_line_breaks() {
        let out = normalize_lines("Jane  Doe\njane@x.com\nSKILLS\n");
        assert_eq!(out, "Jane Doe\njane@x.com\nSKILLS");
    }

    #[test]
    fn test_lines_view_reduces_blank_runs_to_one() {
        let out = normalize_lines("\n\nSUMMARY\n\n\n\nText here\n   \n\nEnd");
        assert_eq!(out, "SUMMARY\n\nText here\n\nEnd");
    }

    #[test]
    fn test_lines_view_handles_crlf() {
        assert_eq!(normalize_lines("a\r\nb\r\n"), "a\nb");
    }

    #[test]
    fn test_text_views_empty_input() {
        assert!(TextViews::new(" \n\t ").is_empty());
    }
}
