//! LTWA pattern records and parsing
//!
//! One LTWA record maps a word or word-fragment to its canonical
//! abbreviation, with optional leading/trailing dashes marking allowed
//! affixation and a set of ISO-639-2/B language tags.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::collation::normalize;
use crate::error::{LtwaError, Result};

/// The placeholder replacement meaning "this word is not abbreviated".
pub(crate) const UNABBREVIATED: &str = "\u{2013}";

static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]*\)").expect("valid regex"));

/// One parsed LTWA record. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pattern: String,
    replacement: String,
    languages: Vec<String>,
    start_dash: bool,
    end_dash: bool,
    line: String,
    /// Pattern body with affix dashes stripped, as chars, for the matcher.
    body: Vec<char>,
    /// Whether the body starts with an ASCII letter after folding.
    letter_initial: bool,
}

impl Pattern {
    /// Parses a single tab-separated LTWA line.
    pub(crate) fn parse(raw: &str) -> Result<Self> {
        let mut fields = raw.split('\t');
        let (Some(pattern_field), Some(replacement_field), Some(languages_field)) =
            (fields.next(), fields.next(), fields.next())
        else {
            return Err(LtwaError::InvalidLtwaLine {
                reason: "expected three tab-separated fields",
                line: raw.to_string(),
            });
        };

        let pattern_nfc: String = pattern_field.nfc().collect();
        let pattern = COMMENT_RE.replace_all(&pattern_nfc, "").trim().to_string();
        if pattern.chars().count() < 3 {
            return Err(LtwaError::InvalidLtwaLine {
                reason: "pattern shorter than 3 characters",
                line: raw.to_string(),
            });
        }

        let replacement_nfc: String = replacement_field.nfc().collect();
        let replacement = match replacement_nfc.trim() {
            "n.a." | "n. a." | "n.a" => UNABBREVIATED.to_string(),
            other => other.to_string(),
        };

        let languages: Vec<String> = languages_field
            .split(',')
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();

        let start_dash = pattern.starts_with('-');
        let end_dash = pattern.ends_with('-');
        let body: Vec<char> = pattern
            .trim_start_matches('-')
            .trim_end_matches('-')
            .chars()
            .collect();
        let body_str: String = body.iter().collect();
        let letter_initial = normalize(&body_str)
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic());

        Ok(Self {
            pattern,
            replacement,
            languages,
            start_dash,
            end_dash,
            line: raw.to_string(),
            body,
            letter_initial,
        })
    }

    /// The pattern string as loaded (dashes included, comments stripped).
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The abbreviation this pattern rewrites to. For unabbreviated
    /// entries this is the en-dash placeholder; see
    /// [`is_unabbreviated`](Self::is_unabbreviated).
    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// ISO-639-2/B language tags attached to the record.
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// True when the pattern may match mid-word (leading `-`).
    pub fn start_dash(&self) -> bool {
        self.start_dash
    }

    /// True when the pattern covers flected forms of arbitrary length
    /// (trailing `-`).
    pub fn end_dash(&self) -> bool {
        self.end_dash
    }

    /// The raw LTWA line this record was parsed from.
    pub fn line(&self) -> &str {
        &self.line
    }

    /// True when the record marks its word as not abbreviated.
    pub fn is_unabbreviated(&self) -> bool {
        self.replacement == UNABBREVIATED
    }

    pub(crate) fn body(&self) -> &[char] {
        &self.body
    }

    pub(crate) fn letter_initial(&self) -> bool {
        self.letter_initial
    }

    pub(crate) fn matches_languages(&self, languages: Option<&[&str]>) -> bool {
        match languages {
            None => true,
            Some(list) => {
                list.contains(&"*") || self.languages.iter().any(|l| list.contains(&l.as_str()))
            }
        }
    }
}

/// Splits text on every Unicode line break: CRLF, LF, VT, FF, CR, NEL,
/// LINE SEPARATOR, PARAGRAPH SEPARATOR.
pub(crate) fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut iter = text.char_indices().peekable();
    while let Some((i, c)) = iter.next() {
        match c {
            '\r' => {
                lines.push(&text[start..i]);
                // CRLF counts as a single break.
                if let Some(&(_, '\n')) = iter.peek() {
                    iter.next();
                    start = i + 2;
                } else {
                    start = i + 1;
                }
            }
            '\n' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}' => {
                lines.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Parses the short-word list: one word per line, trimmed, blanks skipped.
pub(crate) fn parse_short_words(text: &str) -> Vec<String> {
    split_lines(text)
        .into_iter()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
