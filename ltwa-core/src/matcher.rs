//! Single-pattern match enumeration
//!
//! Finds every site where one LTWA pattern matches a title under collation
//! equivalence, and assembles the abbreviation emitted at each site from
//! the original title text (so case, diacritics, and ligatures survive).
//! Overlapping sites are expected; the planner resolves them later.

use crate::collation::{c_equiv, collating_match, is_match_boundary, CollatedSegments};
use crate::pattern::Pattern;

/// One match site of a pattern inside a title.
///
/// Offsets are character indices into the NFC-normalized, trimmed title
/// the match was computed against.
#[derive(Debug, Clone)]
pub struct PatternMatch<'a> {
    /// Start of the consumed span.
    pub start: usize,
    /// End of the consumed span (exclusive); includes any flectional
    /// appendix or dash extension.
    pub end: usize,
    /// The abbreviation emitted for this span. Built from original title
    /// characters plus literal `.` characters from the replacement
    /// template; for unabbreviated patterns, the span verbatim.
    pub abbreviation: String,
    /// The tolerated flectional suffix (empty for end-dash patterns).
    pub appendix: String,
    /// The pattern that produced this match.
    pub pattern: &'a Pattern,
}

/// Characters tolerated as a short flectional suffix after a pattern that
/// has no end dash.
#[inline]
fn is_appendix_char(c: char) -> bool {
    matches!(c, 'i' | 'a' | 'e' | 's' | 'n' | '\'' | '\u{2019}')
}

/// Enumerates every match site of `pattern` in `title`.
///
/// `title` is the char sequence of an NFC-normalized, trimmed title.
/// A language list that neither contains `"*"` nor intersects the
/// pattern's tags yields no matches. With `pretend_dash`, the pattern is
/// treated as if it carried both affix dashes (used to surface compound
/// words such as `engineering` inside `bioengineering`).
pub(crate) fn enumerate_matches<'a>(
    title: &[char],
    pattern: &'a Pattern,
    languages: Option<&[&str]>,
    pretend_dash: bool,
) -> Vec<PatternMatch<'a>> {
    let mut out = Vec::new();
    if !pattern.matches_languages(languages) {
        return out;
    }
    let body = pattern.body();
    if body.is_empty() {
        return out;
    }

    // Affix dashes in the replacement mirror the ones stripped from the
    // body; they never appear in the emitted abbreviation.
    let rep: Vec<char> = if pattern.is_unabbreviated() {
        Vec::new()
    } else {
        pattern
            .replacement()
            .trim_start_matches('-')
            .trim_end_matches('-')
            .chars()
            .collect()
    };
    let requires_word_start = !pattern.start_dash() && !pretend_dash;
    let open_ended = pattern.end_dash() || pretend_dash;

    for i in 0..title.len() {
        if requires_word_start && i > 0 && !is_match_boundary(title[i - 1]) {
            continue;
        }
        let Some(segments) = collating_match(&title[i..], body) else {
            continue;
        };
        let Some((abbreviation, mut iend)) = emit_abbreviation(&segments, &rep, i) else {
            continue;
        };

        let appendix: String;
        if open_ended {
            // Flection of arbitrary length: consume up to the next boundary.
            while iend < title.len() && !is_match_boundary(title[iend]) {
                iend += 1;
            }
            appendix = String::new();
        } else {
            // The pattern must end at a word boundary, but a short
            // flectional suffix is tolerated. Longest suffix first.
            let mut run = 0;
            while run < 3 && iend + run < title.len() && is_appendix_char(title[iend + run]) {
                run += 1;
            }
            let Some(len) = (0..=run)
                .rev()
                .find(|&k| iend + k >= title.len() || is_match_boundary(title[iend + k]))
            else {
                continue;
            };
            appendix = title[iend..iend + len].iter().collect();
            iend += len;
        }

        let abbreviation = if pattern.is_unabbreviated() {
            title[i..iend].iter().collect()
        } else {
            abbreviation
        };
        out.push(PatternMatch {
            start: i,
            end: iend,
            abbreviation,
            appendix,
            pattern,
        });
    }
    out
}

/// Walks the replacement template against the aligned segments, emitting
/// original-text slices for each replacement character and a literal `.`
/// for dots. Returns the assembled abbreviation and the title offset just
/// past the aligned body, or `None` when the template cannot be satisfied
/// by the alignment.
fn emit_abbreviation(
    segments: &CollatedSegments,
    rep: &[char],
    start: usize,
) -> Option<(String, usize)> {
    let mut abbreviation = String::new();
    let mut iend = start;
    let mut ii = 0;
    let mut j = 0;
    while j < rep.len() {
        if rep[j] == '.' {
            abbreviation.push('.');
            j += 1;
            continue;
        }
        loop {
            let (text_side, pattern_side) = segments.get(ii)?;
            let pattern_side: String = pattern_side.iter().collect();
            let one: String = rep[j..j + 1].iter().collect();
            if c_equiv(&pattern_side, &one) {
                abbreviation.extend(text_side.iter());
                iend += text_side.len();
                ii += 1;
                j += 1;
                break;
            }
            if j + 1 < rep.len() {
                let two: String = rep[j..j + 2].iter().collect();
                if c_equiv(&pattern_side, &two) {
                    abbreviation.extend(text_side.iter());
                    iend += text_side.len();
                    ii += 1;
                    j += 2;
                    break;
                }
            }
            // This segment has no counterpart in the abbreviation; it is
            // still part of the consumed span.
            iend += text_side.len();
            ii += 1;
        }
    }
    for (text_side, _) in &segments[ii..] {
        iend += text_side.len();
    }
    Some((abbreviation, iend))
}
