//! The abbreviation planner
//!
//! Everything between the raw title and the LTWA matcher: ISO-4
//! punctuation normalization, dependent-title elision, article and
//! short-word removal, and the deterministic resolution of overlapping
//! matches. The rewrite rules are genuinely regex-shaped and are compiled
//! once into statics; the hot-path boundary tests live in
//! [`collation`](crate::collation) as plain predicates.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::collation::is_word_boundary;
use crate::matcher::PatternMatch;

/// Character class of the planner's word boundaries, for composing the
/// article and short-word rules. Must agree with
/// [`is_word_boundary`](crate::collation::is_word_boundary).
const BOUNDARY_CLASS: &str = r#"[-\s–—_.,:;!|=*\\/"()#%@$]"#;

static ELLIPSIS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.\.\.|…").expect("valid regex"));

/// A single capital letter after start, a capital, or acronym punctuation:
/// the dot belonged to an initialism.
static ACRONYM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"((^|[A-Z,.&\-\\/])\s?[A-Z]),").expect("valid regex"));

static SINGLE_CAP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\s[A-Z]),").expect("valid regex"));

static INTRA_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z]),([A-Za-z])").expect("valid regex"));

static NUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([\s\-:,&#()\\/][0-9]{1,3}),").expect("valid regex"));

static HONORIFIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"((^|\s)(St|Mr|Ms|Mrs|Mx|Dr|Prof|vs)),").expect("valid regex"));

static LEADING_J_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^J,").expect("valid regex"));

static AMPERSAND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^A-Z0-9])[&+]([^A-Z0-9])").expect("valid regex"));

/// Dependent-title separators followed by an enumeration token (single
/// capital, roman numeral, or digits) and a boundary: the separator goes,
/// the enumeration stays.
static DEPENDENT_TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:Series|Serie|Série|Section|Sect|Sec|Ser|Part)[.,]?\s+([0-9]+|[IVXLCDM]+|[A-Z])([^0-9A-Za-z]|$)")
        .expect("valid regex")
});

/// Articles removed at start or after a boundary when followed by
/// whitespace. Case-insensitive in the first letter only.
static ARTICLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let articles = concat!(
        "[Aa]n|[Aa]|[Tt]he|",
        "[Dd]er|[Dd]ie|[Dd]as|[Dd]en|[Dd]em|[Dd]es|[Dd]e|",
        "[Ll]es|[Ll]e|[Ll]a|[Ll]os|[Ll]o|[Ii]l|",
        "[Ee]ls|[Ee]l|[Ee]en|[Ee]s|[Hh]et|[Ss]es|[Gg]li|['’][tn]",
    );
    Regex::new(&format!(r"(^|{BOUNDARY_CLASS})(?:{articles})\s+")).expect("valid regex")
});

/// Contracted articles are stripped regardless of what follows.
static CONTRACTED_ARTICLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(^|{BOUNDARY_CLASS})(?:dell|nell|[LlDd])['’]")).expect("valid regex")
});

/// ISO-4 punctuation normalization.
///
/// Commas are disallowed and dropped; periods survive only where they
/// plausibly belong to an initialism, an intra-word dot, a small numeric,
/// an honorific, or a leading `J.`. The period/comma swap is a temporary
/// encoding: original commas are removed first, then every period becomes
/// a comma, then the rules below turn the legitimate ones back.
pub(crate) fn normalize_punctuation(title: &str) -> String {
    let mut s = title.nfc().collect::<String>().trim().to_string();
    s = ELLIPSIS_RE.replace_all(&s, "").into_owned();
    s = s.replace(',', "");
    s = s.replace('.', ",");
    // Twice: adjacent initialism dots overlap ("A,B,C," needs two passes).
    s = ACRONYM_RE.replace_all(&s, "${1}.").into_owned();
    s = ACRONYM_RE.replace_all(&s, "${1}.").into_owned();
    s = SINGLE_CAP_RE.replace_all(&s, "${1}.").into_owned();
    s = INTRA_WORD_RE.replace_all(&s, "${1}.${2}").into_owned();
    s = NUMERIC_RE.replace_all(&s, "${1}.").into_owned();
    s = HONORIFIC_RE.replace_all(&s, "${1}.").into_owned();
    s = LEADING_J_RE.replace(&s, "J.").into_owned();
    // `&`/`+` standing for "and" go away; AT&T-style glue stays.
    s = AMPERSAND_RE.replace_all(&s, "${1}${2}").into_owned();
    s
}

pub(crate) fn elide_dependent_title(title: &str) -> String {
    DEPENDENT_TITLE_RE.replace_all(title, "${1}${2}").into_owned()
}

pub(crate) fn strip_articles(title: &str) -> String {
    let s = ARTICLE_RE.replace_all(title, "${1}").into_owned();
    CONTRACTED_ARTICLE_RE.replace_all(&s, "${1}").into_owned()
}

/// Builds the per-engine short-word removal rules: each word is removed
/// when preceded by a boundary (so never at string start) and followed by
/// whitespace, in its original and initial-capital forms.
pub(crate) fn build_short_word_rules(words: &[String]) -> Vec<Regex> {
    words
        .iter()
        .map(|word| {
            let capitalized = capitalize(word);
            let alternation = if capitalized == *word {
                regex::escape(word)
            } else {
                format!("{}|{}", regex::escape(word), regex::escape(&capitalized))
            };
            Regex::new(&format!(r"({BOUNDARY_CLASS})(?:{alternation})\s"))
                .expect("valid regex")
        })
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub(crate) fn remove_short_words(title: &str, rules: &[Regex]) -> String {
    let mut s = title.to_string();
    for rule in rules {
        s = rule.replace_all(&s, "${1}").into_owned();
    }
    s
}

/// True when the title holds at most one word: no two word characters
/// separated by a boundary once short words are gone. ISO-4 preserves
/// single-word titles unabbreviated.
pub(crate) fn is_single_word(title: &str, short_word_rules: &[Regex]) -> bool {
    let stripped = remove_short_words(title, short_word_rules);
    let mut seen_word = false;
    let mut boundary_after_word = false;
    for c in stripped.chars() {
        if is_word_boundary(c) {
            if seen_word {
                boundary_after_word = true;
            }
        } else {
            if boundary_after_word {
                return false;
            }
            seen_word = true;
        }
    }
    true
}

/// Overlap-resolution priority; lower wins. Word-start-anchored patterns
/// dominate mid-word ones; longer matches and longer patterns are
/// preferred; a shorter flectional appendix beats a longer one. The 100/3
/// weights are part of the output contract and are not to be tuned.
pub(crate) fn priority(m: &PatternMatch<'_>) -> i64 {
    let appendix = m.appendix.chars().count() as i64;
    let span = (m.end - m.start) as i64;
    let pattern_len = m.pattern.pattern().chars().count() as i64;
    (if m.pattern.start_dash() { 100 } else { 0 })
        + (if m.pattern.end_dash() { 3 } else { 0 })
        + appendix
        - (span - appendix)
        - pattern_len
}

/// Sorts by priority and keeps every match whose span does not strictly
/// intersect an already-kept one. Quadratic in the number of candidate
/// matches, which stays in the tens per title.
pub(crate) fn resolve_overlaps<'a>(mut matches: Vec<PatternMatch<'a>>) -> Vec<PatternMatch<'a>> {
    matches.sort_by_key(priority);
    let mut kept: Vec<PatternMatch<'a>> = Vec::new();
    for m in matches {
        if kept.iter().all(|k| m.end <= k.start || k.end <= m.start) {
            kept.push(m);
        }
    }
    kept
}

/// Applies surviving matches right-to-left. A substitution that does not
/// strictly shorten its span is skipped.
pub(crate) fn apply_matches(title: &[char], matches: &[PatternMatch<'_>]) -> String {
    let mut chars = title.to_vec();
    let mut ordered: Vec<&PatternMatch<'_>> = matches.iter().collect();
    ordered.sort_by(|a, b| b.start.cmp(&a.start));
    for m in ordered {
        let abbreviation: Vec<char> = m.abbreviation.chars().collect();
        if abbreviation.len() >= m.end - m.start {
            continue;
        }
        chars.splice(m.start..m.end, abbreviation);
    }
    chars.into_iter().collect()
}
