//! Collation utilities for LTWA matching
//!
//! The LTWA matches titles under an equivalence relation broader than exact
//! string equality but much narrower than full Unicode collation: ligatures
//! expand (`œ` ~ `oe`), diacritics fold (`é` ~ `e`), a handful of foreign
//! letters map to ASCII runs (`þ` ~ `th`), and a few code points vanish
//! entirely (Catalan middle dot, modifier double prime). Everything here is
//! a pure function over strings.

use smallvec::SmallVec;
use unicode_normalization::UnicodeNormalization;

/// One aligned segment of a collating match: a slice of the title paired
/// with the slice of the pattern it is equivalent to. Either side holds
/// zero, one, or two characters.
pub type CollatedSegment = (SmallVec<[char; 2]>, SmallVec<[char; 2]>);

/// The parallel decomposition produced by [`collating_match`].
pub type CollatedSegments = SmallVec<[CollatedSegment; 16]>;

/// Folds a string towards its ASCII skeleton.
///
/// Applies the fixed per-character rewrites (case-preserving where the
/// target has case), strips the middle dot, the modifier double prime and
/// the Unicode replacement character, then performs compatibility
/// decomposition and drops combining marks in U+0300..=U+036F.
pub fn normalize(s: &str) -> String {
    let mut rewritten = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            'ß' => rewritten.push_str("ss"),
            'ẞ' => rewritten.push_str("SS"),
            'đ' => rewritten.push('d'),
            'Đ' => rewritten.push('D'),
            'ð' => rewritten.push('d'),
            'Ð' => rewritten.push('D'),
            'þ' => rewritten.push_str("th"),
            'Þ' => rewritten.push_str("TH"),
            'ħ' => rewritten.push('h'),
            'Ħ' => rewritten.push('H'),
            'ł' => rewritten.push('l'),
            'Ł' => rewritten.push('L'),
            'œ' => rewritten.push_str("oe"),
            'Œ' => rewritten.push_str("Oe"),
            'æ' => rewritten.push_str("ae"),
            'Æ' => rewritten.push_str("Ae"),
            'ı' => rewritten.push('i'),
            'ø' => rewritten.push('o'),
            'Ø' => rewritten.push('O'),
            '\u{00B7}' | '\u{02BA}' | '\u{FFFD}' => {}
            _ => rewritten.push(c),
        }
    }
    rewritten
        .nfkd()
        .filter(|c| !matches!(c, '\u{0300}'..='\u{036F}'))
        .collect()
}

/// Normalization used only for prefix-tree keys and queries.
///
/// Deliberately conflates far more than [`normalize`]: lowercases, maps
/// every boundary character to a space, collapses whitespace, drops
/// anything outside `[a-z ]`, and finally erases `kh` digraphs and all
/// remaining `h`. Keys and queries go through the same pipeline, so the
/// conflation is self-consistent; it only ever widens the candidate set.
pub fn promiscuous_normalize(s: &str) -> String {
    let folded = normalize(s).to_lowercase();
    let spaced: String = folded
        .chars()
        .map(|c| if is_match_boundary(c) { ' ' } else { c })
        .collect();
    let collapsed = collapse_whitespace(&spaced);
    let kept: String = collapsed
        .chars()
        .filter(|c| matches!(c, 'a'..='z' | ' '))
        .collect();
    kept.replace("kh", "").replace('h', "")
}

/// Collapses every whitespace run to a single space and trims the ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Word-boundary test used by the matcher and the collator.
///
/// The broad set: dash, any whitespace, en/em dash, and the ASCII
/// punctuation the LTWA treats as separating words.
#[inline]
pub fn is_match_boundary(c: char) -> bool {
    c.is_whitespace()
        || matches!(
            c,
            '-' | '\u{2013}'
                | '\u{2014}'
                | '_'
                | '.'
                | ','
                | ':'
                | ';'
                | '!'
                | '|'
                | '='
                | '*'
                | '\\'
                | '/'
                | '"'
                | '('
                | ')'
                | '#'
                | '%'
                | '@'
                | '$'
                | '+'
                | '&'
                | '?'
                | '\''
        )
}

/// In-title word-boundary test used by the planner.
///
/// Excludes `+ & ? '` from the broad set so that acronyms such as `A&A`
/// and names such as `Baha'i` are not split into separate words.
#[inline]
pub fn is_word_boundary(c: char) -> bool {
    c.is_whitespace()
        || matches!(
            c,
            '-' | '\u{2013}'
                | '\u{2014}'
                | '_'
                | '.'
                | ','
                | ':'
                | ';'
                | '!'
                | '|'
                | '='
                | '*'
                | '\\'
                | '/'
                | '"'
                | '('
                | ')'
                | '#'
                | '%'
                | '@'
                | '$'
        )
}

/// Collation equivalence: equal after folding and lowercasing.
///
/// Defined on arbitrary-length strings because folding may map one code
/// point to two letters (ligatures) or to nothing (middle dot).
pub fn c_equiv(s: &str, t: &str) -> bool {
    if s.len() == 1 && t.len() == 1 {
        // Fast path for the overwhelmingly common ASCII-ASCII comparison.
        let (a, b) = (s.as_bytes()[0], t.as_bytes()[0]);
        if a.is_ascii_alphanumeric() && b.is_ascii_alphanumeric() {
            return a.eq_ignore_ascii_case(&b);
        }
    }
    normalize(s).to_lowercase() == normalize(t).to_lowercase()
}

fn chars_equiv(a: &[char], b: &[char]) -> bool {
    let sa: String = a.iter().collect();
    let sb: String = b.iter().collect();
    c_equiv(&sa, &sb)
}

fn vanishes(c: char) -> bool {
    normalize(&c.to_string()).is_empty()
}

/// Aligns `pattern` as a prefix of `text` under collation equivalence.
///
/// On success returns parallel segments `(text_i, pattern_i)` with
/// `c_equiv(text_i, pattern_i)` at every index, covering all of `pattern`
/// and a prefix of `text`. The alignment is greedy; at each step it tries,
/// in order: one-to-one equivalence, two-to-two, one-to-two and two-to-one
/// ligature alignments, and an epsilon on either side for characters that
/// fold to nothing. Returns `None` as soon as a pattern position cannot be
/// aligned.
///
/// The text-side segments are what later preserves original
/// capitalization, diacritics, and spacing in the emitted abbreviation.
pub fn collating_match(text: &[char], pattern: &[char]) -> Option<CollatedSegments> {
    let mut segments = CollatedSegments::new();
    let mut i = 0; // position in text
    let mut j = 0; // position in pattern

    let seg = |t: &[char], p: &[char]| -> CollatedSegment {
        (SmallVec::from_slice(t), SmallVec::from_slice(p))
    };

    while j < pattern.len() {
        if i < text.len() && chars_equiv(&text[i..i + 1], &pattern[j..j + 1]) {
            segments.push(seg(&text[i..i + 1], &pattern[j..j + 1]));
            i += 1;
            j += 1;
        } else if i + 2 <= text.len()
            && j + 2 <= pattern.len()
            && chars_equiv(&text[i..i + 2], &pattern[j..j + 2])
        {
            segments.push(seg(&text[i..i + 2], &pattern[j..j + 2]));
            i += 2;
            j += 2;
        } else if i < text.len()
            && j + 2 <= pattern.len()
            && chars_equiv(&text[i..i + 1], &pattern[j..j + 2])
        {
            segments.push(seg(&text[i..i + 1], &pattern[j..j + 2]));
            i += 1;
            j += 2;
        } else if i + 2 <= text.len() && chars_equiv(&text[i..i + 2], &pattern[j..j + 1]) {
            segments.push(seg(&text[i..i + 2], &pattern[j..j + 1]));
            i += 2;
            j += 1;
        } else if i < text.len() && vanishes(text[i]) {
            segments.push(seg(&text[i..i + 1], &[]));
            i += 1;
        } else if vanishes(pattern[j]) {
            segments.push(seg(&[], &pattern[j..j + 1]));
            j += 1;
        } else {
            return None;
        }
    }
    Some(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn normalize_folds_diacritics_and_ligatures() {
        assert_eq!(normalize("Géographie"), "Geographie");
        assert_eq!(normalize("Œconomia"), "Oeconomia");
        assert_eq!(normalize("æther"), "aether");
        assert_eq!(normalize("Straße"), "Strasse");
        assert_eq!(normalize("Þing"), "THing");
        assert_eq!(normalize("Łódź"), "Lodz");
        assert_eq!(normalize("Søren"), "Soren");
    }

    #[test]
    fn normalize_strips_vanishing_characters() {
        assert_eq!(normalize("col·legi"), "collegi");
        assert_eq!(normalize("a\u{02BA}b"), "ab");
        assert_eq!(normalize("x\u{FFFD}y"), "xy");
    }

    #[test]
    fn promiscuous_normalize_is_lossy_but_stable() {
        assert_eq!(promiscuous_normalize("Zeitschrift für Physik"), "zeitscrift fur pysik");
        assert_eq!(promiscuous_normalize("4OR-A Quarterly"), "or a quarterly");
        // kh goes first, then stray h
        assert_eq!(promiscuous_normalize("Khimiya"), "imiya");
        assert_eq!(promiscuous_normalize("Hotel"), "otel");
    }

    #[test]
    fn c_equiv_handles_ligatures_and_case() {
        assert!(c_equiv("Œ", "oe"));
        assert!(c_equiv("é", "E"));
        assert!(c_equiv("ss", "ß"));
        assert!(!c_equiv("a", "b"));
    }

    #[test]
    fn collating_match_aligns_one_to_one() {
        let segs = collating_match(&chars("Journal of"), &chars("journal")).unwrap();
        assert_eq!(segs.len(), 7);
        let text: String = segs.iter().flat_map(|(t, _)| t.iter()).collect();
        assert_eq!(text, "Journal");
    }

    #[test]
    fn collating_match_expands_ligatures() {
        // One title character covers two pattern characters.
        let segs = collating_match(&chars("Œcologia"), &chars("oecol")).unwrap();
        assert_eq!(segs[0].0.as_slice(), &['Œ']);
        assert_eq!(segs[0].1.as_slice(), &['o', 'e']);
        // And the other way around.
        let segs = collating_match(&chars("Oeconomia"), &chars("œcon")).unwrap();
        assert_eq!(segs[0].0.as_slice(), &['O', 'e']);
        assert_eq!(segs[0].1.as_slice(), &['œ']);
    }

    #[test]
    fn collating_match_consumes_vanishing_text() {
        // The middle dot folds to nothing and rides along with the next
        // letter in a two-to-one segment.
        let segs = collating_match(&chars("col·legi"), &chars("collegi")).unwrap();
        let text: String = segs.iter().flat_map(|(t, _)| t.iter()).collect();
        assert_eq!(text, "col·legi");
        // With no letter to ride on, the epsilon step takes it alone.
        let segs = collating_match(&chars("a··b"), &chars("ab")).unwrap();
        assert!(segs.iter().any(|(t, p)| t.as_slice() == ['·'] && p.is_empty()));
        // And a vanishing character on the pattern side aligns to nothing.
        let segs = collating_match(&chars("ab"), &chars("ab·")).unwrap();
        assert!(segs.iter().any(|(t, p)| t.is_empty() && p.as_slice() == ['·']));
    }

    #[test]
    fn collating_match_rejects_mismatch() {
        assert!(collating_match(&chars("Journal"), &chars("quart")).is_none());
        // Pattern longer than the text cannot align.
        assert!(collating_match(&chars("Jou"), &chars("journal")).is_none());
    }

    #[test]
    fn boundary_sets_differ_on_acronym_glue() {
        for c in ['+', '&', '?', '\''] {
            assert!(is_match_boundary(c), "{c} is a matcher boundary");
            assert!(!is_word_boundary(c), "{c} must not split title words");
        }
        for c in ['-', ' ', '\u{2013}', '.', '/'] {
            assert!(is_match_boundary(c));
            assert!(is_word_boundary(c));
        }
    }
}
