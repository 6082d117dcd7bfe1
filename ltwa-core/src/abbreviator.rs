//! The abbreviation engine
//!
//! [`TitleAbbreviator`] is built once from the LTWA and a short-word list,
//! then answers queries without mutating shared state. It owns two prefix
//! trees (one for word-boundary-anchored patterns, one for patterns that
//! may match mid-word) plus a small list of "bad" patterns whose bodies
//! do not start with a letter and therefore bypass the index entirely.
//! The engine is `Send + Sync` and can be shared across workers freely.

use regex::Regex;
use tracing::{debug, trace};
use unicode_normalization::UnicodeNormalization;

use crate::collation::{collapse_whitespace, promiscuous_normalize};
use crate::error::Result;
use crate::matcher::{enumerate_matches, PatternMatch};
use crate::pattern::{parse_short_words, split_lines, Pattern};
use crate::planner;
use crate::prefix_tree::PrefixTree;

/// The conventional language set for computing English-style ISO-4
/// abbreviations: English plus the multilingual, Latin, and undefined
/// tags that apply across languages.
pub const DEFAULT_LANGUAGES: [&str; 4] = ["eng", "mul", "lat", "und"];

/// ISO-4 serial-title abbreviation engine.
#[derive(Debug)]
pub struct TitleAbbreviator {
    patterns: Vec<Pattern>,
    /// Word-boundary-anchored patterns, keyed promiscuously.
    dict_patterns: PrefixTree<u32>,
    /// Start-dash patterns that may match mid-word.
    nonprefix_patterns: PrefixTree<u32>,
    /// Patterns whose folded body is not letter-initial; always evaluated.
    bad_patterns: Vec<u32>,
    short_words: Vec<String>,
    short_word_rules: Vec<Regex>,
}

impl TitleAbbreviator {
    /// Builds an engine from the LTWA and a short-word list.
    ///
    /// `ltwa` is the full dictionary text: a header line, then one
    /// tab-separated record per line (`pattern`, `replacement`,
    /// comma-separated `languages`). `short_words` holds one word per
    /// line. Fails on the first malformed LTWA record.
    pub fn new(ltwa: &str, short_words: &str) -> Result<Self> {
        let mut patterns = Vec::new();
        for line in split_lines(ltwa).into_iter().skip(1) {
            if line.trim().is_empty() {
                continue;
            }
            patterns.push(Pattern::parse(line)?);
        }

        let mut dict_patterns = PrefixTree::new();
        let mut nonprefix_patterns = PrefixTree::new();
        let mut bad_patterns = Vec::new();
        for (index, pattern) in patterns.iter().enumerate() {
            let index = index as u32;
            if !pattern.letter_initial() {
                bad_patterns.push(index);
            } else if pattern.start_dash() {
                nonprefix_patterns.add(&promiscuous_normalize(pattern.pattern()), index);
            } else {
                dict_patterns.add(&promiscuous_normalize(pattern.pattern()), index);
            }
        }

        let short_words = parse_short_words(short_words);
        let short_word_rules = planner::build_short_word_rules(&short_words);

        debug!(
            patterns = patterns.len(),
            anchored = dict_patterns.len(),
            mid_word = nonprefix_patterns.len(),
            bad = bad_patterns.len(),
            short_words = short_words.len(),
            "title abbreviator built"
        );

        Ok(Self {
            patterns,
            dict_patterns,
            nonprefix_patterns,
            bad_patterns,
            short_words,
            short_word_rules,
        })
    }

    /// Number of LTWA patterns loaded.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// True when no patterns are loaded.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// The short words removed by the planner.
    pub fn short_words(&self) -> &[String] {
        &self.short_words
    }

    /// Patterns that might match somewhere in `title`, gathered from the
    /// prefix trees over the promiscuously normalized title. The result
    /// over-approximates (exact matching happens later) and is sorted by
    /// raw LTWA line. With `pretend_dash`, every position counts as a
    /// word start, surfacing compound-word candidates.
    pub fn potential_patterns(&self, title: &str, pretend_dash: bool) -> Vec<&Pattern> {
        let key = promiscuous_normalize(title);
        let chars: Vec<char> = key.chars().collect();

        let mut indices: Vec<u32> = self.bad_patterns.clone();
        for i in 0..chars.len() {
            let new_word = pretend_dash || i == 0 || !chars[i - 1].is_ascii_lowercase();
            if chars[i].is_ascii_lowercase() {
                indices.extend(self.nonprefix_patterns.get(&chars[i..]));
            }
            if new_word {
                indices.extend(self.dict_patterns.get(&chars[i..]));
            }
        }

        indices.sort_by(|&a, &b| {
            self.patterns[a as usize]
                .line()
                .cmp(self.patterns[b as usize].line())
                .then(a.cmp(&b))
        });
        indices.dedup();
        indices
            .into_iter()
            .map(|i| &self.patterns[i as usize])
            .collect()
    }

    /// All match sites of one pattern in `title` (NFC-normalized and
    /// trimmed before matching; offsets refer to that form).
    pub fn pattern_matches<'a>(
        &self,
        title: &str,
        pattern: &'a Pattern,
        languages: Option<&[&str]>,
        pretend_dash: bool,
    ) -> Vec<PatternMatch<'a>> {
        let normalized: String = title.nfc().collect::<String>().trim().to_string();
        let chars: Vec<char> = normalized.chars().collect();
        enumerate_matches(&chars, pattern, languages, pretend_dash)
    }

    /// The candidate patterns that actually match `title`, sorted by the
    /// offset of their first match site. `patterns` restricts the
    /// candidate set; by default it is [`potential_patterns`](Self::potential_patterns).
    pub fn matching_patterns<'a>(
        &'a self,
        title: &str,
        languages: Option<&[&str]>,
        pretend_dash: bool,
        patterns: Option<&[&'a Pattern]>,
    ) -> Vec<&'a Pattern> {
        let normalized: String = title.nfc().collect::<String>().trim().to_string();
        let chars: Vec<char> = normalized.chars().collect();
        let candidates: Vec<&Pattern> = match patterns {
            Some(list) => list.to_vec(),
            None => self.potential_patterns(&normalized, pretend_dash),
        };

        let mut hits: Vec<(usize, &Pattern)> = Vec::new();
        for pattern in candidates {
            let matches = enumerate_matches(&chars, pattern, languages, pretend_dash);
            if let Some(first) = matches.first() {
                hits.push((first.start, pattern));
            }
        }
        hits.sort_by_key(|&(start, _)| start);
        hits.into_iter().map(|(_, p)| p).collect()
    }

    /// Computes the ISO-4 abbreviation of `title`.
    ///
    /// `languages` of `None` (or a set containing `"*"`) applies every
    /// pattern; otherwise a pattern participates only when its tag set
    /// intersects the caller's. `patterns` overrides the candidate set.
    pub fn make_abbreviation(
        &self,
        title: &str,
        languages: Option<&[&str]>,
        patterns: Option<&[&Pattern]>,
    ) -> String {
        let s = planner::normalize_punctuation(title);
        let s = planner::elide_dependent_title(&s);
        let s = planner::strip_articles(&s);
        trace!(prepared = %s, "title prepared for matching");

        // ISO-4 keeps single-word titles unabbreviated. The check runs
        // before substitution on purpose; titles that become single-word
        // only after abbreviation still get full processing.
        if planner::is_single_word(&s, &self.short_word_rules) {
            return collapse_whitespace(&s);
        }

        let chars: Vec<char> = s.chars().collect();
        let candidates: Vec<&Pattern> = match patterns {
            Some(list) => list.to_vec(),
            None => self.potential_patterns(&s, false),
        };

        let mut matches: Vec<PatternMatch<'_>> = Vec::new();
        for pattern in candidates {
            matches.extend(enumerate_matches(&chars, pattern, languages, false));
        }
        trace!(candidates = matches.len(), "match sites collected");

        let kept = planner::resolve_overlaps(matches);
        let substituted = planner::apply_matches(&chars, &kept);

        let stripped = planner::remove_short_words(&substituted, &self.short_word_rules);
        collapse_whitespace(&stripped)
    }

    /// [`make_abbreviation`](Self::make_abbreviation) with every pattern
    /// admitted.
    pub fn abbreviate(&self, title: &str) -> String {
        self.make_abbreviation(title, None, None)
    }
}
