//! ISO-4 abbreviation of serial titles, driven by the LTWA
//!
//! This crate computes the canonical ISO-4 abbreviation of a journal or
//! serial title: `"International Journal of Geographical Information
//! Science"` becomes `"Int. J. Geogr. Inf. Sci."`. Matching is driven by
//! the LTWA (List of Title Word Abbreviations) maintained by the ISSN
//! Centre, ~55,000 records mapping words and word-fragments to their
//! abbreviations.
//!
//! The engine is built once from the raw LTWA text plus a short-word
//! list, and afterwards answers queries as pure functions: no I/O, no
//! interior mutability, freely shareable across threads. Pattern lookup
//! goes through a pair of prefix trees over a deliberately lossy
//! normalization, so only a handful of the 55K records are examined per
//! title; exact matching then runs under a limited Unicode equivalence
//! that unifies ligatures, diacritics, and a few foreign letters with
//! their ASCII forms while preserving the original text in the output.
//!
//! ```no_run
//! use ltwa_core::TitleAbbreviator;
//!
//! # fn main() -> Result<(), ltwa_core::LtwaError> {
//! # let (ltwa_text, short_word_text) = ("", "");
//! let engine = TitleAbbreviator::new(ltwa_text, short_word_text)?;
//! let abbrev = engine.abbreviate("Journal of the American Chemical Society");
//! assert_eq!(abbrev, "J. Am. Chem. Soc.");
//! # Ok(())
//! # }
//! ```
//!
//! Loading the dictionary files, serving the engine over HTTP, and other
//! front-ends live in separate crates; this one only consumes raw text.

#![warn(missing_docs)]

pub mod collation;
mod error;
mod matcher;
mod pattern;
mod planner;
pub mod prefix_tree;

mod abbreviator;

pub use abbreviator::{TitleAbbreviator, DEFAULT_LANGUAGES};
pub use error::{LtwaError, Result};
pub use matcher::PatternMatch;
pub use pattern::Pattern;
