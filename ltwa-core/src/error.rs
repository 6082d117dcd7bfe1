//! Error types (construction-time only)

use thiserror::Error;

/// Errors raised while building a [`TitleAbbreviator`](crate::TitleAbbreviator).
///
/// Query operations are total and never fail; everything that can go wrong
/// goes wrong while parsing the LTWA.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LtwaError {
    /// An LTWA record could not be parsed.
    ///
    /// Carries the offending raw line so callers can locate it in the
    /// source file.
    #[error("invalid LTWA line ({reason}): {line:?}")]
    InvalidLtwaLine {
        /// Why the line was rejected.
        reason: &'static str,
        /// The raw line as it appeared in the input.
        line: String,
    },
}

/// Result type for fallible operations in this crate.
pub type Result<T, E = LtwaError> = std::result::Result<T, E>;
