//! Error taxonomy for the numerology engine.
//!
//! Structural problems (a base outside the supported range, an inverted date
//! range, an empty base set) abort the computation. Malformed digit symbols
//! are *not* represented here for the lenient digit-sum path: they value as 0
//! and are counted in a [`DigitTally`](crate::codec::DigitTally) instead. Only
//! the strict [`DigitString::parse`](crate::codec::DigitString::parse) returns
//! [`EngineError::MalformedDigitSymbol`].

use chrono::NaiveDate;
use thiserror::Error;

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors raised by the numerology engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A numeral base is outside the permitted range.
    #[error("base {base} is outside the supported range [{min}, {max}]")]
    InvalidBase {
        /// The rejected base.
        base: u32,
        /// Smallest permitted base.
        min: u32,
        /// Largest permitted base.
        max: u32,
    },

    /// A symbol cannot be read as a digit of the given base (strict parsing only).
    #[error("symbol '{symbol}' at position {position} is not a digit in base {base}")]
    MalformedDigitSymbol {
        /// The offending symbol.
        symbol: char,
        /// Symbol position (0-based, counted in symbols).
        position: usize,
        /// Base the string was parsed in.
        base: u32,
    },

    /// Strict parsing was given a string with no symbols.
    #[error("empty digit string in base {base}")]
    EmptyDigitString {
        /// Base the string was parsed in.
        base: u32,
    },

    /// The start of a date range lies after its end.
    #[error("date range is inverted: {from} is after {to}")]
    InvalidRange {
        /// First day requested.
        from: NaiveDate,
        /// Last day requested.
        to: NaiveDate,
    },

    /// A date string could not be parsed, or the date cannot be encoded.
    #[error("invalid date '{input}': {reason}")]
    InvalidDate {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// No active base was selected.
    #[error("at least one active base is required")]
    EmptyActiveBases,

    /// A query referenced a date that is not part of the analysis run.
    #[error("date {0} is not part of this analysis run")]
    UnknownDate(NaiveDate),

    /// A configuration file or value is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
}
