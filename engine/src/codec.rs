//! Base-N digit codec: integer → digit string, and digit-sum valuation.
//!
//! Encoding is exact. Valuation is lenient: a symbol that is not a digit of
//! the requested base contributes 0 to the sum instead of failing, and the
//! number of such symbols is reported in a [`DigitTally`]. One bad symbol
//! therefore degrades a single sum rather than aborting a whole run.
//!
//! # Example
//!
//! ```
//! use basex_engine::codec::{digit_sum, encode};
//! use basex_engine::NumeralBase;
//!
//! let hex = NumeralBase::new(16).unwrap();
//! let s = encode(255, 16).unwrap();
//! assert_eq!(s.as_str(), "FF");
//! assert_eq!(digit_sum("FF", hex), 30);
//! ```

use core::fmt;

use serde::Serialize;
use tracing::warn;

use crate::alphabet;
use crate::base::NumeralBase;
use crate::error::{EngineError, Result};
use crate::pattern;

/// A number written in the fixed alphabet, most-significant symbol first.
///
/// Strings produced by [`NumeralBase::encode`] only contain digits of their
/// base. Strings built with [`DigitString::parse`] are checked the same way.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct DigitString(String);

impl DigitString {
    /// Parses `s` strictly: every symbol must be a digit of `base`.
    ///
    /// Lowercase letters are accepted and normalised to uppercase.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MalformedDigitSymbol`] for the first symbol that
    /// is not a digit of `base`, and [`EngineError::EmptyDigitString`] when
    /// `s` has no symbols at all.
    pub fn parse(s: &str, base: NumeralBase) -> Result<Self> {
        if s.is_empty() {
            return Err(EngineError::EmptyDigitString { base: base.get() });
        }
        let mut out = String::with_capacity(s.len());
        for (position, c) in s.chars().enumerate() {
            match digit_value(c, base) {
                Some(v) => out.push(alphabet::ALPHABET[v as usize]),
                None => {
                    return Err(EngineError::MalformedDigitSymbol {
                        symbol: c,
                        position,
                        base: base.get(),
                    })
                }
            }
        }
        Ok(Self(out))
    }

    /// The symbols as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of symbols (not bytes; `£` takes two bytes).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// True for the empty string (never produced by the encoder).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if this is a master pattern: two or more identical symbols.
    #[inline]
    #[must_use]
    pub fn is_master_pattern(&self) -> bool {
        pattern::is_master_pattern(&self.0)
    }

    /// Left-pads with `'0'` up to `width` symbols; longer strings are kept.
    #[must_use]
    pub fn pad_start(&self, width: usize) -> Self {
        let len = self.len();
        if len >= width {
            return self.clone();
        }
        let mut out = "0".repeat(width - len);
        out.push_str(&self.0);
        Self(out)
    }

    /// Appends the symbols of `other`.
    pub fn push_digits(&mut self, other: &Self) {
        self.0.push_str(&other.0);
    }

    /// Consumes the digit string, returning the inner `String`.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for DigitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DigitString({:?})", self.0)
    }
}

impl fmt::Display for DigitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DigitString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for DigitString {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for DigitString {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl NumeralBase {
    /// Writes `value` in this base.
    ///
    /// # Example
    ///
    /// ```
    /// use basex_engine::NumeralBase;
    ///
    /// let b2 = NumeralBase::BINARY;
    /// assert_eq!(b2.encode(2024).as_str(), "11111101000");
    /// assert_eq!(b2.encode(0).as_str(), "0");
    /// ```
    #[must_use]
    pub fn encode(self, value: u64) -> DigitString {
        if value == 0 {
            return DigitString("0".to_owned());
        }
        let radix = self.radix();
        let mut digits = Vec::new();
        let mut n = value;
        while n > 0 {
            digits.push(alphabet::ALPHABET[(n % radix) as usize]);
            n /= radix;
        }
        DigitString(digits.into_iter().rev().collect())
    }
}

/// Writes `value` in base `base`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidBase`] when `base` is outside `[2, 40]`.
pub fn encode(value: u64, base: u32) -> Result<DigitString> {
    Ok(NumeralBase::new(base)?.encode(value))
}

/// Value of one symbol in `base`, if it is a digit of that base.
#[inline]
#[must_use]
pub fn digit_value(c: char, base: NumeralBase) -> Option<u32> {
    alphabet::position(c).filter(|&v| v < base.get())
}

/// Outcome of summing the digits of a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DigitTally {
    /// Sum of all digit values, in base 10.
    pub sum: u64,
    /// Symbols that were not digits of the base and counted as 0.
    pub malformed: usize,
}

/// Sums digit values, counting symbols that are not digits of `base`.
#[must_use]
pub fn tally_digits(s: &str, base: NumeralBase) -> DigitTally {
    let mut tally = DigitTally::default();
    for c in s.chars() {
        match digit_value(c, base) {
            Some(v) => tally.sum += u64::from(v),
            None => tally.malformed += 1,
        }
    }
    if tally.malformed > 0 {
        warn!(
            input = s,
            base = base.get(),
            malformed = tally.malformed,
            "malformed digit symbols valued as 0"
        );
    }
    tally
}

/// Base-10 value of the sum of the digits of `s` read in `base`.
///
/// Malformed symbols count as 0; see [`tally_digits`] to observe them.
#[inline]
#[must_use]
pub fn digit_sum(s: &str, base: NumeralBase) -> u64 {
    tally_digits(s, base).sum
}
