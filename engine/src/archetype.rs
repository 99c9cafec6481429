//! Archetype reduction: digital roots with master-pattern fixed points.
//!
//! Both reducers repeatedly replace a number by the sum of its digits. Before
//! every step the current digit string is checked for a master pattern; a
//! master pattern is returned as-is even though it has more than one digit.
//! In base 10 this keeps `11`, `22`, `33` as archetypes; in base 16 `AA` plays
//! the same role.
//!
//! The loop terminates because the digit sum of a string with two or more
//! digits is strictly smaller than its value.
//!
//! # Example
//!
//! ```
//! use basex_engine::archetype::{reduce_base10, Archetype};
//!
//! assert_eq!(reduce_base10(14), Archetype::Digit(5));
//! assert_eq!(reduce_base10(29).to_string(), "11");
//! ```

use core::fmt;

use serde::{Serialize, Serializer};

use crate::base::NumeralBase;
use crate::codec::{digit_sum, DigitString};

/// Result of a base-10 reduction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Archetype {
    /// A single decimal digit.
    Digit(u8),
    /// A master pattern such as `11` or `222`.
    Master(DigitString),
}

impl Archetype {
    /// True for the master-pattern variant.
    #[inline]
    #[must_use]
    pub fn is_master(&self) -> bool {
        matches!(self, Self::Master(_))
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digit(d) => write!(f, "{d}"),
            Self::Master(s) => write!(f, "{s}"),
        }
    }
}

impl Serialize for Archetype {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Reduces `n` to a decimal digit or a decimal master pattern.
#[must_use]
pub fn reduce_base10(n: u64) -> Archetype {
    let decimal = NumeralBase::DECIMAL;
    let mut n = n;
    loop {
        let rendered = decimal.encode(n);
        if rendered.is_master_pattern() {
            return Archetype::Master(rendered);
        }
        if n < 10 {
            return Archetype::Digit(n as u8);
        }
        n = digit_sum(rendered.as_str(), decimal);
    }
}

/// Reduces a digit string of `base` to a single digit or a master pattern,
/// staying in `base` throughout.
///
/// # Example
///
/// ```
/// use basex_engine::archetype::reduce_in_base;
/// use basex_engine::NumeralBase;
///
/// let hex = NumeralBase::new(16).unwrap();
/// // 0x7E8 -> 7+14+8 = 29 = 0x1D -> 1+13 = 14 = 0xE
/// assert_eq!(reduce_in_base(&hex.encode(0x7E8), hex).as_str(), "E");
/// assert_eq!(reduce_in_base(&hex.encode(0xAA), hex).as_str(), "AA");
/// ```
#[must_use]
pub fn reduce_in_base(s: &DigitString, base: NumeralBase) -> DigitString {
    let mut current = s.clone();
    loop {
        if current.is_master_pattern() {
            return current;
        }
        let sum = digit_sum(current.as_str(), base);
        let next = base.encode(sum);
        if sum < base.radix() {
            return next;
        }
        current = next;
    }
}

/// Which numeral domain an archetype is computed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchetypeDomain {
    /// Reduce the base-10 sum in base 10.
    #[default]
    Decimal,
    /// Reduce the in-base sum string in its own base.
    Native,
}

impl ArchetypeDomain {
    /// Stringified archetype for a signature's sums.
    ///
    /// Archetypes from different domains are compared through this string:
    /// decimal digit `5` and native digit `"5"` are equal, a master pattern
    /// never equals a single digit.
    #[must_use]
    pub fn key(self, sum10: u64, sum_str: &DigitString, base: NumeralBase) -> String {
        match self {
            Self::Decimal => reduce_base10(sum10).to_string(),
            Self::Native => reduce_in_base(sum_str, base).into_string(),
        }
    }
}

impl fmt::Display for ArchetypeDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decimal => f.write_str("base-10"),
            Self::Native => f.write_str("native"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn master(s: &str) -> Archetype {
        Archetype::Master(DigitString::parse(s, NumeralBase::DECIMAL).unwrap())
    }

    #[test]
    fn test_master_fixed_points() {
        assert_eq!(reduce_base10(29), master("11"));
        assert_eq!(reduce_base10(38), master("11"));
        assert_eq!(reduce_base10(22), master("22"));
        assert_eq!(reduce_base10(333), master("333"));
    }

    #[test]
    fn test_plain_reduction() {
        assert_eq!(reduce_base10(14), Archetype::Digit(5));
        assert_eq!(reduce_base10(10), Archetype::Digit(1));
        assert_eq!(reduce_base10(0), Archetype::Digit(0));
        assert_eq!(reduce_base10(9), Archetype::Digit(9));
        // 199 -> 19 -> 10 -> 1
        assert_eq!(reduce_base10(199), Archetype::Digit(1));
        // 389 -> 20 -> 2
        assert_eq!(reduce_base10(389), Archetype::Digit(2));
        // 2999 -> 29 -> 11
        assert_eq!(reduce_base10(2999), master("11"));
    }

    #[test]
    fn test_base10_idempotent() {
        for n in 0..5000u64 {
            let a = reduce_base10(n);
            let again = match &a {
                Archetype::Digit(d) => reduce_base10(u64::from(*d)),
                Archetype::Master(s) => reduce_base10(s.as_str().parse().unwrap()),
            };
            assert_eq!(a, again, "not idempotent for {n}");
        }
    }

    #[test]
    fn test_in_base_reduction() {
        let b2 = NumeralBase::BINARY;
        // 9 = 1001 -> 2 = 10 -> 1
        assert_eq!(reduce_in_base(&b2.encode(9), b2).as_str(), "1");
        // 3 = 11 is a master pattern
        assert_eq!(reduce_in_base(&b2.encode(3), b2).as_str(), "11");
        let b10 = NumeralBase::DECIMAL;
        assert_eq!(reduce_in_base(&b10.encode(29), b10).as_str(), "11");
        assert_eq!(reduce_in_base(&b10.encode(14), b10).as_str(), "5");
    }

    #[test]
    fn test_in_base_matches_base10_in_decimal() {
        let b10 = NumeralBase::DECIMAL;
        for n in 0..3000u64 {
            assert_eq!(
                reduce_in_base(&b10.encode(n), b10).as_str(),
                reduce_base10(n).to_string()
            );
        }
    }

    #[test]
    fn test_domain_keys_compare_as_strings() {
        let b16 = NumeralBase::new(16).unwrap();
        let sum_str = b16.encode(14);
        assert_eq!(ArchetypeDomain::Decimal.key(14, &sum_str, b16), "5");
        assert_eq!(ArchetypeDomain::Native.key(14, &sum_str, b16), "E");

        let b10 = NumeralBase::DECIMAL;
        assert_eq!(
            ArchetypeDomain::Decimal.key(5, &b10.encode(5), b10),
            ArchetypeDomain::Native.key(5, &b10.encode(5), b10)
        );
        assert_ne!(ArchetypeDomain::Decimal.key(29, &b10.encode(29), b10), "2");
    }
}
