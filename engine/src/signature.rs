//! Per-base date signatures.
//!
//! A date is written in base `B` as `DD MM YYYY`: each component is encoded
//! separately and left-padded with `0` to 2, 2 and 4 symbols. The padding
//! widths are the same for every base, so a base-2 year overflows its
//! 4-symbol slot while a base-36 year leaves leading zeros.
//!
//! ```text
//! 2024-01-01, base 10:  01 | 01 | 2024         -> 01012024     sum 10 = "10"
//! 2024-01-01, base  2:  01 | 01 | 11111101000  -> 010111111101000  sum 9 = "1001"
//! ```

use chrono::NaiveDate;
use serde::Serialize;
use tracing::trace;

use crate::archetype::{reduce_base10, reduce_in_base, Archetype, ArchetypeDomain};
use crate::base::NumeralBase;
use crate::calendar::date_parts;
use crate::codec::{tally_digits, DigitString};
use crate::error::Result;

/// Padding width of the day component, in symbols.
pub const DAY_WIDTH: usize = 2;

/// Padding width of the month component, in symbols.
pub const MONTH_WIDTH: usize = 2;

/// Padding width of the year component, in symbols.
pub const YEAR_WIDTH: usize = 4;

/// The numerological signature of one date in one base.
///
/// # Example
///
/// ```
/// use basex_engine::{DateSignature, NumeralBase};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let sig = DateSignature::compute(date, NumeralBase::DECIMAL).unwrap();
/// assert_eq!(sig.encoded_date.as_str(), "01012024");
/// assert_eq!(sig.sum10, 10);
/// assert_eq!(sig.sum_str.as_str(), "10");
/// assert!(!sig.is_magic);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateSignature {
    /// The calendar day.
    pub date: NaiveDate,
    /// The base the date was written in.
    pub base: NumeralBase,
    /// Padded day component.
    pub day: DigitString,
    /// Padded month component.
    pub month: DigitString,
    /// Padded year component.
    pub year: DigitString,
    /// Day, month and year concatenated.
    pub encoded_date: DigitString,
    /// Sum of the digits of `encoded_date`, in base 10.
    pub sum10: u64,
    /// `sum10` written in `base`.
    pub sum_str: DigitString,
    /// True when `sum_str` is a master pattern.
    pub is_magic: bool,
    /// Symbols of `encoded_date` valued as 0 by the lenient digit sum.
    #[serde(skip_serializing_if = "is_zero")]
    pub malformed_symbols: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl DateSignature {
    /// Computes the signature of `date` in `base`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidDate`](crate::EngineError::InvalidDate)
    /// for dates with a negative year.
    pub fn compute(date: NaiveDate, base: NumeralBase) -> Result<Self> {
        let (d, m, y) = date_parts(date)?;
        let day = base.encode(d).pad_start(DAY_WIDTH);
        let month = base.encode(m).pad_start(MONTH_WIDTH);
        let year = base.encode(y).pad_start(YEAR_WIDTH);

        let mut encoded_date = day.clone();
        encoded_date.push_digits(&month);
        encoded_date.push_digits(&year);

        let tally = tally_digits(encoded_date.as_str(), base);
        let sum_str = base.encode(tally.sum);
        let is_magic = sum_str.is_master_pattern();

        trace!(%date, base = base.get(), sum10 = tally.sum, %sum_str, is_magic, "signature");

        Ok(Self {
            date,
            base,
            day,
            month,
            year,
            encoded_date,
            sum10: tally.sum,
            sum_str,
            is_magic,
            malformed_symbols: tally.malformed,
        })
    }

    /// The padded components joined with dots: `DD.MM.YYYY`.
    #[must_use]
    pub fn dotted_date(&self) -> String {
        format!("{}.{}.{}", self.day, self.month, self.year)
    }

    /// Base-10 archetype of `sum10`.
    #[must_use]
    pub fn archetype10(&self) -> Archetype {
        reduce_base10(self.sum10)
    }

    /// Archetype of `sum_str`, reduced in this signature's own base.
    #[must_use]
    pub fn native_archetype(&self) -> DigitString {
        reduce_in_base(&self.sum_str, self.base)
    }

    /// Stringified archetype in `domain`, used as a grouping key.
    #[must_use]
    pub fn archetype_key(&self, domain: ArchetypeDomain) -> String {
        domain.key(self.sum10, &self.sum_str, self.base)
    }
}
