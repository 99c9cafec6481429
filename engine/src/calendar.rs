//! Inclusive calendar date ranges: the iteration spine shared by every base.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::{EngineError, Result};

/// Inclusive range of calendar days, `from <= to`.
///
/// # Example
///
/// ```
/// use basex_engine::DateRange;
///
/// let range = DateRange::parse("2024-02-27", "2024-03-01").unwrap();
/// assert_eq!(range.len(), 4); // leap year
/// assert!(DateRange::parse("2024-03-01", "2024-02-27").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    /// Creates a range.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRange`] when `from` is after `to`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        if from > to {
            return Err(EngineError::InvalidRange { from, to });
        }
        Ok(Self { from, to })
    }

    /// Creates a range from two ISO `YYYY-MM-DD` strings.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidDate`] for an unparseable date and
    /// [`EngineError::InvalidRange`] for an inverted range.
    pub fn parse(from: &str, to: &str) -> Result<Self> {
        Self::new(parse_date(from)?, parse_date(to)?)
    }

    /// January 1 through December 31 of `year`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidDate`] when `year` is outside chrono's range.
    pub fn year(year: i32) -> Result<Self> {
        let first = NaiveDate::from_ymd_opt(year, 1, 1);
        let last = NaiveDate::from_ymd_opt(year, 12, 31);
        match (first, last) {
            (Some(from), Some(to)) => Self::new(from, to),
            _ => Err(EngineError::InvalidDate {
                input: year.to_string(),
                reason: "year is out of range".to_owned(),
            }),
        }
    }

    /// First day.
    #[inline]
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.from
    }

    /// Last day.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.to
    }

    /// Number of days in the range (at least 1).
    #[must_use]
    pub fn len(&self) -> usize {
        (self.to - self.from).num_days() as usize + 1
    }

    /// Always false: a valid range holds at least one day.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// True if `date` falls inside the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }

    /// Iterates every day, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let to = self.to;
        self.from.iter_days().take_while(move |d| *d <= to)
    }

    /// Every day of the range, in order.
    #[must_use]
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.days().collect()
    }
}

/// Parses an ISO `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns [`EngineError::InvalidDate`] when `s` is not a valid calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|e| EngineError::InvalidDate {
        input: s.to_owned(),
        reason: e.to_string(),
    })
}

/// Day, month and year of `date` as unsigned integers.
///
/// # Errors
///
/// Returns [`EngineError::InvalidDate`] for dates with a negative year, which
/// has no digit encoding.
pub fn date_parts(date: NaiveDate) -> Result<(u64, u64, u64)> {
    let year = u64::try_from(date.year()).map_err(|_| EngineError::InvalidDate {
        input: date.to_string(),
        reason: "negative years cannot be encoded".to_owned(),
    })?;
    Ok((u64::from(date.day()), u64::from(date.month()), year))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_single_day() {
        let r = DateRange::parse("2024-01-01", "2024-01-01").unwrap();
        assert_eq!(r.len(), 1);
        assert_eq!(r.dates(), vec![date(2024, 1, 1)]);
    }

    #[test]
    fn test_year_lengths() {
        assert_eq!(DateRange::year(2024).unwrap().len(), 366);
        assert_eq!(DateRange::year(2023).unwrap().len(), 365);
    }

    #[test]
    fn test_days_cross_month_boundary() {
        let r = DateRange::parse("2023-12-30", "2024-01-02").unwrap();
        assert_eq!(
            r.dates(),
            vec![
                date(2023, 12, 30),
                date(2023, 12, 31),
                date(2024, 1, 1),
                date(2024, 1, 2)
            ]
        );
        assert!(r.contains(date(2024, 1, 1)));
        assert!(!r.contains(date(2024, 1, 3)));
    }

    #[test]
    fn test_inverted_range() {
        assert_eq!(
            DateRange::parse("2024-02-01", "2024-01-01"),
            Err(EngineError::InvalidRange {
                from: date(2024, 2, 1),
                to: date(2024, 1, 1)
            })
        );
    }

    #[test]
    fn test_bad_dates() {
        assert!(matches!(
            parse_date("2024-02-30"),
            Err(EngineError::InvalidDate { .. })
        ));
        assert!(parse_date("01/01/2024").is_err());
        assert_eq!(parse_date(" 2024-01-01 ").unwrap(), date(2024, 1, 1));
    }

    #[test]
    fn test_date_parts() {
        assert_eq!(date_parts(date(2024, 12, 31)).unwrap(), (31, 12, 2024));
        assert!(date_parts(date(-1, 1, 1)).is_err());
    }
}
