//! A complete analysis run: every signature of a date range in every active
//! base, plus the per-day groupings.
//!
//! A run is computed eagerly; changing the range or the base set means
//! computing a new one.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::base::{ActiveBases, NumeralBase};
use crate::calendar::DateRange;
use crate::correlation::DayCorrelation;
use crate::error::{EngineError, Result};
use crate::query::Correlations;
use crate::signature::DateSignature;

/// Counters collected while a run is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunDiagnostics {
    /// Number of signatures computed (dates × bases).
    pub signatures: usize,
    /// Signatures whose sum string is a master pattern.
    pub magic_signatures: usize,
    /// Symbols valued as 0 by the lenient digit sum.
    pub malformed_symbols: usize,
}

/// Signatures and day correlations for one date range and one base set.
///
/// # Example
///
/// ```
/// use basex_engine::{ActiveBases, AnalysisRun, DateRange};
///
/// let range = DateRange::parse("2024-01-01", "2024-01-07").unwrap();
/// let bases = ActiveBases::from_values([2, 10]).unwrap();
/// let run = AnalysisRun::compute(range, &bases).unwrap();
///
/// assert_eq!(run.date_labels().len(), 7);
/// assert_eq!(run.diagnostics().signatures, 14);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRun {
    range: DateRange,
    bases: ActiveBases,
    results: BTreeMap<NumeralBase, Vec<DateSignature>>,
    date_labels: Vec<NaiveDate>,
    daily: BTreeMap<NaiveDate, DayCorrelation>,
    diagnostics: RunDiagnostics,
}

impl AnalysisRun {
    /// Computes every signature and every day correlation.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidDate`] if a date in the range cannot be
    /// encoded.
    pub fn compute(range: DateRange, bases: &ActiveBases) -> Result<Self> {
        debug!(
            from = %range.start(),
            to = %range.end(),
            days = range.len(),
            bases = ?bases.values(),
            "computing analysis run"
        );

        let date_labels = range.dates();
        let mut diagnostics = RunDiagnostics::default();
        let mut results = BTreeMap::new();
        for base in bases {
            let series = date_labels
                .iter()
                .map(|&date| DateSignature::compute(date, base))
                .collect::<Result<Vec<_>>>()?;
            for sig in &series {
                diagnostics.signatures += 1;
                diagnostics.magic_signatures += usize::from(sig.is_magic);
                diagnostics.malformed_symbols += sig.malformed_symbols;
            }
            results.insert(base, series);
        }

        let daily = date_labels
            .iter()
            .enumerate()
            .map(|(i, &date)| {
                let signatures = results.values().filter_map(|series| series.get(i));
                (date, DayCorrelation::aggregate(date, signatures))
            })
            .collect();

        debug!(
            signatures = diagnostics.signatures,
            magic = diagnostics.magic_signatures,
            malformed = diagnostics.malformed_symbols,
            "analysis run complete"
        );

        Ok(Self {
            range,
            bases: bases.clone(),
            results,
            date_labels,
            daily,
            diagnostics,
        })
    }

    /// The analysed date range.
    #[must_use]
    pub fn range(&self) -> DateRange {
        self.range
    }

    /// The bases the run was computed for.
    #[must_use]
    pub fn bases(&self) -> &ActiveBases {
        &self.bases
    }

    /// Every date of the run, in order.
    #[must_use]
    pub fn date_labels(&self) -> &[NaiveDate] {
        &self.date_labels
    }

    /// Signatures per base, each series in date order.
    #[must_use]
    pub fn results(&self) -> &BTreeMap<NumeralBase, Vec<DateSignature>> {
        &self.results
    }

    /// The signature series of one base.
    #[must_use]
    pub fn series(&self, base: NumeralBase) -> Option<&[DateSignature]> {
        self.results.get(&base).map(Vec::as_slice)
    }

    /// The signature of `date` in `base`, if both are part of the run.
    #[must_use]
    pub fn signature(&self, base: NumeralBase, date: NaiveDate) -> Option<&DateSignature> {
        if !self.range.contains(date) {
            return None;
        }
        let index = usize::try_from((date - self.range.start()).num_days()).ok()?;
        self.results.get(&base)?.get(index)
    }

    /// Signatures of `date` in every run base, ascending by base.
    pub fn signatures_on(&self, date: NaiveDate) -> impl Iterator<Item = &DateSignature> + '_ {
        self.bases.iter().filter_map(move |b| self.signature(b, date))
    }

    /// Day correlations keyed by date.
    #[must_use]
    pub fn daily(&self) -> &BTreeMap<NaiveDate, DayCorrelation> {
        &self.daily
    }

    /// The groupings of `date`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownDate`] when `date` is outside the run.
    pub fn day(&self, date: NaiveDate) -> Result<&DayCorrelation> {
        self.daily.get(&date).ok_or(EngineError::UnknownDate(date))
    }

    /// Counters collected while computing.
    #[must_use]
    pub fn diagnostics(&self) -> RunDiagnostics {
        self.diagnostics
    }

    /// Query engine over this run, filtered to `filter`.
    #[must_use]
    pub fn correlations<'a>(&'a self, filter: &'a ActiveBases) -> Correlations<'a> {
        Correlations::new(self, filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(from: &str, to: &str, bases: &[u32]) -> AnalysisRun {
        let range = DateRange::parse(from, to).unwrap();
        let bases = ActiveBases::from_values(bases.iter().copied()).unwrap();
        AnalysisRun::compute(range, &bases).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_series_follow_date_spine() {
        let r = run("2024-02-27", "2024-03-02", &[2, 7, 16]);
        assert_eq!(r.date_labels().len(), 5);
        for (base, series) in r.results() {
            assert_eq!(series.len(), 5, "series length for {base}");
            for (sig, date) in series.iter().zip(r.date_labels()) {
                assert_eq!(sig.date, *date);
                assert_eq!(sig.base, *base);
            }
        }
        assert_eq!(r.daily().len(), 5);
    }

    #[test]
    fn test_signature_lookup() {
        let r = run("2024-01-01", "2024-01-31", &[2, 10]);
        let sig = r.signature(NumeralBase::DECIMAL, date(2024, 1, 15)).unwrap();
        assert_eq!(sig.encoded_date.as_str(), "15012024");
        assert!(r.signature(NumeralBase::DECIMAL, date(2024, 2, 1)).is_none());
        assert!(r.signature(NumeralBase::new(3).unwrap(), date(2024, 1, 1)).is_none());
    }

    #[test]
    fn test_signatures_on() {
        let r = run("2024-01-01", "2024-01-31", &[2, 7, 10]);
        assert_eq!(r.range().len(), 31);
        assert_eq!(r.range().start(), date(2024, 1, 1));

        let day = date(2024, 1, 15);
        let sigs: Vec<_> = r.signatures_on(day).collect();
        assert_eq!(
            sigs.iter().map(|s| s.base.get()).collect::<Vec<_>>(),
            vec![2, 7, 10]
        );
        assert!(sigs.iter().all(|s| s.date == day));
        assert_eq!(r.signatures_on(date(2024, 2, 1)).count(), 0);
    }

    #[test]
    fn test_day_lookup() {
        let r = run("2024-01-01", "2024-01-02", &[2, 10]);
        assert_eq!(r.day(date(2024, 1, 1)).unwrap().sum_counts.member_count(), 2);
        assert_eq!(
            r.day(date(2023, 12, 31)),
            Err(EngineError::UnknownDate(date(2023, 12, 31)))
        );
    }

    #[test]
    fn test_diagnostics() {
        let r = run("0001-01-01", "0001-01-01", &[2, 10]);
        let d = r.diagnostics();
        assert_eq!(d.signatures, 2);
        // base 2 sums to 3 = "11"
        assert_eq!(d.magic_signatures, 1);
        assert_eq!(d.malformed_symbols, 0);
    }
}
