//! Correlation queries over a computed [`AnalysisRun`].
//!
//! Every query takes a date and reads only the computed structures of the
//! run, restricted to an [`ActiveBases`] filter that may differ from the
//! run's own base set. A base takes part in a query when it is both in the
//! run and in the filter.
//!
//! Results are plain typed values (they all derive [`Serialize`]) and render
//! to human-readable lines through [`Lines`]. The bases, sums and counts in
//! those lines are stable; the wording is not.
//!
//! # Example
//!
//! ```
//! use basex_engine::query::Lines;
//! use basex_engine::{ActiveBases, AnalysisRun, DateRange};
//! use chrono::NaiveDate;
//!
//! let range = DateRange::parse("2024-01-01", "2024-01-01").unwrap();
//! let bases = ActiveBases::from_values([2, 10]).unwrap();
//! let run = AnalysisRun::compute(range, &bases).unwrap();
//!
//! let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let details = run.correlations(&bases).correlation_details(date).unwrap();
//! assert!(details.groups.is_empty());
//! assert_eq!(details.lines(), vec!["no correlation".to_owned()]);
//! ```

use std::fmt::{self, Display};

use chrono::NaiveDate;
use serde::Serialize;

use crate::archetype::{Archetype, ArchetypeDomain};
use crate::base::{ActiveBases, NumeralBase};
use crate::codec::DigitString;
use crate::correlation::GroupTable;
use crate::error::Result;
use crate::run::AnalysisRun;
use crate::signature::DateSignature;

/// Renders a query result as an ordered list of lines.
pub trait Lines {
    /// The lines, in display order.
    fn lines(&self) -> Vec<String>;
}

/// Bases sharing one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group<K> {
    /// The shared value.
    pub key: K,
    /// Members, ascending.
    pub bases: Vec<NumeralBase>,
}

impl<K> Group<K> {
    /// Number of members.
    #[must_use]
    pub fn size(&self) -> usize {
        self.bases.len()
    }
}

/// Groups of bases that share a base-10 sum on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorrelationDetails {
    /// The queried date.
    pub date: NaiveDate,
    /// Groups with more than one active member, ascending by sum.
    pub groups: Vec<Group<u64>>,
}

impl CorrelationDetails {
    /// Number of bases that belong to some group.
    #[must_use]
    pub fn correlating(&self) -> usize {
        self.groups.iter().map(Group::size).sum()
    }

    /// Size of the largest group, or 0 when there is none.
    #[must_use]
    pub fn largest_group(&self) -> usize {
        self.groups.iter().map(Group::size).max().unwrap_or(0)
    }
}

impl Lines for CorrelationDetails {
    fn lines(&self) -> Vec<String> {
        if self.groups.is_empty() {
            return vec!["no correlation".to_owned()];
        }
        self.groups
            .iter()
            .map(|g| {
                format!(
                    "sum {}: {} bases ({})",
                    g.key,
                    g.size(),
                    join_bases(&g.bases)
                )
            })
            .collect()
    }
}

/// A base together with its base-10 sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BaseSum {
    /// The base.
    pub base: NumeralBase,
    /// Its base-10 digit sum.
    pub sum10: u64,
}

/// Bases whose base-10 sum no other active base shares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NonCorrelationDetails {
    /// The queried date.
    pub date: NaiveDate,
    /// Uncorrelated bases, ascending.
    pub bases: Vec<BaseSum>,
}

impl NonCorrelationDetails {
    /// Number of uncorrelated bases.
    #[must_use]
    pub fn count(&self) -> usize {
        self.bases.len()
    }
}

impl Lines for NonCorrelationDetails {
    fn lines(&self) -> Vec<String> {
        if self.bases.is_empty() {
            return vec!["every base correlates".to_owned()];
        }
        let mut lines = vec![format!("{} non-correlating bases", self.count())];
        lines.extend(
            self.bases
                .iter()
                .map(|b| format!("base {}: sum {}", b.base, b.sum10)),
        );
        lines
    }
}

/// Magic sum strings and the active bases that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MagicDetails {
    /// The queried date.
    pub date: NaiveDate,
    /// One entry per magic sum with at least one active member.
    pub entries: Vec<Group<DigitString>>,
}

impl Lines for MagicDetails {
    fn lines(&self) -> Vec<String> {
        if self.entries.is_empty() {
            return vec!["no magic numbers".to_owned()];
        }
        self.entries
            .iter()
            .map(|e| format!("magic {}: bases ({})", e.key, join_bases(&e.bases)))
            .collect()
    }
}

/// How the other active bases compare with a reference base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReferenceComparison<K> {
    /// The reference base takes no part in the query.
    Inactive {
        /// The queried date.
        date: NaiveDate,
        /// The requested reference base.
        reference: NumeralBase,
    },
    /// The reference base is active.
    Compared {
        /// The queried date.
        date: NaiveDate,
        /// The reference base.
        reference: NumeralBase,
        /// The reference's value.
        value: K,
        /// Other bases with the same value, ascending.
        matches: Vec<NumeralBase>,
        /// Other bases with a different value, ascending.
        mismatches: Vec<NumeralBase>,
    },
}

/// Comparison of base-10 sums against a reference base.
pub type ReferenceCorrelation = ReferenceComparison<u64>;

/// Comparison of archetypes against a reference base.
pub type ReferenceArchetype = ReferenceComparison<String>;

impl<K> ReferenceComparison<K> {
    /// True when the reference base took part.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Compared { .. })
    }

    /// Bases matching the reference (empty when inactive).
    #[must_use]
    pub fn matches(&self) -> &[NumeralBase] {
        match self {
            Self::Inactive { .. } => &[],
            Self::Compared { matches, .. } => matches,
        }
    }

    /// Bases not matching the reference (empty when inactive).
    #[must_use]
    pub fn mismatches(&self) -> &[NumeralBase] {
        match self {
            Self::Inactive { .. } => &[],
            Self::Compared { mismatches, .. } => mismatches,
        }
    }
}

impl<K: Display> Lines for ReferenceComparison<K> {
    fn lines(&self) -> Vec<String> {
        match self {
            Self::Inactive { reference, .. } => {
                vec![format!("base {reference} is not active")]
            }
            Self::Compared {
                reference,
                value,
                matches,
                mismatches,
                ..
            } => {
                let mut lines = vec![format!(
                    "base {reference} ({value}): {} matching, {} not matching",
                    matches.len(),
                    mismatches.len()
                )];
                if !matches.is_empty() {
                    lines.push(format!("matching: {}", join_bases(matches)));
                }
                lines
            }
        }
    }
}

/// Groups of bases that share an archetype on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchetypeCorrelation {
    /// The queried date.
    pub date: NaiveDate,
    /// The domain archetypes were computed in.
    pub domain: ArchetypeDomain,
    /// Groups with more than one active member, ascending by archetype.
    pub groups: Vec<Group<String>>,
    /// Bases whose archetype no other active base shares.
    pub unique: Vec<Group<String>>,
}

impl Lines for ArchetypeCorrelation {
    fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!("{} archetypes", self.domain)];
        if self.groups.is_empty() {
            lines.push("no correlation".to_owned());
        }
        lines.extend(self.groups.iter().map(|g| {
            format!(
                "archetype {}: {} bases ({})",
                g.key,
                g.size(),
                join_bases(&g.bases)
            )
        }));
        lines.extend(
            self.unique
                .iter()
                .map(|g| format!("archetype {}: base {} only", g.key, join_bases(&g.bases))),
        );
        lines
    }
}

/// One row of the per-date detail table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateDetail {
    /// The base.
    pub base: NumeralBase,
    /// `DD.MM.YYYY` in this base.
    pub dotted_date: String,
    /// Concatenated digits.
    pub encoded_date: DigitString,
    /// Base-10 digit sum.
    pub sum10: u64,
    /// `sum10` in this base.
    pub sum_str: DigitString,
    /// Base-10 archetype of `sum10`.
    pub archetype10: Archetype,
    /// In-base archetype of `sum_str`.
    pub native_archetype: DigitString,
    /// True when `sum_str` is a master pattern.
    pub is_magic: bool,
}

/// Per-date detail table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateDetails {
    /// The queried date.
    pub date: NaiveDate,
    /// One row per active base, ascending.
    pub rows: Vec<DateDetail>,
}

impl Lines for DateDetails {
    fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "{:>4}  {:<24} {:>6} {:<10} {:>4} {:>6} {}",
            "base", "date", "sum", "in base", "arch", "native", "magic"
        )];
        lines.extend(self.rows.iter().map(|r| {
            format!(
                "{:>4}  {:<24} {:>6} {:<10} {:>4} {:>6} {}",
                r.base.get(),
                r.dotted_date,
                r.sum10,
                r.sum_str.as_str(),
                r.archetype10.to_string(),
                r.native_archetype.as_str(),
                if r.is_magic { "*" } else { "" }
            )
        }));
        lines
    }
}

/// Compact statistics of one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailySummary {
    /// The date.
    pub date: NaiveDate,
    /// Bases that belong to some sum group.
    pub correlating: usize,
    /// Size of the largest sum group, 0 when none has more than one member.
    pub largest_group: usize,
    /// Bases whose sum no other base shares.
    pub non_correlating: usize,
    /// Distinct magic sums among the active bases.
    pub magic_sums: usize,
    /// Other bases sharing the reference base's base-10 archetype.
    pub archetype_peers: usize,
}

impl fmt::Display for DailySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  correlating {:>2}  largest {:>2}  unique {:>2}  magic {:>2}  archetype peers {:>2}",
            self.date,
            self.correlating,
            self.largest_group,
            self.non_correlating,
            self.magic_sums,
            self.archetype_peers
        )
    }
}

/// Every query result for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateReport {
    /// Detail table.
    pub details: DateDetails,
    /// Sum groups.
    pub correlation: CorrelationDetails,
    /// Uncorrelated bases.
    pub non_correlation: NonCorrelationDetails,
    /// Magic sums.
    pub magic: MagicDetails,
    /// Sums against the reference base.
    pub reference: ReferenceCorrelation,
    /// Base-10 archetype groups.
    pub archetypes: ArchetypeCorrelation,
    /// In-base archetype groups.
    pub native_archetypes: ArchetypeCorrelation,
    /// Base-10 archetypes against the reference base.
    pub reference_archetype: ReferenceArchetype,
}

impl Lines for DateReport {
    fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!("== {} ==", self.details.date)];
        lines.extend(self.details.lines());
        let blocks: [(&str, Vec<String>); 7] = [
            ("correlations", self.correlation.lines()),
            ("non-correlating", self.non_correlation.lines()),
            ("magic numbers", self.magic.lines()),
            ("reference", self.reference.lines()),
            ("archetypes", self.archetypes.lines()),
            ("native archetypes", self.native_archetypes.lines()),
            ("reference archetype", self.reference_archetype.lines()),
        ];
        for (title, block) in blocks {
            lines.push(String::new());
            lines.push(format!("-- {title} --"));
            lines.extend(block);
        }
        lines
    }
}

/// Query engine over one run and one filter.
#[derive(Debug, Clone, Copy)]
pub struct Correlations<'a> {
    run: &'a AnalysisRun,
    filter: &'a ActiveBases,
    reference: NumeralBase,
}

impl<'a> Correlations<'a> {
    /// Queries `run` restricted to `filter`, with base 10 as reference.
    #[must_use]
    pub fn new(run: &'a AnalysisRun, filter: &'a ActiveBases) -> Self {
        Self {
            run,
            filter,
            reference: NumeralBase::DECIMAL,
        }
    }

    /// Uses `reference` for the reference-base queries.
    #[must_use]
    pub fn with_reference(mut self, reference: NumeralBase) -> Self {
        self.reference = reference;
        self
    }

    /// The reference base in use.
    #[must_use]
    pub fn reference(&self) -> NumeralBase {
        self.reference
    }

    fn is_active(&self, base: NumeralBase) -> bool {
        self.filter.contains(base) && self.run.bases().contains(base)
    }

    /// Sum groups with more than one active member.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownDate`](crate::EngineError::UnknownDate) for a
    /// date outside the run.
    pub fn correlation_details(&self, date: NaiveDate) -> Result<CorrelationDetails> {
        let day = self.run.day(date)?;
        let groups = day
            .sum_counts
            .active_groups(self.filter)
            .filter(|(_, bases)| bases.len() > 1)
            .map(|(&key, bases)| Group { key, bases })
            .collect();
        Ok(CorrelationDetails { date, groups })
    }

    /// Bases alone in their sum group once the filter is applied.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownDate`](crate::EngineError::UnknownDate) for a
    /// date outside the run.
    pub fn non_correlation_details(&self, date: NaiveDate) -> Result<NonCorrelationDetails> {
        let day = self.run.day(date)?;
        let mut bases: Vec<BaseSum> = day
            .sum_counts
            .active_groups(self.filter)
            .filter_map(|(&sum10, members)| match members.as_slice() {
                [base] => Some(BaseSum { base: *base, sum10 }),
                _ => None,
            })
            .collect();
        bases.sort_unstable_by_key(|b| b.base);
        Ok(NonCorrelationDetails { date, bases })
    }

    /// Magic sums with at least one active member.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownDate`](crate::EngineError::UnknownDate) for a
    /// date outside the run.
    pub fn magic_details(&self, date: NaiveDate) -> Result<MagicDetails> {
        let day = self.run.day(date)?;
        let entries = day
            .magic_sums
            .active_groups(self.filter)
            .map(|(key, bases)| Group {
                key: key.clone(),
                bases,
            })
            .collect();
        Ok(MagicDetails { date, entries })
    }

    /// Compares every other active base's sum with the reference base's.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownDate`](crate::EngineError::UnknownDate) for a
    /// date outside the run.
    pub fn reference_correlation(&self, date: NaiveDate) -> Result<ReferenceCorrelation> {
        let day = self.run.day(date)?;
        let sums = self
            .active_bases()
            .filter_map(|b| day.sum_of(b).map(|s| (b, s)))
            .collect::<Vec<_>>();
        Ok(self.compare(date, sums))
    }

    /// Groups the active bases by archetype in `domain`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownDate`](crate::EngineError::UnknownDate) for a
    /// date outside the run.
    pub fn archetype_correlation(
        &self,
        date: NaiveDate,
        domain: ArchetypeDomain,
    ) -> Result<ArchetypeCorrelation> {
        let table: GroupTable<String> = self.archetype_keys(date, domain)?.into_iter().collect();
        let (groups, unique) = table
            .active_groups(self.filter)
            .map(|(key, bases)| Group {
                key: key.clone(),
                bases,
            })
            .partition(|g| g.size() > 1);
        Ok(ArchetypeCorrelation {
            date,
            domain,
            groups,
            unique,
        })
    }

    /// Compares every other active base's archetype with the reference base's.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownDate`](crate::EngineError::UnknownDate) for a
    /// date outside the run.
    pub fn reference_archetype(
        &self,
        date: NaiveDate,
        domain: ArchetypeDomain,
    ) -> Result<ReferenceArchetype> {
        let keys = self
            .archetype_keys(date, domain)?
            .into_iter()
            .map(|(key, base)| (base, key))
            .collect();
        Ok(self.compare(date, keys))
    }

    /// Detail rows for every active base.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownDate`](crate::EngineError::UnknownDate) for a
    /// date outside the run.
    pub fn date_details(&self, date: NaiveDate) -> Result<DateDetails> {
        self.run.day(date)?;
        let rows = self
            .active_signatures(date)
            .map(|sig| DateDetail {
                base: sig.base,
                dotted_date: sig.dotted_date(),
                encoded_date: sig.encoded_date.clone(),
                sum10: sig.sum10,
                sum_str: sig.sum_str.clone(),
                archetype10: sig.archetype10(),
                native_archetype: sig.native_archetype(),
                is_magic: sig.is_magic,
            })
            .collect();
        Ok(DateDetails { date, rows })
    }

    /// Statistics of one date.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownDate`](crate::EngineError::UnknownDate) for a
    /// date outside the run.
    pub fn daily_summary(&self, date: NaiveDate) -> Result<DailySummary> {
        let correlation = self.correlation_details(date)?;
        let non_correlating = self.non_correlation_details(date)?.count();
        let magic_sums = self.magic_details(date)?.entries.len();
        let archetype_peers = self
            .reference_archetype(date, ArchetypeDomain::Decimal)?
            .matches()
            .len();
        Ok(DailySummary {
            date,
            correlating: correlation.correlating(),
            largest_group: correlation.largest_group(),
            non_correlating,
            magic_sums,
            archetype_peers,
        })
    }

    /// Statistics of every date of the run, in date order.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Self::daily_summary`].
    pub fn daily_summaries(&self) -> Result<Vec<DailySummary>> {
        self.run
            .date_labels()
            .iter()
            .map(|&date| self.daily_summary(date))
            .collect()
    }

    /// Every query result for one date.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownDate`](crate::EngineError::UnknownDate) for a
    /// date outside the run.
    pub fn report(&self, date: NaiveDate) -> Result<DateReport> {
        Ok(DateReport {
            details: self.date_details(date)?,
            correlation: self.correlation_details(date)?,
            non_correlation: self.non_correlation_details(date)?,
            magic: self.magic_details(date)?,
            reference: self.reference_correlation(date)?,
            archetypes: self.archetype_correlation(date, ArchetypeDomain::Decimal)?,
            native_archetypes: self.archetype_correlation(date, ArchetypeDomain::Native)?,
            reference_archetype: self.reference_archetype(date, ArchetypeDomain::Decimal)?,
        })
    }

    fn active_bases(&self) -> impl Iterator<Item = NumeralBase> + 'a {
        let (run, filter) = (self.run, self.filter);
        filter.iter().filter(move |b| run.bases().contains(*b))
    }

    fn archetype_keys(
        &self,
        date: NaiveDate,
        domain: ArchetypeDomain,
    ) -> Result<Vec<(String, NumeralBase)>> {
        self.run.day(date)?;
        Ok(self
            .active_signatures(date)
            .map(|sig| (sig.archetype_key(domain), sig.base))
            .collect())
    }

    fn active_signatures(&self, date: NaiveDate) -> impl Iterator<Item = &'a DateSignature> + 'a {
        let (run, filter) = (self.run, self.filter);
        run.signatures_on(date)
            .filter(move |sig| filter.contains(sig.base))
    }

    fn compare<K: PartialEq + Clone>(
        &self,
        date: NaiveDate,
        values: Vec<(NumeralBase, K)>,
    ) -> ReferenceComparison<K> {
        let reference = self.reference;
        let Some(value) = values
            .iter()
            .find(|(b, _)| *b == reference && self.is_active(*b))
            .map(|(_, v)| v.clone())
        else {
            return ReferenceComparison::Inactive { date, reference };
        };
        let (matches, mismatches) = values
            .into_iter()
            .filter(|(b, _)| *b != reference)
            .partition::<Vec<_>, _>(|(_, v)| *v == value);
        ReferenceComparison::Compared {
            date,
            reference,
            value,
            matches: matches.into_iter().map(|(b, _)| b).collect(),
            mismatches: mismatches.into_iter().map(|(b, _)| b).collect(),
        }
    }
}

fn join_bases(bases: &[NumeralBase]) -> String {
    bases
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::DateRange;
    use crate::error::EngineError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn base(n: u32) -> NumeralBase {
        NumeralBase::new(n).unwrap()
    }

    fn run_for(day: NaiveDate, bases: &[u32]) -> (AnalysisRun, ActiveBases) {
        let range = DateRange::new(day, day).unwrap();
        let bases = ActiveBases::from_values(bases.iter().copied()).unwrap();
        (AnalysisRun::compute(range, &bases).unwrap(), bases)
    }

    #[test]
    fn test_single_group_and_singletons() {
        let day = date(2024, 1, 1);
        let (run, bases) = run_for(day, &[2, 3, 4, 10]);
        let sums: Vec<u64> = bases
            .iter()
            .map(|b| run.signature(b, day).unwrap().sum10)
            .collect();
        let q = run.correlations(&bases);
        let details = q.correlation_details(day).unwrap();
        let non = q.non_correlation_details(day).unwrap();
        assert_eq!(details.correlating() + non.count(), 4);
        for g in &details.groups {
            assert!(g.size() > 1);
            for b in &g.bases {
                let i = bases.iter().position(|x| x == *b).unwrap();
                assert_eq!(sums[i], g.key);
            }
        }
        for b in &non.bases {
            assert_eq!(sums.iter().filter(|s| **s == b.sum10).count(), 1);
        }
    }

    #[test]
    fn test_exactly_one_pair() {
        // 2024-01-01: base 2 sums to 9, base 10 to 10,
        // base 7 (01 01 5621) and base 11 (01 01 1580) both to 16.
        let day = date(2024, 1, 1);
        let (run, bases) = run_for(day, &[2, 7, 10, 11]);
        let q = run.correlations(&bases);
        let details = q.correlation_details(day).unwrap();
        assert_eq!(
            details.groups,
            vec![Group {
                key: 16,
                bases: vec![base(7), base(11)]
            }]
        );
        let non = q.non_correlation_details(day).unwrap();
        assert_eq!(
            non.bases,
            vec![
                BaseSum {
                    base: base(2),
                    sum10: 9
                },
                BaseSum {
                    base: base(10),
                    sum10: 10
                }
            ]
        );
        assert_eq!(details.lines(), vec!["sum 16: 2 bases (7, 11)".to_owned()]);
    }

    #[test]
    fn test_filter_narrows_groups() {
        let day = date(2024, 1, 1);
        let (run, bases) = run_for(day, &[2, 7, 10, 11]);
        let filter = bases.without(base(11)).unwrap();
        let q = run.correlations(&filter);
        assert!(q.correlation_details(day).unwrap().groups.is_empty());
        assert_eq!(q.non_correlation_details(day).unwrap().count(), 3);
    }

    #[test]
    fn test_no_correlation_line() {
        let day = date(2024, 1, 1);
        let (run, bases) = run_for(day, &[2, 10]);
        let details = run.correlations(&bases).correlation_details(day).unwrap();
        assert_eq!(details.lines(), vec!["no correlation".to_owned()]);
        assert_eq!(details.largest_group(), 0);
    }

    #[test]
    fn test_magic_details_filtered() {
        let day = date(1, 1, 1);
        let (run, bases) = run_for(day, &[2, 10]);
        let magic = run.correlations(&bases).magic_details(day).unwrap();
        assert_eq!(magic.entries.len(), 1);
        assert_eq!(magic.entries[0].key.as_str(), "11");
        assert_eq!(magic.entries[0].bases, vec![NumeralBase::BINARY]);

        let decimal_only = ActiveBases::from_values([10]).unwrap();
        let magic = run.correlations(&decimal_only).magic_details(day).unwrap();
        assert!(magic.entries.is_empty());
        assert_eq!(magic.lines(), vec!["no magic numbers".to_owned()]);
    }

    #[test]
    fn test_reference_correlation() {
        let day = date(1, 1, 1);
        let (run, bases) = run_for(day, &[2, 3, 10]);
        // base 2: 3, base 3: 01 01 0001 -> 3, base 10: 3
        let r = run.correlations(&bases).reference_correlation(day).unwrap();
        assert!(r.is_active());
        assert_eq!(r.matches(), &[base(2), base(3)]);
        assert!(r.mismatches().is_empty());
        assert_eq!(r.lines()[0], "base 10 (3): 2 matching, 0 not matching");
    }

    #[test]
    fn test_reference_inactive() {
        let day = date(2024, 1, 1);
        let (run, bases) = run_for(day, &[2, 16]);
        let r = run.correlations(&bases).reference_correlation(day).unwrap();
        assert!(!r.is_active());
        assert_eq!(r.lines(), vec!["base 10 is not active".to_owned()]);

        let (run, bases) = run_for(day, &[2, 10, 16]);
        let filter = bases.without(NumeralBase::DECIMAL).unwrap();
        let r = run.correlations(&filter).reference_correlation(day).unwrap();
        assert!(!r.is_active());
    }

    #[test]
    fn test_custom_reference() {
        let day = date(2024, 1, 1);
        let (run, bases) = run_for(day, &[2, 7, 10, 11]);
        let r = run
            .correlations(&bases)
            .with_reference(base(7))
            .reference_correlation(day)
            .unwrap();
        assert_eq!(r.matches(), &[base(11)]);
        assert_eq!(r.mismatches(), &[base(2), base(10)]);
    }

    #[test]
    fn test_archetype_correlation() {
        let day = date(2024, 1, 1);
        let (run, bases) = run_for(day, &[2, 7, 10, 11]);
        // decimal archetypes: 9 -> 9, 16 -> 7, 10 -> 1, 16 -> 7
        let a = run
            .correlations(&bases)
            .archetype_correlation(day, ArchetypeDomain::Decimal)
            .unwrap();
        assert_eq!(
            a.groups,
            vec![Group {
                key: "7".to_owned(),
                bases: vec![base(7), base(11)]
            }]
        );
        let unique: Vec<&str> = a.unique.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(unique, vec!["1", "9"]);
    }

    #[test]
    fn test_native_archetype_correlation() {
        let day = date(2024, 1, 1);
        let (run, bases) = run_for(day, &[2, 7, 10, 11]);
        // in-base archetypes: base 2 "1001" -> "1", base 7 "22" stays,
        // base 10 "10" -> "1", base 11 "15" -> "6"
        let q = run.correlations(&bases);
        assert_eq!(q.reference(), NumeralBase::DECIMAL);
        let a = q
            .archetype_correlation(day, ArchetypeDomain::Native)
            .unwrap();
        assert_eq!(
            a.groups,
            vec![Group {
                key: "1".to_owned(),
                bases: vec![base(2), base(10)]
            }]
        );
        assert_eq!(
            a.unique,
            vec![
                Group {
                    key: "22".to_owned(),
                    bases: vec![base(7)]
                },
                Group {
                    key: "6".to_owned(),
                    bases: vec![base(11)]
                }
            ]
        );

        let r = q.reference_archetype(day, ArchetypeDomain::Native).unwrap();
        assert_eq!(r.matches(), &[base(2)]);
        assert_eq!(r.mismatches(), &[base(7), base(11)]);

        let report = q.report(day).unwrap();
        assert_eq!(report.native_archetypes, a);
    }

    #[test]
    fn test_reference_archetype_counts_peers() {
        let day = date(2024, 1, 1);
        let (run, bases) = run_for(day, &[2, 7, 10, 11]);
        let q = run.correlations(&bases).with_reference(base(7));
        assert_eq!(q.reference(), base(7));
        let r = q
            .reference_archetype(day, ArchetypeDomain::Decimal)
            .unwrap();
        assert_eq!(r.matches(), &[base(11)]);
        assert_eq!(q.daily_summary(day).unwrap().archetype_peers, 1);
    }

    #[test]
    fn test_daily_summary() {
        let day = date(2024, 1, 1);
        let (run, bases) = run_for(day, &[2, 7, 10, 11]);
        let s = run.correlations(&bases).daily_summary(day).unwrap();
        assert_eq!(s.correlating, 2);
        assert_eq!(s.largest_group, 2);
        assert_eq!(s.non_correlating, 2);
        // 16 = "22" in base 7
        assert_eq!(s.magic_sums, 1);
        assert_eq!(s.archetype_peers, 0);
    }

    #[test]
    fn test_date_details() {
        let day = date(2024, 1, 1);
        let (run, bases) = run_for(day, &[2, 10]);
        let d = run.correlations(&bases).date_details(day).unwrap();
        assert_eq!(d.rows.len(), 2);
        assert_eq!(d.rows[0].dotted_date, "01.01.11111101000");
        assert_eq!(d.rows[0].native_archetype.as_str(), "1");
        assert_eq!(d.rows[1].archetype10, Archetype::Digit(1));
        assert_eq!(d.lines().len(), 3);
    }

    #[test]
    fn test_unknown_date() {
        let day = date(2024, 1, 1);
        let (run, bases) = run_for(day, &[2, 10]);
        let q = run.correlations(&bases);
        let other = date(2024, 1, 2);
        assert_eq!(
            q.correlation_details(other),
            Err(EngineError::UnknownDate(other))
        );
        assert!(q.report(other).is_err());
        assert!(q.report(day).is_ok());
    }
}
