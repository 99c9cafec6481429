//! Partition validator.
//!
//! On every day of a run, the `sum_counts` groups must partition the run's
//! base set: each base appears in exactly one group, and the union of the
//! groups is the whole set. The stored non-correlating count must equal the
//! number of single-member groups.

use std::collections::BTreeMap;

use basex_engine::{ActiveBases, AnalysisRun, DayCorrelation, NumeralBase};

use super::capped;
use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "run/partition";

/// Validates the per-day sum groupings of `run`.
pub fn validate(run: &AnalysisRun) -> ConformanceReport {
    let mut report = ConformanceReport::new();

    let daily_dates: Vec<_> = run.daily().keys().copied().collect();
    if daily_dates == run.date_labels() {
        report.push(TestResult::pass(
            VALIDATOR,
            format!("Day correlations cover all {} dates", daily_dates.len()),
        ));
    } else {
        report.push(TestResult::fail(
            VALIDATOR,
            format!(
                "Day correlations cover {} dates, the run has {}",
                daily_dates.len(),
                run.date_labels().len()
            ),
        ));
    }

    let violations: Vec<String> = run
        .daily()
        .values()
        .filter_map(|day| check_day(day, run.bases()))
        .collect();

    if violations.is_empty() {
        report.push(TestResult::pass(
            VALIDATOR,
            format!(
                "Every base is in exactly one sum group on all {} days",
                run.daily().len()
            ),
        ));
    } else {
        report.push(TestResult::fail_with_details(
            VALIDATOR,
            format!("{} days are not a partition of the base set", violations.len()),
            capped(violations),
        ));
    }

    report
}

/// Describes how `day` fails to partition `bases`, if it does.
fn check_day(day: &DayCorrelation, bases: &ActiveBases) -> Option<String> {
    let mut seen: BTreeMap<NumeralBase, usize> = BTreeMap::new();
    for (_, members) in day.sum_counts.iter() {
        for base in members {
            *seen.entry(*base).or_default() += 1;
        }
    }

    let mut problems = Vec::new();
    let repeated: Vec<String> = seen
        .iter()
        .filter(|(_, n)| **n > 1)
        .map(|(b, n)| format!("{b} x{n}"))
        .collect();
    if !repeated.is_empty() {
        problems.push(format!("repeated: {}", repeated.join(", ")));
    }
    let missing: Vec<String> = bases
        .iter()
        .filter(|b| !seen.contains_key(b))
        .map(|b| b.to_string())
        .collect();
    if !missing.is_empty() {
        problems.push(format!("missing: {}", missing.join(", ")));
    }
    let foreign: Vec<String> = seen
        .keys()
        .filter(|b| !bases.contains(**b))
        .map(ToString::to_string)
        .collect();
    if !foreign.is_empty() {
        problems.push(format!("not in run: {}", foreign.join(", ")));
    }
    let singletons = day.sum_counts.singleton_count();
    if day.non_correlating_count != singletons {
        problems.push(format!(
            "non_correlating_count {} but {} single-member groups",
            day.non_correlating_count, singletons
        ));
    }

    if problems.is_empty() {
        None
    } else {
        Some(format!("{}: {}", day.date, problems.join("; ")))
    }
}
