//! Filter balance validator.
//!
//! For a query filter `S`, the correlation groups and the non-correlating
//! bases of a day must account for every base of `S` exactly once:
//! `Σ group sizes + non-correlating count = |S|`. Checked for the run's full
//! base set and for every subset that leaves one base out.

use anyhow::{Context, Result};
use basex_engine::{ActiveBases, AnalysisRun};
use tracing::debug;

use super::capped;
use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "run/filter_balance";

/// Validates the balance identity for the full set and each leave-one-out subset.
///
/// # Errors
///
/// Returns an error if a query fails for a date of the run.
pub fn validate(run: &AnalysisRun) -> Result<ConformanceReport> {
    let mut report = ConformanceReport::new();

    let mut filters = vec![run.bases().clone()];
    filters.extend(run.bases().iter().filter_map(|b| run.bases().without(b)));
    debug!(filters = filters.len(), "checking filter balance");

    let mut violations = Vec::new();
    for filter in &filters {
        violations.extend(check_filter(run, filter)?);
    }

    if violations.is_empty() {
        report.push(TestResult::pass(
            VALIDATOR,
            format!(
                "Groups and singletons balance for {} filters over {} days",
                filters.len(),
                run.date_labels().len()
            ),
        ));
    } else {
        report.push(TestResult::fail_with_details(
            VALIDATOR,
            format!("{} (filter, day) pairs do not balance", violations.len()),
            capped(violations),
        ));
    }

    Ok(report)
}

/// Lists every day on which `filter` does not balance.
fn check_filter(run: &AnalysisRun, filter: &ActiveBases) -> Result<Vec<String>> {
    let q = run.correlations(filter);
    let expected = filter
        .iter()
        .filter(|b| run.bases().contains(*b))
        .count();
    let mut violations = Vec::new();
    for &date in run.date_labels() {
        let correlating = q
            .correlation_details(date)
            .with_context(|| format!("correlation details for {date}"))?
            .correlating();
        let non_correlating = q
            .non_correlation_details(date)
            .with_context(|| format!("non-correlation details for {date}"))?
            .count();
        if correlating + non_correlating != expected {
            violations.push(format!(
                "{date} filter {:?}: {correlating} + {non_correlating} != {expected}",
                filter.values()
            ));
        }
    }
    Ok(violations)
}
