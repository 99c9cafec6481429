//! BaseX numerology conformance suite.
//!
//! Validates a computed [`AnalysisRun`] against the invariants the engine
//! promises and aggregates the outcome in a [`ConformanceReport`].
//!
//! # Conformance Scope
//!
//! | Validator | Invariant |
//! |-----------|-----------|
//! | `run/partition` | every run base is in exactly one sum group per day |
//! | `run/filter_balance` | Σ group sizes + non-correlating = \|S\| for the full set and each leave-one-out subset |
//! | `run/signatures` | stored fields re-derive from the encoded date; series follow the date spine |
//! | `run/archetypes` | every archetype is a fixed point of its reducer |
//! | `run/diagnostics` | counters match the run; malformed symbols raise a warning |
//!
//! # Entry Point
//!
//! ```
//! use basex_conformance::run_all;
//! use basex_engine::{ActiveBases, AnalysisRun, DateRange};
//!
//! let range = DateRange::parse("2024-01-01", "2024-01-31").unwrap();
//! let bases = ActiveBases::from_values(2..=16).unwrap();
//! let run = AnalysisRun::compute(range, &bases).unwrap();
//! let report = run_all(&run).expect("Failed to run conformance");
//! assert!(report.all_passed());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod report;
pub mod validators;

use basex_engine::AnalysisRun;
use tracing::debug;

pub use report::{ConformanceReport, Severity, TestResult};

/// Runs all conformance validators and returns the aggregated report.
///
/// Validators are run in this order:
/// 1. Partition of the base set per day
/// 2. Filter balance (full set and leave-one-out subsets)
/// 3. Signature consistency
/// 4. Archetype fixed points
/// 5. Run diagnostics
///
/// # Errors
///
/// Returns an error only if a query fails for a date of the run.
pub fn run_all(run: &AnalysisRun) -> anyhow::Result<ConformanceReport> {
    let mut report = ConformanceReport::new();

    report.extend(validators::partition::validate(run));
    report.extend(validators::filter_balance::validate(run)?);
    report.extend(validators::signatures::validate(run));
    report.extend(validators::archetypes::validate(run));
    report.extend(validators::diagnostics::validate(run));

    debug!(
        results = report.results.len(),
        failures = report.failure_count(),
        warnings = report.warning_count(),
        "conformance complete"
    );
    Ok(report)
}
