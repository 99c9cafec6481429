//! Diagnostics validator.
//!
//! Cross-checks the run's counters against its contents and warns when the
//! lenient digit sum absorbed malformed symbols.

use basex_engine::{AnalysisRun, RunDiagnostics};

use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "run/diagnostics";

/// Validates the diagnostics counters of `run`.
pub fn validate(run: &AnalysisRun) -> ConformanceReport {
    let mut report = ConformanceReport::new();
    let diagnostics = run.diagnostics();

    let expected = run.date_labels().len() * run.bases().len();
    if diagnostics.signatures == expected {
        report.push(TestResult::pass(
            VALIDATOR,
            format!("{expected} signatures computed"),
        ));
    } else {
        report.push(TestResult::fail(
            VALIDATOR,
            format!(
                "{} signatures counted, {} dates x {} bases = {expected}",
                diagnostics.signatures,
                run.date_labels().len(),
                run.bases().len()
            ),
        ));
    }

    let grouped: usize = run
        .daily()
        .values()
        .map(|day| day.magic_sums.member_count())
        .sum();
    if grouped == diagnostics.magic_signatures {
        report.push(TestResult::pass(
            VALIDATOR,
            format!("{grouped} magic signatures, all grouped"),
        ));
    } else {
        report.push(TestResult::fail(
            VALIDATOR,
            format!(
                "{} magic signatures counted, {grouped} found in magic sum groups",
                diagnostics.magic_signatures
            ),
        ));
    }

    report.push(assess_malformed(diagnostics));
    report
}

/// Warns when malformed symbols were valued as 0.
fn assess_malformed(diagnostics: RunDiagnostics) -> TestResult {
    if diagnostics.malformed_symbols == 0 {
        TestResult::pass(VALIDATOR, "No malformed digit symbols")
    } else {
        TestResult::warn(
            VALIDATOR,
            format!(
                "{} malformed digit symbols were valued as 0",
                diagnostics.malformed_symbols
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Severity;
    use basex_engine::{ActiveBases, DateRange};

    #[test]
    fn computed_run_counters_match() {
        let range = DateRange::year(2024).unwrap();
        let bases = ActiveBases::from_values(2..=16).unwrap();
        let run = AnalysisRun::compute(range, &bases).unwrap();
        let report = validate(&run);
        assert!(report.all_passed(), "{:#?}", report.results);
        assert_eq!(report.warning_count(), 0);
    }

    #[test]
    fn malformed_symbols_warn() {
        let diagnostics = RunDiagnostics {
            malformed_symbols: 3,
            ..RunDiagnostics::default()
        };
        let result = assess_malformed(diagnostics);
        assert_eq!(result.severity, Severity::Warning);
        assert!(result.message.starts_with('3'));
    }
}
