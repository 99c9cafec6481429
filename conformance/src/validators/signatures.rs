//! Signature validator.
//!
//! Re-derives every stored signature field from its neighbours:
//! - each base's series follows the run's date spine, one signature per date
//! - `encoded_date` is the concatenation of the padded components
//! - `sum10` is the digit sum of `encoded_date`
//! - `sum_str` is `sum10` written in the signature's base
//! - `is_magic` agrees with the master-pattern detector

use basex_engine::codec::digit_sum;
use basex_engine::pattern::is_master_pattern;
use basex_engine::signature::{DAY_WIDTH, MONTH_WIDTH, YEAR_WIDTH};
use basex_engine::{AnalysisRun, DateSignature, NumeralBase};

use super::capped;
use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "run/signatures";

/// Validates every signature series of `run`.
pub fn validate(run: &AnalysisRun) -> ConformanceReport {
    let mut report = ConformanceReport::new();
    let dates = run.date_labels();

    let mut spine = Vec::new();
    for base in run.bases() {
        match run.series(base) {
            None => spine.push(format!("base {base}: no series")),
            Some(series) if series.len() != dates.len() => spine.push(format!(
                "base {base}: {} signatures for {} dates",
                series.len(),
                dates.len()
            )),
            Some(series) => {
                if let Some(sig) = series.iter().zip(dates).find(|(s, d)| s.date != **d) {
                    spine.push(format!(
                        "base {base}: signature for {} where {} was expected",
                        sig.0.date, sig.1
                    ));
                }
            }
        }
    }
    if spine.is_empty() {
        report.push(TestResult::pass(
            VALIDATOR,
            format!(
                "{} series follow the {}-day date spine",
                run.bases().len(),
                dates.len()
            ),
        ));
    } else {
        report.push(TestResult::fail_with_details(
            VALIDATOR,
            "Series do not follow the date spine",
            capped(spine),
        ));
    }

    let mut checked = 0usize;
    let mut violations = Vec::new();
    for (base, series) in run.results() {
        for sig in series {
            checked += 1;
            violations.extend(check_signature(*base, sig));
        }
    }
    if violations.is_empty() {
        report.push(TestResult::pass(
            VALIDATOR,
            format!("{checked} signatures re-derive consistently"),
        ));
    } else {
        report.push(TestResult::fail_with_details(
            VALIDATOR,
            format!("{} signature fields are inconsistent", violations.len()),
            capped(violations),
        ));
    }

    report
}

/// Lists the fields of `sig` that do not follow from the others.
fn check_signature(base: NumeralBase, sig: &DateSignature) -> Vec<String> {
    let at = format!("{} base {}", sig.date, base);
    let mut problems = Vec::new();

    if sig.base != base {
        problems.push(format!("{at}: stored under base {base} but has base {}", sig.base));
    }
    for (name, part, width) in [
        ("day", &sig.day, DAY_WIDTH),
        ("month", &sig.month, MONTH_WIDTH),
        ("year", &sig.year, YEAR_WIDTH),
    ] {
        if part.len() < width {
            problems.push(format!("{at}: {name} '{part}' is narrower than {width}"));
        }
    }
    let joined = format!("{}{}{}", sig.day, sig.month, sig.year);
    if sig.encoded_date.as_str() != joined {
        problems.push(format!(
            "{at}: encoded date '{}' is not '{joined}'",
            sig.encoded_date
        ));
    }
    let sum = digit_sum(sig.encoded_date.as_str(), sig.base);
    if sum != sig.sum10 {
        problems.push(format!("{at}: sum10 {} but digits sum to {sum}", sig.sum10));
    }
    let rendered = sig.base.encode(sig.sum10);
    if rendered != sig.sum_str {
        problems.push(format!(
            "{at}: sum_str '{}' but {} renders as '{rendered}'",
            sig.sum_str, sig.sum10
        ));
    }
    if is_master_pattern(sig.sum_str.as_str()) != sig.is_magic {
        problems.push(format!(
            "{at}: is_magic {} for sum_str '{}'",
            sig.is_magic, sig.sum_str
        ));
    }
    problems
}

#[cfg(test)]
mod tests {
    use super::*;
    use basex_engine::{ActiveBases, DateRange};

    fn sample_run() -> AnalysisRun {
        let range = DateRange::parse("2023-12-25", "2024-01-05").unwrap();
        let bases = ActiveBases::from_values([2, 3, 10, 16, 36, 40]).unwrap();
        AnalysisRun::compute(range, &bases).unwrap()
    }

    #[test]
    fn computed_signatures_are_consistent() {
        let report = validate(&sample_run());
        assert!(report.all_passed(), "{:#?}", report.results);
        assert_eq!(report.results.len(), 2);
    }

    #[test]
    fn detects_tampered_fields() {
        let run = sample_run();
        let b10 = NumeralBase::DECIMAL;
        let mut sig = run.series(b10).unwrap()[0].clone();
        assert!(check_signature(b10, &sig).is_empty());

        sig.sum10 += 1;
        let problems = check_signature(b10, &sig);
        assert_eq!(problems.len(), 2, "{problems:#?}");
        assert!(problems[0].contains("digits sum to"));
        assert!(problems[1].contains("renders as"));

        let mut sig = run.series(b10).unwrap()[0].clone();
        sig.is_magic = !sig.is_magic;
        let problems = check_signature(b10, &sig);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("is_magic"));

        let sig = run.series(b10).unwrap()[0].clone();
        assert_eq!(check_signature(NumeralBase::BINARY, &sig).len(), 1);
    }
}
