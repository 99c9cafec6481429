//! Archetype validator: every archetype of a run is a fixed point of the
//! reducer that produced it, and has the shape of an archetype (one digit or
//! a master pattern).

use basex_engine::archetype::{reduce_base10, reduce_in_base, Archetype};
use basex_engine::{AnalysisRun, DateSignature};

use super::capped;
use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "run/archetypes";

/// Validates the base-10 and in-base archetypes of every signature.
pub fn validate(run: &AnalysisRun) -> ConformanceReport {
    let mut report = ConformanceReport::new();
    let mut checked = 0usize;
    let mut masters = 0usize;
    let mut violations = Vec::new();

    for sig in run.results().values().flatten() {
        checked += 1;
        if sig.archetype10().is_master() {
            masters += 1;
        }
        violations.extend(check_signature(sig));
    }

    if violations.is_empty() {
        report.push(TestResult::pass(
            VALIDATOR,
            format!("{checked} signatures reduce to fixed points ({masters} master archetypes)"),
        ));
    } else {
        report.push(TestResult::fail_with_details(
            VALIDATOR,
            format!("{} archetypes are not fixed points", violations.len()),
            capped(violations),
        ));
    }
    report
}

fn check_signature(sig: &DateSignature) -> Vec<String> {
    let at = format!("{} base {}", sig.date, sig.base);
    let mut problems = Vec::new();

    let decimal = sig.archetype10();
    match &decimal {
        Archetype::Digit(d) if *d > 9 => {
            problems.push(format!("{at}: base-10 archetype {d} is not a digit"));
        }
        Archetype::Master(s) if !s.is_master_pattern() => {
            problems.push(format!("{at}: base-10 archetype {s} is not a master pattern"));
        }
        _ => {}
    }
    match decimal.to_string().parse::<u64>() {
        Ok(value) if reduce_base10(value) == decimal => {}
        _ => problems.push(format!("{at}: base-10 archetype {decimal} is not a fixed point")),
    }

    let native = sig.native_archetype();
    if native.len() != 1 && !native.is_master_pattern() {
        problems.push(format!("{at}: native archetype {native} has the wrong shape"));
    }
    if reduce_in_base(&native, sig.base) != native {
        problems.push(format!("{at}: native archetype {native} is not a fixed point"));
    }
    problems
}

#[cfg(test)]
mod tests {
    use super::*;
    use basex_engine::{ActiveBases, DateRange};

    #[test]
    fn computed_archetypes_are_fixed_points() {
        let range = DateRange::parse("2024-01-01", "2024-03-31").unwrap();
        let bases = ActiveBases::from_values(2..=40).unwrap();
        let run = AnalysisRun::compute(range, &bases).unwrap();
        let report = validate(&run);
        assert!(report.all_passed(), "{:#?}", report.results);
    }

    #[test]
    fn every_signature_checks_clean() {
        let range = DateRange::parse("0001-01-01", "0001-01-31").unwrap();
        let bases = ActiveBases::from_values([2, 3, 10]).unwrap();
        let run = AnalysisRun::compute(range, &bases).unwrap();
        for sig in run.results().values().flatten() {
            assert!(check_signature(sig).is_empty(), "{}", sig.date);
        }
    }
}
