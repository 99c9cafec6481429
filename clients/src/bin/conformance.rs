//! `basex-conformance` — Validates a computed analysis run against the engine's invariants.
//!
//! Runs the complete conformance suite:
//! - partition of the base set into sum groups per day
//! - filter balance for the full set and every leave-one-out subset
//! - signature consistency and date-spine alignment
//! - archetype fixed points
//! - run diagnostics
//!
//! **Usage:**
//! ```
//! basex-conformance [--config <file>] [--from <date>] [--to <date>] [--bases 2,10,16]
//! ```
//!
//! Exits non-zero if any conformance check fails.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::process;

use anyhow::{Context, Result};
use basex_clients::{init_tracing, InputArgs};
use basex_conformance::{run_all, Severity};
use basex_engine::AnalysisRun;
use clap::Parser;

/// Run the BaseX conformance suite.
#[derive(Parser)]
#[command(
    name = "basex-conformance",
    about = "Validate a BaseX analysis run against the engine's invariants"
)]
struct Args {
    #[command(flatten)]
    input: InputArgs,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.input.verbose);

    let resolved = args.input.resolve()?;
    let run = AnalysisRun::compute(resolved.range, &resolved.bases)
        .context("Failed to compute analysis run")?;
    let report = run_all(&run)?;

    // Print results
    println!("BaseX Conformance Report");
    println!("========================");
    println!(
        "{} .. {}, bases {:?}",
        resolved.range.start(),
        resolved.range.end(),
        resolved.bases.values()
    );
    println!();

    let mut passed = 0usize;
    let mut failed = 0usize;
    let mut warned = 0usize;

    for result in &report.results {
        let status = match result.severity {
            Severity::Pass => {
                passed += 1;
                "PASS"
            }
            Severity::Warning => {
                warned += 1;
                "WARN"
            }
            Severity::Failure => {
                failed += 1;
                "FAIL"
            }
        };
        println!("[{}] {} — {}", status, result.validator, result.message);
        for detail in &result.details {
            println!("       {}", detail);
        }
    }

    println!();
    println!(
        "Summary: {} passed, {} warnings, {} failed",
        passed, warned, failed
    );

    if failed > 0 {
        eprintln!("Conformance FAILED: {} check(s) did not pass.", failed);
        process::exit(1);
    }

    println!("Conformance PASSED.");
    Ok(())
}
