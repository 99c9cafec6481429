//! `basex-analyze` — Computes the numerology of a date range across numeral bases.
//!
//! Prints one summary line per date, or for `--date` the full per-date report:
//! the detail table, sum correlations, non-correlating bases, magic numbers,
//! the reference-base comparison and the archetype groupings.
//!
//! **Usage:**
//! ```
//! basex-analyze [--config <file>] [--from <date>] [--to <date>] [--bases 2,10,16]
//!               [--max-base <n>] [--reference <n>] [--date <date>] [--format text|json]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use anyhow::{Context, Result};
use basex_clients::{init_tracing, InputArgs};
use basex_engine::{AnalysisRun, Lines};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use serde_json::json;

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Human-readable lines.
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Analyse calendar dates in positional numeral bases.
#[derive(Parser)]
#[command(
    name = "basex-analyze",
    about = "Compute date signatures across numeral bases and their correlations"
)]
struct Args {
    #[command(flatten)]
    input: InputArgs,

    /// Report every query for this date instead of the daily summary.
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    format: Format,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.input.verbose);

    let resolved = args.input.resolve()?;
    let run = AnalysisRun::compute(resolved.range, &resolved.bases)
        .context("Failed to compute analysis run")?;
    let queries = run
        .correlations(&resolved.bases)
        .with_reference(resolved.reference);

    if let Some(date) = args.date {
        let report = queries
            .report(date)
            .with_context(|| format!("No report for {date}"))?;
        match args.format {
            Format::Text => {
                for line in report.lines() {
                    println!("{line}");
                }
            }
            Format::Json => {
                let text = serde_json::to_string_pretty(&report)
                    .context("Failed to serialize report")?;
                println!("{text}");
            }
        }
        return Ok(());
    }

    let summaries = queries
        .daily_summaries()
        .context("Failed to summarise days")?;
    match args.format {
        Format::Text => {
            let range = run.range();
            println!(
                "BaseX analysis {} .. {}: {} days, bases {:?}, reference base {}",
                range.start(),
                range.end(),
                range.len(),
                run.bases().values(),
                queries.reference()
            );
            println!();
            for summary in &summaries {
                println!("{summary}");
            }
            let diagnostics = run.diagnostics();
            println!();
            println!(
                "Summary: {} signatures, {} magic",
                diagnostics.signatures, diagnostics.magic_signatures
            );
        }
        Format::Json => {
            let value = json!({
                "reference": queries.reference(),
                "run": &run,
                "summaries": &summaries,
            });
            let text =
                serde_json::to_string_pretty(&value).context("Failed to serialize run")?;
            println!("{text}");
        }
    }

    Ok(())
}
