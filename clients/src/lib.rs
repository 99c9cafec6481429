//! Shared plumbing for the BaseX client binaries: input flags, configuration
//! resolution and logging setup.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use basex_engine::{AnalysisConfig, DateRange, ResolvedConfig};
use chrono::{Datelike, Local, NaiveDate};
use clap::Args;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Flags selecting what to analyse. Flags override the configuration file.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// TOML configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// First day, inclusive (YYYY-MM-DD). Default: January 1 of the current year.
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last day, inclusive (YYYY-MM-DD). Default: December 31 of the current year.
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Comma-separated bases to analyse. Default: every base in bounds.
    #[arg(long, value_delimiter = ',')]
    pub bases: Vec<u32>,

    /// Largest base that may be activated (at most 40).
    #[arg(long)]
    pub max_base: Option<u32>,

    /// Reference base for the comparison queries.
    #[arg(long)]
    pub reference: Option<u32>,

    /// Log at debug level.
    #[arg(long, short)]
    pub verbose: bool,
}

impl InputArgs {
    /// Merges the configuration file (if any) with the flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be loaded.
    pub fn config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::load(path)
                .with_context(|| format!("Failed to load {}", path.display()))?,
            None => AnalysisConfig::default(),
        };
        if self.from.is_some() {
            config.date_from = self.from;
        }
        if self.to.is_some() {
            config.date_to = self.to;
        }
        if !self.bases.is_empty() {
            config.active_bases = Some(self.bases.clone());
        }
        if let Some(max) = self.max_base {
            config.bounds.max_base = max;
        }
        if let Some(reference) = self.reference {
            config.reference_base = reference;
        }
        Ok(config)
    }

    /// Resolves the inputs, defaulting missing dates to the current year.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be loaded or the
    /// merged configuration is invalid.
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let config = self.config()?;
        let fallback = DateRange::year(Local::now().year())?;
        let resolved = config
            .resolve_or(fallback)
            .context("Invalid analysis configuration")?;
        debug!(
            from = %resolved.range.start(),
            to = %resolved.range.end(),
            bases = ?resolved.bases.values(),
            reference = resolved.reference.get(),
            "resolved inputs"
        );
        Ok(resolved)
    }
}

/// Installs the fmt subscriber on stderr.
///
/// `RUST_LOG` selects the filter, defaulting to `warn`; `verbose` forces
/// `debug`.
pub fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        input: InputArgs,
    }

    fn parse(args: &[&str]) -> InputArgs {
        Cli::try_parse_from(std::iter::once("test").chain(args.iter().copied()))
            .unwrap()
            .input
    }

    #[test]
    fn flags_resolve() {
        let input = parse(&[
            "--from",
            "2024-01-01",
            "--to",
            "2024-01-10",
            "--bases",
            "2,10,16",
            "--reference",
            "16",
        ]);
        let resolved = input.resolve().unwrap();
        assert_eq!(resolved.range.len(), 10);
        assert_eq!(resolved.bases.values(), vec![2, 10, 16]);
        assert_eq!(resolved.reference.get(), 16);
    }

    #[test]
    fn max_base_widens_bounds() {
        let input = parse(&["--from", "2024-01-01", "--to", "2024-01-01", "--bases", "40"]);
        assert!(input.resolve().is_err());
        let input = parse(&[
            "--from",
            "2024-01-01",
            "--to",
            "2024-01-01",
            "--max-base",
            "40",
        ]);
        assert_eq!(input.resolve().unwrap().bases.len(), 39);
    }

    #[test]
    fn missing_dates_default_to_current_year() {
        let resolved = parse(&[]).resolve().unwrap();
        assert_eq!(resolved.range.start().year(), Local::now().year());
        assert_eq!(resolved.range.start().ordinal(), 1);
        assert_eq!(resolved.bases.len(), 15);
    }

    #[test]
    fn rejects_bad_dates() {
        let cli = Cli::try_parse_from(["test", "--from", "2024-02-30"]);
        assert!(cli.is_err());
    }
}
