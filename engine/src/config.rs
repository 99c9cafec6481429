//! Analysis configuration, loaded from TOML.
//!
//! ```toml
//! date_from = "2024-01-01"
//! date_to = "2024-12-31"
//! active_bases = [2, 10, 16]
//! reference_base = 10
//!
//! [bounds]
//! min_base = 2
//! max_base = 16
//! ```
//!
//! Every key is optional. Missing dates are resolved by the caller (the
//! binaries use the current year); a missing base list selects every base
//! within `bounds`.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::base::{ActiveBases, BaseBounds, NumeralBase};
use crate::calendar::DateRange;
use crate::error::{EngineError, Result};

/// User-facing analysis settings.
///
/// # Example
///
/// ```
/// use basex_engine::AnalysisConfig;
///
/// let config = AnalysisConfig::from_toml_str(
///     r#"
///     date_from = "2024-01-01"
///     date_to = "2024-01-31"
///     active_bases = [2, 10]
///     "#,
/// )
/// .unwrap();
/// let resolved = config.resolve().unwrap();
/// assert_eq!(resolved.range.len(), 31);
/// assert_eq!(resolved.bases.values(), vec![2, 10]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// First day, inclusive.
    pub date_from: Option<NaiveDate>,
    /// Last day, inclusive.
    pub date_to: Option<NaiveDate>,
    /// Bases to analyse; `None` means every base within `bounds`.
    pub active_bases: Option<Vec<u32>>,
    /// Base the reference queries compare against.
    pub reference_base: u32,
    /// Permitted base range.
    pub bounds: BaseBounds,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            date_from: None,
            date_to: None,
            active_bases: None,
            reference_base: NumeralBase::DECIMAL.get(),
            bounds: BaseBounds::DEFAULT,
        }
    }
}

/// A validated configuration, ready for [`AnalysisRun::compute`](crate::AnalysisRun::compute).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfig {
    /// Dates to analyse.
    pub range: DateRange,
    /// Bases to analyse.
    pub bases: ActiveBases,
    /// Reference base for the comparison queries.
    pub reference: NumeralBase,
}

impl AnalysisConfig {
    /// A configuration covering January 1 to December 31 of `year`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidDate`] for a year chrono cannot represent.
    pub fn for_year(year: i32) -> Result<Self> {
        let range = DateRange::year(year)?;
        Ok(Self {
            date_from: Some(range.start()),
            date_to: Some(range.end()),
            ..Self::default()
        })
    }

    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] when the document is not valid TOML or
    /// does not match the expected shape.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| EngineError::Config(e.to_string()))
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] when the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading configuration");
        let text = fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Renders the configuration back to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| EngineError::Config(e.to_string()))
    }

    /// Checks bounds, the base list, the reference base and the dates.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: [`EngineError::InvalidBase`],
    /// [`EngineError::Config`], [`EngineError::EmptyActiveBases`] or
    /// [`EngineError::InvalidRange`].
    pub fn validate(&self) -> Result<()> {
        self.resolve().map(|_| ())
    }

    /// Validates and converts into typed values.
    ///
    /// Missing dates are an error here; use [`Self::resolve_or`] to supply
    /// a fallback range.
    ///
    /// # Errors
    ///
    /// See [`Self::validate`]; also [`EngineError::Config`] when a date is
    /// missing.
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let from = self
            .date_from
            .ok_or_else(|| EngineError::Config("date_from is not set".to_owned()))?;
        let to = self
            .date_to
            .ok_or_else(|| EngineError::Config("date_to is not set".to_owned()))?;
        self.resolve_with(DateRange::new(from, to)?)
    }

    /// Like [`Self::resolve`], taking missing dates from `fallback`.
    ///
    /// # Errors
    ///
    /// See [`Self::validate`].
    pub fn resolve_or(&self, fallback: DateRange) -> Result<ResolvedConfig> {
        let from = self.date_from.unwrap_or(fallback.start());
        let to = self.date_to.unwrap_or(fallback.end());
        self.resolve_with(DateRange::new(from, to)?)
    }

    fn resolve_with(&self, range: DateRange) -> Result<ResolvedConfig> {
        self.bounds.validate()?;
        let bases = match &self.active_bases {
            Some(values) => ActiveBases::from_values_within(values.iter().copied(), self.bounds)?,
            None => ActiveBases::all_within(self.bounds)?,
        };
        let reference = NumeralBase::within(self.reference_base, self.bounds)?;
        Ok(ResolvedConfig {
            range,
            bases,
            reference,
        })
    }
}
