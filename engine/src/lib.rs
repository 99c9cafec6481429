//! BaseX date numerology engine.
//!
//! Writes calendar dates in positional numeral bases 2 through 40, sums their
//! digits, detects "master patterns" (repeated-digit sums such as `11` or
//! `AA`), reduces sums to archetypes, and groups bases that share a sum or an
//! archetype on the same day.
//!
//! # Pipeline
//!
//! | Stage | Module | Output |
//! |-------|--------|--------|
//! | Digit codec | [`codec`] | [`DigitString`], [`DigitTally`](codec::DigitTally) |
//! | Pattern detector | [`pattern`] | `bool` |
//! | Archetype reducer | [`archetype`] | [`Archetype`], in-base [`DigitString`] |
//! | Per-base date analyzer | [`signature`] | [`DateSignature`] |
//! | Cross-base aggregator | [`correlation`] | [`DayCorrelation`] |
//! | Query engine | [`query`] | typed results rendering to lines |
//!
//! An [`AnalysisRun`] owns the signatures and day correlations of one date
//! range and one base set; [`Correlations`] queries it under a filter.
//!
//! # Entry Point
//!
//! ```
//! use basex_engine::prelude::*;
//! use chrono::NaiveDate;
//!
//! let range = DateRange::parse("2024-01-01", "2024-01-31").unwrap();
//! let bases = ActiveBases::from_values([2, 10]).unwrap();
//! let run = AnalysisRun::compute(range, &bases).unwrap();
//!
//! let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let b10 = run.signature(NumeralBase::DECIMAL, date).unwrap();
//! assert_eq!(b10.encoded_date.as_str(), "01012024");
//! assert_eq!(b10.sum10, 10);
//!
//! let b2 = run.signature(NumeralBase::BINARY, date).unwrap();
//! assert_eq!(b2.sum_str.as_str(), "1001");
//!
//! let reference = run.correlations(&bases).reference_correlation(date).unwrap();
//! assert!(reference.matches().is_empty());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod alphabet;
pub mod archetype;
pub mod base;
pub mod calendar;
pub mod codec;
pub mod config;
pub mod correlation;
pub mod error;
pub mod pattern;
pub mod query;
pub mod run;
pub mod signature;

pub use archetype::{Archetype, ArchetypeDomain};
pub use base::{ActiveBases, BaseBounds, NumeralBase};
pub use calendar::DateRange;
pub use codec::DigitString;
pub use config::{AnalysisConfig, ResolvedConfig};
pub use correlation::{DayCorrelation, GroupTable};
pub use error::{EngineError, Result};
pub use query::{Correlations, Lines};
pub use run::{AnalysisRun, RunDiagnostics};
pub use signature::DateSignature;

/// Common imports for working with the engine.
pub mod prelude {
    pub use crate::archetype::{Archetype, ArchetypeDomain};
    pub use crate::base::{ActiveBases, BaseBounds, NumeralBase};
    pub use crate::calendar::DateRange;
    pub use crate::codec::DigitString;
    pub use crate::query::{Correlations, Lines};
    pub use crate::run::AnalysisRun;
    pub use crate::signature::DateSignature;
}
