//! Numeral bases and active-base sets.

use core::fmt;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::alphabet::{DEFAULT_MAX_BASE, MAX_BASE, MIN_BASE};
use crate::error::{EngineError, Result};

/// A positional numeral base in `[MIN_BASE, MAX_BASE]`.
///
/// The range check happens once, at construction, so every function that
/// takes a `NumeralBase` can rely on the alphabet covering all its digits.
///
/// # Example
///
/// ```
/// use basex_engine::NumeralBase;
///
/// let hex = NumeralBase::new(16).unwrap();
/// assert_eq!(hex.get(), 16);
/// assert!(NumeralBase::new(1).is_err());
/// assert!(NumeralBase::new(41).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct NumeralBase(u32);

impl NumeralBase {
    /// Base 10.
    pub const DECIMAL: Self = Self(10);

    /// Base 2.
    pub const BINARY: Self = Self(2);

    /// Creates a base, checking it against the full alphabet range.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidBase`] when `base` is outside `[2, 40]`.
    pub fn new(base: u32) -> Result<Self> {
        Self::within(base, BaseBounds::SUPPORTED)
    }

    /// Creates a base, checking it against caller-supplied bounds.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidBase`] when `base` is outside `bounds`.
    pub fn within(base: u32, bounds: BaseBounds) -> Result<Self> {
        if bounds.contains(base) {
            Ok(Self(base))
        } else {
            Err(EngineError::InvalidBase {
                base,
                min: bounds.min_base,
                max: bounds.max_base,
            })
        }
    }

    /// Returns the base as an integer.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Returns the base as a `u64` divisor.
    #[inline]
    #[must_use]
    pub const fn radix(self) -> u64 {
        self.0 as u64
    }
}

impl TryFrom<u32> for NumeralBase {
    type Error = EngineError;

    fn try_from(base: u32) -> Result<Self> {
        Self::new(base)
    }
}

impl From<NumeralBase> for u32 {
    #[inline]
    fn from(base: NumeralBase) -> Self {
        base.0
    }
}

impl fmt::Debug for NumeralBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Base{}", self.0)
    }
}

impl fmt::Display for NumeralBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inclusive range of bases a caller is allowed to activate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseBounds {
    /// Smallest base that may be activated.
    pub min_base: u32,
    /// Largest base that may be activated.
    pub max_base: u32,
}

impl BaseBounds {
    /// Everything the alphabet can express: `[2, 40]`.
    pub const SUPPORTED: Self = Self {
        min_base: MIN_BASE,
        max_base: MAX_BASE,
    };

    /// The default configured range: `[2, 16]`.
    pub const DEFAULT: Self = Self {
        min_base: MIN_BASE,
        max_base: DEFAULT_MAX_BASE,
    };

    /// Returns true if `base` lies within these bounds.
    #[inline]
    #[must_use]
    pub const fn contains(&self, base: u32) -> bool {
        base >= self.min_base && base <= self.max_base
    }

    /// Checks that these bounds are themselves inside the supported range.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] for inverted bounds or
    /// [`EngineError::InvalidBase`] when either end is unsupported.
    pub fn validate(&self) -> Result<()> {
        NumeralBase::new(self.min_base)?;
        NumeralBase::new(self.max_base)?;
        if self.min_base > self.max_base {
            return Err(EngineError::Config(format!(
                "min_base {} is greater than max_base {}",
                self.min_base, self.max_base
            )));
        }
        Ok(())
    }
}

impl Default for BaseBounds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A non-empty, ordered, de-duplicated set of active bases.
///
/// Used both as the base set of an analysis run and as the filter handed to
/// correlation queries; the filter may differ from the run's set.
///
/// # Example
///
/// ```
/// use basex_engine::ActiveBases;
///
/// let bases = ActiveBases::from_values([16, 2, 10, 2]).unwrap();
/// assert_eq!(bases.len(), 3);
/// assert_eq!(bases.values(), vec![2, 10, 16]);
/// assert!(ActiveBases::from_values([]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ActiveBases(BTreeSet<NumeralBase>);

impl ActiveBases {
    /// Builds a set from integers checked against the supported range.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidBase`] for an unsupported base and
    /// [`EngineError::EmptyActiveBases`] when no base is given.
    pub fn from_values(values: impl IntoIterator<Item = u32>) -> Result<Self> {
        Self::from_values_within(values, BaseBounds::SUPPORTED)
    }

    /// Builds a set from integers checked against `bounds`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidBase`] for a base outside `bounds` and
    /// [`EngineError::EmptyActiveBases`] when no base is given.
    pub fn from_values_within(
        values: impl IntoIterator<Item = u32>,
        bounds: BaseBounds,
    ) -> Result<Self> {
        let set = values
            .into_iter()
            .map(|b| NumeralBase::within(b, bounds))
            .collect::<Result<BTreeSet<_>>>()?;
        Self::from_set(set)
    }

    /// Wraps an existing set of bases.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyActiveBases`] when the set is empty.
    pub fn from_set(set: BTreeSet<NumeralBase>) -> Result<Self> {
        if set.is_empty() {
            return Err(EngineError::EmptyActiveBases);
        }
        Ok(Self(set))
    }

    /// Every base within `bounds`.
    ///
    /// # Errors
    ///
    /// Returns an error if `bounds` are invalid.
    pub fn all_within(bounds: BaseBounds) -> Result<Self> {
        bounds.validate()?;
        Self::from_values_within(bounds.min_base..=bounds.max_base, bounds)
    }

    /// Returns true if `base` is active.
    #[inline]
    #[must_use]
    pub fn contains(&self, base: NumeralBase) -> bool {
        self.0.contains(&base)
    }

    /// Number of active bases.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with collections.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the bases in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = NumeralBase> + '_ {
        self.0.iter().copied()
    }

    /// The bases as plain integers, ascending.
    #[must_use]
    pub fn values(&self) -> Vec<u32> {
        self.iter().map(NumeralBase::get).collect()
    }

    /// The set without `base`, or `None` if nothing would remain.
    #[must_use]
    pub fn without(&self, base: NumeralBase) -> Option<Self> {
        let mut set = self.0.clone();
        set.remove(&base);
        Self::from_set(set).ok()
    }
}

impl<'a> IntoIterator for &'a ActiveBases {
    type Item = NumeralBase;
    type IntoIter = core::iter::Copied<std::collections::btree_set::Iter<'a, NumeralBase>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_range() {
        assert!(NumeralBase::new(2).is_ok());
        assert!(NumeralBase::new(40).is_ok());
        assert_eq!(
            NumeralBase::new(41),
            Err(EngineError::InvalidBase {
                base: 41,
                min: 2,
                max: 40
            })
        );
        assert!(NumeralBase::new(0).is_err());
    }

    #[test]
    fn test_base_within_bounds() {
        assert!(NumeralBase::within(17, BaseBounds::DEFAULT).is_err());
        assert!(NumeralBase::within(16, BaseBounds::DEFAULT).is_ok());
    }

    #[test]
    fn test_bounds_validate() {
        assert!(BaseBounds::DEFAULT.validate().is_ok());
        let inverted = BaseBounds {
            min_base: 10,
            max_base: 4,
        };
        assert!(matches!(inverted.validate(), Err(EngineError::Config(_))));
        let too_wide = BaseBounds {
            min_base: 2,
            max_base: 64,
        };
        assert!(matches!(
            too_wide.validate(),
            Err(EngineError::InvalidBase { base: 64, .. })
        ));
    }

    #[test]
    fn test_active_bases_dedup_and_order() {
        let bases = ActiveBases::from_values([10, 3, 10, 2]).unwrap();
        assert_eq!(bases.values(), vec![2, 3, 10]);
        assert!(bases.contains(NumeralBase::DECIMAL));
    }

    #[test]
    fn test_active_bases_all_within_default() {
        let bases = ActiveBases::all_within(BaseBounds::DEFAULT).unwrap();
        assert_eq!(bases.len(), 15);
        assert_eq!(bases.values().first(), Some(&2));
        assert_eq!(bases.values().last(), Some(&16));
    }

    #[test]
    fn test_active_bases_empty() {
        assert_eq!(
            ActiveBases::from_values(Vec::new()),
            Err(EngineError::EmptyActiveBases)
        );
        let single = ActiveBases::from_values([10]).unwrap();
        assert!(single.without(NumeralBase::DECIMAL).is_none());
    }

    #[test]
    fn test_active_bases_out_of_bounds() {
        let err = ActiveBases::from_values_within([2, 20], BaseBounds::DEFAULT).unwrap_err();
        assert!(matches!(err, EngineError::InvalidBase { base: 20, .. }));
    }

    #[test]
    fn test_serde_round_trip_rejects_bad_base() {
        let base: NumeralBase = serde_json::from_str("12").unwrap();
        assert_eq!(base.get(), 12);
        assert!(serde_json::from_str::<NumeralBase>("1").is_err());
    }
}
