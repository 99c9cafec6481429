//! Cross-base aggregation: which bases share a sum on a given day.
//!
//! [`GroupTable`] is the typed grouping primitive: a sorted map from a key
//! (a base-10 sum, a magic sum string, an archetype) to the bases that
//! produced it, in the order they were inserted. [`DayCorrelation`] holds the
//! tables for one date. Building a table and querying it are separate steps;
//! queries live in [`crate::query`].

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::base::{ActiveBases, NumeralBase};
use crate::codec::DigitString;
use crate::signature::DateSignature;

/// Sorted map from a grouping key to the bases that share it.
///
/// # Example
///
/// ```
/// use basex_engine::correlation::GroupTable;
/// use basex_engine::NumeralBase;
///
/// let mut table = GroupTable::new();
/// table.insert(10u64, NumeralBase::DECIMAL);
/// table.insert(10u64, NumeralBase::BINARY);
/// table.insert(9u64, NumeralBase::new(3).unwrap());
///
/// let keys: Vec<u64> = table.iter().map(|(k, _)| *k).collect();
/// assert_eq!(keys, vec![9, 10]);
/// assert_eq!(table.members(&10).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GroupTable<K: Ord> {
    groups: BTreeMap<K, Vec<NumeralBase>>,
}

impl<K: Ord> GroupTable<K> {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            groups: BTreeMap::new(),
        }
    }

    /// Adds `base` to the group for `key`; a base is recorded once per group.
    pub fn insert(&mut self, key: K, base: NumeralBase) {
        let members = self.groups.entry(key).or_default();
        if !members.contains(&base) {
            members.push(base);
        }
    }

    /// Members of the group for `key`, in insertion order.
    #[must_use]
    pub fn members(&self, key: &K) -> &[NumeralBase] {
        self.groups.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Groups in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &[NumeralBase])> {
        self.groups.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Groups restricted to `filter`, ascending by key; members are sorted
    /// and groups left empty by the filter are skipped.
    pub fn active_groups<'a>(
        &'a self,
        filter: &'a ActiveBases,
    ) -> impl Iterator<Item = (&'a K, Vec<NumeralBase>)> + 'a {
        self.groups.iter().filter_map(move |(k, members)| {
            let mut active: Vec<NumeralBase> = members
                .iter()
                .copied()
                .filter(|b| filter.contains(*b))
                .collect();
            if active.is_empty() {
                return None;
            }
            active.sort_unstable();
            Some((k, active))
        })
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True when nothing was inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of memberships across all groups.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Number of groups with exactly one member.
    #[must_use]
    pub fn singleton_count(&self) -> usize {
        self.groups.values().filter(|m| m.len() == 1).count()
    }
}

impl<K: Ord> Default for GroupTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> FromIterator<(K, NumeralBase)> for GroupTable<K> {
    fn from_iter<I: IntoIterator<Item = (K, NumeralBase)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, base) in iter {
            table.insert(key, base);
        }
        table
    }
}

/// All groupings of one date across the bases of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCorrelation {
    /// The date these groupings belong to.
    pub date: NaiveDate,
    /// Base-10 sum → bases that produced it.
    pub sum_counts: GroupTable<u64>,
    /// Magic in-base sum string → bases for which it is magic.
    pub magic_sums: GroupTable<DigitString>,
    /// Bases whose base-10 sum no other base shares.
    pub non_correlating_count: usize,
}

impl DayCorrelation {
    /// Groups the signatures of a single date.
    ///
    /// Signatures for other dates are ignored.
    pub fn aggregate<'a>(
        date: NaiveDate,
        signatures: impl IntoIterator<Item = &'a DateSignature>,
    ) -> Self {
        let mut sum_counts = GroupTable::new();
        let mut magic_sums = GroupTable::new();
        for sig in signatures.into_iter().filter(|s| s.date == date) {
            sum_counts.insert(sig.sum10, sig.base);
            if sig.is_magic {
                magic_sums.insert(sig.sum_str.clone(), sig.base);
            }
        }
        let non_correlating_count = sum_counts.singleton_count();
        Self {
            date,
            sum_counts,
            magic_sums,
            non_correlating_count,
        }
    }

    /// Every base that appears in `sum_counts`.
    #[must_use]
    pub fn bases(&self) -> Vec<NumeralBase> {
        let mut bases: Vec<NumeralBase> = self
            .sum_counts
            .iter()
            .flat_map(|(_, members)| members.iter().copied())
            .collect();
        bases.sort_unstable();
        bases
    }

    /// The base-10 sum recorded for `base`, if it took part on this date.
    #[must_use]
    pub fn sum_of(&self, base: NumeralBase) -> Option<u64> {
        self.sum_counts
            .iter()
            .find(|(_, members)| members.contains(&base))
            .map(|(sum, _)| *sum)
    }
}
