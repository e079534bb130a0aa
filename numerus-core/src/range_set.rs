//! Append-only, self-merging sets of ranges

use crate::error::{Error, Result};
use crate::range::{Range, RangeStatus, SEQUENCE_SEPARATOR};
use crate::sample::NumericSample;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Largest fraction-digit count a [`RangeSet`] buckets
pub const MAX_FRACTION_DIGITS: u8 = 9;

/// Ranges bucketed by visible fraction digits
///
/// Within a bucket ranges never overlap and never touch: every insertion
/// merges into its neighbours.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeSet {
    buckets: BTreeMap<u8, BTreeSet<Range>>,
    size: usize,
}

impl RangeSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a sample, extending or creating a range as needed
    ///
    /// Samples already covered by a range leave the set untouched.
    pub fn insert(&mut self, sample: NumericSample) -> Result<()> {
        if sample.has_exponent() {
            return Err(Error::ExponentInRange {
                sample: sample.to_string(),
            });
        }
        let digits = sample.visible_fraction_digits();
        if digits > MAX_FRACTION_DIGITS {
            return Err(Error::FractionDigitsOverflow {
                digits,
                max: MAX_FRACTION_DIGITS,
            });
        }

        let bucket = self.buckets.entry(digits).or_default();
        let hit = bucket
            .iter()
            .find_map(|range| match range.status(&sample) {
                RangeStatus::Other => None,
                status => Some((*range, status)),
            });

        let placed = match hit {
            Some((_, RangeStatus::Inside)) => return Ok(()),
            Some((range, _)) => {
                bucket.remove(&range);
                range.extended_to(sample)?
            }
            None => Range::singleton(sample)?,
        };
        self.size += 1;
        Self::place(bucket, placed)
    }

    /// Put `range` into `bucket`, absorbing a successor it now touches
    fn place(bucket: &mut BTreeSet<Range>, mut range: Range) -> Result<()> {
        let successor = bucket.range(range..).next().copied();
        if let Some(next) = successor {
            if range.touches(&next) {
                bucket.remove(&next);
                range = range.merged_with(&next)?;
            }
        }
        bucket.insert(range);
        Ok(())
    }

    /// Number of insertions that created or extended a range
    ///
    /// This is an activity counter, not the number of stored ranges.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of stored ranges across all buckets
    pub fn range_count(&self) -> usize {
        self.buckets.values().map(BTreeSet::len).sum()
    }

    /// True when nothing was stored
    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(BTreeSet::is_empty)
    }

    /// Ranges of one fraction-digit bucket, in ascending order
    pub fn bucket(&self, fraction_digits: u8) -> impl Iterator<Item = &Range> {
        self.buckets.get(&fraction_digits).into_iter().flatten()
    }

    /// All ranges in bucket order, then range order
    pub fn ranges(&self) -> impl Iterator<Item = &Range> {
        self.buckets.values().flatten()
    }

    /// Drop ranges beyond a shared budget of `limit`
    ///
    /// Buckets are visited in ascending fraction-digit order and each one
    /// gets at least two ranges, so every observed fraction length keeps an
    /// exemplar.
    pub fn trim(&mut self, limit: usize) {
        let mut budget = limit;
        for bucket in self.buckets.values_mut() {
            budget = budget.max(2);
            let len = bucket.len();
            if len > budget {
                *bucket = bucket.iter().take(budget).copied().collect();
            }
            budget = budget.saturating_sub(len);
        }
    }
}

impl fmt::Display for RangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, range) in self.ranges().enumerate() {
            if index > 0 {
                f.write_str(SEQUENCE_SEPARATOR)?;
            }
            write!(f, "{range}")?;
        }
        Ok(())
    }
}
