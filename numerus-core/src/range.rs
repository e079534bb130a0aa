//! Closed ranges of samples sharing one fraction-digit count

use crate::error::{Error, Result};
use crate::sample::NumericSample;
use std::cmp::Ordering;
use std::fmt;

/// Separator between the ends of a gapped range
pub const RANGE_SEPARATOR: &str = "~";

/// Separator between neighbouring items of a sample sequence
pub const SEQUENCE_SEPARATOR: &str = ", ";

/// Where a candidate sits relative to a [`Range`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeStatus {
    /// Already covered by the range
    Inside,
    /// Immediate successor of the range end
    RightBefore,
    /// Neither inside nor contiguous
    Other,
}

/// A closed interval `[start, end]` of samples with equal visible fraction digits
///
/// Ranges are values: extending one yields a new range, the old one is
/// replaced by its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    start: NumericSample,
    end: NumericSample,
}

impl Range {
    /// Create a range; both ends must share fraction digits and carry no exponent
    pub fn new(start: NumericSample, end: NumericSample) -> Result<Self> {
        for sample in [&start, &end] {
            if sample.has_exponent() {
                return Err(Error::ExponentInRange {
                    sample: sample.to_string(),
                });
            }
        }
        if start.visible_fraction_digits() != end.visible_fraction_digits() {
            return Err(Error::FractionDigitsMismatch {
                start: start.visible_fraction_digits(),
                end: end.visible_fraction_digits(),
            });
        }
        Ok(Self { start, end })
    }

    /// Single-value range
    pub fn singleton(sample: NumericSample) -> Result<Self> {
        Self::new(sample, sample)
    }

    /// First value of the range
    pub fn start(&self) -> NumericSample {
        self.start
    }

    /// Last value of the range
    pub fn end(&self) -> NumericSample {
        self.end
    }

    /// Fraction digits shared by both ends
    pub fn visible_fraction_digits(&self) -> u8 {
        self.start.visible_fraction_digits()
    }

    fn bounds(&self) -> (u64, u64) {
        (self.start.scaled_value(), self.end.scaled_value())
    }

    /// Classify `candidate` at this range's scale
    ///
    /// The candidate is truncated to the range's fraction-digit grid before
    /// comparison. Negative candidates cannot be constructed, see
    /// [`NumericSample::from_scaled`].
    pub fn status(&self, candidate: &NumericSample) -> RangeStatus {
        let value = candidate.value_at_scale(self.visible_fraction_digits());
        let (start, end) = self.bounds();
        if start <= value && value <= end {
            RangeStatus::Inside
        } else if end.checked_add(1) == Some(value) {
            RangeStatus::RightBefore
        } else {
            RangeStatus::Other
        }
    }

    /// This range with its end moved to `end`
    pub fn extended_to(&self, end: NumericSample) -> Result<Self> {
        Self::new(self.start, end)
    }

    /// True when `next` starts right after this range ends
    pub fn touches(&self, next: &Range) -> bool {
        next.visible_fraction_digits() == self.visible_fraction_digits()
            && self.end.scaled_value().checked_add(1) == Some(next.start.scaled_value())
    }

    /// Merge this range with an adjacent or overlapping successor
    pub fn merged_with(&self, next: &Range) -> Result<Self> {
        let end = if next.end > self.end { next.end } else { self.end };
        Self::new(self.start, end)
    }
}

impl Ord for Range {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start
            .cmp(&other.start)
            .then_with(|| self.end.cmp(&other.end))
    }
}

impl PartialOrd for Range {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (start, end) = self.bounds();
        write!(f, "{}", self.start)?;
        if start != end {
            let separator = if start + 1 == end {
                SEQUENCE_SEPARATOR
            } else {
                RANGE_SEPARATOR
            };
            write!(f, "{}{}", separator, self.end)?;
        }
        Ok(())
    }
}
