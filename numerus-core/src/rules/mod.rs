//! Plural-rule evaluator interface
//!
//! The collector never interprets rule syntax. It talks to an evaluator
//! through [`PluralRules`], which answers three questions: which keyword a
//! value selects, which keywords exist, and whether a keyword's value set is
//! provably finite for a numeric kind.
//!
//! # Usage
//!
//! ```rust
//! use numerus_core::rules::{builtin, PluralRules, RuleKind};
//!
//! let english = builtin::family_for_locale(RuleKind::Cardinal, "en").unwrap();
//! let one: numerus_core::NumericSample = "1".parse().unwrap();
//! assert_eq!(english.select(&one), "one");
//! ```

pub mod builtin;

use crate::sample::NumericSample;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use builtin::{KeywordRule, RuleFamily};

/// The catch-all keyword every rule defines
pub const OTHER: &str = "other";

/// Whether a rule selects forms for counts or for ranks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    /// "1 day", "2 days"
    Cardinal,
    /// "1st", "2nd"
    Ordinal,
}

impl RuleKind {
    /// Both kinds, cardinal first
    pub const ALL: [RuleKind; 2] = [RuleKind::Cardinal, RuleKind::Ordinal];

    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Cardinal => "cardinal",
            RuleKind::Ordinal => "ordinal",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two independently sampled numeric domains of a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleKind {
    /// No visible fraction digits
    Integer,
    /// At least one visible fraction digit
    Decimal,
}

impl SampleKind {
    /// Kind a sample is routed to
    pub fn of(sample: &NumericSample) -> Self {
        if sample.is_integer() {
            SampleKind::Integer
        } else {
            SampleKind::Decimal
        }
    }

    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            SampleKind::Integer => "integer",
            SampleKind::Decimal => "decimal",
        }
    }
}

impl fmt::Display for SampleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A plural-rule evaluator
///
/// Implementations must be pure: the same question always gets the same
/// answer, so the collector may ask as often as it likes.
pub trait PluralRules: Send + Sync {
    /// Cardinal or ordinal
    fn kind(&self) -> RuleKind;

    /// Keywords the rule defines, in presentation order
    fn keywords(&self) -> Vec<&str>;

    /// Keyword selected for `sample`
    fn select(&self, sample: &NumericSample) -> &str;

    /// Whether `keyword` matches only finitely many values of `kind`
    fn is_limited(&self, keyword: &str, kind: SampleKind) -> bool;

    /// Condition text of one keyword, `None` for the catch-all
    fn rule_text(&self, keyword: &str) -> Option<&str>;

    /// Whole rule as `keyword: condition` clauses joined by `; `
    fn description(&self) -> String {
        self.keywords()
            .into_iter()
            .filter_map(|keyword| {
                self.rule_text(keyword)
                    .map(|text| format!("{keyword}: {text}"))
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_kind_routing() {
        let integer: NumericSample = "12".parse().unwrap();
        let decimal: NumericSample = "12.0".parse().unwrap();
        let compact: NumericSample = "1.1c6".parse().unwrap();
        assert_eq!(SampleKind::of(&integer), SampleKind::Integer);
        assert_eq!(SampleKind::of(&decimal), SampleKind::Decimal);
        assert_eq!(SampleKind::of(&compact), SampleKind::Integer);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(RuleKind::Cardinal.to_string(), "cardinal");
        assert_eq!(RuleKind::Ordinal.as_str(), "ordinal");
        assert_eq!(SampleKind::Decimal.to_string(), "decimal");
    }
}
