//! Per-category sample accumulation and the boundedness verdict

use crate::config::GeneratorConfig;
use crate::diagnostics::{Diagnostics, Severity};
use crate::error::{Error, Result};
use crate::range::SEQUENCE_SEPARATOR;
use crate::range_set::RangeSet;
use crate::rules::{PluralRules, RuleKind, SampleKind, OTHER};
use crate::sample::{Magnitude, NumericSample};
use std::collections::{BTreeMap, HashSet};

/// Marker appended to categories that are not bounded
pub const ELLIPSIS: &str = "…";

/// The one value some Celtic `many` rules reach inside the probe domain
///
/// `n % 1000000 = 0` is formally open-ended, yet the probe sweeps only ever
/// produce `1000000` (and its trailing-zero variants) for it. When that is
/// the only value a `many` category saw, the category is still unbounded.
pub const CELTIC_MANY_MARKER: Magnitude = Magnitude::integer(1_000_000);

/// Every sample one category received for one numeric kind
#[derive(Debug, Clone)]
pub struct CategorySample {
    kind: SampleKind,
    sample_limit: usize,
    unbounded_limit: usize,
    max_exponent_samples: usize,
    count: usize,
    ranges: RangeSet,
    exponent_samples: Vec<NumericSample>,
    digit_exemplars: BTreeMap<usize, NumericSample>,
    distinct_seen: HashSet<Magnitude>,
    distinct_values: Vec<NumericSample>,
    bounded: Option<bool>,
}

impl CategorySample {
    /// Create an empty accumulator
    pub fn new(kind: SampleKind, config: &GeneratorConfig) -> Self {
        Self {
            kind,
            sample_limit: config.sample_limit(),
            unbounded_limit: config.unbounded_limit(),
            max_exponent_samples: config.max_exponent_samples(),
            count: 0,
            ranges: RangeSet::new(),
            exponent_samples: Vec::new(),
            digit_exemplars: BTreeMap::new(),
            distinct_seen: HashSet::new(),
            distinct_values: Vec::new(),
            bounded: None,
        }
    }

    /// Numeric kind this accumulator samples
    pub fn kind(&self) -> SampleKind {
        self.kind
    }

    /// Non-exponent samples added so far
    pub fn count(&self) -> usize {
        self.count
    }

    /// Ranges collected so far
    pub fn ranges(&self) -> &RangeSet {
        &self.ranges
    }

    /// Distinct exponent samples, in first-seen order
    pub fn exponent_samples(&self) -> &[NumericSample] {
        &self.exponent_samples
    }

    /// Distinct values tracked for the boundedness check (empty after freeze)
    pub fn distinct_values(&self) -> &[NumericSample] {
        &self.distinct_values
    }

    /// First sample seen per integer-part digit length
    pub fn digit_exemplars(&self) -> impl Iterator<Item = (usize, &NumericSample)> {
        self.digit_exemplars.iter().map(|(digits, sample)| (*digits, sample))
    }

    /// True when nothing was added
    pub fn is_empty(&self) -> bool {
        self.count == 0 && self.exponent_samples.is_empty()
    }

    /// Verdict, available once frozen
    pub fn is_bounded(&self) -> Option<bool> {
        self.bounded
    }

    /// True once [`CategorySample::freeze`] ran
    pub fn is_frozen(&self) -> bool {
        self.bounded.is_some()
    }

    /// Record one sample
    pub fn add(&mut self, sample: NumericSample) -> Result<()> {
        if self.is_frozen() {
            return Err(Error::Frozen {
                sample: sample.to_string(),
            });
        }
        if sample.has_exponent() {
            if !self.exponent_samples.contains(&sample) {
                self.exponent_samples.push(sample);
            }
            return Ok(());
        }

        self.count += 1;
        if self.ranges.size() < self.sample_limit * 2 {
            self.ranges.insert(sample)?;
        }
        if self.distinct_values.len() < self.unbounded_limit * 2
            && self.distinct_seen.insert(sample.magnitude())
        {
            self.distinct_values.push(sample);
        }
        self.digit_exemplars
            .entry(sample.integer_digit_count())
            .or_insert(sample);
        Ok(())
    }

    /// Distinct values plus exponent samples
    fn observed_distinct_count(&self) -> usize {
        self.distinct_values.len() + self.exponent_samples.len()
    }

    /// Decide boundedness, then release memory no longer needed
    ///
    /// Must be called exactly once, after the last [`CategorySample::add`].
    pub fn freeze(
        &mut self,
        keyword: &str,
        rules: &dyn PluralRules,
        diagnostics: &mut Diagnostics,
    ) -> Result<bool> {
        if let Some(bounded) = self.bounded {
            return Ok(bounded);
        }
        let bounded = self.compute_bounded(keyword, rules, diagnostics)?;
        log::debug!(
            "{} {}: {} distinct, bounded={}",
            keyword,
            self.kind,
            self.observed_distinct_count(),
            bounded
        );

        self.bounded = Some(bounded);
        self.distinct_seen = HashSet::new();
        self.distinct_values = Vec::new();
        if !bounded {
            self.ranges.trim(self.sample_limit);
        }
        Ok(bounded)
    }

    fn compute_bounded(
        &self,
        keyword: &str,
        rules: &dyn PluralRules,
        diagnostics: &mut Diagnostics,
    ) -> Result<bool> {
        if keyword == OTHER {
            // nothing beyond exemplar-free emptiness can be said about the catch-all
            return Ok(self.distinct_values.is_empty());
        }

        let from_rule = rules.is_limited(keyword, self.kind);
        let observed = self.observed_distinct_count();
        let bounded = if observed < self.unbounded_limit {
            !(keyword == "many" && observed == 1 && self.saw_only_celtic_marker())
        } else {
            from_rule
        };

        if bounded != from_rule {
            diagnostics.report(Severity::Error, self.mismatch_message(keyword, rules))?;
        }
        Ok(bounded)
    }

    fn saw_only_celtic_marker(&self) -> bool {
        self.distinct_seen.contains(&CELTIC_MANY_MARKER)
    }

    fn mismatch_message(&self, keyword: &str, rules: &dyn PluralRules) -> String {
        let values = self
            .distinct_values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(SEQUENCE_SEPARATOR);
        format!(
            "{} computation from rule ≠ from items; keyword: {}; count: [{}]; rule:\n\t{}",
            self.kind,
            keyword,
            values,
            rules.description().replace(';', ";\n\t")
        )
    }

    /// Compact sample string, e.g. `0, 2~15, 100, 1000, …`
    pub fn render(&self) -> Result<String> {
        let mut ranges = self.ranges.clone();
        for exemplar in self.digit_exemplars.values() {
            ranges.insert(*exemplar)?;
        }

        let mut parts: Vec<String> = Vec::new();
        if !ranges.is_empty() {
            parts.push(ranges.to_string());
        }
        parts.extend(
            self.exponent_samples
                .iter()
                .take(self.max_exponent_samples)
                .map(NumericSample::to_exponent_string),
        );
        if self.bounded == Some(false) {
            parts.push(ELLIPSIS.to_string());
        }
        Ok(parts.join(SEQUENCE_SEPARATOR))
    }
}

/// The integer and decimal samples of one keyword
#[derive(Debug, Clone)]
pub struct CategorySamplePair {
    keyword: String,
    integers: CategorySample,
    decimals: Option<CategorySample>,
    frozen: bool,
}

impl CategorySamplePair {
    /// Create the pair for `keyword`, which must be declared by `rules`
    ///
    /// Ordinal rules get no decimal samples.
    pub fn new(keyword: &str, rules: &dyn PluralRules, config: &GeneratorConfig) -> Result<Self> {
        let declared = rules.keywords();
        if !declared.contains(&keyword) {
            return Err(Error::UnknownKeyword {
                keyword: keyword.to_string(),
                declared: declared.join(", "),
            });
        }
        let decimals = match rules.kind() {
            RuleKind::Cardinal => Some(CategorySample::new(SampleKind::Decimal, config)),
            RuleKind::Ordinal => None,
        };
        Ok(Self {
            keyword: keyword.to_string(),
            integers: CategorySample::new(SampleKind::Integer, config),
            decimals,
            frozen: false,
        })
    }

    /// Category keyword
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Integer samples
    pub fn integers(&self) -> &CategorySample {
        &self.integers
    }

    /// Decimal samples, absent for ordinal rules
    pub fn decimals(&self) -> Option<&CategorySample> {
        self.decimals.as_ref()
    }

    /// Route a sample by its visible fraction digits
    pub fn add(&mut self, sample: NumericSample) -> Result<()> {
        if self.frozen {
            return Err(Error::Frozen {
                sample: sample.to_string(),
            });
        }
        match SampleKind::of(&sample) {
            SampleKind::Integer => self.integers.add(sample),
            SampleKind::Decimal => match self.decimals.as_mut() {
                Some(decimals) => decimals.add(sample),
                None => {
                    log::trace!("ordinal rule ignores decimal {sample}");
                    Ok(())
                }
            },
        }
    }

    /// Freeze both kinds
    pub fn freeze(&mut self, rules: &dyn PluralRules, diagnostics: &mut Diagnostics) -> Result<()> {
        self.integers.freeze(&self.keyword, rules, diagnostics)?;
        if let Some(decimals) = self.decimals.as_mut() {
            decimals.freeze(&self.keyword, rules, diagnostics)?;
        }
        self.frozen = true;
        Ok(())
    }

    /// True once frozen
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Rendered integer samples, empty when none were seen
    pub fn render_integers(&self) -> Result<String> {
        self.integers.render()
    }

    /// Rendered decimal samples, `None` for ordinal rules or when empty
    pub fn render_decimals(&self) -> Result<Option<String>> {
        match &self.decimals {
            Some(decimals) => {
                let rendered = decimals.render()?;
                Ok((!rendered.is_empty()).then_some(rendered))
            }
            None => Ok(None),
        }
    }

    /// `@integer … @decimal …` annotation as appended to a rule
    pub fn annotation(&self) -> Result<String> {
        let mut parts = Vec::new();
        let integers = self.render_integers()?;
        if !integers.is_empty() {
            parts.push(format!("@integer {integers}"));
        }
        if let Some(decimals) = self.render_decimals()? {
            parts.push(format!("@decimal {decimals}"));
        }
        Ok(parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::builtin::family_for_locale;

    fn sample(literal: &str) -> NumericSample {
        literal.parse().unwrap()
    }

    fn english() -> &'static dyn PluralRules {
        family_for_locale(RuleKind::Cardinal, "en").unwrap()
    }

    fn breton() -> &'static dyn PluralRules {
        family_for_locale(RuleKind::Cardinal, "br").unwrap()
    }

    /// `few` for every value, limited or not as configured
    struct FixedLimit(bool);

    impl PluralRules for FixedLimit {
        fn kind(&self) -> RuleKind {
            RuleKind::Cardinal
        }

        fn keywords(&self) -> Vec<&str> {
            vec!["few", OTHER]
        }

        fn select(&self, _sample: &NumericSample) -> &str {
            "few"
        }

        fn is_limited(&self, keyword: &str, _kind: SampleKind) -> bool {
            keyword != OTHER && self.0
        }

        fn rule_text(&self, keyword: &str) -> Option<&str> {
            (keyword == "few").then_some("n = 0..99")
        }
    }

    fn integers_up_to(end: i64) -> CategorySample {
        let mut category = CategorySample::new(SampleKind::Integer, &GeneratorConfig::default());
        for value in 0..end {
            category.add(NumericSample::integer(value).unwrap()).unwrap();
        }
        category
    }

    #[test]
    fn test_add_routes_exponents_separately() {
        let mut category = CategorySample::new(SampleKind::Integer, &GeneratorConfig::default());
        category.add(sample("1c6")).unwrap();
        category.add(sample("1c6")).unwrap();
        category.add(sample("5")).unwrap();
        assert_eq!(category.count(), 1);
        assert_eq!(category.exponent_samples().len(), 1);
        assert_eq!(category.distinct_values().len(), 1);
    }

    #[test]
    fn test_range_collection_stops_at_twice_the_limit() {
        let mut category = CategorySample::new(SampleKind::Integer, &GeneratorConfig::default());
        for value in (0..40).step_by(2) {
            category.add(NumericSample::integer(value).unwrap()).unwrap();
        }
        assert_eq!(category.ranges().size(), 16);
        assert_eq!(category.count(), 20);
    }

    #[test]
    fn test_distinct_values_ignore_trailing_zeros() {
        let mut category = CategorySample::new(SampleKind::Decimal, &GeneratorConfig::default());
        for literal in ["1.0", "1.00", "1.000"] {
            category.add(sample(literal)).unwrap();
        }
        assert_eq!(category.distinct_values().len(), 1);
        assert_eq!(category.ranges().range_count(), 3);
    }

    #[test]
    fn test_digit_exemplars_keep_first_seen() {
        let mut category = CategorySample::new(SampleKind::Integer, &GeneratorConfig::default());
        for literal in ["7", "3", "42", "10", "1000"] {
            category.add(sample(literal)).unwrap();
        }
        let exemplars: Vec<(usize, String)> = category
            .digit_exemplars()
            .map(|(digits, s)| (digits, s.to_string()))
            .collect();
        assert_eq!(
            exemplars,
            vec![(1, "7".into()), (2, "42".into()), (4, "1000".into())]
        );
    }

    #[test]
    fn test_other_with_nothing_is_bounded() {
        let mut category = CategorySample::new(SampleKind::Integer, &GeneratorConfig::default());
        let mut diagnostics = Diagnostics::default();
        assert!(category.freeze("other", english(), &mut diagnostics).unwrap());
        assert_eq!(category.render().unwrap(), "");
    }

    #[test]
    fn test_other_with_values_is_unbounded() {
        let mut category = CategorySample::new(SampleKind::Integer, &GeneratorConfig::default());
        category.add(sample("0")).unwrap();
        let mut diagnostics = Diagnostics::default();
        assert!(!category.freeze("other", english(), &mut diagnostics).unwrap());
        assert_eq!(category.render().unwrap(), "0, …");
    }

    #[test]
    fn test_single_value_is_bounded_when_rule_agrees() {
        let mut category = CategorySample::new(SampleKind::Integer, &GeneratorConfig::default());
        category.add(sample("1")).unwrap();
        let mut diagnostics = Diagnostics::default();
        assert!(category.freeze("one", english(), &mut diagnostics).unwrap());
        assert_eq!(category.render().unwrap(), "1");
        assert!(category.distinct_values().is_empty());
    }

    #[test]
    fn test_celtic_marker_stays_unbounded() {
        let mut category = CategorySample::new(SampleKind::Decimal, &GeneratorConfig::default());
        for literal in ["1000000.0", "1000000.00", "1000000.000", "1000000.0000"] {
            category.add(sample(literal)).unwrap();
        }
        let mut diagnostics = Diagnostics::default();
        assert!(!category.freeze("many", breton(), &mut diagnostics).unwrap());
        assert_eq!(
            category.render().unwrap(),
            "1000000.0, 1000000.00, 1000000.000, 1000000.0000, …"
        );
    }

    #[test]
    fn test_mismatch_escalates() {
        // `one` is unlimited in Breton, but only one value was observed
        let mut category = CategorySample::new(SampleKind::Integer, &GeneratorConfig::default());
        category.add(sample("1")).unwrap();
        let mut diagnostics = Diagnostics::default();
        let result = category.freeze("one", breton(), &mut diagnostics);
        match result {
            Err(Error::BoundsMismatch(message)) => {
                assert!(message.starts_with("integer computation from rule ≠ from items"));
                assert!(message.contains("keyword: one; count: [1]"));
                assert!(message.contains("rule:\n\tone: n % 10 = 1"));
            }
            other => panic!("expected mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_mismatch_recorded_when_demoted() {
        let mut category = CategorySample::new(SampleKind::Integer, &GeneratorConfig::default());
        category.add(sample("1")).unwrap();
        let mut diagnostics = Diagnostics::new(false);
        assert!(category.freeze("one", breton(), &mut diagnostics).unwrap());
        assert_eq!(diagnostics.error_count(), 1);
    }

    #[test]
    fn test_below_unbounded_limit_observation_wins() {
        let mut category = integers_up_to(19);
        let mut diagnostics = Diagnostics::default();
        let result = category.freeze("few", &FixedLimit(false), &mut diagnostics);
        assert!(matches!(result, Err(Error::BoundsMismatch(_))));

        let mut category = integers_up_to(19);
        let mut diagnostics = Diagnostics::default();
        assert!(category
            .freeze("few", &FixedLimit(true), &mut diagnostics)
            .unwrap());
        assert_eq!(diagnostics.error_count(), 0);
    }

    #[test]
    fn test_at_unbounded_limit_rule_decides_limited() {
        for end in [20, 45] {
            let mut category = integers_up_to(end);
            let mut diagnostics = Diagnostics::default();
            assert!(category
                .freeze("few", &FixedLimit(true), &mut diagnostics)
                .unwrap());
            assert_eq!(diagnostics.error_count(), 0);
            assert_eq!(category.render().unwrap(), "0~15");
        }
    }

    #[test]
    fn test_at_unbounded_limit_rule_decides_unlimited() {
        let mut category = integers_up_to(20);
        let mut diagnostics = Diagnostics::default();
        assert!(!category
            .freeze("few", &FixedLimit(false), &mut diagnostics)
            .unwrap());
        assert_eq!(diagnostics.error_count(), 0);
        let rendered = category.render().unwrap();
        assert!(rendered.ends_with(ELLIPSIS), "{rendered}");
        assert_eq!(rendered, "0~15, …");
    }

    #[test]
    fn test_add_after_freeze_fails() {
        let mut category = CategorySample::new(SampleKind::Integer, &GeneratorConfig::default());
        let mut diagnostics = Diagnostics::default();
        category.freeze("other", english(), &mut diagnostics).unwrap();
        assert!(matches!(
            category.add(sample("3")),
            Err(Error::Frozen { .. })
        ));
    }

    #[test]
    fn test_render_caps_exponent_samples() {
        let mut category = CategorySample::new(SampleKind::Integer, &GeneratorConfig::default());
        for m in 1..=8 {
            category.add(sample(&format!("{m}c6"))).unwrap();
        }
        let mut diagnostics = Diagnostics::default();
        category.freeze("other", english(), &mut diagnostics).unwrap();
        // no plain values, so `other` counts as bounded
        assert_eq!(category.render().unwrap(), "1c6, 2c6, 3c6, 4c6, 5c6");
    }

    #[test]
    fn test_pair_rejects_undeclared_keyword() {
        let result = CategorySamplePair::new("few", english(), &GeneratorConfig::default());
        assert!(matches!(result, Err(Error::UnknownKeyword { .. })));
    }

    #[test]
    fn test_pair_annotation() {
        let config = GeneratorConfig::default();
        let mut pair = CategorySamplePair::new("one", english(), &config).unwrap();
        pair.add(sample("1")).unwrap();
        let mut diagnostics = Diagnostics::default();
        pair.freeze(english(), &mut diagnostics).unwrap();
        assert_eq!(pair.annotation().unwrap(), "@integer 1");
        assert!(matches!(pair.add(sample("1")), Err(Error::Frozen { .. })));
    }

    #[test]
    fn test_ordinal_pair_has_no_decimals() {
        let rules = family_for_locale(RuleKind::Ordinal, "en").unwrap();
        let pair = CategorySamplePair::new("one", rules, &GeneratorConfig::default()).unwrap();
        assert!(pair.decimals().is_none());
    }
}
