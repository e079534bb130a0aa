//! Probe-domain enumeration for one rule

use crate::category::CategorySamplePair;
use crate::config::GeneratorConfig;
use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result};
use crate::rules::{PluralRules, RuleKind};
use crate::sample::NumericSample;
use std::collections::BTreeMap;

/// Languages whose `many` rule depends on the exponent operand
pub const SPECIAL_MANY: [&str; 4] = ["fr", "pt", "it", "es"];

/// Largest raw value reached by the power-of-ten sweeps
const POWERS_END: u64 = 1_000_000;

/// Exclusive upper bound of the exponent probe mantissas
const EXPONENT_PROBE_STEPS: u32 = 15;

/// Suffixes appended to each probe mantissa
const EXPONENT_FORMS: [&str; 9] = [
    "c3",
    "c6",
    "c9",
    ".1c3",
    ".1c6",
    ".1c9",
    ".0001c3",
    ".0000001c6",
    ".0000000001c9",
];

/// One precision of the probe battery
#[derive(Debug, Clone, Copy)]
struct Sweep {
    /// Fraction digits of every sample
    fraction_digits: u8,
    /// Exclusive bound of the dense sweep, before scaling
    limit: u64,
}

/// Plain integers, then 1 to 4 fraction digits for cardinal rules
const SWEEPS: [Sweep; 5] = [
    Sweep {
        fraction_digits: 0,
        limit: 10_000,
    },
    Sweep {
        fraction_digits: 1,
        limit: 10_000,
    },
    Sweep {
        fraction_digits: 2,
        limit: 1_000,
    },
    Sweep {
        fraction_digits: 3,
        limit: 100,
    },
    Sweep {
        fraction_digits: 4,
        limit: 10,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Collecting,
    Frozen,
}

/// Collects and classifies the samples of one rule
///
/// Built and frozen by [`SampleCollector::collect`]; the manual
/// [`SampleCollector::new`]/[`SampleCollector::add`]/[`SampleCollector::freeze`]
/// path exists for custom probe sets.
pub struct SampleCollector<'r> {
    rules: &'r dyn PluralRules,
    config: GeneratorConfig,
    phase: Phase,
    pairs: BTreeMap<String, CategorySamplePair>,
}

impl<'r> SampleCollector<'r> {
    /// Create an empty collector in the collecting phase
    pub fn new(rules: &'r dyn PluralRules, config: GeneratorConfig) -> Self {
        Self {
            rules,
            config,
            phase: Phase::Collecting,
            pairs: BTreeMap::new(),
        }
    }

    /// Run the whole probe battery for `rules` and freeze the result
    ///
    /// `locales` decides whether the exponent probes run.
    pub fn collect<S: AsRef<str>>(
        rules: &'r dyn PluralRules,
        locales: &[S],
        config: &GeneratorConfig,
        diagnostics: &mut Diagnostics,
    ) -> Result<Self> {
        config.validate()?;
        let mut collector = Self::new(rules, config.clone());
        let sweeps = match rules.kind() {
            RuleKind::Cardinal => &SWEEPS[..],
            RuleKind::Ordinal => &SWEEPS[..1],
        };

        for sweep in sweeps {
            collector.collect_dense(0, sweep.limit, sweep.fraction_digits)?;
            collector.collect_powers_of_ten(sweep.limit, POWERS_END, sweep.fraction_digits)?;
        }

        if rules.kind() == RuleKind::Cardinal && needs_exponent_probes(locales) {
            collector.collect_exponent_probes()?;
        }

        collector.freeze(diagnostics)?;
        Ok(collector)
    }

    /// Every scaled value in `start..limit × 10^fraction_digits`
    fn collect_dense(&mut self, start: u64, limit: u64, fraction_digits: u8) -> Result<()> {
        let scaled_limit = scale_up(limit, fraction_digits)?;
        log::trace!(
            "dense sweep {}..{} at {} fraction digits",
            start,
            scaled_limit,
            fraction_digits
        );
        for scaled in start..scaled_limit {
            self.add(scaled_sample(scaled, fraction_digits)?)?;
        }
        Ok(())
    }

    /// `start`, `10 × start`, ... while not above `end × 10^fraction_digits`
    fn collect_powers_of_ten(&mut self, start: u64, end: u64, fraction_digits: u8) -> Result<()> {
        let scaled_end = scale_up(end, fraction_digits)?;
        let mut scaled = start;
        while scaled <= scaled_end {
            self.add(scaled_sample(scaled, fraction_digits)?)?;
            match scaled.checked_mul(10) {
                Some(next) => scaled = next,
                None => break,
            }
        }
        Ok(())
    }

    fn collect_exponent_probes(&mut self) -> Result<()> {
        log::debug!("adding exponent probes for {}", self.rules.description());
        for mantissa in 1..EXPONENT_PROBE_STEPS {
            for form in EXPONENT_FORMS {
                let sample: NumericSample = format!("{mantissa}{form}").parse()?;
                self.add(sample)?;
            }
        }
        Ok(())
    }

    /// Classify one sample and route it to its keyword's pair
    pub fn add(&mut self, sample: NumericSample) -> Result<()> {
        if self.phase == Phase::Frozen {
            return Err(Error::Frozen {
                sample: sample.to_string(),
            });
        }
        let rules = self.rules;
        let keyword = rules.select(&sample);
        let pair = match self.pairs.get_mut(keyword) {
            Some(pair) => pair,
            None => {
                let pair = CategorySamplePair::new(keyword, rules, &self.config)?;
                self.pairs.entry(keyword.to_string()).or_insert(pair)
            }
        };
        pair.add(sample)
    }

    /// Freeze every pair; idempotent
    pub fn freeze(&mut self, diagnostics: &mut Diagnostics) -> Result<()> {
        if self.phase == Phase::Frozen {
            return Ok(());
        }
        for pair in self.pairs.values_mut() {
            pair.freeze(self.rules, diagnostics)?;
        }
        self.phase = Phase::Frozen;
        Ok(())
    }

    /// True once frozen
    pub fn is_frozen(&self) -> bool {
        self.phase == Phase::Frozen
    }

    /// Rule being sampled
    pub fn rules(&self) -> &'r dyn PluralRules {
        self.rules
    }

    /// Pair for `keyword`, `None` when no sample selected it
    pub fn pair(&self, keyword: &str) -> Option<&CategorySamplePair> {
        self.pairs.get(keyword)
    }

    /// Keywords that received samples, sorted
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.pairs.keys().map(String::as_str)
    }

    /// All pairs, sorted by keyword
    pub fn pairs(&self) -> impl Iterator<Item = &CategorySamplePair> {
        self.pairs.values()
    }
}

/// Whether any locale belongs to [`SPECIAL_MANY`]
pub fn needs_exponent_probes<S: AsRef<str>>(locales: &[S]) -> bool {
    locales
        .iter()
        .any(|locale| SPECIAL_MANY.contains(&locale.as_ref()))
}

fn scale_up(value: u64, fraction_digits: u8) -> Result<u64> {
    10u64
        .checked_pow(u32::from(fraction_digits))
        .and_then(|factor| value.checked_mul(factor))
        .ok_or_else(|| Error::FractionDigitsOverflow {
            digits: fraction_digits,
            max: crate::range_set::MAX_FRACTION_DIGITS,
        })
}

fn scaled_sample(scaled: u64, fraction_digits: u8) -> Result<NumericSample> {
    let scaled = i64::try_from(scaled).map_err(|_| Error::InvalidLiteral {
        literal: scaled.to_string(),
        reason: "out of range".into(),
    })?;
    NumericSample::from_scaled(scaled, fraction_digits)
}
