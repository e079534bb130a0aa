//! Rendered results for groups of locales sharing a rule
//!
//! [`ReportGenerator`] runs one [`SampleCollector`] per [`LocaleGroup`],
//! turns every declared keyword into a [`CategoryReport`], and counts the
//! failures a data maintainer has to look at: declared keywords that no
//! probe selected, and distinct rules that produced identical samples.

use crate::collector::SampleCollector;
use crate::config::GeneratorConfig;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::Result;
use crate::rules::{builtin, PluralRules, RuleFamily, RuleKind};
use serde::Serialize;
use std::collections::BTreeMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A rule together with the locales that use it
#[derive(Clone)]
pub struct LocaleGroup<'a> {
    /// The shared rule
    pub rules: &'a dyn PluralRules,
    /// Locales using the rule, representative first
    pub locales: Vec<&'a str>,
}

impl<'a> LocaleGroup<'a> {
    /// Pair a rule with its locales
    pub fn new(rules: &'a dyn PluralRules, locales: &[&'a str]) -> Self {
        Self {
            rules,
            locales: locales.to_vec(),
        }
    }

    /// First listed locale
    pub fn representative(&self) -> &'a str {
        self.locales.first().copied().unwrap_or("root")
    }
}

impl<'a> From<&'a RuleFamily> for LocaleGroup<'a> {
    fn from(family: &'a RuleFamily) -> Self {
        Self::new(family, family.locales)
    }
}

impl std::fmt::Debug for LocaleGroup<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleGroup")
            .field("kind", &self.rules.kind())
            .field("locales", &self.locales)
            .finish()
    }
}

/// Built-in groups of `kind`, each restricted to the locales accepted by `filter`
///
/// Families without an accepted locale are left out. The restricted list is
/// what the collector sees, so it also decides whether exponent probes run.
pub fn builtin_groups<F>(kind: RuleKind, filter: F) -> Vec<LocaleGroup<'static>>
where
    F: Fn(&str) -> bool,
{
    builtin::families(kind)
        .filter_map(|family| {
            let locales: Vec<&'static str> = family
                .locales
                .iter()
                .copied()
                .filter(|locale| filter(locale))
                .collect();
            (!locales.is_empty()).then_some(LocaleGroup {
                rules: family,
                locales,
            })
        })
        .collect()
}

/// Samples of one keyword
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryReport {
    /// Category keyword
    pub keyword: String,
    /// Condition text, absent for the catch-all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    /// Rendered integer samples
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integer: Option<String>,
    /// Rendered decimal samples
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimal: Option<String>,
    /// Whether the integer samples are finite
    pub integer_bounded: bool,
    /// Whether the decimal samples are finite, absent for ordinal rules
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimal_bounded: Option<bool>,
}

impl CategoryReport {
    /// `@integer … @decimal …` as appended to the rule text
    pub fn annotation(&self) -> String {
        let mut parts = Vec::new();
        if let Some(integer) = &self.integer {
            parts.push(format!("@integer {integer}"));
        }
        if let Some(decimal) = &self.decimal {
            parts.push(format!("@decimal {decimal}"));
        }
        parts.join(" ")
    }

    /// Samples without the rule text, used to spot identical results
    fn signature(&self) -> (&str, Option<&str>, Option<&str>) {
        (
            self.keyword.as_str(),
            self.integer.as_deref(),
            self.decimal.as_deref(),
        )
    }
}

/// Samples of every keyword of one rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FamilyReport {
    /// Cardinal or ordinal
    pub kind: RuleKind,
    /// Locales using the rule
    pub locales: Vec<String>,
    /// One entry per keyword that received samples, in declaration order
    pub categories: Vec<CategoryReport>,
}

impl FamilyReport {
    /// First listed locale
    pub fn representative(&self) -> &str {
        self.locales.first().map(String::as_str).unwrap_or("root")
    }

    /// Report of `keyword`
    pub fn category(&self, keyword: &str) -> Option<&CategoryReport> {
        self.categories
            .iter()
            .find(|category| category.keyword == keyword)
    }
}

/// Why a group needs attention
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Failure {
    /// A declared keyword was never selected by any probe
    MissingCategoryData {
        /// Rule kind
        kind: RuleKind,
        /// Locales of the rule
        locales: Vec<String>,
        /// The keyword without data
        keyword: String,
    },
    /// Distinct rules produced identical samples
    DuplicateResults {
        /// Rule kind
        kind: RuleKind,
        /// Locale lists of the rules involved
        groups: Vec<Vec<String>>,
    },
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Failure::MissingCategoryData {
                kind,
                locales,
                keyword,
            } => write!(
                f,
                "missing category data: {} [{}] {}",
                kind,
                locales.join(", "),
                keyword
            ),
            Failure::DuplicateResults { kind, groups } => {
                let groups = groups
                    .iter()
                    .map(|locales| format!("[{}]", locales.join(", ")))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "Duplicate results {kind}: {groups}")
            }
        }
    }
}

/// Everything produced by one run
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationReport {
    /// Family reports in input order
    pub families: Vec<FamilyReport>,
    /// Failures in detection order
    pub failures: Vec<Failure>,
    /// Diagnostics that were recorded rather than raised
    #[serde(skip)]
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerationReport {
    /// Number of failures
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// True when nothing needs attention
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.diagnostics.is_empty()
    }

    /// Append another run, e.g. the ordinal pass after the cardinal one
    pub fn extend(&mut self, other: GenerationReport) {
        self.families.extend(other.families);
        self.failures.extend(other.failures);
        self.diagnostics.extend(other.diagnostics);
        self.diagnostics.sort();
        self.diagnostics.dedup();
    }
}

/// Produces [`GenerationReport`]s from locale groups
#[derive(Debug, Clone, Default)]
pub struct ReportGenerator {
    config: GeneratorConfig,
    parallel: bool,
    thread_count: Option<usize>,
}

impl ReportGenerator {
    /// Create a sequential generator
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            parallel: false,
            thread_count: None,
        }
    }

    /// Generate groups concurrently; ignored without the `parallel` feature
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Worker threads for parallel generation, `None` for the rayon default
    pub fn thread_count(mut self, threads: Option<usize>) -> Self {
        self.thread_count = threads;
        self
    }

    /// Configuration used for every group
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate every group, then look for identical results per kind
    ///
    /// With escalation on, the first rule/observation mismatch aborts the run.
    pub fn generate(&self, groups: &[LocaleGroup<'_>]) -> Result<GenerationReport> {
        self.config.validate()?;
        log::info!("generating samples for {} rule groups", groups.len());

        let outcomes = self.generate_groups(groups)?;

        let mut report = GenerationReport::default();
        let mut diagnostics = Diagnostics::new(self.config.escalate_mismatches());
        for (family, family_diagnostics, failures) in outcomes {
            report.families.push(family);
            report.failures.extend(failures);
            diagnostics.absorb(family_diagnostics);
        }
        report.failures.extend(find_duplicates(&report.families));
        report.diagnostics = diagnostics.drain();

        for failure in &report.failures {
            log::error!("{failure}");
        }
        Ok(report)
    }

    #[cfg(feature = "parallel")]
    fn generate_groups(&self, groups: &[LocaleGroup<'_>]) -> Result<Vec<GroupOutcome>> {
        if !self.parallel || groups.len() < 2 {
            return self.generate_sequential(groups);
        }

        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(threads) = self.thread_count {
            builder = builder.num_threads(threads);
        }
        let pool = builder
            .build()
            .map_err(|e| crate::error::Error::Configuration(format!("thread pool: {e}")))?;

        pool.install(|| {
            groups
                .par_iter()
                .map(|group| generate_group(group, &self.config))
                .collect::<Result<Vec<_>>>()
        })
    }

    #[cfg(not(feature = "parallel"))]
    fn generate_groups(&self, groups: &[LocaleGroup<'_>]) -> Result<Vec<GroupOutcome>> {
        if self.parallel {
            log::debug!("parallel feature disabled, generating sequentially");
        }
        self.generate_sequential(groups)
    }

    fn generate_sequential(&self, groups: &[LocaleGroup<'_>]) -> Result<Vec<GroupOutcome>> {
        groups
            .iter()
            .map(|group| generate_group(group, &self.config))
            .collect()
    }
}

type GroupOutcome = (FamilyReport, Diagnostics, Vec<Failure>);

fn generate_group(group: &LocaleGroup<'_>, config: &GeneratorConfig) -> Result<GroupOutcome> {
    let rules = group.rules;
    let kind = rules.kind();
    log::debug!("{} {:?}", kind, group.locales);

    let mut diagnostics = Diagnostics::new(config.escalate_mismatches());
    let collector = SampleCollector::collect(rules, &group.locales, config, &mut diagnostics)?;
    let locales: Vec<String> = group.locales.iter().map(|l| l.to_string()).collect();

    let mut categories = Vec::new();
    let mut failures = Vec::new();
    for keyword in rules.keywords() {
        let Some(pair) = collector.pair(keyword) else {
            failures.push(Failure::MissingCategoryData {
                kind,
                locales: locales.clone(),
                keyword: keyword.to_string(),
            });
            continue;
        };

        let integer = pair.render_integers()?;
        categories.push(CategoryReport {
            keyword: keyword.to_string(),
            rule: rules.rule_text(keyword).map(str::to_string),
            integer: (!integer.is_empty()).then_some(integer),
            decimal: pair.render_decimals()?,
            integer_bounded: pair.integers().is_bounded().unwrap_or(true),
            decimal_bounded: pair.decimals().and_then(|d| d.is_bounded()),
        });
    }

    Ok((
        FamilyReport {
            kind,
            locales,
            categories,
        },
        diagnostics,
        failures,
    ))
}

fn find_duplicates(families: &[FamilyReport]) -> Vec<Failure> {
    type Signature<'a> = (RuleKind, Vec<(&'a str, Option<&'a str>, Option<&'a str>)>);

    let mut seen: BTreeMap<Signature<'_>, Vec<Vec<String>>> = BTreeMap::new();
    let mut order = Vec::new();
    for family in families {
        let signature = (
            family.kind,
            family
                .categories
                .iter()
                .map(CategoryReport::signature)
                .collect::<Vec<_>>(),
        );
        let groups = seen.entry(signature.clone()).or_default();
        if groups.is_empty() {
            order.push(signature);
        }
        groups.push(family.locales.clone());
    }

    order
        .into_iter()
        .filter_map(|signature| {
            let kind = signature.0;
            seen.remove(&signature)
                .filter(|groups| groups.len() > 1)
                .map(|groups| Failure::DuplicateResults { kind, groups })
        })
        .collect()
}
