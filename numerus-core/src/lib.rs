//! Representative samples for plural categories
//!
//! This crate probes a plural rule with a fixed battery of quantities,
//! groups the results by the category each quantity selects, and renders
//! every category as a compact sample string such as `0, 2~16, 100, …`.
//! A trailing ellipsis marks categories whose value set is open-ended.
//!
//! # Architecture
//!
//! - **Values**: [`NumericSample`], [`Range`] and [`RangeSet`] hold exact
//!   decimal quantities and merge them into contiguous runs per number of
//!   visible fraction digits
//! - **Categories**: [`CategorySample`] and [`CategorySamplePair`] accumulate
//!   the samples of one keyword and decide whether the keyword is bounded
//! - **Orchestration**: [`SampleCollector`] drives the probes for one rule and
//!   [`ReportGenerator`] turns groups of rules into reports
//!
//! Rule evaluation lives behind the [`PluralRules`] trait; a small set of
//! built-in families is provided in [`rules::builtin`].
//!
//! # Example
//!
//! ```rust
//! use numerus_core::{Diagnostics, GeneratorConfig, SampleCollector};
//! use numerus_core::rules::{builtin, RuleKind};
//!
//! let english = builtin::family_for_locale(RuleKind::Cardinal, "en").unwrap();
//! let mut diagnostics = Diagnostics::default();
//! let collector = SampleCollector::collect(
//!     english,
//!     english.locales,
//!     &GeneratorConfig::default(),
//!     &mut diagnostics,
//! )
//! .unwrap();
//!
//! let one = collector.pair("one").unwrap();
//! assert_eq!(one.annotation().unwrap(), "@integer 1");
//! ```

pub mod category;
pub mod collector;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod range;
pub mod range_set;
pub mod report;
pub mod rules;
pub mod sample;

pub use category::{CategorySample, CategorySamplePair, CELTIC_MANY_MARKER, ELLIPSIS};
pub use collector::SampleCollector;
pub use config::{GeneratorConfig, GeneratorConfigBuilder};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{Error, Result};
pub use range::{Range, RangeStatus, RANGE_SEPARATOR, SEQUENCE_SEPARATOR};
pub use range_set::RangeSet;
pub use report::{
    builtin_groups, CategoryReport, FamilyReport, Failure, GenerationReport, LocaleGroup,
    ReportGenerator,
};
pub use rules::{PluralRules, RuleKind, SampleKind};
pub use sample::{Magnitude, NumericSample, PluralOperands};
