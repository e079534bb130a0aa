//! Output formatting module

use anyhow::Result;
use numerus_core::FamilyReport;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output the samples of one rule family
    fn format_family(&mut self, family: &FamilyReport) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

#[cfg(test)]
pub(crate) mod fixtures {
    use numerus_core::{CategoryReport, FamilyReport, RuleKind};

    /// A small cardinal family shaped like English
    pub fn english() -> FamilyReport {
        FamilyReport {
            kind: RuleKind::Cardinal,
            locales: vec!["en".into(), "de".into()],
            categories: vec![
                CategoryReport {
                    keyword: "one".into(),
                    rule: Some("i = 1 and v = 0".into()),
                    integer: Some("1".into()),
                    decimal: None,
                    integer_bounded: true,
                    decimal_bounded: Some(true),
                },
                CategoryReport {
                    keyword: "other".into(),
                    rule: None,
                    integer: Some("0, 2~16, 100, …".into()),
                    decimal: Some("0.0~1.5, 10.0, …".into()),
                    integer_bounded: false,
                    decimal_bounded: Some(false),
                },
            ],
        }
    }
}
