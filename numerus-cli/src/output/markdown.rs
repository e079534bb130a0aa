//! Markdown output formatter

use super::OutputFormatter;
use anyhow::Result;
use numerus_core::FamilyReport;
use std::io::Write;

/// Markdown formatter - outputs one table per family
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    family_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            family_count: 0,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_family(&mut self, family: &FamilyReport) -> Result<()> {
        self.family_count += 1;
        writeln!(
            self.writer,
            "## {} {}",
            family.kind,
            family.locales.join(", ")
        )?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Keyword | Rule | Integer | Decimal |")?;
        writeln!(self.writer, "|---------|------|---------|---------|")?;
        for category in &family.categories {
            let rule = category
                .rule
                .as_deref()
                .map(|rule| format!("`{rule}`"))
                .unwrap_or_default();
            writeln!(
                self.writer,
                "| {} | {} | {} | {} |",
                category.keyword,
                rule,
                category.integer.as_deref().unwrap_or(""),
                category.decimal.as_deref().unwrap_or("")
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer, "---")?;
        writeln!(self.writer, "*Total families: {}*", self.family_count)?;
        self.writer.flush()?;
        Ok(())
    }
}
