//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use numerus_core::FamilyReport;
use std::io::Write;

/// Plain text formatter - a header per family, one line per keyword
pub struct TextFormatter<W: Write> {
    writer: W,
    families: usize,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            families: 0,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_family(&mut self, family: &FamilyReport) -> Result<()> {
        if self.families > 0 {
            writeln!(self.writer)?;
        }
        self.families += 1;

        writeln!(self.writer, "{} {}", family.kind, family.locales.join(", "))?;
        for category in &family.categories {
            let body = [category.rule.clone().unwrap_or_default(), category.annotation()]
                .into_iter()
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(self.writer, "{}: {}", category.keyword, body)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
