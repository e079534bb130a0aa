//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use numerus_core::FamilyReport;
use std::io::Write;

/// JSON formatter - outputs family reports as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    families: Vec<FamilyReport>,
    pretty: bool,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            families: Vec::new(),
            pretty,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_family(&mut self, family: &FamilyReport) -> Result<()> {
        self.families.push(family.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.families)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.families)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures;

    #[test]
    fn test_json_array() {
        let mut buffer = Vec::new();
        {
            let mut formatter = JsonFormatter::new(&mut buffer, false);
            formatter.format_family(&fixtures::english()).unwrap();
            formatter.finish().unwrap();
        }
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        let family = &value[0];
        assert_eq!(family["kind"], "cardinal");
        assert_eq!(family["locales"][1], "de");
        assert_eq!(family["categories"][0]["integer"], "1");
        assert!(family["categories"][0].get("decimal").is_none());
        assert_eq!(family["categories"][1]["integer_bounded"], false);
        assert!(family["categories"][1].get("rule").is_none());
    }

    #[test]
    fn test_empty_output_is_empty_array() {
        let mut buffer = Vec::new();
        JsonFormatter::new(&mut buffer, true).finish().unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "[]\n");
    }
}
