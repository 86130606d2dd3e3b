//! Plain text output formatter

use std::io::Write;

use anyhow::Result;
use kaigyo_core::Segment;

use super::OutputFormatter;

/// Text formatter - one segment per line
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputFormatter for TextFormatter<W> {
    fn format_segment(&mut self, segment: &Segment) -> Result<()> {
        writeln!(self.writer, "{}", segment.text.trim_end_matches(['\r', '\n']))?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
