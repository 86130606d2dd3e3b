//! JSON output formatter

use std::io::Write;

use anyhow::Result;
use kaigyo_core::{BreakType, Segment};
use serde::{Deserialize, Serialize};

use super::OutputFormatter;

/// JSON formatter - outputs segments as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    segments: Vec<SegmentData>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct SegmentData {
    /// The segment text
    pub text: String,
    /// Code-unit position of the break ending the segment
    pub index: usize,
    /// "mandatory" or "allowed"
    pub kind: String,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            segments: Vec::new(),
        }
    }
}

impl<W: Write> OutputFormatter for JsonFormatter<W> {
    fn format_segment(&mut self, segment: &Segment) -> Result<()> {
        let kind = if segment.break_type == BreakType::MANDATORY {
            "mandatory"
        } else {
            "allowed"
        };
        self.segments.push(SegmentData {
            text: segment.text.clone(),
            index: segment.index,
            kind: kind.to_string(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.segments)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
