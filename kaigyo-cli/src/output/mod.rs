//! Output formatters for the segment command

mod json;
mod text;

use anyhow::Result;
use kaigyo_core::Segment;

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// Sink for segments produced by one input
pub trait OutputFormatter {
    /// Handle one segment
    fn format_segment(&mut self, segment: &Segment) -> Result<()>;

    /// Flush any buffered output
    fn finish(&mut self) -> Result<()>;
}
