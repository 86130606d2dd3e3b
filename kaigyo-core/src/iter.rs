//! Segment iteration

use crate::checker::LineBreaker;
use crate::types::BreakType;

/// One segment of the text, ending at a break opportunity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Code-unit position of the break ending this segment
    pub index: usize,
    /// MANDATORY or ALLOWED
    pub break_type: BreakType,
    /// The text from the previous break (or start of text) up to `index`
    pub text: String,
}

/// Iterator over the segments of the current text.
///
/// Scans every position from 0 through `text_len` inclusive and yields
/// once per MANDATORY or ALLOWED verdict; concatenating the `text` fields
/// reproduces the input.
pub struct Segments<'a> {
    breaker: &'a mut LineBreaker,
    position: usize,
    start: usize,
}

impl<'a> Segments<'a> {
    pub(crate) fn new(breaker: &'a mut LineBreaker) -> Self {
        Self {
            breaker,
            position: 0,
            start: 0,
        }
    }
}

impl Iterator for Segments<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        let len = self.breaker.state.len_units();
        while self.position <= len {
            let position = self.position;
            self.position += 1;
            let Ok(break_type) = self.breaker.break_at(position) else {
                return None;
            };
            if break_type.intersects(BreakType::MANDATORY | BreakType::ALLOWED) {
                let text = self.breaker.state.slice(self.start, position).to_string();
                self.start = position;
                return Some(Segment {
                    index: position,
                    break_type,
                    text,
                });
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_cover_the_text() {
        let mut breaker = LineBreaker::new();
        breaker.set_text("Hello, breaker");
        let segments: Vec<_> = breaker.segments().collect();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].index, 7);
        assert_eq!(segments[0].break_type, BreakType::ALLOWED);
        assert_eq!(segments[0].text, "Hello, ");
        assert_eq!(segments[1].index, 14);
        assert_eq!(segments[1].break_type, BreakType::MANDATORY);
        assert_eq!(segments[1].text, "breaker");
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        let mut breaker = LineBreaker::new();
        breaker.set_text("");
        assert_eq!(breaker.segments().count(), 0);
    }

    #[test]
    fn test_concatenation_restores_text() {
        let mut breaker = LineBreaker::new();
        let text = "One two.\nThree \u{1F1EB}\u{1F1F7}\u{1F1EB}\u{1F1F7} four";
        breaker.set_text(text);
        let joined: String = breaker.segments().map(|s| s.text).collect();
        assert_eq!(joined, text);
    }

    #[test]
    fn test_last_index_is_text_length() {
        let mut breaker = LineBreaker::new();
        breaker.set_text("tail \u{1F600}");
        let last = breaker.segments().last().unwrap();
        assert_eq!(last.index, "tail \u{1F600}".encode_utf16().count());
        assert_eq!(last.break_type, BreakType::MANDATORY);
    }
}
