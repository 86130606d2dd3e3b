//! Text model
//!
//! Holds one analysed text: its UTF-16 code units, decoded code points,
//! resolved classes, and the auxiliary offset arrays that translate
//! code-unit positions into code-point indices. Two parallel views exist:
//! the original sequence and the combining-sequence-collapsed one built
//! once per text, switched by the `apply_offset` flag while the matcher
//! runs.

use crate::classes::{assign_class, Criterion};
use crate::tables::ClassTable;
use crate::types::{GeneralCategory, LineBreakClass};

const HIGH_SURROGATE: std::ops::Range<u16> = 0xD800..0xDC00;
const LOW_SURROGATE: std::ops::Range<u16> = 0xDC00..0xE000;

#[derive(Debug)]
pub(crate) struct TextState {
    text: String,
    utf16: Vec<u16>,
    /// Code-unit index → byte index into `text`; length `utf16.len() + 1`
    byte_offsets: Vec<usize>,
    /// Code-unit index → count of preceding low surrogates; length
    /// `utf16.len() + 1`
    offsets_surrogates: Vec<usize>,
    code_points: Vec<u32>,
    classes: Vec<LineBreakClass>,
    gcs: Vec<GeneralCategory>,
    code_points_wo_cs: Vec<u32>,
    classes_wo_cs: Vec<LineBreakClass>,
    gcs_wo_cs: Vec<GeneralCategory>,
    /// Code-point index → count of code points removed before it by the
    /// combining-sequence transform; length `code_points.len() + 1`
    offsets_combining_seqs: Vec<usize>,
    apply_offset: bool,
}

impl TextState {
    pub(crate) fn new(text: &str, table: &ClassTable, criterion: Option<&Criterion>) -> Self {
        let mut utf16 = Vec::with_capacity(text.len());
        let mut byte_offsets = Vec::with_capacity(text.len() + 1);
        for (byte_idx, ch) in text.char_indices() {
            let mut buf = [0u16; 2];
            for &unit in ch.encode_utf16(&mut buf).iter() {
                utf16.push(unit);
                byte_offsets.push(byte_idx);
            }
        }
        byte_offsets.push(text.len());

        // Decode code units, counting low surrogates so a code-unit
        // position converts to a code-point index by subtraction.
        let mut code_points = Vec::with_capacity(utf16.len());
        let mut offsets_surrogates = Vec::with_capacity(utf16.len() + 1);
        let mut lows_seen = 0usize;
        for idx in 0..utf16.len() {
            offsets_surrogates.push(lows_seen);
            let unit = utf16[idx];
            if HIGH_SURROGATE.contains(&unit)
                && idx + 1 < utf16.len()
                && LOW_SURROGATE.contains(&utf16[idx + 1])
            {
                let high = (unit as u32 - 0xD800) << 10;
                let low = utf16[idx + 1] as u32 - 0xDC00;
                code_points.push(0x1_0000 + high + low);
            } else if LOW_SURROGATE.contains(&unit)
                && idx > 0
                && HIGH_SURROGATE.contains(&utf16[idx - 1])
            {
                // Second half of a pair decoded above
                lows_seen += 1;
            } else {
                code_points.push(unit as u32);
            }
        }
        offsets_surrogates.push(lows_seen);

        let mut classes = Vec::with_capacity(code_points.len());
        let mut gcs = Vec::with_capacity(code_points.len());
        for &cp in &code_points {
            let (raw, gc) = table.lookup(cp);
            classes.push(assign_class(raw, gc, criterion));
            gcs.push(gc);
        }

        let mut state = Self {
            text: text.to_string(),
            utf16,
            byte_offsets,
            offsets_surrogates,
            code_points,
            classes,
            gcs,
            code_points_wo_cs: Vec::new(),
            classes_wo_cs: Vec::new(),
            gcs_wo_cs: Vec::new(),
            offsets_combining_seqs: Vec::new(),
            apply_offset: false,
        };
        state.build_combining_transform();
        state
    }

    /// Build the combining-sequence-collapsed view.
    ///
    /// A `CM`/`ZWJ` with a usable base is absorbed into it; one without a
    /// base is replaced by a synthesised `AL` capital letter, which also
    /// carries the right East-Asian and pictographic properties for the
    /// later rules.
    fn build_combining_transform(&mut self) {
        let mut removed = 0usize;
        for k in 0..self.classes.len() {
            self.offsets_combining_seqs.push(removed);
            let class = self.classes[k];
            if matches!(class, LineBreakClass::CM | LineBreakClass::ZWJ) {
                let prev = if k == 0 { None } else { Some(self.classes[k - 1]) };
                let orphaned = matches!(
                    prev,
                    None | Some(
                        LineBreakClass::SP
                            | LineBreakClass::BK
                            | LineBreakClass::CR
                            | LineBreakClass::LF
                            | LineBreakClass::NL
                            | LineBreakClass::ZW
                    )
                );
                if orphaned {
                    self.classes_wo_cs.push(LineBreakClass::AL);
                    self.gcs_wo_cs.push(GeneralCategory::Lu);
                    self.code_points_wo_cs.push(u32::from('A'));
                } else {
                    removed += 1;
                }
            } else {
                self.classes_wo_cs.push(class);
                self.gcs_wo_cs.push(self.gcs[k]);
                self.code_points_wo_cs.push(self.code_points[k]);
            }
        }
        self.offsets_combining_seqs.push(removed);
    }

    /// Text length in code units
    pub(crate) fn len_units(&self) -> usize {
        self.utf16.len()
    }

    /// True if `position` falls between the two halves of a surrogate pair
    pub(crate) fn is_surrogate_interior(&self, position: usize) -> bool {
        position > 0
            && position < self.utf16.len()
            && HIGH_SURROGATE.contains(&self.utf16[position - 1])
            && LOW_SURROGATE.contains(&self.utf16[position])
    }

    /// Translate a code-unit position into an index into the active
    /// code-point view.
    pub(crate) fn matcher_index(&self, position: usize) -> i64 {
        let i = position - self.offsets_surrogates[position];
        let i = if self.apply_offset {
            i - self.offsets_combining_seqs[i]
        } else {
            i
        };
        i as i64
    }

    pub(crate) fn set_apply_offset(&mut self, value: bool) {
        self.apply_offset = value;
    }

    pub(crate) fn active_classes(&self) -> &[LineBreakClass] {
        if self.apply_offset {
            &self.classes_wo_cs
        } else {
            &self.classes
        }
    }

    pub(crate) fn active_gcs(&self) -> &[GeneralCategory] {
        if self.apply_offset {
            &self.gcs_wo_cs
        } else {
            &self.gcs
        }
    }

    pub(crate) fn active_code_points(&self) -> &[u32] {
        if self.apply_offset {
            &self.code_points_wo_cs
        } else {
            &self.code_points
        }
    }

    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn code_points(&self) -> &[u32] {
        &self.code_points
    }

    /// Substring between two code-unit positions.
    ///
    /// Both bounds must lie outside surrogate pairs; break positions the
    /// iterator produces always do.
    pub(crate) fn slice(&self, start: usize, end: usize) -> &str {
        &self.text[self.byte_offsets[start]..self.byte_offsets[end]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::ClassTableSource;

    fn state(text: &str) -> TextState {
        let table = ClassTableSource::V17.load().unwrap();
        TextState::new(text, &table, None)
    }

    #[test]
    fn test_ascii_has_no_surrogate_offsets() {
        let s = state("abc");
        assert_eq!(s.len_units(), 3);
        assert_eq!(s.code_points(), &[0x61, 0x62, 0x63]);
        assert_eq!(s.offsets_surrogates, vec![0, 0, 0, 0]);
        assert!(!s.is_surrogate_interior(1));
    }

    #[test]
    fn test_supplementary_code_points_decode() {
        // Two regional indicators: four code units, two code points
        let s = state("\u{1F1EB}\u{1F1F7}");
        assert_eq!(s.len_units(), 4);
        assert_eq!(s.code_points(), &[0x1F1EB, 0x1F1F7]);
        assert_eq!(s.offsets_surrogates, vec![0, 0, 1, 1, 2]);
        assert!(s.is_surrogate_interior(1));
        assert!(!s.is_surrogate_interior(2));
        assert!(s.is_surrogate_interior(3));
        assert_eq!(s.matcher_index(2), 1);
        assert_eq!(s.matcher_index(4), 2);
    }

    #[test]
    fn test_final_surrogate_offset_counts_all_lows() {
        let s = state("a\u{1F600}b\u{1F600}");
        assert_eq!(s.offsets_surrogates[s.len_units()], 2);
    }

    #[test]
    fn test_combining_mark_is_absorbed() {
        let s = state("a\u{0301}b");
        assert_eq!(s.classes.len(), 3);
        assert_eq!(s.classes[1], LineBreakClass::CM);
        assert_eq!(s.classes_wo_cs, vec![LineBreakClass::AL, LineBreakClass::AL]);
        assert_eq!(s.code_points_wo_cs, vec![0x61, 0x62]);
        assert_eq!(s.offsets_combining_seqs, vec![0, 0, 1, 1]);
    }

    #[test]
    fn test_orphan_combining_mark_is_synthesised() {
        // Space before the mark: LB10 turns it into a capital letter
        let s = state(" \u{0301}x");
        assert_eq!(
            s.classes_wo_cs,
            vec![LineBreakClass::SP, LineBreakClass::AL, LineBreakClass::AL]
        );
        assert_eq!(s.code_points_wo_cs[1], u32::from('A'));
        assert_eq!(s.gcs_wo_cs[1], GeneralCategory::Lu);
        assert_eq!(s.offsets_combining_seqs, vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_mark_after_orphan_mark_is_absorbed() {
        let s = state(" \u{0301}\u{0301}");
        // First mark synthesised, second absorbed into it
        assert_eq!(s.classes_wo_cs, vec![LineBreakClass::SP, LineBreakClass::AL]);
        assert_eq!(s.offsets_combining_seqs, vec![0, 0, 0, 1]);
    }

    #[test]
    fn test_view_swap() {
        let mut s = state("a\u{0301}b");
        assert_eq!(s.active_classes().len(), 3);
        s.set_apply_offset(true);
        assert_eq!(s.active_classes().len(), 2);
        assert_eq!(s.matcher_index(3), 2);
        s.set_apply_offset(false);
        assert_eq!(s.matcher_index(3), 3);
    }

    #[test]
    fn test_slice_by_code_units() {
        let s = state("a\u{1F1EB}\u{1F1F7}b");
        assert_eq!(s.slice(0, 1), "a");
        assert_eq!(s.slice(1, 5), "\u{1F1EB}\u{1F1F7}");
        assert_eq!(s.slice(5, 6), "b");
    }
}
