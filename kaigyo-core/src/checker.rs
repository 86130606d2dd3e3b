//! The line breaker
//!
//! `LineBreaker` ties the pieces together: a compiled rule list, the
//! property tables, an optional class criterion, and the state of the
//! current text. Tables and rule lists are shared; the text state belongs
//! to one breaker and is replaced wholesale by `set_text`.

use std::collections::HashMap;
use std::sync::Arc;

use crate::classes::Criterion;
use crate::error::{Error, Result};
use crate::iter::Segments;
use crate::matcher::{match_rule, MatchContext};
use crate::rules::{parse_rules, Rule, RuleSet, RuleSpec, STD_REMOVE_CM_SEQUENCES};
use crate::tables::{ClassTable, ClassTableSource, CodePointSet, CodePointSetSource};
use crate::text::TextState;
use crate::types::{BreakType, GeneralCategory, LineBreakClass};

/// Mutation a rule performs on the class stream when it fails to match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideEffect {
    /// Switch the matcher to the combining-sequence-collapsed view for
    /// the rest of the current position's rule walk
    RemoveCombiningSequences,
}

/// Computes break opportunities in a text according to UAX #14.
///
/// ```
/// use kaigyo_core::{BreakType, LineBreaker};
///
/// let mut breaker = LineBreaker::new();
/// breaker.set_text("Hello, breaker");
/// assert_eq!(breaker.break_at(7).unwrap(), BreakType::ALLOWED);
/// assert_eq!(breaker.break_at(14).unwrap(), BreakType::MANDATORY);
/// ```
pub struct LineBreaker {
    pub(crate) rules: Arc<Vec<Rule>>,
    pub(crate) class_table: Arc<ClassTable>,
    pub(crate) east_asian: Arc<CodePointSet>,
    pub(crate) ext_pict: Arc<CodePointSet>,
    pub(crate) criterion: Option<Criterion>,
    pub(crate) side_effects: HashMap<String, SideEffect>,
    pub(crate) state: TextState,
}

impl LineBreaker {
    /// A breaker with the default configuration: the v17 rule set, the
    /// standard class resolution, and the embedded tables.
    pub fn new() -> Self {
        Self::builder()
            .build()
            .expect("default configuration is valid")
    }

    /// Start configuring a breaker.
    pub fn builder() -> LineBreakerBuilder {
        LineBreakerBuilder::default()
    }

    /// Install a new text, replacing the previous state.
    pub fn set_text(&mut self, text: &str) {
        self.state = TextState::new(text, &self.class_table, self.criterion.as_ref());
    }

    /// The current text.
    pub fn text(&self) -> &str {
        self.state.text()
    }

    /// The decoded code points of the current text.
    pub fn code_points(&self) -> &[u32] {
        self.state.code_points()
    }

    /// Bind a side effect to a rule name.
    ///
    /// The binding for the standard combining-sequence rule is installed
    /// at construction; custom rule lists can reuse it under their own
    /// names.
    pub fn register_side_effect(&mut self, name: impl Into<String>, effect: SideEffect) {
        self.side_effects.insert(name.into(), effect);
    }

    /// Classify the position between code units `position - 1` and
    /// `position` of the current text.
    ///
    /// Positions inside a surrogate pair are always FORBIDDEN; positions
    /// outside `[0, text_len]` are an error.
    pub fn break_at(&mut self, position: usize) -> Result<BreakType> {
        let len = self.state.len_units();
        if position > len {
            return Err(Error::PositionOutOfRange { position, len });
        }
        if self.state.is_surrogate_interior(position) {
            return Ok(BreakType::FORBIDDEN);
        }

        self.state.set_apply_offset(false);
        let rules = Arc::clone(&self.rules);
        let mut result = BreakType::UNKNOWN;
        for rule in rules.iter() {
            // Recomputed per rule: a side effect may have swapped the
            // active view, which also remaps the index.
            let i = self.state.matcher_index(position);
            let ctx = MatchContext {
                classes: self.state.active_classes(),
                gcs: self.state.active_gcs(),
                code_points: self.state.active_code_points(),
                east_asian: &self.east_asian,
                ext_pict: &self.ext_pict,
            };
            if match_rule(rule, i, &ctx) {
                log::trace!("position {position}: rule {} gives {}", rule.name, rule.verdict);
                result = rule.verdict;
                break;
            }
            if let Some(name) = &rule.side_effect {
                match self.side_effects.get(name) {
                    Some(SideEffect::RemoveCombiningSequences) => {
                        self.state.set_apply_offset(true);
                    }
                    None => {}
                }
            }
        }
        self.state.set_apply_offset(false);
        Ok(result)
    }

    /// Iterate over the segments of the current text, one per MANDATORY
    /// or ALLOWED break position.
    pub fn segments(&mut self) -> Segments<'_> {
        Segments::new(self)
    }
}

impl Default for LineBreaker {
    fn default() -> Self {
        Self::new()
    }
}

/// Configures and builds a [`LineBreaker`].
#[derive(Default)]
pub struct LineBreakerBuilder {
    rule_set: RuleSet,
    custom_rules: Option<Vec<RuleSpec>>,
    criterion: Option<Criterion>,
    class_table: Option<ClassTableSource>,
    east_asian: Option<CodePointSetSource>,
    ext_pict: Option<CodePointSetSource>,
}

impl LineBreakerBuilder {
    /// Select a built-in rule set (default: v17). Also selects the
    /// matching embedded class table unless one is set explicitly.
    pub fn rule_set(mut self, rule_set: RuleSet) -> Self {
        self.rule_set = rule_set;
        self
    }

    /// Use a custom rule list instead of a built-in set.
    pub fn rules(mut self, rules: Vec<RuleSpec>) -> Self {
        self.custom_rules = Some(rules);
        self
    }

    /// Replace the standard class resolution.
    pub fn criterion(
        mut self,
        criterion: impl Fn(LineBreakClass, GeneralCategory) -> LineBreakClass
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.criterion = Some(Arc::new(criterion));
        self
    }

    /// Override the class table source.
    pub fn class_table(mut self, source: ClassTableSource) -> Self {
        self.class_table = Some(source);
        self
    }

    /// Override the East-Asian-wide set source.
    pub fn east_asian(mut self, source: CodePointSetSource) -> Self {
        self.east_asian = Some(source);
        self
    }

    /// Override the Extended_Pictographic set source.
    pub fn ext_pict(mut self, source: CodePointSetSource) -> Self {
        self.ext_pict = Some(source);
        self
    }

    /// Compile the rules, load the tables, and build the breaker.
    pub fn build(self) -> Result<LineBreaker> {
        let rules = match &self.custom_rules {
            Some(specs) => Arc::new(parse_rules(specs)?),
            None => self.rule_set.compiled()?,
        };
        let class_table = self
            .class_table
            .unwrap_or_else(|| self.rule_set.table_source())
            .load()?;
        let east_asian = self
            .east_asian
            .unwrap_or(CodePointSetSource::EastAsian)
            .load()?;
        let ext_pict = self.ext_pict.unwrap_or(CodePointSetSource::ExtPict).load()?;

        let mut side_effects = HashMap::new();
        side_effects.insert(
            STD_REMOVE_CM_SEQUENCES.to_string(),
            SideEffect::RemoveCombiningSequences,
        );

        let state = TextState::new("", &class_table, self.criterion.as_ref());
        Ok(LineBreaker {
            rules,
            class_table,
            east_asian,
            ext_pict,
            criterion: self.criterion,
            side_effects,
            state,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        let mut breaker = LineBreaker::new();
        assert_eq!(breaker.break_at(0).unwrap(), BreakType::FORBIDDEN);
        assert!(breaker.break_at(1).is_err());
    }

    #[test]
    fn test_position_out_of_range() {
        let mut breaker = LineBreaker::new();
        breaker.set_text("ab");
        assert!(matches!(
            breaker.break_at(3),
            Err(Error::PositionOutOfRange { position: 3, len: 2 })
        ));
    }

    #[test]
    fn test_start_is_forbidden_end_is_mandatory() {
        let mut breaker = LineBreaker::new();
        breaker.set_text("word");
        assert_eq!(breaker.break_at(0).unwrap(), BreakType::FORBIDDEN);
        assert_eq!(breaker.break_at(4).unwrap(), BreakType::MANDATORY);
    }

    #[test]
    fn test_text_accessors() {
        let mut breaker = LineBreaker::new();
        breaker.set_text("ab\u{1F600}");
        assert_eq!(breaker.text(), "ab\u{1F600}");
        assert_eq!(breaker.code_points(), &[0x61, 0x62, 0x1F600]);
    }

    #[test]
    fn test_set_text_is_idempotent() {
        let mut breaker = LineBreaker::new();
        breaker.set_text("a\u{0301}b c");
        let len = breaker.text().encode_utf16().count();
        let first: Vec<_> = (0..=len).map(|p| breaker.break_at(p).unwrap()).collect();
        breaker.set_text("a\u{0301}b c");
        let second: Vec<_> = (0..=len).map(|p| breaker.break_at(p).unwrap()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_repeated_break_at_is_stable() {
        // apply_offset must be restored after every call
        let mut breaker = LineBreaker::new();
        breaker.set_text("a\u{0301}b");
        for _ in 0..3 {
            assert_eq!(breaker.break_at(1).unwrap(), BreakType::FORBIDDEN);
            assert_eq!(breaker.break_at(2).unwrap(), BreakType::FORBIDDEN);
            assert_eq!(breaker.break_at(3).unwrap(), BreakType::MANDATORY);
        }
    }

    #[test]
    fn test_unregistered_side_effect_is_inert() {
        let mut breaker = LineBreaker::builder()
            .rules(vec![
                RuleSpec::new("start", "sot × any"),
                RuleSpec::new("end", "any ! eot"),
                RuleSpec::with_side_effect("collapse", "ZW × ZW", "unbound"),
                RuleSpec::new("rest", "any ÷ any"),
            ])
            .build()
            .unwrap();
        breaker.set_text("a\u{0301}b");
        // Without the collapse the mark keeps its own position
        assert_eq!(breaker.break_at(2).unwrap(), BreakType::ALLOWED);
    }

    #[test]
    fn test_custom_rules_replace_builtin_set() {
        let mut breaker = LineBreaker::builder()
            .rules(vec![
                RuleSpec::new("start", "sot × any"),
                RuleSpec::new("rest", "any ÷ any"),
            ])
            .build()
            .unwrap();
        breaker.set_text("ab");
        assert_eq!(breaker.break_at(0).unwrap(), BreakType::FORBIDDEN);
        assert_eq!(breaker.break_at(1).unwrap(), BreakType::ALLOWED);
        assert_eq!(breaker.break_at(2).unwrap(), BreakType::ALLOWED);
    }

    #[test]
    fn test_custom_rules_may_leave_positions_undecided() {
        let mut breaker = LineBreaker::builder()
            .rules(vec![RuleSpec::new("crlf", "CR × LF")])
            .build()
            .unwrap();
        breaker.set_text("ab");
        assert_eq!(breaker.break_at(1).unwrap(), BreakType::UNKNOWN);
    }

    #[test]
    fn test_invalid_custom_rule_fails_construction() {
        let result = LineBreaker::builder()
            .rules(vec![RuleSpec::new("bad", "QQ × any")])
            .build();
        assert!(result.is_err());
    }
}
