//! Pattern tree for compiled break rules

use crate::types::{BreakType, GeneralCategory, LineBreakClass};

/// Zero-width anchors and the wildcard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Matches at any position
    Any,
    /// Start of text (before the first code point)
    Sot,
    /// End of text (after the last code point)
    Eot,
}

/// Pattern combinators.
///
/// Unary modifiers precede their operand; binary modifiers join the
/// preceding alternative to the following operand and are only legal
/// inside a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    /// `^` — negate the following operand
    Not,
    /// `*` — match the following operand zero or more times
    ZeroOrMore,
    /// `&` — both the preceding alternative and the following operand
    And,
    /// `-` — the preceding alternative but not the following operand
    AndNot,
}

impl Modifier {
    /// True for `^` and `*`
    pub fn is_unary(self) -> bool {
        matches!(self, Self::Not | Self::ZeroOrMore)
    }

    /// The mini-language symbol for this modifier
    pub fn symbol(self) -> char {
        match self {
            Self::Not => '^',
            Self::ZeroOrMore => '*',
            Self::And => '&',
            Self::AndNot => '-',
        }
    }
}

/// One node of a compiled rule pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// `any`, `sot`, `eot`
    Anchor(Anchor),
    /// A resolved line break class, e.g. `NU`
    Class(LineBreakClass),
    /// A general category test, e.g. `gc(Pi)`
    Gc(GeneralCategory),
    /// An exact code point, e.g. `‐`
    CodePoint(u32),
    /// Membership in the East-Asian-wide set
    EastAsian,
    /// The Extended_Pictographic property
    ExtPict,
    /// A combinator applying to a neighbouring sibling
    Modifier(Modifier),
    /// Alternatives tested at a single position
    Set(Vec<Pattern>),
    /// Children matched in order at consecutive positions
    Sequence(Vec<Pattern>),
}

/// A compiled rule: both context patterns plus the verdict
#[derive(Debug, Clone)]
pub struct Rule {
    /// Rule name, e.g. `LB15a`
    pub name: String,
    /// Context left of the position, stored in traversal order starting
    /// at the code point immediately before the break
    pub before: Vec<Pattern>,
    /// Context right of the position, in text order
    pub after: Vec<Pattern>,
    /// Verdict produced when both sides match
    pub verdict: BreakType,
    /// Side effect fired when this rule fails to match
    pub side_effect: Option<String>,
}

/// A raw rule awaiting compilation
#[derive(Debug, Clone)]
pub struct RuleSpec {
    /// Rule name
    pub name: String,
    /// Pattern text in the rule mini-language
    pub pattern: String,
    /// Optional side-effect name
    pub side_effect: Option<String>,
}

impl RuleSpec {
    /// A rule with no side effect
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            side_effect: None,
        }
    }

    /// A rule that fires a named side effect when it fails to match
    pub fn with_side_effect(
        name: impl Into<String>,
        pattern: impl Into<String>,
        side_effect: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            side_effect: Some(side_effect.into()),
        }
    }
}

/// Flatten degenerate nests: a set whose sole child is a set collapses
/// into that child, and likewise for sequences.
pub(crate) fn clean(items: &mut [Pattern]) {
    for item in items.iter_mut() {
        clean_pattern(item);
    }
}

fn clean_pattern(pattern: &mut Pattern) {
    loop {
        match pattern {
            Pattern::Set(children) => {
                clean(children);
                if children.len() == 1 && matches!(children[0], Pattern::Set(_)) {
                    let inner = children.pop().unwrap_or(Pattern::Anchor(Anchor::Any));
                    *pattern = inner;
                    continue;
                }
            }
            Pattern::Sequence(children) => {
                clean(children);
                if children.len() == 1 && matches!(children[0], Pattern::Sequence(_)) {
                    let inner = children.pop().unwrap_or(Pattern::Anchor(Anchor::Any));
                    *pattern = inner;
                    continue;
                }
            }
            _ => {}
        }
        break;
    }
}

/// Reverse a before-side pattern so evaluation can walk leftward from the
/// break position. Unary modifiers that end up after their operand are
/// swapped back in front, preserving prefix order; nested sequences are
/// reversed recursively, sets are not (they inspect a single position).
pub(crate) fn reverse_before(items: &mut Vec<Pattern>) {
    items.reverse();
    let mut k = 1;
    while k < items.len() {
        if matches!(items[k], Pattern::Modifier(m) if m.is_unary()) {
            items.swap(k - 1, k);
            k += 2;
        } else {
            k += 1;
        }
    }
    for item in items.iter_mut() {
        if let Pattern::Sequence(children) = item {
            reverse_before(children);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(c: LineBreakClass) -> Pattern {
        Pattern::Class(c)
    }

    #[test]
    fn test_clean_flattens_nested_sequence() {
        let mut items = vec![Pattern::Sequence(vec![Pattern::Sequence(vec![
            class(LineBreakClass::RI),
            class(LineBreakClass::RI),
        ])])];
        clean(&mut items);
        assert_eq!(
            items,
            vec![Pattern::Sequence(vec![
                class(LineBreakClass::RI),
                class(LineBreakClass::RI),
            ])]
        );
    }

    #[test]
    fn test_clean_flattens_nested_set() {
        let mut items = vec![Pattern::Set(vec![Pattern::Set(vec![
            class(LineBreakClass::BA),
            Pattern::Modifier(Modifier::AndNot),
            Pattern::EastAsian,
        ])])];
        clean(&mut items);
        assert_eq!(
            items,
            vec![Pattern::Set(vec![
                class(LineBreakClass::BA),
                Pattern::Modifier(Modifier::AndNot),
                Pattern::EastAsian,
            ])]
        );
    }

    #[test]
    fn test_clean_keeps_set_inside_sequence() {
        let mut items = vec![Pattern::Sequence(vec![Pattern::Set(vec![class(
            LineBreakClass::CL,
        )])])];
        clean(&mut items);
        // A single-child sequence around a set is not a degenerate nest
        assert_eq!(
            items,
            vec![Pattern::Sequence(vec![Pattern::Set(vec![class(
                LineBreakClass::CL
            )])])]
        );
    }

    #[test]
    fn test_reverse_keeps_modifier_before_operand() {
        // sot * [ RI RI ] RI  →  RI * [ RI RI ] sot
        let mut items = vec![
            Pattern::Anchor(Anchor::Sot),
            Pattern::Modifier(Modifier::ZeroOrMore),
            Pattern::Sequence(vec![class(LineBreakClass::RI), class(LineBreakClass::RI)]),
            class(LineBreakClass::RI),
        ];
        reverse_before(&mut items);
        assert_eq!(
            items,
            vec![
                class(LineBreakClass::RI),
                Pattern::Modifier(Modifier::ZeroOrMore),
                Pattern::Sequence(vec![class(LineBreakClass::RI), class(LineBreakClass::RI)]),
                Pattern::Anchor(Anchor::Sot),
            ]
        );
    }

    #[test]
    fn test_reverse_single_element_is_identity() {
        let mut items = vec![Pattern::Set(vec![
            Pattern::Modifier(Modifier::Not),
            class(LineBreakClass::HL),
        ])];
        let expected = items.clone();
        reverse_before(&mut items);
        assert_eq!(items, expected);
    }
}
