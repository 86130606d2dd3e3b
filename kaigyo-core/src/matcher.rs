//! Pattern evaluation
//!
//! A rule matches at a position when its `before` pattern matches walking
//! leftward from the code point just before the position and its `after`
//! pattern matches walking rightward from the position itself. Both walks
//! share one evaluator; only the step differs, which is why the parser
//! stores the before side reversed.
//!
//! Every evaluation returns the index the next sibling should test, or
//! `None` on mismatch. Out-of-range property tests fail the current branch
//! without aborting the surrounding rule walk.

use crate::rules::{Anchor, Modifier, Pattern, Rule};
use crate::tables::CodePointSet;
use crate::types::{GeneralCategory, LineBreakClass};

/// Read-only view of the classified code-point sequence for one rule walk
pub(crate) struct MatchContext<'a> {
    pub classes: &'a [LineBreakClass],
    pub gcs: &'a [GeneralCategory],
    pub code_points: &'a [u32],
    pub east_asian: &'a CodePointSet,
    pub ext_pict: &'a CodePointSet,
}

impl MatchContext<'_> {
    fn len(&self) -> i64 {
        self.classes.len() as i64
    }

    fn in_range(&self, i: i64) -> bool {
        (0..self.len()).contains(&i)
    }
}

/// Evaluate one rule at code-point index `i`.
pub(crate) fn match_rule(rule: &Rule, i: i64, ctx: &MatchContext<'_>) -> bool {
    match_items(&rule.before, i - 1, -1, ctx).is_some()
        && match_items(&rule.after, i, 1, ctx).is_some()
}

/// Match a run of sequence items starting at `i`, advancing by `step`.
fn match_items(items: &[Pattern], mut i: i64, step: i64, ctx: &MatchContext<'_>) -> Option<i64> {
    let mut k = 0;
    while k < items.len() {
        match &items[k] {
            Pattern::Modifier(Modifier::ZeroOrMore) => {
                let operand = &items[k + 1];
                // Repeats only while strictly inside the sequence; on an
                // operand mismatch the index stays at the attempt start.
                while i > 0 && i < ctx.len() - 1 {
                    match match_single(operand, i, step, ctx) {
                        Some(next) => i = next,
                        None => break,
                    }
                }
                k += 2;
            }
            Pattern::Modifier(Modifier::Not) => {
                let operand = &items[k + 1];
                if match_single(operand, i, step, ctx).is_some() {
                    return None;
                }
                i += step;
                k += 2;
            }
            Pattern::Modifier(m) => {
                unreachable!("binary modifier `{}` outside a set", m.symbol())
            }
            item => {
                i = match_single(item, i, step, ctx)?;
                k += 1;
            }
        }
    }
    Some(i)
}

/// Match a single pattern node at `i`; on success the returned index is
/// where the following sibling continues.
fn match_single(pattern: &Pattern, i: i64, step: i64, ctx: &MatchContext<'_>) -> Option<i64> {
    let advance = |matched: bool| if matched { Some(i + step) } else { None };
    match pattern {
        Pattern::Anchor(Anchor::Any) => Some(i + step),
        Pattern::Anchor(Anchor::Sot) => (i < 0).then_some(i),
        Pattern::Anchor(Anchor::Eot) => (i == ctx.len()).then_some(i),
        Pattern::Class(class) => advance(ctx.in_range(i) && ctx.classes[i as usize] == *class),
        Pattern::Gc(gc) => advance(ctx.in_range(i) && ctx.gcs[i as usize] == *gc),
        Pattern::CodePoint(cp) => advance(ctx.in_range(i) && ctx.code_points[i as usize] == *cp),
        Pattern::EastAsian => {
            advance(ctx.in_range(i) && ctx.east_asian.contains(ctx.code_points[i as usize]))
        }
        Pattern::ExtPict => {
            advance(ctx.in_range(i) && ctx.ext_pict.contains(ctx.code_points[i as usize]))
        }
        Pattern::Set(children) => advance(match_set(children, i, step, ctx)),
        Pattern::Sequence(children) => match_items(children, i, step, ctx),
        Pattern::Modifier(m) => unreachable!("dangling modifier `{}`", m.symbol()),
    }
}

/// Match set alternatives at a single position.
///
/// Walking left to right, a true alternative wins immediately unless the
/// next child is a binary modifier, which first folds the following
/// operand into the running result.
fn match_set(children: &[Pattern], i: i64, step: i64, ctx: &MatchContext<'_>) -> bool {
    let mut k = 0;
    let mut current = false;
    while k < children.len() {
        match &children[k] {
            Pattern::Modifier(Modifier::Not) => {
                current = match_single(&children[k + 1], i, step, ctx).is_none();
                k += 2;
            }
            Pattern::Modifier(Modifier::ZeroOrMore) => {
                current = true;
                k += 2;
            }
            Pattern::Modifier(Modifier::And) => {
                current = current && match_single(&children[k + 1], i, step, ctx).is_some();
                k += 2;
            }
            Pattern::Modifier(Modifier::AndNot) => {
                current = current && match_single(&children[k + 1], i, step, ctx).is_none();
                k += 2;
            }
            child => {
                current = match_single(child, i, step, ctx).is_some();
                k += 1;
            }
        }
        let next_is_binary = matches!(
            children.get(k),
            Some(Pattern::Modifier(Modifier::And | Modifier::AndNot))
        );
        if current && !next_is_binary {
            return true;
        }
    }
    false
}
