//! Compiler for the rule mini-language
//!
//! A rule is a whitespace-separated pattern string containing exactly one
//! verdict symbol (`×` forbidden, `!` mandatory, `÷` allowed). Tokens left
//! of the verdict form the `before` context, tokens right of it the `after`
//! context. `(` … `)` groups alternatives into a set, `[` … `]` groups a
//! sub-sequence, `|` is the implicit join inside sets and is skipped.

use smallvec::SmallVec;

use super::pattern::{clean, reverse_before, Anchor, Modifier, Pattern, Rule, RuleSpec};
use crate::error::{Error, Result};
use crate::types::{BreakType, GeneralCategory, LineBreakClass};

enum Token {
    Verdict(BreakType),
    Pattern(Pattern),
    OpenSet,
    CloseSet,
    OpenSequence,
    CloseSequence,
    Alternation,
}

enum Frame {
    Set(Vec<Pattern>),
    Sequence(Vec<Pattern>),
}

/// Compile a list of raw rules in declaration order.
pub fn parse_rules(specs: &[RuleSpec]) -> Result<Vec<Rule>> {
    specs.iter().map(parse_rule).collect()
}

/// Compile a single rule.
pub fn parse_rule(spec: &RuleSpec) -> Result<Rule> {
    let mut before: Vec<Pattern> = Vec::new();
    let mut after: Vec<Pattern> = Vec::new();
    let mut verdict: Option<BreakType> = None;
    let mut stack: SmallVec<[Frame; 4]> = SmallVec::new();

    for raw in spec.pattern.split_whitespace() {
        match recognize(raw, &spec.name)? {
            Token::Alternation => {}
            Token::Verdict(v) => {
                if verdict.is_some() || !stack.is_empty() {
                    return Err(Error::MissingVerdict {
                        rule: spec.name.clone(),
                    });
                }
                verdict = Some(v);
            }
            Token::OpenSet => stack.push(Frame::Set(Vec::new())),
            Token::OpenSequence => stack.push(Frame::Sequence(Vec::new())),
            Token::CloseSet => match stack.pop() {
                Some(Frame::Set(items)) => {
                    push(&mut stack, &mut before, &mut after, verdict, Pattern::Set(items))
                }
                _ => {
                    return Err(Error::UnbalancedBracket {
                        bracket: ')',
                        rule: spec.name.clone(),
                    })
                }
            },
            Token::CloseSequence => match stack.pop() {
                Some(Frame::Sequence(items)) => push(
                    &mut stack,
                    &mut before,
                    &mut after,
                    verdict,
                    Pattern::Sequence(items),
                ),
                _ => {
                    return Err(Error::UnbalancedBracket {
                        bracket: ']',
                        rule: spec.name.clone(),
                    })
                }
            },
            Token::Pattern(p) => push(&mut stack, &mut before, &mut after, verdict, p),
        }
    }

    if let Some(frame) = stack.last() {
        return Err(Error::UnbalancedBracket {
            bracket: match frame {
                Frame::Set(_) => '(',
                Frame::Sequence(_) => '[',
            },
            rule: spec.name.clone(),
        });
    }
    let verdict = verdict.ok_or_else(|| Error::MissingVerdict {
        rule: spec.name.clone(),
    })?;
    if before.is_empty() {
        return Err(Error::EmptySide {
            rule: spec.name.clone(),
            side: "before",
        });
    }
    if after.is_empty() {
        return Err(Error::EmptySide {
            rule: spec.name.clone(),
            side: "after",
        });
    }

    clean(&mut before);
    clean(&mut after);
    validate(&before, false, &spec.name)?;
    validate(&after, false, &spec.name)?;
    reverse_before(&mut before);

    Ok(Rule {
        name: spec.name.clone(),
        before,
        after,
        verdict,
        side_effect: spec.side_effect.clone(),
    })
}

fn push(
    stack: &mut SmallVec<[Frame; 4]>,
    before: &mut Vec<Pattern>,
    after: &mut Vec<Pattern>,
    verdict: Option<BreakType>,
    pattern: Pattern,
) {
    let target = match stack.last_mut() {
        Some(Frame::Set(items)) | Some(Frame::Sequence(items)) => items,
        None if verdict.is_none() => before,
        None => after,
    };
    target.push(pattern);
}

fn recognize(raw: &str, rule: &str) -> Result<Token> {
    let token = match raw {
        "×" => Token::Verdict(BreakType::FORBIDDEN),
        "!" => Token::Verdict(BreakType::MANDATORY),
        "÷" => Token::Verdict(BreakType::ALLOWED),
        "any" => Token::Pattern(Pattern::Anchor(Anchor::Any)),
        "sot" => Token::Pattern(Pattern::Anchor(Anchor::Sot)),
        "eot" => Token::Pattern(Pattern::Anchor(Anchor::Eot)),
        "eastasian" => Token::Pattern(Pattern::EastAsian),
        "extpict" => Token::Pattern(Pattern::ExtPict),
        "^" => Token::Pattern(Pattern::Modifier(Modifier::Not)),
        "&" => Token::Pattern(Pattern::Modifier(Modifier::And)),
        "-" => Token::Pattern(Pattern::Modifier(Modifier::AndNot)),
        "*" => Token::Pattern(Pattern::Modifier(Modifier::ZeroOrMore)),
        "(" => Token::OpenSet,
        ")" => Token::CloseSet,
        "[" => Token::OpenSequence,
        "]" => Token::CloseSequence,
        "|" => Token::Alternation,
        _ => return recognize_literal(raw, rule),
    };
    Ok(token)
}

fn recognize_literal(raw: &str, rule: &str) -> Result<Token> {
    let unrecognized = || Error::UnrecognizedToken {
        token: raw.to_string(),
        rule: rule.to_string(),
    };

    if let Some(hex) = raw.strip_prefix("\\u") {
        if !(4..=6).contains(&hex.len()) {
            return Err(unrecognized());
        }
        let cp = u32::from_str_radix(hex, 16).map_err(|_| unrecognized())?;
        if cp > 0x10_FFFF {
            return Err(unrecognized());
        }
        return Ok(Token::Pattern(Pattern::CodePoint(cp)));
    }

    if let Some(inner) = raw.strip_prefix("gc(").and_then(|r| r.strip_suffix(')')) {
        let gc = GeneralCategory::from_abbrev(inner).ok_or_else(unrecognized)?;
        return Ok(Token::Pattern(Pattern::Gc(gc)));
    }

    if (2..=3).contains(&raw.len())
        && raw.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
    {
        let class = LineBreakClass::from_abbrev(raw).ok_or_else(unrecognized)?;
        return Ok(Token::Pattern(Pattern::Class(class)));
    }

    Err(unrecognized())
}

/// Check modifier placement: unary modifiers need an operand to their
/// right, binary modifiers are only legal inside a set and need operands
/// on both sides.
fn validate(items: &[Pattern], in_set: bool, rule: &str) -> Result<()> {
    for (k, item) in items.iter().enumerate() {
        match item {
            Pattern::Modifier(m) => {
                let operand_ok = matches!(items.get(k + 1), Some(p) if !matches!(p, Pattern::Modifier(_)));
                let position_ok = if m.is_unary() {
                    true
                } else {
                    in_set && k > 0 && !matches!(items[k - 1], Pattern::Modifier(_))
                };
                if !operand_ok || !position_ok {
                    return Err(Error::MisplacedModifier {
                        modifier: m.symbol(),
                        rule: rule.to_string(),
                    });
                }
            }
            Pattern::Set(children) => validate(children, true, rule)?,
            Pattern::Sequence(children) => validate(children, false, rule)?,
            _ => {}
        }
    }
    Ok(())
}
