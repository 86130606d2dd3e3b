//! The rule mini-language: pattern trees, the compiler, and the built-in
//! UAX #14 rule sets.

mod parser;
mod pattern;
mod sets;

pub use parser::{parse_rule, parse_rules};
pub use pattern::{Anchor, Modifier, Pattern, Rule, RuleSpec};
pub use sets::{RuleSet, STD_REMOVE_CM_SEQUENCES};
