//! Library error types

use thiserror::Error;

/// Errors reported by rule compilation, table loading, and position checks
#[derive(Debug, Error)]
pub enum Error {
    /// Unrecognised token while compiling a rule pattern
    #[error("unrecognized token `{token}` in rule `{rule}`")]
    UnrecognizedToken {
        /// The offending token text
        token: String,
        /// Name of the rule being compiled
        rule: String,
    },

    /// Mismatched or unclosed bracket in a rule pattern
    #[error("unbalanced `{bracket}` in rule `{rule}`")]
    UnbalancedBracket {
        /// The bracket that failed to match
        bracket: char,
        /// Name of the rule being compiled
        rule: String,
    },

    /// A rule pattern must contain exactly one of `×`, `!`, `÷`
    #[error("rule `{rule}` must contain exactly one break verdict")]
    MissingVerdict {
        /// Name of the rule being compiled
        rule: String,
    },

    /// A rule pattern left one side of the verdict empty
    #[error("rule `{rule}` has an empty {side} side")]
    EmptySide {
        /// Name of the rule being compiled
        rule: String,
        /// Which side was empty ("before" or "after")
        side: &'static str,
    },

    /// A binary modifier (`&`, `-`) appeared outside a set, or a modifier
    /// has no operand to its right
    #[error("misplaced modifier `{modifier}` in rule `{rule}`")]
    MisplacedModifier {
        /// The modifier symbol
        modifier: char,
        /// Name of the rule being compiled
        rule: String,
    },

    /// Queried position lies outside `[0, text_len]`
    #[error("position {position} out of range for text of {len} code units")]
    PositionOutOfRange {
        /// The requested code-unit position
        position: usize,
        /// The text length in code units
        len: usize,
    },

    /// Malformed range or unknown class/category name in table data
    #[error("invalid table data: {0}")]
    InvalidTable(String),

    /// Table data failed to parse as JSON
    #[error("table JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Table file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for library operations
pub type Result<T> = std::result::Result<T, Error>;
