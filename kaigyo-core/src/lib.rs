//! Unicode line breaking (UAX #14)
//!
//! This crate classifies every position between two code units of a text
//! as a forbidden, mandatory, or allowed line break by evaluating a
//! declarative rule list over the classified code-point sequence. The
//! rule sets of Unicode 16.0 and 17.0 are built in; custom rule lists,
//! class-resolution criteria, and external property tables plug into the
//! same machinery.
//!
//! ```
//! use kaigyo_core::LineBreaker;
//!
//! let mut breaker = LineBreaker::new();
//! breaker.set_text("Hello, breaker");
//! let segments: Vec<String> = breaker.segments().map(|s| s.text).collect();
//! assert_eq!(segments, ["Hello, ", "breaker"]);
//! ```

#![warn(missing_docs)]

mod checker;
mod classes;
mod error;
mod iter;
mod matcher;
mod tables;
mod text;
mod types;

pub mod rules;

pub use checker::{LineBreaker, LineBreakerBuilder, SideEffect};
pub use classes::{resolve_class, Criterion};
pub use error::{Error, Result};
pub use iter::{Segment, Segments};
pub use rules::{RuleSet, RuleSpec, STD_REMOVE_CM_SEQUENCES};
pub use tables::{ClassTable, ClassTableSource, CodePointSet, CodePointSetSource};
pub use types::{BreakType, GeneralCategory, LineBreakClass};
