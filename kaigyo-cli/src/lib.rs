//! Kaigyo CLI library
//!
//! This library provides the command-line interface for the kaigyo
//! line-breaking engine: a segmenter over files or inline text, and a
//! conformance harness for UAX #14 test files.

pub mod commands;
pub mod error;
pub mod output;

pub use error::{CliError, CliResult};
