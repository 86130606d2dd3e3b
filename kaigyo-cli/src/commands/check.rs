//! Conformance check against UAX #14 test files
//!
//! The official `LineBreakTest-<version>.txt` files list, for each test
//! case, the expected verdict at every inter-code-point position:
//! alternating `×`/`÷` symbols and hexadecimal code points, with `#`
//! starting a comment. `÷` means a break (mandatory or allowed) is
//! expected, `×` means none is.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use kaigyo_core::{BreakType, LineBreaker};

use super::RulesVersion;
use crate::error::CliError;

/// Arguments for the check command
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// The LineBreakTest file to run
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Rule set version to check against
    #[arg(short, long, value_enum, default_value = "v17")]
    pub rules: RulesVersion,

    /// Stop reporting after this many mismatches (0 = report all)
    #[arg(short, long, default_value_t = 20)]
    pub limit: usize,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// One parsed test line
struct TestCase {
    line_number: usize,
    code_points: Vec<u32>,
    /// Expected breakability before each code point and at end of text
    breaks: Vec<bool>,
}

/// One observed disagreement with the test file
struct Mismatch {
    line_number: usize,
    position: usize,
    expected_break: bool,
    actual: BreakType,
}

impl CheckArgs {
    /// Execute the check command
    pub fn execute(&self) -> Result<()> {
        super::init_logging(self.verbose, self.quiet);

        let content = fs::read_to_string(&self.input)
            .map_err(|_| CliError::FileNotFound(self.input.display().to_string()))?;
        let cases = parse_test_file(&content)?;
        log::info!("loaded {} test cases from {}", cases.len(), self.input.display());

        let mut breaker = LineBreaker::builder()
            .rule_set(self.rules.into())
            .build()
            .context("failed to build the line breaker")?;

        let mut mismatches = Vec::new();
        for case in &cases {
            run_case(&mut breaker, case, &mut mismatches)?;
        }

        if mismatches.is_empty() {
            println!("ok: {} test lines passed", cases.len());
            return Ok(());
        }
        for m in mismatches.iter().take(effective_limit(self.limit)) {
            eprintln!(
                "line {}: position {} expected {} got {}",
                m.line_number,
                m.position,
                if m.expected_break { "break" } else { "no break" },
                m.actual,
            );
        }
        bail!(CliError::ConformanceFailed {
            mismatches: mismatches.len(),
            lines: cases.len(),
        });
    }
}

fn effective_limit(limit: usize) -> usize {
    if limit == 0 {
        usize::MAX
    } else {
        limit
    }
}

fn run_case(
    breaker: &mut LineBreaker,
    case: &TestCase,
    mismatches: &mut Vec<Mismatch>,
) -> Result<()> {
    let text: String = case
        .code_points
        .iter()
        .filter_map(|&cp| char::from_u32(cp))
        .collect();
    breaker.set_text(&text);

    // Positions advance by the encoded length of each code point, which
    // skips surrogate-pair interiors.
    let mut position = 0usize;
    for (k, &expected_break) in case.breaks.iter().enumerate() {
        let actual = breaker.break_at(position)?;
        let actual_break = actual.intersects(BreakType::MANDATORY | BreakType::ALLOWED);
        if actual_break != expected_break {
            mismatches.push(Mismatch {
                line_number: case.line_number,
                position,
                expected_break,
                actual,
            });
        }
        if let Some(&cp) = case.code_points.get(k) {
            position += if cp >= 0x1_0000 { 2 } else { 1 };
        }
    }
    Ok(())
}

fn parse_test_file(content: &str) -> Result<Vec<TestCase>> {
    let mut cases = Vec::new();
    for (idx, raw_line) in content.lines().enumerate() {
        let line_number = idx + 1;
        let line = raw_line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let mut code_points = Vec::new();
        let mut breaks = Vec::new();
        for (t, token) in line.split_whitespace().enumerate() {
            if t % 2 == 0 {
                match token {
                    "÷" => breaks.push(true),
                    "×" => breaks.push(false),
                    other => bail!(CliError::MalformedTestLine {
                        line: line_number,
                        reason: format!("expected a verdict symbol, got `{other}`"),
                    }),
                }
            } else {
                let cp = u32::from_str_radix(token, 16).map_err(|_| {
                    CliError::MalformedTestLine {
                        line: line_number,
                        reason: format!("expected a hex code point, got `{token}`"),
                    }
                })?;
                code_points.push(cp);
            }
        }
        if breaks.len() != code_points.len() + 1 {
            bail!(CliError::MalformedTestLine {
                line: line_number,
                reason: "verdicts and code points must alternate".to_string(),
            });
        }
        cases.push(TestCase {
            line_number,
            code_points,
            breaks,
        });
    }
    Ok(cases)
}
