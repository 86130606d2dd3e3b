//! Segment command implementation

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use kaigyo_core::LineBreaker;

use super::RulesVersion;
use crate::output::{JsonFormatter, OutputFormatter, TextFormatter};

/// Arguments for the segment command
#[derive(Debug, Args)]
pub struct SegmentArgs {
    /// Input files (default: stdin)
    #[arg(short, long, value_name = "FILE")]
    pub input: Vec<PathBuf>,

    /// Segment this text instead of reading files
    #[arg(short, long, value_name = "TEXT", conflicts_with = "input")]
    pub text: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Rule set version
    #[arg(short, long, value_enum, default_value = "v17")]
    pub rules: RulesVersion,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text with one segment per line
    Text,
    /// JSON array of segments with positions
    Json,
}

impl SegmentArgs {
    /// Execute the segment command
    pub fn execute(&self) -> Result<()> {
        super::init_logging(self.verbose, self.quiet);

        let mut breaker = LineBreaker::builder()
            .rule_set(self.rules.into())
            .build()
            .context("failed to build the line breaker")?;

        let writer: Box<dyn Write> = match &self.output {
            Some(path) => Box::new(
                fs::File::create(path)
                    .with_context(|| format!("cannot create {}", path.display()))?,
            ),
            None => Box::new(io::stdout().lock()),
        };
        let mut formatter: Box<dyn OutputFormatter> = match self.format {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
        };

        for text in self.inputs()? {
            log::info!("segmenting {} code units", text.encode_utf16().count());
            breaker.set_text(&text);
            for segment in breaker.segments() {
                formatter.format_segment(&segment)?;
            }
        }
        formatter.finish()
    }

    fn inputs(&self) -> Result<Vec<String>> {
        if let Some(text) = &self.text {
            return Ok(vec![text.clone()]);
        }
        if self.input.is_empty() {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            return Ok(vec![buffer]);
        }
        self.input
            .iter()
            .map(|path| {
                fs::read_to_string(path)
                    .with_context(|| format!("cannot read {}", path.display()))
            })
            .collect()
    }
}
