//! CLI command implementations

use clap::Subcommand;

pub mod check;
pub mod segment;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Split text at line break opportunities
    Segment(segment::SegmentArgs),

    /// Run a UAX #14 conformance test file against the engine
    Check(check::CheckArgs),
}

/// Rule set versions selectable on the command line
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum RulesVersion {
    /// Unicode 16.0 rules and tables
    V16,
    /// Unicode 17.0 rules and tables
    V17,
}

impl From<RulesVersion> for kaigyo_core::RuleSet {
    fn from(version: RulesVersion) -> Self {
        match version {
            RulesVersion::V16 => kaigyo_core::RuleSet::V16,
            RulesVersion::V17 => kaigyo_core::RuleSet::V17,
        }
    }
}

/// Initialize logging based on verbosity level
pub(crate) fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level),
    )
    .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_version_maps_to_rule_set() {
        assert_eq!(
            kaigyo_core::RuleSet::from(RulesVersion::V16),
            kaigyo_core::RuleSet::V16
        );
        assert_eq!(
            kaigyo_core::RuleSet::from(RulesVersion::V17),
            kaigyo_core::RuleSet::V17
        );
    }
}
