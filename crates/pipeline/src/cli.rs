//! Command-Line Arguments

use clap::Parser;
use feature_engine::RunMode;
use std::path::PathBuf;

/// Build the per-movie feature file
#[derive(Parser, Debug)]
#[command(name = "feature-creator")]
#[command(about = "Assemble per-movie features for rating prediction")]
#[command(version)]
pub struct CreatorArgs {
    /// Extract only baseline features
    #[arg(long, conflicts_with = "oracle")]
    pub baseline: bool,

    /// Include oracle features
    #[arg(long)]
    pub oracle: bool,

    /// Turn off feature combinators
    #[arg(long, alias = "skip_combinators")]
    pub skip_combinators: bool,

    /// Print output to stdout instead of the log file
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file
    #[arg(short, long, env = "FEATURE_CREATOR_CONFIG")]
    pub config: Option<PathBuf>,
}

impl CreatorArgs {
    /// Run mode selected by the flags
    pub fn run_mode(&self) -> RunMode {
        if self.oracle {
            RunMode::Oracle
        } else if self.baseline {
            RunMode::Baseline
        } else {
            RunMode::Standard
        }
    }
}

/// Export the features of the submission split
#[derive(Parser, Debug)]
#[command(name = "data-to-submit")]
#[command(about = "Select the submission movies from the features file")]
#[command(version)]
pub struct SubmitArgs {
    /// Print output to stdout instead of the log file
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file
    #[arg(short, long, env = "FEATURE_CREATOR_CONFIG")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CreatorArgs, clap::Error> {
        CreatorArgs::try_parse_from(std::iter::once("feature-creator").chain(args.iter().copied()))
    }

    #[test]
    fn test_default_mode_is_standard() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.run_mode(), RunMode::Standard);
        assert!(!args.skip_combinators);
        assert!(!args.verbose);
    }

    #[test]
    fn test_mode_flags() {
        assert_eq!(parse(&["--oracle"]).unwrap().run_mode(), RunMode::Oracle);
        assert_eq!(parse(&["--baseline"]).unwrap().run_mode(), RunMode::Baseline);
    }

    #[test]
    fn test_mode_flags_are_exclusive() {
        assert!(parse(&["--oracle", "--baseline"]).is_err());
    }

    #[test]
    fn test_skip_combinators_spellings() {
        assert!(parse(&["--skip-combinators"]).unwrap().skip_combinators);
        assert!(parse(&["--skip_combinators"]).unwrap().skip_combinators);
    }

    #[test]
    fn test_verbose_and_config() {
        let args = parse(&["--verbose", "--config", "custom.toml"]).unwrap();
        assert!(args.verbose);
        assert_eq!(args.config, Some(PathBuf::from("custom.toml")));
    }
}
