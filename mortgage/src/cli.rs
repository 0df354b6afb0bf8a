// mortgage/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mortgage")]
#[command(about = "Synthetic Canadian mortgage star-schema generator", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🏠 Generates, validates and exports the star schema (full refresh)
    Generate(GenerateArgs),

    /// 🧪 Re-validates an exported directory against the business rules
    Validate(ValidateArgs),

    /// 🧹 Removes generated files from an output directory
    Clean {
        #[arg(long, default_value = "csv")]
        output_dir: PathBuf,
    },
}

/// Flags layered on top of the YAML file and `MORTGAGE_*` variables.
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Number of applications to generate
    #[arg(long, short = 'n')]
    pub records: Option<usize>,

    /// Destination directory (created if absent)
    #[arg(long, short)]
    pub output_dir: Option<PathBuf>,

    /// Random seed (same seed + config => byte-identical files)
    #[arg(long)]
    pub seed: Option<u64>,

    /// First day of the window (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Last day of the window (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<NaiveDate>,

    /// Target approval proportion in (0, 1]
    #[arg(long)]
    pub approval_rate: Option<f64>,

    /// YAML configuration file (default: ./mortgage.yaml if present)
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

/// Unset options fall back to the same layered config `generate` reads.
#[derive(Args, Debug, Default)]
pub struct ValidateArgs {
    /// Directory holding the exported CSV files (default: configured output_dir)
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Minimum credit score an approval may have (default: approval.min_credit_score)
    #[arg(long)]
    pub min_credit_score: Option<u16>,

    /// Exit with error if any rule is violated
    #[arg(long)]
    pub strict: bool,

    /// YAML configuration file (default: ./mortgage.yaml if present)
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, bail};
    use clap::Parser;

    #[test]
    fn test_cli_parse_generate_defaults() -> Result<()> {
        let args = Cli::parse_from(["mortgage", "generate"]);
        match args.command {
            Commands::Generate(gen_args) => {
                assert_eq!(gen_args.records, None);
                assert_eq!(gen_args.output_dir, None);
                assert_eq!(gen_args.config, None);
                Ok(())
            }
            _ => bail!("Expected Generate command"),
        }
    }

    #[test]
    fn test_cli_parse_generate_flags() -> Result<()> {
        let args = Cli::parse_from([
            "mortgage",
            "generate",
            "--records",
            "100",
            "--output-dir",
            "/tmp/out",
            "--seed",
            "42",
            "--start-date",
            "2020-01-01",
            "--end-date",
            "2020-01-31",
            "--approval-rate",
            "0.7",
        ]);
        match args.command {
            Commands::Generate(gen_args) => {
                assert_eq!(gen_args.records, Some(100));
                assert_eq!(gen_args.output_dir, Some(PathBuf::from("/tmp/out")));
                assert_eq!(gen_args.seed, Some(42));
                assert_eq!(gen_args.start_date, NaiveDate::from_ymd_opt(2020, 1, 1));
                assert_eq!(gen_args.approval_rate, Some(0.7));
                Ok(())
            }
            _ => bail!("Expected Generate command"),
        }
    }

    #[test]
    fn test_cli_rejects_bad_date() {
        assert!(Cli::try_parse_from(["mortgage", "generate", "--start-date", "2020-13-01"]).is_err());
    }

    #[test]
    fn test_cli_parse_validate() -> Result<()> {
        let args = Cli::parse_from(["mortgage", "validate", "--input-dir", "out", "--strict"]);
        match args.command {
            Commands::Validate(val_args) => {
                assert_eq!(val_args.input_dir, Some(PathBuf::from("out")));
                assert_eq!(val_args.min_credit_score, None);
                assert!(val_args.strict);
                Ok(())
            }
            _ => bail!("Expected Validate command"),
        }
    }

    #[test]
    fn test_cli_parse_clean_default() -> Result<()> {
        let args = Cli::parse_from(["mortgage", "clean"]);
        match args.command {
            Commands::Clean { output_dir } => {
                assert_eq!(output_dir.to_string_lossy(), "csv");
                Ok(())
            }
            _ => bail!("Expected Clean command"),
        }
    }
}
