//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Claimlens - Classify cosmetic marketing claims and learn from corrections.
#[derive(Debug, Parser)]
#[command(name = "claimlens")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "CLAIMLENS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (labels only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze claims, one per line
    Analyze(AnalyzeArgs),

    /// List the current batch
    Results,

    /// Show one result with its keyword trace
    Show(IndexArgs),

    /// Confirm that every dimension of a result is correct
    Confirm(IndexArgs),

    /// Correct one dimension of a result
    Correct(CorrectArgs),

    /// Register a keyword for a label
    Learn(KeywordArgs),

    /// Remove a keyword from a label
    Remove(KeywordArgs),

    /// Export the learning state as JSON
    Export(ExportArgs),

    /// Import and merge a learning-state JSON file
    Import(ImportArgs),

    /// Clear learning state or results
    Clear(ClearArgs),

    /// Render a report of the current batch
    Report(ReportArgs),

    /// Show batch and learning statistics
    Stats,

    /// List the labels of one or all dimensions
    Labels(LabelsArgs),

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Claim text; separate claims with newlines
    pub text: Option<String>,

    /// Read claims from a file (one per line)
    #[arg(short = 'i', long, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Read claims from stdin (one per line)
    #[arg(long, conflicts_with_all = ["text", "file"])]
    pub stdin: bool,
}

/// A 1-based position in the current batch.
#[derive(Debug, Parser)]
pub struct IndexArgs {
    /// Result number as listed by 'results'
    pub index: usize,
}

/// Arguments for the correct command.
#[derive(Debug, Parser)]
pub struct CorrectArgs {
    /// Result number as listed by 'results'
    pub index: usize,

    /// Dimension (efficacy|claim_type|persistence, or 1-3)
    pub dimension: String,

    /// Correct labels (name, key or code), comma-separated
    #[arg(required = true, value_delimiter = ',')]
    pub labels: Vec<String>,

    /// Keyword in the text that indicates the correct labels
    #[arg(short, long)]
    pub keyword: Option<String>,
}

/// Arguments for learn and remove.
#[derive(Debug, Parser)]
pub struct KeywordArgs {
    /// Dimension (efficacy|claim_type|persistence, or 1-3)
    pub dimension: String,

    /// Label (name, key or code)
    pub label: String,

    /// Keyword
    pub keyword: String,
}

/// Arguments for the export command.
#[derive(Debug, Parser)]
pub struct ExportArgs {
    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the import command.
#[derive(Debug, Parser)]
pub struct ImportArgs {
    /// Exported learning-state JSON file
    pub file: PathBuf,
}

/// Arguments for the clear command.
#[derive(Debug, Parser)]
pub struct ClearArgs {
    /// What to clear
    #[arg(value_enum, default_value = "results")]
    pub target: ClearTarget,
}

/// Clear targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ClearTarget {
    /// Learned keywords, tombstones, scores and corrections
    Learning,
    /// The current batch
    Results,
    /// Both
    All,
}

/// Arguments for the report command.
#[derive(Debug, Parser)]
pub struct ReportArgs {
    /// Render as CSV instead of a text table
    #[arg(long)]
    pub csv: bool,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the labels command.
#[derive(Debug, Parser)]
pub struct LabelsArgs {
    /// Only this dimension
    pub dimension: Option<String>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_repl() {
        let cli = Cli::parse_from(["claimlens"]);
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_analyze_command() {
        let cli = Cli::parse_from(["claimlens", "analyze", "长效保湿"]);
        match cli.command {
            Some(Command::Analyze(args)) => {
                assert_eq!(args.text.as_deref(), Some("长效保湿"));
                assert!(args.file.is_none());
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_analyze_text_conflicts_with_file() {
        let result = Cli::try_parse_from(["claimlens", "analyze", "保湿", "--file", "claims.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_correct_splits_labels() {
        let cli = Cli::parse_from([
            "claimlens",
            "correct",
            "2",
            "efficacy",
            "美白,保湿",
            "--keyword",
            "雪肌",
        ]);
        match cli.command {
            Some(Command::Correct(args)) => {
                assert_eq!(args.index, 2);
                assert_eq!(args.labels, vec!["美白", "保湿"]);
                assert_eq!(args.keyword.as_deref(), Some("雪肌"));
            }
            _ => panic!("Expected Correct command"),
        }
    }

    #[test]
    fn test_correct_requires_labels() {
        assert!(Cli::try_parse_from(["claimlens", "correct", "1", "efficacy"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["claimlens", "stats", "--format", "json", "-v"]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert!(cli.verbose);
    }

    #[test]
    fn test_clear_defaults_to_results() {
        let cli = Cli::parse_from(["claimlens", "clear"]);
        match cli.command {
            Some(Command::Clear(args)) => assert_eq!(args.target, ClearTarget::Results),
            _ => panic!("Expected Clear command"),
        }
    }
}
