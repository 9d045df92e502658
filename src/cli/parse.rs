//! CLI parse: clap types for mtc. No behavior; definitions only.

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// mtc - deterministic directory checksums
#[derive(Parser, Debug)]
#[command(name = "mtc", version)]
#[command(about = "Compute, compare and verify Merkle tree checksums of files and directories")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stderr, stdout, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the Merkle root hash of a file or directory
    Hash {
        path: PathBuf,

        #[command(flatten)]
        exclusions: ExclusionArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Compare the Merkle root hashes of two paths
    Diff {
        a: PathBuf,
        b: PathBuf,

        #[command(flatten)]
        exclusions: ExclusionArgs,
    },
    /// Verify that a file or directory matches the given hash
    Calc {
        path: PathBuf,

        /// Expected hash as a hexadecimal string
        expected: String,

        #[command(flatten)]
        exclusions: ExclusionArgs,
    },
}

/// Exclusion and resource flags shared by every command.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionArgs {
    /// Exclude pattern (e.g. 'node_modules', '*.log'); repeatable
    #[arg(short = 'e', long = "exclude", action = ArgAction::Append)]
    pub exclude: Vec<String>,

    /// Custom ignore file with the highest priority
    #[arg(short = 'i', long = "ignore-file")]
    pub ignore_file: Option<PathBuf>,

    /// Do not load .mtcignore / .gitignore from the working directory
    #[arg(long)]
    pub no_ignore_files: bool,

    /// Maximum concurrent file reads
    #[arg(long)]
    pub workers: Option<usize>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
