use std::path::PathBuf;

use bhasha_export::ExportFormat;
use bhasha_types::ContributionKind;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "bhasha",
    about = "Bhasha corpus ledger: collect Indic language samples and export them",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Session configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Submit every draft in a session script and show the dashboard
    Run(RunArgs),
    /// Show the audio and video duration tables
    Buckets,
}

#[derive(Args)]
pub struct RunArgs {
    /// JSON array of kind-tagged drafts
    pub session: PathBuf,
    /// Write an export file; the format defaults to the configured one
    #[arg(long, value_name = "FORMAT", num_args = 0..=1)]
    pub export: Option<Option<ExportFormat>>,
    /// Export directory (overrides the config)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
    /// Kinds to export; all kinds when omitted
    #[arg(long, value_delimiter = ',')]
    pub types: Vec<ContributionKind>,
    /// Keep only id, type, language and timestamp
    #[arg(long)]
    pub no_metadata: bool,
    /// Replace contributor names in the export
    #[arg(long)]
    pub anonymize: bool,
    /// Contributor name stamped on this session's records
    #[arg(long)]
    pub contributor: Option<String>,
    /// List every contribution instead of the most recent ones
    #[arg(long)]
    pub all: bool,
}
