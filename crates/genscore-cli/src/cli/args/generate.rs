//! Generate and score command arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Clone, Debug)]
pub struct GenerateArgs {
    #[arg(long, default_value = genscore_core::config::DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Eval dataset JSONL of {"prompt", "reference"} records
    #[arg(long)]
    pub dataset: PathBuf,

    /// Where to write the generations JSONL
    #[arg(long)]
    pub out: PathBuf,

    /// Where to write the metrics JSON (printed to stderr either way)
    #[arg(long)]
    pub metrics_out: Option<PathBuf>,

    /// Override `batch_size` from the config
    #[arg(long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    pub batch_size: Option<usize>,

    /// Override `generation_batches` from the config
    #[arg(long)]
    pub generation_batches: Option<usize>,

    /// Only generate; skip scoring
    #[arg(long)]
    pub no_score: bool,

    /// Suppress batch progress lines
    #[arg(long, short)]
    pub quiet: bool,
}

#[derive(Parser, Clone, Debug)]
pub struct ScoreArgs {
    /// Generations JSONL of {"prompt", "reference", "generation"} records
    #[arg(long)]
    pub generations: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the report here instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}
