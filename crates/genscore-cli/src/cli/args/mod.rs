use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod generate;
pub use generate::*;

#[derive(Parser)]
#[command(
    name = "genscore",
    version,
    about = "Batched generation and NLG scoring for sequence models, plus reward-based rollout filtering"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate over a dataset in batches, then score the generations
    Generate(GenerateArgs),
    /// Score an existing generations file
    Score(ScoreArgs),
    /// Keep the top fraction of rollouts by cumulative reward
    FilterRewards(FilterRewardsArgs),
    /// Write a sample config
    Init(InitArgs),
    Version,
}

#[derive(Parser, Clone, Debug)]
pub struct FilterRewardsArgs {
    /// Rollouts JSONL; each record carries a `reward` list (or number)
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long)]
    pub output: PathBuf,

    /// Fraction of records to keep, within [0, 1]
    #[arg(long, default_value_t = 0.1)]
    pub percentage: f64,
}

#[derive(Parser, Clone, Debug)]
pub struct InitArgs {
    #[arg(long, default_value = genscore_core::config::DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_rewards_defaults_to_top_decile() {
        let cli = Cli::try_parse_from([
            "genscore",
            "filter-rewards",
            "--input",
            "in.jsonl",
            "--output",
            "out.jsonl",
        ])
        .unwrap();
        match cli.cmd {
            Command::FilterRewards(args) => assert_eq!(args.percentage, 0.1),
            _ => panic!("expected filter-rewards"),
        }
    }

    #[test]
    fn generate_rejects_zero_batch_size() {
        let res = Cli::try_parse_from([
            "genscore",
            "generate",
            "--dataset",
            "d.jsonl",
            "--out",
            "g.jsonl",
            "--batch-size",
            "0",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn score_format_parses() {
        let cli = Cli::try_parse_from([
            "genscore",
            "score",
            "--generations",
            "g.jsonl",
            "--format",
            "json",
        ])
        .unwrap();
        match cli.cmd {
            Command::Score(args) => assert_eq!(args.format, OutputFormat::Json),
            _ => panic!("expected score"),
        }
    }
}
