use crate::cli::args::FilterRewardsArgs;
use crate::exit_codes;
use genscore_core::rollout::filter_rollouts_file;

pub fn run(args: FilterRewardsArgs) -> anyhow::Result<i32> {
    let stats = match filter_rollouts_file(&args.input, &args.output, args.percentage) {
        Ok(stats) => stats,
        Err(e) => {
            eprintln!("error: {}", e);
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };
    let threshold = stats
        .threshold
        .map(|t| format!("{:.4}", t))
        .unwrap_or_else(|| "n/a".into());
    eprintln!(
        "Kept {} of {} rollouts (min reward {}) -> {}",
        stats.kept,
        stats.total,
        threshold,
        args.output.display()
    );
    Ok(exit_codes::OK)
}
