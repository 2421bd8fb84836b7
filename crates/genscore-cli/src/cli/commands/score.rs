use crate::cli::args::{OutputFormat, ScoreArgs};
use crate::exit_codes;
use anyhow::Context;
use genscore_core::dataset::read_generations;
use genscore_core::report::console::format_metrics_table;
use genscore_metrics::compute_metrics;

pub fn run(args: ScoreArgs) -> anyhow::Result<i32> {
    let records = match read_generations(&args.generations) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {}: {}", args.generations.display(), e);
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };
    let summary = match compute_metrics(&records) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {}", e);
            return Ok(exit_codes::EVAL_FAILED);
        }
    };

    let rendered = match args.format {
        OutputFormat::Text => format_metrics_table(&summary),
        OutputFormat::Json => serde_json::to_string_pretty(&summary)? + "\n",
    };
    match &args.out {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{}", rendered),
    }
    Ok(exit_codes::OK)
}
