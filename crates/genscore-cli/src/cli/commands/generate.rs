use crate::cli::args::GenerateArgs;
use crate::exit_codes;
use anyhow::Context;
use genscore_core::config::{load_config, EvalConfig};
use genscore_core::dataset::{read_eval_dataset, write_jsonl};
use genscore_core::engine::{generate_language, GenerateOptions};
use genscore_core::model::split_samples;
use genscore_core::providers::build_generator;
use genscore_core::report::console::print_metrics;
use genscore_core::report::json::write_metrics_json;
use genscore_metrics::compute_metrics;
use tracing::info;

pub async fn run(args: GenerateArgs) -> anyhow::Result<i32> {
    // 1. Config, with flag overrides
    let mut cfg = match load_config(&args.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", e);
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };
    apply_overrides(&mut cfg, &args);

    // 2. Dataset
    let samples = match read_eval_dataset(&args.dataset) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {}: {}", args.dataset.display(), e);
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };
    let (prompts, references) = split_samples(samples);

    // 3. Generate
    let generator = match build_generator(&cfg) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("error: {:#}", e);
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };
    let opts = GenerateOptions::from_config(&cfg);
    let records =
        match generate_language(generator.as_ref(), prompts, references, &opts, None).await {
            Ok(r) => r,
            Err(e) => {
                eprintln!("error: {:#}", e);
                return Ok(exit_codes::EVAL_FAILED);
            }
        };
    write_jsonl(&args.out, &records)
        .with_context(|| format!("failed to write generations to {}", args.out.display()))?;
    info!(generations = records.len(), out = %args.out.display(), "wrote generations");

    if args.no_score {
        return Ok(exit_codes::OK);
    }

    // 4. Score
    let summary = match compute_metrics(&records) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {}", e);
            return Ok(exit_codes::EVAL_FAILED);
        }
    };
    print_metrics(&summary);
    if let Some(path) = &args.metrics_out {
        write_metrics_json(&summary, path)
            .with_context(|| format!("failed to write metrics to {}", path.display()))?;
    }
    Ok(exit_codes::OK)
}

fn apply_overrides(cfg: &mut EvalConfig, args: &GenerateArgs) {
    if let Some(bs) = args.batch_size {
        cfg.batch_size = bs;
    }
    if let Some(k) = args.generation_batches {
        cfg.generation_batches = Some(k);
    }
    if args.quiet {
        cfg.verbose = false;
    }
}
