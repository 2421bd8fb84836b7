use crate::config::{BlockingStrategy, EvalConfig, GenerationConfig};
use crate::errors::EvalError;
use crate::model::GenerationRecord;
use crate::providers::{GenerationRequest, Generator};
use crate::report::console::default_progress_sink;
use crate::report::progress::{ProgressEvent, ProgressSink};
use anyhow::Context;
use tracing::{info, info_span, Instrument};

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub batch_size: usize,
    /// Stop before this batch index; `None` runs every batch.
    pub generation_batches: Option<usize>,
    pub blocking: BlockingStrategy,
    pub config: GenerationConfig,
    /// Run each generator call inside a `generate_batch` span.
    pub trace: bool,
    /// Print batch progress to stderr when no sink is supplied.
    pub verbose: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            batch_size: 8,
            generation_batches: None,
            blocking: BlockingStrategy::default(),
            config: GenerationConfig::default(),
            trace: true,
            verbose: true,
        }
    }
}

impl GenerateOptions {
    pub fn from_config(cfg: &EvalConfig) -> Self {
        Self {
            batch_size: cfg.batch_size,
            generation_batches: cfg.generation_batches,
            blocking: cfg.blocking.clone(),
            config: cfg.generation.clone(),
            trace: cfg.trace,
            verbose: cfg.verbose,
        }
    }

    /// Number of batches a run over `n` prompts will issue.
    pub fn batch_count(&self, n: usize) -> usize {
        let all = n.div_ceil(self.batch_size.max(1));
        match self.generation_batches {
            Some(cap) => all.min(cap),
            None => all,
        }
    }
}

/// Runs `prompts` through `generator` in consecutive batches and zips each
/// generation with its prompt and references, in input order.
///
/// Exactly one generator call is made per batch. With `generation_batches =
/// Some(k)` the loop stops before batch `k`.
pub async fn generate_language(
    generator: &dyn Generator,
    prompts: Vec<String>,
    references: Vec<Vec<String>>,
    opts: &GenerateOptions,
    progress: Option<ProgressSink>,
) -> anyhow::Result<Vec<GenerationRecord>> {
    if prompts.len() != references.len() {
        return Err(EvalError::LengthMismatch {
            prompts: prompts.len(),
            references: references.len(),
        }
        .into());
    }
    if opts.batch_size == 0 {
        return Err(EvalError::InvalidBatchSize.into());
    }

    let total = opts.batch_count(prompts.len());
    let progress = progress.or_else(|| {
        if opts.verbose {
            default_progress_sink(total)
        } else {
            None
        }
    });
    info!(
        prompts = prompts.len(),
        batches = total,
        batch_size = opts.batch_size,
        provider = generator.provider_name(),
        "starting generation"
    );

    let mut records = Vec::with_capacity(prompts.len().min(total * opts.batch_size));
    let batches = prompts
        .chunks(opts.batch_size)
        .zip(references.chunks(opts.batch_size));

    for (i, (batch_prompts, batch_refs)) in batches.enumerate() {
        if i >= total {
            break;
        }

        let request = GenerationRequest {
            prompts: batch_prompts.to_vec(),
            blocking: opts.blocking.clone(),
            config: opts.config.clone(),
        };
        let call = generator.generate(&request);
        let result = if opts.trace {
            call.instrument(info_span!("generate_batch", batch = i, size = batch_prompts.len()))
                .await
        } else {
            call.await
        };
        let outputs = result.with_context(|| format!("generation failed on batch {}", i))?;

        if outputs.len() != batch_prompts.len() {
            return Err(EvalError::GeneratorOutputMismatch {
                batch: i,
                expected: batch_prompts.len(),
                got: outputs.len(),
            }
            .into());
        }

        records.extend(
            batch_prompts
                .iter()
                .zip(batch_refs)
                .zip(outputs)
                .map(|((prompt, reference), generation)| GenerationRecord {
                    prompt: prompt.clone(),
                    reference: reference.clone(),
                    generation,
                }),
        );

        if let Some(sink) = &progress {
            sink(ProgressEvent {
                done: i + 1,
                total,
            });
        }
    }

    info!(generations = records.len(), "generation finished");
    Ok(records)
}
