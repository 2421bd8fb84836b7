use super::{GenerationRequest, Generator};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info_span, Instrument};

/// Wraps a generator in a `gen_ai.generate` span per batch.
pub struct TracingGenerator {
    inner: Arc<dyn Generator>,
}

impl TracingGenerator {
    pub fn new(inner: Arc<dyn Generator>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl Generator for TracingGenerator {
    async fn generate(&self, request: &GenerationRequest) -> anyhow::Result<Vec<String>> {
        let span = info_span!(
            "gen_ai.generate",
            "gen_ai.system" = self.inner.provider_name(),
            "gen_ai.request.max_tokens" = request.config.max_new_tokens,
            "genscore.batch_size" = request.prompts.len(),
            "genscore.output_chars" = tracing::field::Empty,
            "error" = tracing::field::Empty,
            "error.message" = tracing::field::Empty
        );

        async move {
            let start = std::time::Instant::now();
            let result = self.inner.generate(request).await;
            let span = tracing::Span::current();
            match &result {
                Ok(outputs) => {
                    let chars: usize = outputs.iter().map(|o| o.chars().count()).sum();
                    span.record("genscore.output_chars", chars);
                    tracing::debug!(elapsed_ms = start.elapsed().as_millis() as u64, "batch generated");
                }
                Err(e) => {
                    span.record("error", true);
                    span.record("error.message", e.to_string().as_str());
                }
            }
            result
        }
        .instrument(span)
        .await
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }
}
