//! The generator seam: everything that turns a batch of prompts into text.

pub mod blocking;
pub mod fake;
pub mod openai;
pub mod replay;
pub mod traced;

use crate::config::{BlockingStrategy, EvalConfig, GenerationConfig, ProviderConfig};
use anyhow::Context;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// One batch worth of generation work.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompts: Vec<String>,
    pub blocking: BlockingStrategy,
    pub config: GenerationConfig,
}

/// Opaque inference capability. Must return exactly one output per prompt, in order.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> anyhow::Result<Vec<String>>;

    fn provider_name(&self) -> &'static str;
}

/// Builds the configured generator, wrapped in a tracing layer when `trace` is on.
pub fn build_generator(cfg: &EvalConfig) -> anyhow::Result<Arc<dyn Generator>> {
    let inner: Arc<dyn Generator> = match &cfg.provider {
        ProviderConfig::Fake { response } => {
            let g = fake::FakeGenerator::new();
            match response {
                Some(r) => Arc::new(g.with_response(r.clone())),
                None => Arc::new(g),
            }
        }
        ProviderConfig::Replay { path } => Arc::new(
            replay::ReplayGenerator::from_path(path)
                .with_context(|| format!("loading replay source {}", path.display()))?,
        ),
        ProviderConfig::OpenAi {
            model,
            base_url,
            api_key_env,
            timeout_secs,
        } => {
            let api_key = std::env::var(api_key_env).ok();
            Arc::new(openai::OpenAiGenerator::new(
                model.clone(),
                base_url.clone(),
                api_key,
                timeout_secs.map(Duration::from_secs),
            )?)
        }
    };
    if cfg.trace {
        Ok(Arc::new(traced::TracingGenerator::new(inner)))
    } else {
        Ok(inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    #[tokio::test]
    async fn builds_fake_with_tracing_layer() {
        let cfg = parse_config("version: 1\nprovider:\n  type: fake\n  response: hi\n").unwrap();
        let g = build_generator(&cfg).unwrap();
        assert_eq!(g.provider_name(), "fake");
        let out = g
            .generate(&GenerationRequest {
                prompts: vec!["a".into(), "b".into()],
                blocking: cfg.blocking.clone(),
                config: cfg.generation.clone(),
            })
            .await
            .unwrap();
        assert_eq!(out, vec!["hi", "hi"]);
    }

    #[test]
    fn missing_replay_source_fails_to_build() {
        let cfg = parse_config(
            "version: 1\nprovider:\n  type: replay\n  path: /nonexistent/gens.jsonl\n",
        )
        .unwrap();
        let err = build_generator(&cfg).err().expect("replay source is missing");
        assert!(err.to_string().contains("loading replay source"));
    }
}
