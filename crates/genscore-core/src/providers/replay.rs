use super::{GenerationRequest, Generator};
use crate::dataset::read_jsonl;
use crate::errors::DatasetError;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct ReplayEntry {
    prompt: String,
    generation: String,
}

/// Serves generations recorded by an earlier run, keyed by prompt.
///
/// Lets a dataset be rescored (or the pipeline exercised) without a live model.
/// When a prompt occurs more than once in the source, the first generation wins.
#[derive(Debug, Default)]
pub struct ReplayGenerator {
    by_prompt: HashMap<String, String>,
}

impl ReplayGenerator {
    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let entries: Vec<ReplayEntry> = read_jsonl(path)?;
        let gen = Self::from_pairs(entries.into_iter().map(|e| (e.prompt, e.generation)));
        tracing::debug!(
            entries = gen.len(),
            path = %path.display(),
            "loaded replay source"
        );
        Ok(gen)
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut by_prompt = HashMap::new();
        let mut duplicates = 0usize;
        for (prompt, generation) in pairs {
            if by_prompt.contains_key(&prompt) {
                duplicates += 1;
                continue;
            }
            by_prompt.insert(prompt, generation);
        }
        if duplicates > 0 {
            tracing::warn!(duplicates, "replay source repeats prompts; keeping first");
        }
        Self { by_prompt }
    }

    pub fn len(&self) -> usize {
        self.by_prompt.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_prompt.is_empty()
    }
}

#[async_trait]
impl Generator for ReplayGenerator {
    async fn generate(&self, request: &GenerationRequest) -> anyhow::Result<Vec<String>> {
        request
            .prompts
            .iter()
            .map(|p| {
                self.by_prompt.get(p).cloned().ok_or_else(|| {
                    let preview: String = p.chars().take(60).collect();
                    anyhow::anyhow!("replay source has no generation for prompt {:?}", preview)
                })
            })
            .collect()
    }

    fn provider_name(&self) -> &'static str {
        "replay"
    }
}
