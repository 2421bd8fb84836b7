use super::blocking::apply_blocking;
use super::{GenerationRequest, Generator};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Offline generator: echoes each (blocked) prompt, or returns a fixed response.
#[derive(Debug, Default)]
pub struct FakeGenerator {
    fixed_response: Option<String>,
    calls: AtomicUsize,
}

impl FakeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, response: String) -> Self {
        self.fixed_response = Some(response);
        self
    }

    /// Number of `generate` calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Generator for FakeGenerator {
    async fn generate(&self, request: &GenerationRequest) -> anyhow::Result<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(request
            .prompts
            .iter()
            .map(|p| {
                self.fixed_response
                    .clone()
                    .unwrap_or_else(|| apply_blocking(p, &request.blocking))
            })
            .collect())
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}
