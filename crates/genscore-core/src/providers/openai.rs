use super::blocking::apply_blocking;
use super::{GenerationRequest, Generator};
use crate::config::GenerationConfig;
use anyhow::Context;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;

/// Generator backed by an OpenAI-compatible `/completions` endpoint.
///
/// Each batch is a single request with `prompt` as an array; choices come back
/// tagged with the index of the prompt they answer.
pub struct OpenAiGenerator {
    pub model: String,
    pub base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl OpenAiGenerator {
    pub fn new(
        model: String,
        base_url: String,
        api_key: Option<String>,
        timeout: Option<Duration>,
    ) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        Ok(Self {
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client: builder.build().context("building HTTP client")?,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/completions", self.base_url)
    }
}

/// Request body for one batch. Greedy decoding pins temperature to 0.
pub fn completion_body(model: &str, prompts: &[String], cfg: &GenerationConfig) -> Value {
    let mut body = json!({
        "model": model,
        "prompt": prompts,
        "max_tokens": cfg.max_new_tokens,
        "n": 1,
    });
    let temperature = if cfg.do_sample {
        cfg.temperature
    } else {
        Some(0.0)
    };
    if let Some(t) = temperature {
        body["temperature"] = json!(t);
    }
    if let Some(p) = cfg.top_p.filter(|_| cfg.do_sample) {
        body["top_p"] = json!(p);
    }
    if let Some(seed) = cfg.seed {
        body["seed"] = json!(seed);
    }
    if !cfg.stop.is_empty() {
        body["stop"] = json!(cfg.stop);
    }
    body
}

/// Maps `choices[*].text` back onto prompt order using each choice's `index`.
pub fn parse_completion_choices(resp: &Value, expected: usize) -> anyhow::Result<Vec<String>> {
    let choices = resp
        .get("choices")
        .and_then(Value::as_array)
        .ok_or_else(|| anyhow::anyhow!("completion response missing `choices`"))?;

    let mut out: Vec<Option<String>> = vec![None; expected];
    for (pos, choice) in choices.iter().enumerate() {
        let idx = choice
            .get("index")
            .and_then(Value::as_u64)
            .map(|i| i as usize)
            .unwrap_or(pos);
        let text = choice
            .get("text")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow::anyhow!("choice {} has no `text`", idx))?;
        let slot = out
            .get_mut(idx)
            .ok_or_else(|| anyhow::anyhow!("choice index {} out of range ({})", idx, expected))?;
        *slot = Some(text.to_string());
    }

    out.into_iter()
        .enumerate()
        .map(|(i, t)| t.ok_or_else(|| anyhow::anyhow!("no completion returned for prompt {}", i)))
        .collect()
}

#[async_trait]
impl Generator for OpenAiGenerator {
    async fn generate(&self, request: &GenerationRequest) -> anyhow::Result<Vec<String>> {
        let prompts: Vec<String> = request
            .prompts
            .iter()
            .map(|p| apply_blocking(p, &request.blocking))
            .collect();
        let body = completion_body(&self.model, &prompts, &request.config);

        let mut req = self
            .client
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            .json(&body);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }
        let resp = req
            .send()
            .await
            .with_context(|| format!("POST {}", self.endpoint()))?;

        let status = resp.status();
        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            anyhow::bail!("completions API error (status {}): {}", status, error_text);
        }
        let json: Value = resp.json().await.context("decoding completions response")?;
        parse_completion_choices(&json, prompts.len())
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}
