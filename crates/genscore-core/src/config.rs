use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SUPPORTED_CONFIG_VERSION: u32 = 1;

pub const DEFAULT_CONFIG_PATH: &str = "genscore.yaml";

const SAMPLE_CONFIG: &str = r#"# genscore evaluation config
version: 1

# Where generations come from.
#   fake:   echoes each prompt (or returns `response` when set)
#   replay: answers from a JSONL file of {"prompt", "generation"} records
#   openai: any OpenAI-compatible /v1/completions endpoint
provider:
  type: openai
  model: gpt-3.5-turbo-instruct
  base_url: https://api.openai.com/v1
  api_key_env: OPENAI_API_KEY

batch_size: 8
# Stop after this many batches (omit to run the whole dataset).
# generation_batches: 4

blocking:
  padding: left
  truncation: left
  # max_length: 512

generation:
  max_new_tokens: 128
  do_sample: false
  # temperature: 0.7
  # top_p: 0.95
  # seed: 42
  stop: []

verbose: true
trace: true
"#;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvalConfig {
    pub version: u32,
    pub provider: ProviderConfig,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default)]
    pub generation_batches: Option<usize>,
    #[serde(default)]
    pub blocking: BlockingStrategy,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default = "default_true")]
    pub verbose: bool,
    #[serde(default = "default_true")]
    pub trace: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum ProviderConfig {
    Fake {
        #[serde(default)]
        response: Option<String>,
    },
    Replay {
        path: PathBuf,
    },
    #[serde(rename = "openai")]
    OpenAi {
        model: String,
        #[serde(default = "default_base_url")]
        base_url: String,
        #[serde(default = "default_api_key_env")]
        api_key_env: String,
        #[serde(default)]
        timeout_secs: Option<u64>,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Padding {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Truncation {
    #[default]
    Left,
    Right,
}

/// How prompts are fitted into the model's input block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockingStrategy {
    #[serde(default)]
    pub padding: Padding,
    #[serde(default)]
    pub truncation: Truncation,
    #[serde(default)]
    pub max_length: Option<usize>,
}

/// Decoding parameters handed through to the generator untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationConfig {
    #[serde(default = "default_max_new_tokens")]
    pub max_new_tokens: u32,
    #[serde(default)]
    pub do_sample: bool,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub top_p: Option<f32>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub stop: Vec<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_new_tokens: default_max_new_tokens(),
            do_sample: false,
            temperature: None,
            top_p: None,
            seed: None,
            stop: Vec::new(),
        }
    }
}

fn default_batch_size() -> usize {
    8
}

fn default_true() -> bool {
    true
}

fn default_max_new_tokens() -> u32 {
    128
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

impl EvalConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != SUPPORTED_CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: self.version,
                supported: SUPPORTED_CONFIG_VERSION,
            });
        }
        if self.batch_size == 0 {
            return Err(ConfigError::Invalid("batch_size must be at least 1".into()));
        }
        if self.blocking.max_length == Some(0) {
            return Err(ConfigError::Invalid(
                "blocking.max_length must be at least 1".into(),
            ));
        }
        if let Some(t) = self.generation.temperature {
            if !t.is_finite() || t < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "generation.temperature must be >= 0, got {}",
                    t
                )));
            }
        }
        if let Some(p) = self.generation.top_p {
            if !(p > 0.0 && p <= 1.0) {
                return Err(ConfigError::Invalid(format!(
                    "generation.top_p must be within (0, 1], got {}",
                    p
                )));
            }
        }
        if let ProviderConfig::OpenAi { model, .. } = &self.provider {
            if model.trim().is_empty() {
                return Err(ConfigError::Invalid("provider.model is empty".into()));
            }
        }
        Ok(())
    }
}

/// Loads and validates a config. Relative replay paths resolve against the config's directory.
pub fn load_config(path: &Path) -> Result<EvalConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut cfg = parse_config(&raw)?;
    if let ProviderConfig::Replay { path: replay } = &mut cfg.provider {
        if replay.is_relative() {
            if let Some(dir) = path.parent() {
                *replay = dir.join(&*replay);
            }
        }
    }
    Ok(cfg)
}

pub fn parse_config(raw: &str) -> Result<EvalConfig, ConfigError> {
    let cfg: EvalConfig = serde_yaml::from_str(raw)?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn write_sample_config(path: &Path, force: bool) -> Result<(), ConfigError> {
    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()));
    }
    std::fs::write(path, SAMPLE_CONFIG).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
