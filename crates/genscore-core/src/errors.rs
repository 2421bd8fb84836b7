//! Error types for the genscore core crate.

use std::path::PathBuf;

/// Config loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("unsupported config version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("refusing to overwrite existing config {0}")]
    AlreadyExists(PathBuf),

    #[error("failed to write sample config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// JSON-lines read/write errors.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: invalid JSON: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line}: {message}")]
    Invalid { line: usize, message: String },

    #[error("failed to encode record: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Precondition failures of the batched generation loop.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("prompts and references differ in length ({prompts} vs {references})")]
    LengthMismatch { prompts: usize, references: usize },

    #[error("batch size must be at least 1")]
    InvalidBatchSize,

    #[error("generator returned {got} outputs for batch {batch} of {expected} prompts")]
    GeneratorOutputMismatch {
        batch: usize,
        expected: usize,
        got: usize,
    },
}

/// Scoring errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetricError {
    #[error("no generations to score")]
    EmptyGenerations,

    #[error("record {index} has no references")]
    EmptyReferences { index: usize },
}

/// Reward filtering errors.
#[derive(Debug, thiserror::Error)]
pub enum RolloutError {
    #[error("percentage must be within [0, 1], got {0}")]
    InvalidPercentage(f64),

    /// `line` is the 1-based file line, or the record position for in-memory input.
    #[error("line {line}: no numeric `reward` (expected a number or a list of numbers)")]
    MissingReward { line: usize },

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}
