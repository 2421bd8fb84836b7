use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// One line of an eval dataset: a prompt and its acceptable references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalSample {
    pub prompt: String,
    #[serde(alias = "references", deserialize_with = "one_or_many")]
    pub reference: Vec<String>,
}

/// A prompt zipped with its references and the model's generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub prompt: String,
    #[serde(alias = "references", deserialize_with = "one_or_many")]
    pub reference: Vec<String>,
    pub generation: String,
}

/// Splits samples into the parallel prompt/reference lists the generation loop takes.
pub fn split_samples(samples: Vec<EvalSample>) -> (Vec<String>, Vec<Vec<String>>) {
    samples
        .into_iter()
        .map(|s| (s.prompt, s.reference))
        .unzip()
}

/// Aggregated scores over a set of generations.
///
/// Per-sample metrics land under their name with the standard error under
/// `{name}_err`; corpus metrics land under their name only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub count: usize,
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

impl MetricsSummary {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            values: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        self.values.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(d: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match OneOrMany::deserialize(d)? {
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
    })
}
