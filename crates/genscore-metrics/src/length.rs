use crate::tokenize::whitespace_tokens;
use genscore_core::errors::MetricError;
use genscore_core::metrics_api::SampleMetric;

/// Whitespace token count of the prediction.
pub fn gram_length(prediction: &str) -> f64 {
    whitespace_tokens(prediction).len() as f64
}

/// Per-sample length, averaged into `avg_length`. References are not consulted.
pub struct LengthMetric;

impl SampleMetric for LengthMetric {
    fn name(&self) -> &'static str {
        "avg_length"
    }

    fn score(&self, prediction: &str, _references: &[String]) -> Result<f64, MetricError> {
        Ok(gram_length(prediction))
    }
}
