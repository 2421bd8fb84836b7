use crate::errors::MetricError;

/// A metric scored per generation and averaged over the set.
///
/// The aggregate is reported under `name()`, its standard error under `{name}_err`.
pub trait SampleMetric: Send + Sync {
    fn name(&self) -> &'static str;
    fn score(&self, prediction: &str, references: &[String]) -> Result<f64, MetricError>;
}

/// A metric computed once over all generations.
pub trait CorpusMetric: Send + Sync {
    fn name(&self) -> &'static str;
    fn score(&self, predictions: &[&str]) -> f64;
}
