use crate::aggregate::metric_max_over_references;
use crate::normalize::normalize_answer;
use genscore_core::errors::MetricError;
use genscore_core::metrics_api::SampleMetric;

pub fn exact_match(prediction: &str, reference: &str) -> f64 {
    if normalize_answer(prediction) == normalize_answer(reference) {
        1.0
    } else {
        0.0
    }
}

pub struct ExactMatchMetric;

impl SampleMetric for ExactMatchMetric {
    fn name(&self) -> &'static str {
        "exact_match"
    }

    fn score(&self, prediction: &str, references: &[String]) -> Result<f64, MetricError> {
        metric_max_over_references(exact_match, prediction, references)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_case_punctuation_and_spacing() {
        assert_eq!(exact_match("Paris.", "  paris "), 1.0);
        assert_eq!(exact_match("The Paris", "Paris"), 0.0);
    }

    #[test]
    fn any_reference_may_match() {
        let refs = vec!["London".to_string(), "paris".to_string()];
        assert_eq!(ExactMatchMetric.score("PARIS!", &refs).unwrap(), 1.0);
    }
}
