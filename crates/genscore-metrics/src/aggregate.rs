use genscore_core::errors::MetricError;
use genscore_core::metrics_api::{CorpusMetric, SampleMetric};
use genscore_core::model::{GenerationRecord, MetricsSummary};
use std::sync::Arc;

/// Best score of `metric(prediction, reference)` over all references.
pub fn metric_max_over_references<F>(
    metric: F,
    prediction: &str,
    references: &[String],
) -> Result<f64, MetricError>
where
    F: Fn(&str, &str) -> f64,
{
    references
        .iter()
        .map(|r| metric(prediction, r))
        .reduce(f64::max)
        .ok_or(MetricError::EmptyReferences { index: 0 })
}

/// Mean and standard error (population std / sqrt(n)). `None` for an empty slice.
pub fn mean_and_stderr(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    Some((mean, var.sqrt() / n.sqrt()))
}

/// Scores `records` with the default metric set.
pub fn compute_metrics(records: &[GenerationRecord]) -> Result<MetricsSummary, MetricError> {
    compute_metrics_with(
        records,
        &crate::default_metrics(),
        &crate::default_corpus_metrics(),
    )
}

pub fn compute_metrics_with(
    records: &[GenerationRecord],
    sample_metrics: &[Arc<dyn SampleMetric>],
    corpus_metrics: &[Arc<dyn CorpusMetric>],
) -> Result<MetricsSummary, MetricError> {
    if records.is_empty() {
        return Err(MetricError::EmptyGenerations);
    }
    if let Some(index) = records.iter().position(|r| r.reference.is_empty()) {
        return Err(MetricError::EmptyReferences { index });
    }

    let mut summary = MetricsSummary::new(records.len());
    for metric in sample_metrics {
        let scores = records
            .iter()
            .map(|r| metric.score(&r.generation, &r.reference))
            .collect::<Result<Vec<f64>, _>>()?;
        if let Some((mean, err)) = mean_and_stderr(&scores) {
            summary.insert(metric.name(), mean);
            summary.insert(format!("{}_err", metric.name()), err);
        }
    }

    let predictions: Vec<&str> = records.iter().map(|r| r.generation.as_str()).collect();
    for metric in corpus_metrics {
        summary.insert(metric.name(), metric.score(&predictions));
    }

    tracing::debug!(count = records.len(), "computed metrics");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(generation: &str, refs: &[&str]) -> GenerationRecord {
        GenerationRecord {
            prompt: "p".into(),
            reference: refs.iter().map(|s| s.to_string()).collect(),
            generation: generation.into(),
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn max_over_references() {
        let refs = vec!["a".to_string(), "bb".to_string()];
        let best = metric_max_over_references(|_, r| r.len() as f64, "x", &refs).unwrap();
        assert_eq!(best, 2.0);
        assert!(metric_max_over_references(|_, _| 1.0, "x", &[]).is_err());
    }

    #[test]
    fn stderr_uses_population_std() {
        let (mean, err) = mean_and_stderr(&[1.0, 0.0, 1.0, 0.0]).unwrap();
        assert!(close(mean, 0.5));
        // std = 0.5, n = 4
        assert!(close(err, 0.25));
        assert_eq!(mean_and_stderr(&[]), None);
    }

    #[test]
    fn default_summary_has_all_keys() {
        let records = vec![
            record("Paris", &["paris"]),
            record("the big dog", &["a small cat"]),
        ];
        let s = compute_metrics(&records).unwrap();
        assert_eq!(s.count, 2);
        for key in [
            "rouge1",
            "rouge1_err",
            "rougeL",
            "rougeL_err",
            "exact_match",
            "exact_match_err",
            "bleu",
            "bleu_err",
            "diversity2",
            "diversity3",
            "avg_length",
            "avg_length_err",
        ] {
            assert!(s.get(key).is_some(), "missing {}", key);
        }
        assert!(close(s.get("exact_match").unwrap(), 0.5));
        assert!(close(s.get("exact_match_err").unwrap(), 0.5 / 2f64.sqrt()));
        assert!(close(s.get("avg_length").unwrap(), 2.0));
        assert!(close(s.get("avg_length_err").unwrap(), 1.0 / 2f64.sqrt()));
        // bigrams: "the big", "big dog" -> both unique
        assert!(close(s.get("diversity2").unwrap(), 1.0));
        assert!(close(s.get("diversity3").unwrap(), 1.0));
        assert!(close(s.get("rouge1").unwrap(), 0.5));
    }

    #[test]
    fn empty_input_is_an_error() {
        assert_eq!(compute_metrics(&[]), Err(MetricError::EmptyGenerations));
    }

    #[test]
    fn empty_reference_list_names_the_record() {
        let records = vec![record("a", &["a"]), record("b", &[])];
        assert_eq!(
            compute_metrics(&records),
            Err(MetricError::EmptyReferences { index: 1 })
        );
    }
}
