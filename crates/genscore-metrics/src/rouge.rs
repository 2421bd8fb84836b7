use crate::aggregate::metric_max_over_references;
use crate::tokenize::rouge_tokens;
use genscore_core::errors::MetricError;
use genscore_core::metrics_api::SampleMetric;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RougeScore {
    pub precision: f64,
    pub recall: f64,
    pub fmeasure: f64,
}

impl RougeScore {
    fn from_counts(overlap: usize, prediction_total: usize, target_total: usize) -> Self {
        let precision = overlap as f64 / prediction_total.max(1) as f64;
        let recall = overlap as f64 / target_total.max(1) as f64;
        Self {
            precision,
            recall,
            fmeasure: fmeasure(precision, recall),
        }
    }
}

fn fmeasure(precision: f64, recall: f64) -> f64 {
    if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    }
}

fn ngram_counts(tokens: &[String], n: usize) -> HashMap<&[String], usize> {
    let mut counts = HashMap::new();
    if n == 0 {
        return counts;
    }
    for gram in tokens.windows(n) {
        *counts.entry(gram).or_insert(0) += 1;
    }
    counts
}

/// ROUGE-N over pre-tokenized text.
pub fn rouge_n(prediction: &[String], target: &[String], n: usize) -> RougeScore {
    let pred = ngram_counts(prediction, n);
    let tgt = ngram_counts(target, n);
    let overlap: usize = tgt
        .iter()
        .map(|(gram, &c)| c.min(pred.get(gram).copied().unwrap_or(0)))
        .sum();
    RougeScore::from_counts(overlap, pred.values().sum(), tgt.values().sum())
}

/// Length of the longest common subsequence.
pub fn lcs_len(a: &[String], b: &[String]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut prev = vec![0usize; b.len() + 1];
    let mut cur = vec![0usize; b.len() + 1];
    for x in a {
        for (j, y) in b.iter().enumerate() {
            cur[j + 1] = if x == y {
                prev[j] + 1
            } else {
                prev[j + 1].max(cur[j])
            };
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[b.len()]
}

/// ROUGE-L (sentence-level LCS) over pre-tokenized text.
pub fn rouge_l(prediction: &[String], target: &[String]) -> RougeScore {
    if prediction.is_empty() || target.is_empty() {
        return RougeScore {
            precision: 0.0,
            recall: 0.0,
            fmeasure: 0.0,
        };
    }
    let lcs = lcs_len(prediction, target);
    RougeScore::from_counts(lcs, prediction.len(), target.len())
}

/// ROUGE-1 F-measure with stemming.
pub fn rouge1_score(prediction: &str, reference: &str) -> f64 {
    rouge_n(&rouge_tokens(prediction, true), &rouge_tokens(reference, true), 1).fmeasure
}

/// ROUGE-L F-measure with stemming.
pub fn rougel_score(prediction: &str, reference: &str) -> f64 {
    rouge_l(&rouge_tokens(prediction, true), &rouge_tokens(reference, true)).fmeasure
}

pub struct Rouge1Metric;

impl SampleMetric for Rouge1Metric {
    fn name(&self) -> &'static str {
        "rouge1"
    }

    fn score(&self, prediction: &str, references: &[String]) -> Result<f64, MetricError> {
        metric_max_over_references(rouge1_score, prediction, references)
    }
}

pub struct RougeLMetric;

impl SampleMetric for RougeLMetric {
    fn name(&self) -> &'static str {
        "rougeL"
    }

    fn score(&self, prediction: &str, references: &[String]) -> Result<f64, MetricError> {
        metric_max_over_references(rougel_score, prediction, references)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn rouge1_counts_clipped_overlap() {
        let s = rouge_n(&toks("the the cat"), &toks("the cat sat"), 1);
        assert!(close(s.precision, 2.0 / 3.0));
        assert!(close(s.recall, 2.0 / 3.0));
        assert!(close(s.fmeasure, 2.0 / 3.0));
    }

    #[test]
    fn rouge_l_uses_subsequence() {
        // LCS("a b c d", "a c e d") = "a c d"
        let s = rouge_l(&toks("a b c d"), &toks("a c e d"));
        assert_eq!(lcs_len(&toks("a b c d"), &toks("a c e d")), 3);
        assert!(close(s.precision, 0.75));
        assert!(close(s.recall, 0.75));
        assert!(close(s.fmeasure, 0.75));
    }

    #[test]
    fn rouge_l_differs_from_rouge1_on_order() {
        let pred = toks("c b a");
        let tgt = toks("a b c");
        assert!(close(rouge_n(&pred, &tgt, 1).fmeasure, 1.0));
        assert!(close(rouge_l(&pred, &tgt).fmeasure, 1.0 / 3.0));
    }

    #[test]
    fn empty_sides_score_zero() {
        assert_eq!(rouge_l(&[], &toks("a")).fmeasure, 0.0);
        assert_eq!(rouge_n(&[], &toks("a"), 1).fmeasure, 0.0);
        assert_eq!(rouge1_score("", ""), 0.0);
    }

    #[test]
    fn stemming_matches_inflections() {
        assert!(close(rouge1_score("The cats ran", "the cat ran"), 1.0));
        assert!(close(rougel_score("dogs running fast", "dog runs"), 0.8));
    }

    #[test]
    fn irregular_and_short_inflections_conflate() {
        for (pred, reference) in [
            ("ties", "tie"),
            ("dies", "die"),
            ("dying", "die"),
            ("lying", "lie"),
            ("skies", "sky"),
        ] {
            assert!(close(rouge1_score(pred, reference), 1.0), "{} vs {}", pred, reference);
        }
        assert!(close(rougel_score("the skies were dying", "the sky was die"), 0.75));
    }

    #[test]
    fn metric_takes_best_reference() {
        let refs = vec!["completely different".to_string(), "the cat sat".to_string()];
        let s = Rouge1Metric.score("the cat sat", &refs).unwrap();
        assert!(close(s, 1.0));
    }
}
