//! Sentence-level BLEU with uniform 1..4-gram weights and no smoothing.

use crate::tokenize::whitespace_tokens;
use genscore_core::errors::MetricError;
use genscore_core::metrics_api::SampleMetric;
use std::collections::HashMap;

pub const MAX_ORDER: usize = 4;

fn ngram_counts<'a>(tokens: &[&'a str], n: usize) -> HashMap<Vec<&'a str>, usize> {
    let mut counts = HashMap::new();
    for gram in tokens.windows(n) {
        *counts.entry(gram.to_vec()).or_insert(0) += 1;
    }
    counts
}

/// Clipped n-gram matches and the hypothesis n-gram count (at least 1).
fn modified_precision(references: &[Vec<&str>], hypothesis: &[&str], n: usize) -> (usize, usize) {
    let counts = ngram_counts(hypothesis, n);
    let mut max_ref_counts: HashMap<&Vec<&str>, usize> = HashMap::new();
    for reference in references {
        let ref_counts = ngram_counts(reference, n);
        for gram in counts.keys() {
            let c = ref_counts.get(gram).copied().unwrap_or(0);
            let slot = max_ref_counts.entry(gram).or_insert(0);
            *slot = (*slot).max(c);
        }
    }
    let clipped: usize = counts
        .iter()
        .map(|(gram, &c)| c.min(max_ref_counts.get(gram).copied().unwrap_or(0)))
        .sum();
    let total: usize = counts.values().sum();
    (clipped, total.max(1))
}

/// Reference length closest to the hypothesis length; ties go to the shorter one.
fn closest_ref_length(references: &[Vec<&str>], hyp_len: usize) -> usize {
    references
        .iter()
        .map(Vec::len)
        .min_by_key(|&r| (r.abs_diff(hyp_len), r))
        .unwrap_or(0)
}

fn brevity_penalty(closest_ref_len: usize, hyp_len: usize) -> f64 {
    if hyp_len > closest_ref_len {
        1.0
    } else if hyp_len == 0 {
        0.0
    } else {
        (1.0 - closest_ref_len as f64 / hyp_len as f64).exp()
    }
}

/// BLEU of one hypothesis against several references, over whitespace tokens.
///
/// Returns 0 when no unigram matches. A zero higher-order precision contributes
/// `f64::MIN_POSITIVE` to the geometric mean, which drives the score towards 0.
pub fn bleu_score(prediction: &str, references: &[String]) -> Result<f64, MetricError> {
    if references.is_empty() {
        return Err(MetricError::EmptyReferences { index: 0 });
    }
    let hypothesis = whitespace_tokens(prediction);
    let refs: Vec<Vec<&str>> = references.iter().map(|r| whitespace_tokens(r)).collect();

    let precisions: Vec<(usize, usize)> = (1..=MAX_ORDER)
        .map(|n| modified_precision(&refs, &hypothesis, n))
        .collect();
    if precisions[0].0 == 0 {
        return Ok(0.0);
    }

    let bp = brevity_penalty(closest_ref_length(&refs, hypothesis.len()), hypothesis.len());
    let weight = 1.0 / MAX_ORDER as f64;
    let log_sum: f64 = precisions
        .iter()
        .map(|&(num, den)| {
            let p = if num == 0 {
                f64::MIN_POSITIVE
            } else {
                num as f64 / den as f64
            };
            weight * p.ln()
        })
        .sum();
    Ok(bp * log_sum.exp())
}

pub struct BleuMetric;

impl SampleMetric for BleuMetric {
    fn name(&self) -> &'static str {
        "bleu"
    }

    fn score(&self, prediction: &str, references: &[String]) -> Result<f64, MetricError> {
        bleu_score(prediction, references)
    }
}
