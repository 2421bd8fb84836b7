use genscore_core::metrics_api::CorpusMetric;
use std::collections::HashSet;

/// Distinct-n: unique n-grams over all n-grams across predictions.
///
/// Predictions are lowercased and split on whitespace. With no n-grams at all
/// the corpus counts as fully diverse (1.0).
pub fn diversity(predictions: &[&str], n: usize) -> f64 {
    if n == 0 {
        return 1.0;
    }
    let tokenized: Vec<Vec<String>> = predictions
        .iter()
        .map(|p| p.to_lowercase().split_whitespace().map(String::from).collect())
        .collect();

    let mut total = 0usize;
    let mut unique: HashSet<&[String]> = HashSet::new();
    for tokens in &tokenized {
        for gram in tokens.windows(n) {
            total += 1;
            unique.insert(gram);
        }
    }
    if total == 0 {
        return 1.0;
    }
    unique.len() as f64 / total as f64
}

pub struct DiversityMetric {
    name: &'static str,
    n: usize,
}

impl DiversityMetric {
    pub fn new(name: &'static str, n: usize) -> Self {
        Self { name, n }
    }
}

impl CorpusMetric for DiversityMetric {
    fn name(&self) -> &'static str {
        self.name
    }

    fn score(&self, predictions: &[&str]) -> f64 {
        diversity(predictions, self.n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_repeats_across_predictions() {
        // bigrams: (a b) (b c) | (a b) (b d) -> 3 unique of 4
        assert_eq!(diversity(&["a b c", "A  b d"], 2), 0.75);
    }

    #[test]
    fn no_ngrams_is_fully_diverse() {
        assert_eq!(diversity(&["one", "two"], 3), 1.0);
        assert_eq!(diversity(&[], 2), 1.0);
    }

    #[test]
    fn ngrams_do_not_span_predictions() {
        assert_eq!(diversity(&["a b", "a b"], 3), 1.0);
        assert_eq!(diversity(&["x x x x"], 2), 1.0 / 3.0);
    }
}
