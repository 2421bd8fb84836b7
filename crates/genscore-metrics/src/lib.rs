//! Generation metrics: ROUGE-1/L, exact match, BLEU, distinct-n and length,
//! plus aggregation into a [`MetricsSummary`](genscore_core::model::MetricsSummary).

use std::sync::Arc;

use genscore_core::metrics_api::{CorpusMetric, SampleMetric};

pub mod aggregate;
pub mod bleu;
pub mod diversity;
pub mod exact_match;
pub mod length;
pub mod normalize;
pub mod porter;
pub mod rouge;
pub mod tokenize;

pub use aggregate::{compute_metrics, compute_metrics_with, metric_max_over_references};
pub use bleu::bleu_score;
pub use diversity::diversity;
pub use exact_match::exact_match;
pub use length::gram_length;
pub use normalize::normalize_answer;
pub use rouge::{rouge1_score, rougel_score};

pub fn default_metrics() -> Vec<Arc<dyn SampleMetric>> {
    vec![
        Arc::new(rouge::Rouge1Metric),
        Arc::new(rouge::RougeLMetric),
        Arc::new(exact_match::ExactMatchMetric),
        Arc::new(bleu::BleuMetric),
        Arc::new(length::LengthMetric),
    ]
}

pub fn default_corpus_metrics() -> Vec<Arc<dyn CorpusMetric>> {
    vec![
        Arc::new(diversity::DiversityMetric::new("diversity2", 2)),
        Arc::new(diversity::DiversityMetric::new("diversity3", 3)),
    ]
}
