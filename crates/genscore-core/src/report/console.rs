use crate::model::MetricsSummary;
use crate::report::progress::{ProgressEvent, ProgressSink};
use std::sync::Arc;

/// Format a single progress line for display.
#[must_use]
pub fn format_progress_line(done: usize, total: usize) -> String {
    format!("Generating batch {}/{}...", done, total)
}

/// Picks which batch completions get a progress line: the first, every
/// `step`-th (about 10% of the run) and the last.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BatchThrottle {
    step: usize,
}

impl BatchThrottle {
    pub(crate) fn new(total: usize) -> Self {
        Self {
            step: (total / 10).max(1),
        }
    }

    pub(crate) fn should_emit(&self, ev: ProgressEvent) -> bool {
        ev.total > 0 && (ev.done == 1 || ev.done == ev.total || ev.done % self.step == 0)
    }
}

/// Returns a sink printing throttled progress lines to stderr, or `None` for a
/// single batch.
pub fn default_progress_sink(total: usize) -> Option<ProgressSink> {
    if total <= 1 {
        return None;
    }
    let throttle = BatchThrottle::new(total);
    Some(Arc::new(move |ev: ProgressEvent| {
        if throttle.should_emit(ev) {
            eprintln!("{}", format_progress_line(ev.done, ev.total));
        }
    }))
}

/// Renders a summary as an aligned `metric  value  ± err` table.
pub fn format_metrics_table(summary: &MetricsSummary) -> String {
    let mut out = format!("Scored {} generations\n", summary.count);
    let width = summary
        .values
        .keys()
        .filter(|k| !k.ends_with("_err"))
        .map(|k| k.len())
        .max()
        .unwrap_or(0);
    for (key, value) in &summary.values {
        if key.ends_with("_err") {
            continue;
        }
        match summary.get(&format!("{}_err", key)) {
            Some(err) => out.push_str(&format!(
                "  {:<width$}  {:>8.4}  ± {:.4}\n",
                key,
                value,
                err,
                width = width
            )),
            None => out.push_str(&format!(
                "  {:<width$}  {:>8.4}\n",
                key,
                value,
                width = width
            )),
        }
    }
    out
}

pub fn print_metrics(summary: &MetricsSummary) {
    eprintln!();
    eprint!("{}", format_metrics_table(summary));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_line_format() {
        assert_eq!(format_progress_line(3, 10), "Generating batch 3/10...");
    }

    #[test]
    fn throttle_emits_first_every_tenth_and_last() {
        let throttle = BatchThrottle::new(30);
        let emitted: Vec<usize> = (1..=30)
            .filter(|&done| throttle.should_emit(ProgressEvent { done, total: 30 }))
            .collect();
        assert_eq!(emitted, vec![1, 3, 6, 9, 12, 15, 18, 21, 24, 27, 30]);
    }

    #[test]
    fn short_runs_report_every_batch() {
        let throttle = BatchThrottle::new(5);
        assert!((1..=5).all(|done| throttle.should_emit(ProgressEvent { done, total: 5 })));
        assert!(!throttle.should_emit(ProgressEvent { done: 0, total: 0 }));
    }

    #[test]
    fn single_batch_has_no_sink() {
        assert!(default_progress_sink(1).is_none());
        assert!(default_progress_sink(4).is_some());
    }

    #[test]
    fn table_pairs_values_with_errors() {
        let mut s = MetricsSummary::new(4);
        s.insert("rouge1", 0.5);
        s.insert("rouge1_err", 0.125);
        s.insert("diversity2", 1.0);
        let table = format_metrics_table(&s);
        assert!(table.starts_with("Scored 4 generations\n"));
        assert!(table.contains("rouge1        0.5000  ± 0.1250"));
        assert!(table.contains("diversity2    1.0000\n"));
        assert!(!table.contains("rouge1_err"));
    }
}
