use crate::dataset::{read_jsonl_numbered, write_jsonl};
use crate::errors::RolloutError;
use serde_json::Value;
use std::path::Path;
use tracing::info;

/// Sum of a record's `reward`: a list of numbers is summed, a bare number is taken as is.
pub fn cumulative_reward(record: &Value) -> Option<f64> {
    match record.get("reward")? {
        Value::Number(n) => n.as_f64(),
        Value::Array(items) => items.iter().map(Value::as_f64).sum(),
        _ => None,
    }
}

/// Keeps the top `floor(len * percentage)` records by cumulative reward, highest first.
///
/// The sort is stable: records with equal reward keep their input order. A record
/// without a usable reward is reported by its 1-based position.
pub fn filter_top_by_reward(
    records: Vec<Value>,
    percentage: f64,
) -> Result<Vec<Value>, RolloutError> {
    let numbered = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| (index + 1, record))
        .collect();
    filter_numbered_by_reward(numbered, percentage)
}

/// [`filter_top_by_reward`] over records tagged with the file line they were read from.
pub fn filter_numbered_by_reward(
    records: Vec<(usize, Value)>,
    percentage: f64,
) -> Result<Vec<Value>, RolloutError> {
    if !(0.0..=1.0).contains(&percentage) {
        return Err(RolloutError::InvalidPercentage(percentage));
    }
    let keep = (records.len() as f64 * percentage).floor() as usize;

    let mut scored = records
        .into_iter()
        .map(|(line, record)| {
            cumulative_reward(&record)
                .map(|reward| (reward, record))
                .ok_or(RolloutError::MissingReward { line })
        })
        .collect::<Result<Vec<_>, _>>()?;

    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.truncate(keep);
    Ok(scored.into_iter().map(|(_, record)| record).collect())
}

/// Outcome of a file-to-file filter pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterStats {
    pub total: usize,
    pub kept: usize,
    /// Lowest cumulative reward among the kept records.
    pub threshold: Option<f64>,
}

pub fn filter_rollouts_file(
    input: &Path,
    output: &Path,
    percentage: f64,
) -> Result<FilterStats, RolloutError> {
    let records: Vec<(usize, Value)> = read_jsonl_numbered(input)?;
    let total = records.len();
    info!(records = total, input = %input.display(), "loaded rollouts");

    let kept = filter_numbered_by_reward(records, percentage)?;
    let threshold = kept.last().and_then(cumulative_reward);
    write_jsonl(output, &kept)?;

    info!(kept = kept.len(), total, output = %output.display(), "wrote filtered rollouts");
    Ok(FilterStats {
        total,
        kept: kept.len(),
        threshold,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rollout(id: u32, rewards: &[f64]) -> Value {
        json!({"id": id, "reward": rewards})
    }

    fn ids(records: &[Value]) -> Vec<u64> {
        records.iter().map(|r| r["id"].as_u64().unwrap()).collect()
    }

    #[test]
    fn reward_is_summed_or_taken_directly() {
        assert_eq!(cumulative_reward(&json!({"reward": [1.0, -0.5, 2]})), Some(2.5));
        assert_eq!(cumulative_reward(&json!({"reward": 3})), Some(3.0));
        assert_eq!(cumulative_reward(&json!({"reward": []})), Some(0.0));
        assert_eq!(cumulative_reward(&json!({"reward": ["x"]})), None);
        assert_eq!(cumulative_reward(&json!({"other": 1})), None);
    }

    #[test]
    fn keeps_top_decile() {
        let records: Vec<Value> = (0..20).map(|i| rollout(i, &[i as f64, 1.0])).collect();
        let kept = filter_top_by_reward(records, 0.1).unwrap();
        assert_eq!(ids(&kept), vec![19, 18]);
    }

    #[test]
    fn ties_keep_input_order() {
        let records = vec![
            rollout(0, &[1.0]),
            rollout(1, &[5.0]),
            rollout(2, &[1.0]),
            rollout(3, &[5.0]),
        ];
        let kept = filter_top_by_reward(records, 0.75).unwrap();
        assert_eq!(ids(&kept), vec![1, 3, 0]);
    }

    #[test]
    fn small_inputs_can_keep_nothing() {
        let records = vec![rollout(0, &[1.0]), rollout(1, &[2.0])];
        assert!(filter_top_by_reward(records, 0.1).unwrap().is_empty());
    }

    #[test]
    fn full_percentage_sorts_everything() {
        let records = vec![rollout(0, &[1.0]), rollout(1, &[2.0]), rollout(2, &[-1.0])];
        let kept = filter_top_by_reward(records, 1.0).unwrap();
        assert_eq!(ids(&kept), vec![1, 0, 2]);
    }

    #[test]
    fn rejects_out_of_range_percentage() {
        assert!(matches!(
            filter_top_by_reward(vec![], 1.5),
            Err(RolloutError::InvalidPercentage(_))
        ));
        assert!(matches!(
            filter_top_by_reward(vec![], f64::NAN),
            Err(RolloutError::InvalidPercentage(_))
        ));
    }

    #[test]
    fn missing_reward_names_the_record() {
        let records = vec![rollout(0, &[1.0]), json!({"id": 1})];
        assert!(matches!(
            filter_top_by_reward(records, 0.5),
            Err(RolloutError::MissingReward { line: 2 })
        ));
    }

    #[test]
    fn missing_reward_reports_file_line_past_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("rollouts.jsonl");
        std::fs::write(&input, "{\"reward\":[1]}\n\n\n{\"score\":2}\n").unwrap();

        let err = filter_rollouts_file(&input, &dir.path().join("top.jsonl"), 0.5).unwrap_err();
        assert!(matches!(err, RolloutError::MissingReward { line: 4 }));
        assert!(err.to_string().starts_with("line 4:"));
    }

    #[test]
    fn file_pass_preserves_key_order() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("rollouts.jsonl");
        let output = dir.path().join("top.jsonl");
        std::fs::write(
            &input,
            "{\"z\":1,\"reward\":[0.5],\"a\":\"low\"}\n\n{\"z\":2,\"reward\":[3.0],\"a\":\"high\"}\n",
        )
        .unwrap();

        let stats = filter_rollouts_file(&input, &output, 0.5).unwrap();
        assert_eq!(
            stats,
            FilterStats {
                total: 2,
                kept: 1,
                threshold: Some(3.0)
            }
        );
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "{\"z\":2,\"reward\":[3.0],\"a\":\"high\"}\n"
        );
    }
}
