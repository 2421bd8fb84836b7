use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

#[allow(deprecated)]
fn genscore() -> Command {
    Command::cargo_bin("genscore").unwrap()
}

#[test]
fn keeps_top_decile_by_summed_reward() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("rollouts.jsonl");
    let output = temp.path().join("top.jsonl");
    let lines: String = (0..30)
        .map(|i| {
            // reward sums to i, except record 7 which is the best
            let total = if i == 7 { 100.0 } else { i as f64 };
            format!(
                "{{\"id\":{},\"reward\":[{},{}],\"text\":\"t{}\"}}\n",
                i,
                total / 2.0,
                total / 2.0,
                i
            )
        })
        .collect();
    fs::write(&input, lines).unwrap();

    genscore()
        .arg("filter-rewards")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("Kept 3 of 30 rollouts"));

    let raw = fs::read_to_string(&output).unwrap();
    let kept: Vec<Value> = raw.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
    let ids: Vec<u64> = kept.iter().map(|r| r["id"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![7, 29, 28]);
    assert!(raw.starts_with("{\"id\":7,\"reward\":"));
}

#[test]
fn custom_percentage() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("rollouts.jsonl");
    let output = temp.path().join("top.jsonl");
    fs::write(
        &input,
        "{\"reward\":[1]}\n{\"reward\":[3]}\n{\"reward\":[2]}\n{\"reward\":[0]}\n",
    )
    .unwrap();

    genscore()
        .arg("filter-rewards")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .args(["--percentage", "0.5"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "{\"reward\":[3]}\n{\"reward\":[2]}\n"
    );
}

#[test]
fn invalid_percentage_is_config_error() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("rollouts.jsonl");
    fs::write(&input, "{\"reward\":[1]}\n").unwrap();

    genscore()
        .arg("filter-rewards")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(temp.path().join("top.jsonl"))
        .args(["--percentage", "2"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("percentage"));
}

#[test]
fn record_without_reward_is_config_error() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("rollouts.jsonl");
    fs::write(&input, "{\"reward\":[1]}\n\n{\"score\":2}\n").unwrap();

    genscore()
        .arg("filter-rewards")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(temp.path().join("top.jsonl"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("line 3"));
}
