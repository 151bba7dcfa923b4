use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "review-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

fn trace_fixture() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("traces/boss_review.json")
}

#[test]
fn cli_list_scenarios_writes_output() {
    let exe = env!("CARGO_BIN_EXE_review-tester");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-scenarios", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available scenarios"));
    assert!(content.contains("truth-table"));
}

#[test]
fn cli_runs_all_scenarios_with_trace_file() {
    let exe = env!("CARGO_BIN_EXE_review-tester");
    let output_path = temp_path("run");
    let status = Command::new(exe)
        .args(["--report", "json", "--trace"])
        .arg(trace_fixture())
        .arg("--output")
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());

    let content = std::fs::read_to_string(output_path).expect("read output");
    let results: serde_json::Value = serde_json::from_str(&content).expect("json report");
    let names: Vec<&str> = results
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|r| r["scenario_name"].as_str())
        .collect();
    assert!(names.contains(&"truth-table"));
    assert!(names.contains(&"boss-review-flow"));
    assert!(names.contains(&"resumed-review"));
    assert!(results.as_array().unwrap().iter().all(|r| r["passed"] == true));
}

#[test]
fn cli_rejects_missing_trace_file() {
    let exe = env!("CARGO_BIN_EXE_review-tester");
    let output = Command::new(exe)
        .args(["--scenarios", "smoke", "--trace"])
        .arg(temp_path("missing"))
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read trace file"));
}

#[test]
fn cli_reports_unknown_scenario_and_markdown() {
    let exe = env!("CARGO_BIN_EXE_review-tester");
    let output = Command::new(exe)
        .args(["--scenarios", "nope,reopen", "--report", "markdown"])
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown scenario"));
    assert!(stdout.contains("### ✅ reopen"));
}
