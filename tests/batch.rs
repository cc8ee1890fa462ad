//! Integration tests for the gradecast-batch binary.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use serde_json::Value;

const MODEL: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/linear_model.json");
const SWAPPED_MODEL: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/swapped_model.json");

/// A complete record. G1/G2/absences/failures drive the fixture model.
fn record(failures: i64, absences: i64, g1: i64, g2: i64) -> String {
    format!(
        concat!(
            "{{\"school\":\"GP\",\"sex\":\"F\",\"age\":17,\"address\":\"U\",\"famsize\":\"GT3\",",
            "\"Pstatus\":\"T\",\"Medu\":4,\"Fedu\":4,\"Mjob\":\"teacher\",\"Fjob\":\"other\",",
            "\"reason\":\"home\",\"guardian\":\"mother\",\"traveltime\":1,\"studytime\":2,",
            "\"failures\":{},\"schoolsup\":\"yes\",\"famsup\":\"yes\",\"paid\":\"yes\",",
            "\"activities\":\"yes\",\"nursery\":\"yes\",\"higher\":\"yes\",\"internet\":\"yes\",",
            "\"romantic\":\"yes\",\"famrel\":4,\"freetime\":3,\"goout\":3,\"Dalc\":1,\"Walc\":1,",
            "\"health\":3,\"absences\":{},\"G1\":{},\"G2\":{},\"comment\":\"ignored\"}}"
        ),
        failures, absences, g1, g2
    )
}

fn run_batch(args: &[&str], stdin: &str) -> Output {
    let exe = env!("CARGO_BIN_EXE_gradecast-batch");
    let mut child = Command::new(exe)
        .args(args)
        .env_remove("GRADECAST_MODEL")
        .env_remove("GRADECAST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start gradecast-batch");
    {
        let mut pipe = child.stdin.take().unwrap();
        let _ = pipe.write_all(stdin.as_bytes());
    }
    child.wait_with_output().expect("failed to wait on child")
}

fn parse_lines(output: &Output) -> Vec<Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|l| serde_json::from_str(l).expect("output line is JSON"))
        .collect()
}

#[test]
fn predicts_each_line() {
    let input = format!(
        "{}\n{}\n{}\n",
        record(0, 4, 15, 16),
        record(0, 93, 20, 20),
        record(3, 0, 0, 0)
    );
    let output = run_batch(&["--model", MODEL, "--quiet"], &input);
    assert!(output.status.success());

    let lines = parse_lines(&output);
    assert_eq!(lines.len(), 3);
    // -0.5 + 0.08 + 1.5 + 14.4 = 15.48
    assert_eq!(lines[0]["g3"], 15);
    assert_eq!(lines[1]["g3"], 20);
    assert_eq!(lines[2]["g3"], 0);
    assert_eq!(lines[2]["line"], 3);
}

#[test]
fn bad_rows_report_errors_in_place() {
    let input = format!("{}\nnot json\n{{\"school\":\"GP\"}}\n\n{}\n", record(0, 0, 10, 11), record(1, 2, 9, 9));
    let output = run_batch(&["--model", MODEL, "--quiet", "--threads", "2"], &input);
    assert!(output.status.success());

    let lines = parse_lines(&output);
    assert_eq!(lines.len(), 4);
    assert!(lines[0]["g3"].is_u64());
    assert!(lines[1]["error"].as_str().unwrap().starts_with("invalid JSON"));
    assert_eq!(lines[2]["error"], "missing field 'sex'");
    assert_eq!(lines[3]["line"], 5);
    assert!(lines[3]["g3"].is_u64());
}

#[test]
fn schema_mismatch_is_reported_per_row() {
    let output = run_batch(&["--model", SWAPPED_MODEL, "--quiet"], &format!("{}\n", record(0, 0, 12, 12)));
    assert!(output.status.success());
    let lines = parse_lines(&output);
    let error = lines[0]["error"].as_str().unwrap();
    assert!(error.starts_with("feature schema mismatch"), "{}", error);
}

#[test]
fn sampled_runs_are_reproducible() {
    let args = ["--model", MODEL, "--quiet", "--sample", "25", "--seed", "9"];
    let first = run_batch(&args, "");
    let second = run_batch(&args, "");
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    let lines = parse_lines(&first);
    assert_eq!(lines.len(), 25);
    for line in &lines {
        assert!(line["input"].is_object());
        assert!(line["g3"].as_u64().unwrap() <= 20);
    }
}

#[test]
fn missing_model_is_fatal() {
    let output = run_batch(&["--model", "/nonexistent/model.json"], "");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}
