use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use serde_json::Value;

fn chow(dir: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_chow"))
        .arg("--data-dir")
        .arg(dir)
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("CHOW_DATA_DIR")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn init_profile(dir: &Path) {
    let out = chow(
        dir,
        &[
            "profile", "init", "--name", "Sam", "--sex", "M", "--height", "175", "--weight",
            "70", "--age", "30", "--activity", "3",
        ],
        "",
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
}

fn json(out: &Output) -> Value {
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    serde_json::from_slice(&out.stdout).unwrap()
}

#[test]
fn test_today_with_no_entries() {
    let dir = tempfile::tempdir().unwrap();
    init_profile(dir.path());

    let summary = json(&chow(dir.path(), &["today", "--json"], ""));
    assert_eq!(summary["total_calories"].as_f64(), Some(0.0));
    let tdee = summary["tdee"].as_f64().unwrap();
    assert!((tdee - 2547.8125).abs() < 1e-9);
    assert_eq!(summary["delta"].as_f64(), Some(-tdee));
    assert_eq!(summary["entries"].as_array().unwrap().len(), 0);
}

#[test]
fn test_log_known_food() {
    let dir = tempfile::tempdir().unwrap();
    init_profile(dir.path());

    let entry = json(&chow(dir.path(), &["log", "rice", "150", "--json"], ""));
    assert_eq!(entry["food"], "rice");
    assert_eq!(entry["calories"].as_f64(), Some(174.0));

    let log = std::fs::read_to_string(dir.path().join("food_log.csv")).unwrap();
    assert!(log.starts_with("date,food,weight(g),calories\n"));
    assert!(log.contains(",rice,150"));
}

#[test]
fn test_log_unknown_food_fails() {
    let dir = tempfile::tempdir().unwrap();
    init_profile(dir.path());

    let out = chow(dir.path(), &["log", "unicorn", "100"], "");
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("not found"), "{stderr}");

    let log = std::fs::read_to_string(dir.path().join("food_log.csv")).unwrap();
    assert_eq!(log.trim(), "date,food,weight(g),calories");
}

#[test]
fn test_food_add_normalises_name() {
    let dir = tempfile::tempdir().unwrap();
    init_profile(dir.path());

    let out = chow(dir.path(), &["food", "add", "  Rice  ", "--calories", "130"], "");
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Added Rice (130 kcal/100g)"));

    let foods = json(&chow(dir.path(), &["food", "list", "--search", "RICE", "--json"], ""));
    let foods = foods.as_array().unwrap();
    assert_eq!(foods.len(), 1);
    assert_eq!(foods[0]["name"], "rice");
    assert_eq!(foods[0]["calories_per_100g"].as_f64(), Some(130.0));
}

#[test]
fn test_first_run_prompts_for_profile() {
    let dir = tempfile::tempdir().unwrap();
    let out = chow(dir.path(), &[], "Sam\nM\nabc\n175\n70\n30\n3\n5\n6\n");
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("=== Create Your Profile ==="));
    assert!(stderr.contains("Invalid height: 'abc'"));

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Recommended daily intake: 2548 kcal"));
    assert!(stdout.contains("Goodbye!"));

    let profile = std::fs::read_to_string(dir.path().join("user_profile.csv")).unwrap();
    assert!(profile.starts_with("name,sex,height,weight,age,activity_factor\n"));
    assert!(profile.contains("Sam,M,175"));
}

#[test]
fn test_first_run_without_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = chow(dir.path(), &["today"], "");
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Error:"));
    assert!(!dir.path().join("user_profile.csv").exists());
}

#[test]
fn test_trend_json() {
    let dir = tempfile::tempdir().unwrap();
    init_profile(dir.path());

    let trend = json(&chow(dir.path(), &["trend", "--json"], ""));
    assert!(trend["days"].as_array().unwrap().is_empty());

    chow(dir.path(), &["log", "egg", "100"], "");
    chow(dir.path(), &["log", "milk", "250"], "");
    let trend = json(&chow(dir.path(), &["trend", "--json"], ""));
    let days = trend["days"].as_array().unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0]["total_calories"].as_f64(), Some(305.0));
}

#[test]
fn test_corrupt_store_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    init_profile(dir.path());
    std::fs::write(dir.path().join("food_data.csv"), "name,kcal\nrice,oops\n").unwrap();

    let out = chow(dir.path(), &["today"], "");
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Storage error"), "{stderr}");
}
