use std::{fs, process::Command};

#[test]
fn cli_writes_a_json_snapshot() {
    let output = std::env::temp_dir().join(format!("colony-cli-{}.json", std::process::id()));

    let status = Command::new(env!("CARGO_BIN_EXE_colony"))
        .args(["--seed", "7", "--ticks", "12", "--speed", "5", "--output"])
        .arg(&output)
        .env("RUST_LOG", "warn")
        .status()
        .expect("failed to launch the colony binary");
    assert!(status.success(), "colony run should succeed");

    let json = fs::read_to_string(&output).expect("snapshot file written");
    let snapshot: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(snapshot["tick"], 12);
    assert_eq!(snapshot["ants"].as_array().map(Vec::len), Some(200));

    let _ = fs::remove_file(&output);
}

#[test]
fn cli_rejects_a_missing_run_file() {
    let status = Command::new(env!("CARGO_BIN_EXE_colony"))
        .args(["--config", "/definitely/not/here.toml", "--ticks", "1"])
        .env("RUST_LOG", "off")
        .status()
        .expect("failed to launch the colony binary");

    assert!(!status.success(), "missing run file must fail");
}
