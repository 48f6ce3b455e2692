use assert_cmd::Command;
use std::fs;
use tempfile::{tempdir, TempDir};

fn burst(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("burst").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn export_without_a_save_fails() {
    let home = tempdir().unwrap();
    let save = home.path().join("save.json");

    burst(&home)
        .args(["--state-file", save.to_str().unwrap(), "migrate", "export"])
        .assert()
        .failure();
}

#[test]
fn import_then_export_round_trips_progress() {
    let home = tempdir().unwrap();
    let source = home.path().join("source.json");
    let target = home.path().join("target.json");
    fs::write(
        &source,
        r#"{"level": 2, "highestLevel": 6, "targetWPM": 60, "targetStreak": 10}"#,
    )
    .unwrap();

    let output = burst(&home)
        .args(["--state-file", source.to_str().unwrap(), "--origin", "https://x.test"])
        .args(["migrate", "export"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let link = String::from_utf8(output.stdout).unwrap().trim().to_string();
    assert!(link.starts_with("https://x.test/migrate?s="));

    let output = burst(&home)
        .args(["--state-file", target.to_str().unwrap(), "migrate", "import", &link])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("level 3, highest level 7"));

    let saved = fs::read_to_string(&target).unwrap();
    assert!(saved.contains(r#""targetStreak":10"#));
}

#[test]
fn import_keeps_existing_progress() {
    let home = tempdir().unwrap();
    let target = home.path().join("target.json");
    fs::write(&target, r#"{"level": 1}"#).unwrap();

    let output = burst(&home)
        .args(["--state-file", target.to_str().unwrap()])
        .args(["migrate", "import", "eyJsZXZlbCI6NX0="])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout).unwrap().contains("existing progress kept"));
    assert_eq!(fs::read_to_string(&target).unwrap(), r#"{"level": 1}"#);
}

#[test]
fn bad_link_is_an_error() {
    let home = tempdir().unwrap();
    let target = home.path().join("target.json");

    burst(&home)
        .args(["--state-file", target.to_str().unwrap()])
        .args(["migrate", "import", "https://x.test/migrate?s=%%%"])
        .assert()
        .failure();
    assert!(!target.exists());
}

#[test]
fn interactive_mode_requires_a_tty() {
    let home = tempdir().unwrap();

    burst(&home).write_stdin("").assert().failure();
}
