use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_config_path_command() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("booktrack")
        .env("BOOKTRACK_HOME", dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_creates_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    assert!(!config_path.exists());

    cargo_bin_cmd!("booktrack")
        .env("BOOKTRACK_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config at"));

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("api_url ="));
    assert!(contents.contains("default_sort ="));
}

#[test]
fn test_config_init_fails_if_exists() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "# existing config").unwrap();

    cargo_bin_cmd!("booktrack")
        .env("BOOKTRACK_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_set_api_url_keeps_comments() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        "# my server\napi_url = \"http://old.example/api\"\nlog_level = \"debug\"\n",
    )
    .unwrap();

    cargo_bin_cmd!("booktrack")
        .env("BOOKTRACK_HOME", dir.path())
        .args(["config", "set-api-url", "https://books.example.com/api"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://books.example.com/api"));

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("# my server"));
    assert!(contents.contains("api_url = \"https://books.example.com/api\""));
    assert!(contents.contains("log_level = \"debug\""));
}

#[test]
fn test_set_api_url_rejects_non_http() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("booktrack")
        .env("BOOKTRACK_HOME", dir.path())
        .args(["config", "set-api-url", "books.example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("http://"));

    assert!(!dir.path().join("config.toml").exists());
}
