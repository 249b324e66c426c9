use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("cpx")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("extract"))
        .stdout(predicate::str::contains("mentor"))
        .stdout(predicate::str::contains("ping"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_generate_help_shows_language_and_input() {
    cargo_bin_cmd!("cpx")
        .args(["generate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--language"))
        .stdout(predicate::str::contains("--input"))
        .stdout(predicate::str::contains("--boilerplate"));
}

#[test]
fn test_config_help_shows_subcommands() {
    cargo_bin_cmd!("cpx")
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("path"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("show"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("cpx")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1"));
}

#[test]
fn test_unknown_language_is_rejected() {
    cargo_bin_cmd!("cpx")
        .args(["generate", "--language", "cobol"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown language"));
}

#[test]
fn test_config_path_honors_cpx_home() {
    let home = tempfile::tempdir().unwrap();
    cargo_bin_cmd!("cpx")
        .env("CPX_HOME", home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_writes_the_template() {
    let home = tempfile::tempdir().unwrap();
    cargo_bin_cmd!("cpx")
        .env("CPX_HOME", home.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config"));

    let written = std::fs::read_to_string(home.path().join("config.toml")).unwrap();
    assert!(written.contains("[limits]"));
}

#[test]
fn test_generate_without_credentials_fails_cleanly() {
    let home = tempfile::tempdir().unwrap();
    cargo_bin_cmd!("cpx")
        .env("CPX_HOME", home.path())
        .env("CPX_BLOCK_REAL_API", "1")
        .env_remove("GEMINI_API_KEY")
        .args(["generate", "--language", "c++"])
        .write_stdin("<h1>Two Sum</h1>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No API key available"));
}

#[test]
fn test_mentor_rejects_empty_question() {
    let home = tempfile::tempdir().unwrap();
    cargo_bin_cmd!("cpx")
        .env("CPX_HOME", home.path())
        .env("CPX_BLOCK_REAL_API", "1")
        .args(["mentor", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty question"));
}
