//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn quizforge() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("quizforge").unwrap()
}

const SMALL_BANK: &str = r#"
[topic]
id = "mini"
title = "Mini Topic"

[[questions]]
id = "mini-q1"
type = "trueFalse"
difficulty = "easy"
prompt = "A plateau is a flat, elevated landform."
answer = true
"#;

fn write_bank(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn help_output() {
    quizforge()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Multi-format educational quiz engine"));
}

#[test]
fn version_output() {
    quizforge()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("quizforge"));
}

#[test]
fn validate_small_bank_warns_about_thin_strata() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir, "mini.toml", SMALL_BANK);

    quizforge()
        .arg("validate")
        .arg("--bank")
        .arg(&bank)
        .assert()
        .success()
        .stdout(predicate::str::contains("Mini Topic (1 questions)"))
        .stdout(predicate::str::contains("warning(s) found"));
}

#[test]
fn validate_example_bank_is_clean() {
    let dir = TempDir::new().unwrap();

    quizforge().current_dir(dir.path()).arg("init").assert().success();

    quizforge()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--bank")
        .arg("banks/example.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("Landforms of the Earth (10 questions)"))
        .stdout(predicate::str::contains("All banks valid"));
}

#[test]
fn validate_directory() {
    let dir = TempDir::new().unwrap();
    write_bank(&dir, "a.toml", SMALL_BANK);
    write_bank(
        &dir,
        "b.toml",
        &SMALL_BANK.replace("mini", "other").replace("Mini Topic", "Other Topic"),
    );

    quizforge()
        .arg("validate")
        .arg("--bank")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Mini Topic"))
        .stdout(predicate::str::contains("Other Topic"));
}

#[test]
fn validate_nonexistent_file() {
    quizforge()
        .arg("validate")
        .arg("--bank")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn validate_rejects_malformed_bank() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(
        &dir,
        "broken.toml",
        r#"
[topic]
id = "broken"
title = "Broken"

[[questions]]
id = "q1"
type = "multipleChoice"
difficulty = "easy"
prompt = "Pick one"
options = ["a", "b"]
correct_index = 9
"#,
    );

    quizforge()
        .arg("validate")
        .arg("--bank")
        .arg(&bank)
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    quizforge()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created quizforge.toml"))
        .stdout(predicate::str::contains("Created banks/example.toml"));

    assert!(dir.path().join("quizforge.toml").exists());
    assert!(dir.path().join("banks/example.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    quizforge().current_dir(dir.path()).arg("init").assert().success();

    quizforge()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn ranking_empty_topic() {
    let dir = TempDir::new().unwrap();

    quizforge()
        .arg("ranking")
        .arg("--topic")
        .arg("landforms")
        .arg("--data-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No results yet for topic 'landforms'"));
}

#[test]
fn play_single_question_session_saves_a_ranking() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir, "mini.toml", SMALL_BANK);
    let data_dir = dir.path().join("data");

    // Initials, avatar pick, then the one true/false answer.
    quizforge()
        .arg("play")
        .arg("--bank")
        .arg(&bank)
        .arg("--seed")
        .arg("7")
        .arg("--data-dir")
        .arg(&data_dir)
        .write_stdin("AB\n1\nt\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Correct! Streak: 1"))
        .stdout(predicate::str::contains("1 of 1 correct — 100%"))
        .stdout(predicate::str::contains("You placed #1"));

    quizforge()
        .arg("ranking")
        .arg("--topic")
        .arg("mini")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("AB"))
        .stdout(predicate::str::contains("100%"));
}

#[test]
fn play_rejects_short_initials_and_retries() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir, "mini.toml", SMALL_BANK);
    let data_dir = dir.path().join("data");

    quizforge()
        .arg("play")
        .arg("--bank")
        .arg(&bank)
        .arg("--data-dir")
        .arg(&data_dir)
        .write_stdin("A\n1\nAB\n2\nf\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("initials must be at least 2 characters"))
        .stdout(predicate::str::contains("Incorrect."))
        .stdout(predicate::str::contains("0 of 1 correct — 0%"));
}
