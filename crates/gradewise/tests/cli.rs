//! End-to-end CLI integration tests
//!
//! These tests invoke the compiled binary as a subprocess to verify
//! that the CLI behaves correctly from a user's perspective.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const EXAMPLE: &str = "The cat sat. This extraordinarily protracted circumlocutory \
    sentence contains considerably more than eighteen individual lexical tokens \
    and should absolutely be classified as excessively difficult.";

/// Returns a Command configured to run our binary.
///
/// Note: `cargo_bin` is marked deprecated for edge cases involving custom
/// cargo build directories, but works correctly for standard project layouts.
#[allow(deprecated)]
fn cmd() -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.env_remove("GRADEWISE_TARGET_GRADE");
    cmd
}

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("failed to run command");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("invalid JSON output")
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_lists_commands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("annotate"))
        .stdout(predicate::str::contains("watch"));
}

#[test]
fn long_help_lists_environment() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("GRADEWISE_TARGET_GRADE"));
}

#[test]
fn version_only_prints_bare_version() {
    cmd()
        .arg("--version-only")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "{}\n",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn no_arguments_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

// =============================================================================
// Info & Global Flags
// =============================================================================

#[test]
fn info_json_reports_package_and_config() {
    let json = stdout_json(cmd().args(["info", "--json"]));
    assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["config"]["target_grade"], 8);
}

#[test]
fn global_flags_accepted() {
    cmd().args(["-q", "info"]).assert().success();
    cmd().args(["-vv", "info"]).assert().success();
    cmd().args(["--color", "never", "info"]).assert().success();
}

// =============================================================================
// Annotate
// =============================================================================

#[test]
fn annotate_json_marks_red_sentence_and_words() {
    let tmp = TempDir::new().unwrap();
    let file = write(&tmp, "draft.txt", EXAMPLE);

    let json = stdout_json(cmd().args(["annotate", file.to_str().unwrap(), "-g", "6", "--json"]));
    assert_eq!(json["revision"], 0);

    let annotations = json["annotations"].as_array().unwrap();
    let first = &annotations[0];
    assert_eq!(first["kind"], "sentence");
    assert_eq!(first["tag"], "red");
    assert_eq!(first["from"], "The cat sat. ".len());
    assert_eq!(first["to"], EXAMPLE.len());
    assert!(annotations.iter().skip(1).all(|a| a["kind"] == "word"));
    assert!(annotations.len() > 3);
}

#[test]
fn annotate_text_prints_summary() {
    let tmp = TempDir::new().unwrap();
    let file = write(&tmp, "draft.txt", EXAMPLE);

    cmd()
        .args(["annotate", file.to_str().unwrap(), "-g", "6"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 red, 0 yellow, 0 blue sentences"));
}

#[test]
fn annotate_without_hard_words_keeps_sentences() {
    let tmp = TempDir::new().unwrap();
    let file = write(&tmp, "draft.txt", EXAMPLE);

    let json = stdout_json(cmd().args([
        "annotate",
        file.to_str().unwrap(),
        "--no-hard-words",
        "--json",
    ]));
    let annotations = json["annotations"].as_array().unwrap();
    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0]["kind"], "sentence");
}

#[test]
fn annotate_markdown_offsets_point_into_source() {
    let tmp = TempDir::new().unwrap();
    let source = "# Notes\n\nWe utilize it.\n";
    let file = write(&tmp, "notes.md", source);

    let json = stdout_json(cmd().args(["annotate", file.to_str().unwrap(), "-g", "6", "--json"]));
    let word = &json["annotations"][0];
    assert_eq!(word["kind"], "word");
    let from = usize::try_from(word["from"].as_u64().unwrap()).unwrap();
    let to = usize::try_from(word["to"].as_u64().unwrap()).unwrap();
    assert_eq!(&source[from..to], "utilize");
}

#[test]
fn annotate_json_snapshot_keeps_revision() {
    let tmp = TempDir::new().unwrap();
    let file = write(
        &tmp,
        "snapshot.json",
        r#"{"revision": 7, "blocks": [{"text": "We utilize it.", "offset": 40}]}"#,
    );

    let json = stdout_json(cmd().args(["annotate", file.to_str().unwrap(), "-g", "6", "--json"]));
    assert_eq!(json["revision"], 7);
    assert_eq!(json["annotations"][0]["from"], 43);
    assert_eq!(json["annotations"][0]["to"], 50);
}

#[test]
fn annotate_json_snapshot_with_huge_offset_fails_cleanly() {
    let tmp = TempDir::new().unwrap();
    let file = write(
        &tmp,
        "snapshot.json",
        r#"{"blocks": [{"text": "Hello there.", "offset": 18446744073709551613}]}"#,
    );

    cmd()
        .args(["annotate", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("addressable range"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn annotate_uses_easy_word_file() {
    let tmp = TempDir::new().unwrap();
    let file = write(&tmp, "draft.txt", "We utilize it.");
    let easy = write(&tmp, "easy.json", r#"["utilize"]"#);

    let json = stdout_json(cmd().args([
        "annotate",
        file.to_str().unwrap(),
        "-g",
        "6",
        "--easy-words",
        easy.to_str().unwrap(),
        "--json",
    ]));
    assert!(json["annotations"].as_array().unwrap().is_empty());
}

#[test]
fn annotate_rejects_oversized_input() {
    let tmp = TempDir::new().unwrap();
    let file = write(&tmp, "draft.txt", EXAMPLE);

    cmd()
        .env("GRADEWISE_MAX_INPUT_BYTES", "16")
        .args(["annotate", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input too large"));
}

#[test]
fn annotate_missing_file_fails() {
    cmd()
        .args(["annotate", "/definitely/not/here.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

// =============================================================================
// Score
// =============================================================================

#[test]
fn score_json_reports_counts() {
    let tmp = TempDir::new().unwrap();
    let file = write(&tmp, "easy.txt", "The cat sat on the mat. The dog ran fast.");

    let json = stdout_json(cmd().args(["score", file.to_str().unwrap(), "--json"]));
    assert_eq!(json["sentences"], 2);
    assert_eq!(json["words"], 10);
    assert_eq!(json["over_max"], false);
}

#[test]
fn score_fails_over_max_grade() {
    let tmp = TempDir::new().unwrap();
    let file = write(&tmp, "hard.txt", EXAMPLE);

    cmd()
        .args(["score", file.to_str().unwrap(), "--max-grade", "8"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("max: 8.0"));
}

#[test]
fn score_passes_under_max_grade() {
    let tmp = TempDir::new().unwrap();
    let file = write(&tmp, "easy.txt", "The cat sat on the mat.");

    cmd()
        .args(["score", file.to_str().unwrap(), "--max-grade", "8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PASS:"));
}

// =============================================================================
// Sentence & Word
// =============================================================================

#[test]
fn sentence_json_tags_long_sentence() {
    let text = "one two three four five six seven eight nine ten eleven twelve \
                thirteen fourteen fifteen sixteen seventeen eighteen nineteen twenty";
    let json = stdout_json(cmd().args(["sentence", "-g", "10", "--json", text]));
    assert_eq!(json["word_count"], 20);
    assert_eq!(json["tag"], "yellow");
    assert!(json["tooltip"].as_str().unwrap().contains("20 words"));
}

#[test]
fn sentence_short_is_not_flagged() {
    cmd()
        .args(["sentence", "The cat sat."])
        .assert()
        .success()
        .stdout(predicate::str::contains("no flag"));
}

#[test]
fn word_suggests_simpler_replacement() {
    let json = stdout_json(cmd().args(["word", "utilize", "-g", "6", "--json"]));
    assert_eq!(json["verdict"], "hard");
    assert_eq!(json["suggestion"], "use");
    assert_eq!(json["threshold"], 3);
}

#[test]
fn word_rejects_unknown_grade() {
    cmd()
        .args(["word", "utilize", "-g", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
