use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Ten katakana instrument names — ten phrase tokens, no trailing particles.
const INSTRUMENTS: &str =
    "ギター ピアノ ドラム ベース サックス フルート トランペット バイオリン チェロ ホルン";

/// Two lyric lines — five phrase tokens:
/// 夜空 / をかける / 流星 / きみの / がきこえる (声 is a dropped single).
const NIGHT_SKY: &str = "夜空をかける流星\nきみの声がきこえる";

/// Nine katakana instrument names — one short of the generator's minimum.
const NINE_INSTRUMENTS: &str =
    "ギター ピアノ ドラム ベース サックス フルート トランペット バイオリン チェロ";

fn cutup_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("cutup");
    path
}

fn setup_test_env(lyrics: &[(&str, &str)]) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let data_dir = root.join("data");
    fs::create_dir_all(&data_dir).unwrap();

    let lyrics_dir = root.join("lyrics");
    fs::create_dir_all(&lyrics_dir).unwrap();
    for (name, content) in lyrics {
        fs::write(lyrics_dir.join(name), content).unwrap();
    }

    let config_content = format!(
        r#"[db]
path = "{}/data/lyrics.sqlite"

[lyrics]
dir = "{}/lyrics"
include_globs = ["**/*.txt"]
exclude_globs = []
follow_symlinks = false

[generate]
default_count = 50
max_count = 100

[server]
bind = "127.0.0.1:7700"
"#,
        root.display(),
        root.display()
    );

    let config_path = config_dir.join("cutup.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn default_env() -> (TempDir, PathBuf) {
    setup_test_env(&[("a.txt", INSTRUMENTS), ("b.txt", NIGHT_SKY)])
}

fn run_cutup(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = cutup_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run cutup binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

#[test]
fn test_init_creates_database() {
    let (_tmp, config_path) = default_env();

    let (stdout, stderr, success) = run_cutup(&config_path, &["init"]);
    assert!(success, "init failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("initialized"));
}

#[test]
fn test_init_idempotent() {
    let (_tmp, config_path) = default_env();

    let (_, _, success1) = run_cutup(&config_path, &["init"]);
    assert!(success1, "First init failed");

    let (_, _, success2) = run_cutup(&config_path, &["init"]);
    assert!(success2, "Second init failed (not idempotent)");
}

#[test]
fn test_ingest_counts() {
    let (_tmp, config_path) = default_env();

    run_cutup(&config_path, &["init"]);
    let (stdout, stderr, success) = run_cutup(&config_path, &["ingest"]);
    assert!(success, "ingest failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("files found: 2"));
    assert!(stdout.contains("lyrics stored: 2"));
    assert!(stdout.contains("phrases extracted: 15"));
    assert!(stdout.contains("ok"));
}

#[test]
fn test_ingest_rebuilds_instead_of_appending() {
    let (_tmp, config_path) = default_env();

    run_cutup(&config_path, &["init"]);
    run_cutup(&config_path, &["ingest"]);
    run_cutup(&config_path, &["ingest"]);

    let (stdout, _, success) = run_cutup(&config_path, &["stats"]);
    assert!(success);
    assert!(
        stdout.contains("Phrases:   15"),
        "Expected 15 phrases after double ingest, got: {}",
        stdout
    );
}

#[test]
fn test_ingest_dry_run_writes_nothing() {
    let (_tmp, config_path) = default_env();

    run_cutup(&config_path, &["init"]);
    let (stdout, _, success) = run_cutup(&config_path, &["ingest", "--dry-run"]);
    assert!(success);
    assert!(stdout.contains("dry-run"));
    assert!(stdout.contains("files found: 2"));
    assert!(stdout.contains("estimated phrases: 15"));

    let (stdout, _, _) = run_cutup(&config_path, &["stats"]);
    assert!(
        stdout.contains("Phrases:   0"),
        "Dry run must not populate the phrase bank, got: {}",
        stdout
    );
}

#[test]
fn test_ingest_with_limit() {
    let (_tmp, config_path) = default_env();

    run_cutup(&config_path, &["init"]);
    let (stdout, _, success) = run_cutup(&config_path, &["ingest", "--limit", "1"]);
    assert!(success);
    assert!(stdout.contains("lyrics stored: 1"));
}

#[test]
fn test_generate_returns_requested_count() {
    let (_tmp, config_path) = default_env();

    run_cutup(&config_path, &["init"]);
    run_cutup(&config_path, &["ingest"]);

    let (stdout, stderr, success) =
        run_cutup(&config_path, &["generate", "--count", "7", "--seed", "1", "--json"]);
    assert!(
        success,
        "generate failed: stdout={}, stderr={}",
        stdout, stderr
    );

    let body: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(body["count"], 7);

    let phrases = body["phrases"].as_array().unwrap();
    assert_eq!(phrases.len(), 7);
    for phrase in phrases {
        let text = phrase["text"].as_str().unwrap();
        assert!(!text.is_empty());

        let sources = phrase["sources"].as_array().unwrap();
        assert!((2..=4).contains(&sources.len()));
        for source in sources {
            assert!(!source["word"].as_str().unwrap().is_empty());
            let filename = source["filename"].as_str().unwrap();
            assert!(
                filename == "a.txt" || filename == "b.txt",
                "unexpected source filename: {}",
                filename
            );
        }
    }
}

#[test]
fn test_generate_zero_count() {
    let (_tmp, config_path) = default_env();

    run_cutup(&config_path, &["init"]);
    run_cutup(&config_path, &["ingest"]);

    let (stdout, _, success) =
        run_cutup(&config_path, &["generate", "--count", "0", "--json"]);
    assert!(success);

    let body: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(body["count"], 0);
    assert!(body["phrases"].as_array().unwrap().is_empty());
}

#[test]
fn test_generate_clamps_count_to_max() {
    let (_tmp, config_path) = default_env();

    run_cutup(&config_path, &["init"]);
    run_cutup(&config_path, &["ingest"]);

    let (stdout, _, success) =
        run_cutup(&config_path, &["generate", "--count", "200", "--seed", "1", "--json"]);
    assert!(success);

    let body: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(body["count"], 100, "counts above max_count must be clamped");
}

#[test]
fn test_generate_seeded_runs_are_identical() {
    let (_tmp, config_path) = default_env();

    run_cutup(&config_path, &["init"]);
    run_cutup(&config_path, &["ingest"]);

    let args = ["generate", "--count", "20", "--seed", "42", "--json"];
    let (stdout1, _, _) = run_cutup(&config_path, &args);
    let (stdout2, _, _) = run_cutup(&config_path, &args);
    assert_eq!(
        stdout1, stdout2,
        "Same seed and corpus must reproduce the batch"
    );
}

#[test]
fn test_generate_without_database_fails() {
    let (_tmp, config_path) = default_env();

    let (_, stderr, success) = run_cutup(&config_path, &["generate", "--count", "1"]);
    assert!(!success, "generate without a database should fail");
    assert!(
        stderr.contains("corpus unavailable"),
        "Should report unavailable corpus, got: {}",
        stderr
    );
}

#[test]
fn test_generate_insufficient_corpus() {
    let (_tmp, config_path) = setup_test_env(&[("nine.txt", NINE_INSTRUMENTS)]);

    run_cutup(&config_path, &["init"]);
    let (stdout, _, _) = run_cutup(&config_path, &["ingest"]);
    assert!(stdout.contains("phrases extracted: 9"));

    let (_, stderr, success) = run_cutup(&config_path, &["generate", "--count", "1"]);
    assert!(!success, "9-entry corpus should be rejected");
    assert!(
        stderr.contains("not enough phrases"),
        "Should report insufficient corpus, got: {}",
        stderr
    );
}

#[test]
fn test_generate_succeeds_at_minimum_corpus() {
    let (_tmp, config_path) = setup_test_env(&[("ten.txt", INSTRUMENTS)]);

    run_cutup(&config_path, &["init"]);
    let (stdout, _, _) = run_cutup(&config_path, &["ingest"]);
    assert!(stdout.contains("phrases extracted: 10"));

    let (stdout, stderr, success) =
        run_cutup(&config_path, &["generate", "--count", "3", "--seed", "9", "--json"]);
    assert!(
        success,
        "10-entry corpus should generate: stdout={}, stderr={}",
        stdout, stderr
    );
    let body: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(body["count"], 3);
}

#[test]
fn test_stats_lists_files() {
    let (_tmp, config_path) = default_env();

    run_cutup(&config_path, &["init"]);
    run_cutup(&config_path, &["ingest"]);

    let (stdout, _, success) = run_cutup(&config_path, &["stats"]);
    assert!(success);
    assert!(stdout.contains("Lyrics:    2"));
    assert!(stdout.contains("Phrases:   15"));
    assert!(stdout.contains("a.txt"));
    assert!(stdout.contains("b.txt"));
}

#[test]
fn test_missing_lyrics_dir_fails() {
    let (tmp, config_path) = default_env();

    fs::remove_dir_all(tmp.path().join("lyrics")).unwrap();
    run_cutup(&config_path, &["init"]);

    let (_, stderr, success) = run_cutup(&config_path, &["ingest"]);
    assert!(!success, "ingest without a lyrics directory should fail");
    assert!(
        stderr.contains("does not exist"),
        "Should report missing directory, got: {}",
        stderr
    );
}
