//! Running stand-in TreeTagger scripts end to end.
#![cfg(unix)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use treetagger::config::load_defaults;
use treetagger::{Error, TaggedToken, TreeTagger, TreeTaggerChunker};

/// Install an executable `name` into `dir` that runs `body` after draining stdin.
fn install_script(dir: &Path, name: &str, body: &str) {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\ncat > /dev/null\n{body}\n")).unwrap();
    let mut permissions = fs::metadata(&path).unwrap().permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(&path, permissions).unwrap();
}

fn home_with(name: &str, body: &str) -> TempDir {
    let home = tempfile::tempdir().unwrap();
    install_script(home.path(), name, body);
    home
}

const CHUNKER_OUTPUT: &str =
    r"printf '<NC>\nWhat\tWP\twhat\n</NC>\n<VC>\nis\tVBZ\tbe\n</VC>\n?\tSENT\t?\n'";

#[test]
fn chunker_runs_configured_script() {
    let home = home_with("tagger-chunker-english", CHUNKER_OUTPUT);
    let mut config = load_defaults().unwrap().tagger;
    config.home = Some(home.path().to_path_buf());

    let chunker = TreeTaggerChunker::from_config(&config).unwrap();
    let tree = chunker
        .parse(&[TaggedToken::new("What", "WP"), TaggedToken::new("is", "VBZ")])
        .unwrap();
    assert_eq!(tree.to_string(), "(ROOT (NC (What WP)) (VC (is VBZ)))");
}

#[test]
fn tagger_runs_configured_script() {
    let home = home_with(
        "tree-tagger-german",
        r"printf 'Der\tART\tdie\nHund\tNN\tHund\n'",
    );
    let mut config = load_defaults().unwrap().tagger;
    config.language = "german".parse().unwrap();
    config.home = Some(home.path().to_path_buf());

    let tokens = TreeTagger::from_config(&config)
        .unwrap()
        .tag("Der Hund")
        .unwrap();
    assert_eq!(
        tokens,
        vec![
            TaggedToken::new("Der", "ART").with_lemma("die"),
            TaggedToken::new("Hund", "NN").with_lemma("Hund"),
        ]
    );
}

#[test]
fn failing_script_reports_exit_status() {
    let home = home_with("tagger-chunker-english", "echo 'parameter file missing' >&2\nexit 2");
    let mut config = load_defaults().unwrap().tagger;
    config.home = Some(home.path().to_path_buf());

    let chunker = TreeTaggerChunker::from_config(&config).unwrap();
    match chunker.parse_text("What is") {
        Err(Error::ProcessExecution { status, stderr, .. }) => {
            assert_eq!(status, "exit code 2");
            assert_eq!(stderr, "parameter file missing");
        }
        other => panic!("Expected ProcessExecution, got {other:?}"),
    }
}

#[test]
fn silent_script_is_empty_result() {
    let home = home_with("tagger-chunker-english", "exit 0");
    let mut config = load_defaults().unwrap().tagger;
    config.home = Some(home.path().to_path_buf());

    let chunker = TreeTaggerChunker::from_config(&config).unwrap();
    assert!(matches!(
        chunker.parse_text("What is"),
        Err(Error::EmptyResult { .. })
    ));
}

#[test]
fn slow_script_times_out() {
    let home = home_with("tagger-chunker-english", "exec sleep 10");
    let mut config = load_defaults().unwrap().tagger;
    config.home = Some(home.path().to_path_buf());
    config.timeout_secs = 1;

    let chunker = TreeTaggerChunker::from_config(&config).unwrap();
    match chunker.parse_text("What is") {
        Err(Error::ProcessTimeout { after, .. }) => assert_eq!(after, Duration::from_secs(1)),
        other => panic!("Expected ProcessTimeout, got {other:?}"),
    }
}

#[test]
fn missing_abbreviation_list_is_not_passed() {
    let home = home_with("tagger-chunker-english", "exit 0");
    let mut config = load_defaults().unwrap().tagger;
    config.home = Some(home.path().to_path_buf());
    config.abbreviation_list = Some("/nonexistent/abbreviations".into());

    let chunker = TreeTaggerChunker::from_config(&config).unwrap();
    assert!(chunker.backend().args().is_empty());
}

#[test]
fn existing_abbreviation_list_is_passed() {
    let home = home_with("tagger-chunker-english", "exit 0");
    let list = home.path().join("english-abbreviations");
    fs::write(&list, "Mr.\nDr.\n").unwrap();
    let mut config = load_defaults().unwrap().tagger;
    config.home = Some(home.path().to_path_buf());
    config.abbreviation_list = Some(list.clone());

    let chunker = TreeTaggerChunker::from_config(&config).unwrap();
    assert_eq!(
        chunker.backend().args(),
        &["-a".into(), list.into_os_string()]
    );
}

#[test]
fn cli_chunks_text_with_home_override() {
    let home = home_with("tagger-chunker-english", CHUNKER_OUTPUT);

    let mut cmd = cargo_bin_cmd!("treetagger");
    cmd.arg("--home")
        .arg(home.path())
        .arg("chunk")
        .arg("What")
        .arg("is");

    cmd.assert()
        .success()
        .stdout("(ROOT (NC (What WP)) (VC (is VBZ)))\n");
}

#[test]
fn cli_tags_stdin() {
    let home = home_with("tree-tagger-english", r"printf 'What\tWP\twhat\n'");

    let mut cmd = cargo_bin_cmd!("treetagger");
    cmd.arg("tag")
        .arg("--home")
        .arg(home.path())
        .write_stdin("What");

    cmd.assert().success().stdout("What\tWP\twhat\n");
}

#[test]
fn cli_reports_missing_script() {
    let home = tempfile::tempdir().unwrap();

    let mut cmd = cargo_bin_cmd!("treetagger");
    cmd.arg("chunk")
        .arg("--language")
        .arg("slovak2")
        .arg("--home")
        .arg(home.path())
        .arg("hello");

    cmd.assert().failure().code(1).stderr(
        predicate::str::contains("could not launch `tagger-chunker-slovak2`")
            .and(predicate::str::contains("searched:")),
    );
}
