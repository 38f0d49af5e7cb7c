//! CLI behavior of the `oohtmlc` binary

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("fixture write");
    path
}

#[test]
fn compiles_a_file_to_a_sibling_html_file() {
    let dir = TempDir::new().expect("tempdir");
    write(
        dir.path(),
        "a.oohtml",
        r#"<html><head></head><body><div expose="greeting">Hello</div></body></html>"#,
    );
    let b = write(
        dir.path(),
        "b.oohtml",
        r#"<html><head></head><body><use src="a.oohtml/greeting"></use></body></html>"#,
    );

    let mut cmd = cargo_bin_cmd!("oohtmlc");
    cmd.arg(&b);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("b.html"));

    let html = fs::read_to_string(dir.path().join("b.html")).expect("output");
    assert!(html.contains("<div>Hello</div>"));
    assert!(b.exists());
}

#[test]
fn overwrite_flag_replaces_the_source_file() {
    let dir = TempDir::new().expect("tempdir");
    let page = write(
        dir.path(),
        "page.oohtml",
        r#"<html><head></head><body><use src="g"></use><p expose="g">hi</p></body></html>"#,
    );

    let mut cmd = cargo_bin_cmd!("oohtmlc");
    cmd.arg("--overwrite").arg(&page);
    cmd.assert().success();

    assert!(!dir.path().join("page.html").exists());
    let rewritten = fs::read_to_string(&page).expect("overwritten source");
    assert!(!rewritten.contains("expose"));
    assert!(!rewritten.contains("<use"));
}

#[test]
fn failures_are_reported_on_stderr_with_a_nonzero_exit() {
    let dir = TempDir::new().expect("tempdir");
    write(
        dir.path(),
        "a.oohtml",
        r#"<html><head></head><body><div expose="greeting">Hello</div></body></html>"#,
    );
    let b = write(
        dir.path(),
        "b.oohtml",
        r#"<html><head></head><body><use src="a.oohtml/farewell"></use></body></html>"#,
    );

    let mut cmd = cargo_bin_cmd!("oohtmlc");
    cmd.arg(&b);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No block named 'farewell'"));
    assert!(!dir.path().join("b.html").exists());
}

#[test]
fn directories_are_walked_for_dialect_files() {
    let dir = TempDir::new().expect("tempdir");
    write(
        dir.path(),
        "one.oohtml",
        "<html><head></head><body><p>1</p></body></html>",
    );
    write(
        dir.path(),
        "two.oohtml",
        "<html><head></head><body><p>2</p></body></html>",
    );
    write(dir.path(), "notes.txt", "ignored");

    let mut cmd = cargo_bin_cmd!("oohtmlc");
    cmd.arg(dir.path());
    cmd.assert().success();

    assert!(dir.path().join("one.html").exists());
    assert!(dir.path().join("two.html").exists());
    assert!(!dir.path().join("notes.html").exists());
}

#[test]
fn a_config_file_can_change_the_output_extension() {
    let dir = TempDir::new().expect("tempdir");
    let page = write(
        dir.path(),
        "page.oohtml",
        "<html><head></head><body></body></html>",
    );
    let config = write(dir.path(), "oohtml.toml", "[output]\nextension = \"htm\"\n");

    let mut cmd = cargo_bin_cmd!("oohtmlc");
    cmd.arg("--config").arg(&config).arg(&page);
    cmd.assert().success();

    assert!(dir.path().join("page.htm").exists());
    assert!(!dir.path().join("page.html").exists());
}

#[test]
fn extension_flag_wins_over_a_config_file() {
    let dir = TempDir::new().expect("tempdir");
    let page = write(
        dir.path(),
        "page.oohtml",
        "<html><head></head><body></body></html>",
    );
    let config = write(dir.path(), "oohtml.toml", "[output]\nextension = \"htm\"\n");

    let mut cmd = cargo_bin_cmd!("oohtmlc");
    cmd.arg("--config")
        .arg(&config)
        .arg("--extension")
        .arg("xhtml")
        .arg(&page);
    cmd.assert().success();

    // Defaults, then the user file, then the flag: the flag has the last word.
    assert!(dir.path().join("page.xhtml").exists());
    assert!(!dir.path().join("page.htm").exists());
    assert!(!dir.path().join("page.html").exists());
}

#[test]
fn running_without_arguments_shows_help() {
    let mut cmd = cargo_bin_cmd!("oohtmlc");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
