use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::{Path, PathBuf};

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("failed to create temp dir")
}

/// A repository with one commit holding `1.txt`, `a/2.txt` and `a/b/3.txt`
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_wit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("b").join("3.txt"),
        "three".to_string(),
    ));

    stage_all(repository_dir.path());
    run_wit_command(repository_dir.path(), &["commit", "Initial commit"])
        .assert()
        .success();

    repository_dir
}

pub fn run_wit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("wit").expect("failed to find wit binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn stage_all(dir: &Path) {
    run_wit_command(dir, &["add", "."]).assert().success();
}

/// Look up a name in `references.txt`; `None` before the first commit
pub fn read_reference(dir: &Path, name: &str) -> Option<String> {
    let content = std::fs::read_to_string(dir.join(".wit").join("references.txt")).ok()?;

    content
        .lines()
        .find_map(|line| line.strip_prefix(&format!("{}=", name)))
        .map(str::to_string)
}

pub fn head_commit_id(dir: &Path) -> String {
    read_reference(dir, "HEAD").expect("repository has no HEAD reference")
}

pub fn active_branch(dir: &Path) -> String {
    std::fs::read_to_string(dir.join(".wit").join("activated.txt"))
        .expect("repository has no active branch file")
        .trim()
        .to_string()
}

pub fn snapshot_path(dir: &Path, commit_id: &str) -> PathBuf {
    dir.join(".wit").join("images").join(commit_id)
}

/// Parent ids recorded for a commit, in on-disk order
pub fn commit_parents(dir: &Path, commit_id: &str) -> Vec<String> {
    let record_path = dir
        .join(".wit")
        .join("images")
        .join(format!("{}.txt", commit_id));
    let record = std::fs::read_to_string(record_path).expect("missing commit record");

    let raw = record
        .lines()
        .next()
        .and_then(|line| line.strip_prefix("parent="))
        .expect("malformed commit record");

    if raw == "none" {
        Vec::new()
    } else {
        raw.split(", ").map(str::to_string).collect()
    }
}
