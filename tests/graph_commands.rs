use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

mod common;

use common::command::{head_commit_id, init_repository_dir, repository_dir, run_wit_command};
use common::file::{FileSpec, write_file};

#[rstest]
fn graph_prints_the_first_parent_chain_as_dot(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first = head_commit_id(dir);

    write_file(FileSpec::new(dir.join("4.txt"), "four".to_string()));
    run_wit_command(dir, &["add", "4.txt"]).assert().success();
    run_wit_command(dir, &["commit", "Add four"]).assert().success();
    let second = head_commit_id(dir);

    run_wit_command(dir, &["graph"])
        .assert()
        .success()
        .stdout(
            predicate::str::starts_with("digraph commits {")
                .and(predicate::str::contains(format!(
                    "\"{}\" -> \"{}\";",
                    first, second
                )))
                .and(predicate::str::contains(format!("\"HEAD\" -> \"{}\";", second)))
                .and(predicate::str::contains(format!(
                    "\"master\" -> \"{}\";",
                    second
                ))),
        );
}

#[rstest]
fn graph_of_a_single_commit_has_no_edges(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let head = head_commit_id(dir);

    run_wit_command(dir, &["graph"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains(format!("\"HEAD\" -> \"{}\";", head))
                .and(predicate::str::contains("->").count(2)),
        );
}

#[rstest]
fn graph_requires_a_commit(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_wit_command(dir, &["init"]).assert().success();

    run_wit_command(dir, &["graph"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("needs at least one commit"));
}
