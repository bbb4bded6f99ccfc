use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;

use common::command::{
    commit_parents, head_commit_id, init_repository_dir, read_reference, repository_dir,
    run_wit_command, snapshot_path, stage_all,
};
use common::file::{FileSpec, write_file};

#[rstest]
fn first_commit_bootstraps_head_and_master(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let head = head_commit_id(dir);

    assert_eq!(head.len(), 40);
    assert!(head.chars().all(|c| c.is_ascii_hexdigit() && !c.is_uppercase()));
    assert_eq!(read_reference(dir, "master"), Some(head.clone()));
    assert_eq!(commit_parents(dir, &head), Vec::<String>::new());
}

#[rstest]
fn snapshot_preserves_nested_content(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let snapshot = snapshot_path(dir, &head_commit_id(dir));

    assert_eq!(std::fs::read_to_string(snapshot.join("1.txt")).unwrap(), "one");
    assert_eq!(
        std::fs::read_to_string(snapshot.join("a").join("2.txt")).unwrap(),
        "two"
    );
    assert_eq!(
        std::fs::read_to_string(snapshot.join("a").join("b").join("3.txt")).unwrap(),
        "three"
    );
    // the metadata root never leaks into a snapshot
    assert!(!snapshot.join(".wit").exists());
}

#[rstest]
fn second_commit_records_the_first_as_parent(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first = head_commit_id(dir);

    write_file(FileSpec::new(dir.join("4.txt"), "four".to_string()));
    run_wit_command(dir, &["add", "4.txt"]).assert().success();
    run_wit_command(dir, &["commit", "Add four"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\[[0-9a-f]{7}\] Add four").unwrap());

    let second = head_commit_id(dir);
    assert_ne!(second, first);
    assert_eq!(commit_parents(dir, &second), vec![first]);
    assert_eq!(read_reference(dir, "master"), Some(second));
}

#[rstest]
fn committing_an_unchanged_staging_area_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let head = head_commit_id(dir);

    run_wit_command(dir, &["commit", "Nothing new"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no changes were made since the last commit"));

    assert_eq!(head_commit_id(dir), head);
}

#[rstest]
fn commit_without_staged_files_snapshots_an_empty_tree(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_wit_command(dir, &["init"]).assert().success();

    run_wit_command(dir, &["commit", "Empty start"])
        .assert()
        .success();

    let snapshot = snapshot_path(dir, &head_commit_id(dir));
    assert!(snapshot.is_dir());
    assert_eq!(std::fs::read_dir(&snapshot).unwrap().count(), 0);
}

#[rstest]
fn staged_directory_replaces_earlier_staged_tree(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    // rebuild `a` with a different shape and restage the whole directory
    std::fs::remove_dir_all(dir.join("a").join("b")).unwrap();
    write_file(FileSpec::new(dir.join("a").join("2.txt"), "two v2".to_string()));
    run_wit_command(dir, &["add", "a"]).assert().success();
    run_wit_command(dir, &["commit", "Reshape a"]).assert().success();

    let snapshot = snapshot_path(dir, &head_commit_id(dir));
    assert_eq!(
        std::fs::read_to_string(snapshot.join("a").join("2.txt")).unwrap(),
        "two v2"
    );
    assert!(!snapshot.join("a").join("b").exists());
}

#[rstest]
fn staging_from_a_subdirectory_mirrors_the_full_relative_path(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    write_file(FileSpec::new(dir.join("a").join("4.txt"), "four".to_string()));
    run_wit_command(&dir.join("a"), &["add", "4.txt"])
        .assert()
        .success();
    run_wit_command(dir, &["commit", "Add a/4"]).assert().success();

    let snapshot = snapshot_path(dir, &head_commit_id(dir));
    assert_eq!(
        std::fs::read_to_string(snapshot.join("a").join("4.txt")).unwrap(),
        "four"
    );
}

#[rstest]
fn remove_unstages_without_touching_the_working_tree(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_wit_command(dir, &["remove", "1.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 1.txt"));

    assert!(dir.join("1.txt").exists());
    assert!(!dir.join(".wit").join("staging_area").join("1.txt").exists());
}

#[rstest]
fn removing_an_unstaged_path_fails(init_repository_dir: TempDir) {
    run_wit_command(init_repository_dir.path(), &["remove", "ghost.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'ghost.txt' was not found"));
}

#[rstest]
fn generated_files_round_trip_through_a_commit(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_wit_command(dir, &["init"]).assert().success();

    let specs = common::file::write_generated_files(dir, 5);
    stage_all(dir);
    run_wit_command(dir, &["commit", "Generated batch"])
        .assert()
        .success();

    let snapshot = snapshot_path(dir, &head_commit_id(dir));
    for spec in specs {
        let relative = spec.path.strip_prefix(dir).unwrap();
        assert_eq!(
            std::fs::read_to_string(snapshot.join(relative)).unwrap(),
            spec.content
        );
    }
}
