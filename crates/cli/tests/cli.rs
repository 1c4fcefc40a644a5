//! Smoke tests for the bookstore command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn bookstore() -> Command {
    let mut cmd = Command::cargo_bin("bookstore").unwrap();
    cmd.env("BOOKSTORE_CONFIG_DIR", "does-not-exist")
        .env("BOOKSTORE_DATABASE__URL", "memory://")
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    bookstore()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("migrate"))
        .stdout(predicate::str::contains("categories"));
}

#[test]
fn test_books_help() {
    bookstore()
        .arg("books")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Only books in this exact category"));
}

#[test]
fn test_books_on_empty_store() {
    bookstore()
        .arg("books")
        .assert()
        .success()
        .stdout(predicate::str::contains("no books"));
}

#[test]
fn test_categories_on_empty_store() {
    bookstore()
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("no categories"));
}

#[test]
fn test_migrate_on_memory_store() {
    bookstore()
        .arg("migrate")
        .assert()
        .success()
        .stdout(predicate::str::contains("applied 0 migration(s)"));
}

#[test]
fn test_unknown_database_scheme_fails() {
    bookstore()
        .env("BOOKSTORE_DATABASE__URL", "mongodb://localhost/bookstore")
        .arg("categories")
        .assert()
        .failure();
}

#[test]
fn test_search_conflicts_with_category() {
    bookstore()
        .args(["books", "--category", "Sci-Fi", "--search", "dune"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}
