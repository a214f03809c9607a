//! Integration tests for the contacts CLI and library.

use contacts::codec;
use contacts::{Connection, ContactRepository, Error, ImportMapping};
use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};
use tempfile::TempDir;

const ADA: [&str; 8] = [
    "Ada",
    "Lovelace",
    "555-1000",
    "ada@x.io",
    "1 Main St",
    "10001",
    "NYC",
    "1815-12-10",
];

fn run_contacts(args: &[&str], dir: &Path) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_contacts"))
        .current_dir(dir)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute contacts");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let status = output.status.code().unwrap_or(1);

    (stdout, stderr, status)
}

fn add_ada(dir: &Path) {
    let (stdout, _, status) = run_contacts(
        &[
            "add",
            "Ada",
            "Lovelace",
            "--phone",
            "555-1000",
            "--email",
            "ada@x.io",
            "--address",
            "1 Main St",
            "--zip",
            "10001",
            "--town",
            "NYC",
            "--birthday",
            "1815-12-10",
        ],
        dir,
    );
    assert_eq!(status, 0);
    assert_eq!(stdout.trim(), "1");
}

#[test]
fn test_open_creates_database() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    let (stdout, _, status) = run_contacts(&["list"], dir);
    assert_eq!(status, 0);
    assert_eq!(stdout.trim(), "No contacts");
    assert!(dir.join("contacts.sqlite").exists());
}

#[test]
fn test_add_list_show() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    add_ada(dir);

    let (stdout, _, status) = run_contacts(&["list"], dir);
    assert_eq!(status, 0);
    assert!(stdout.contains("First name"));
    assert!(stdout.contains("Lovelace"));

    let (stdout, _, status) = run_contacts(&["list", "--json"], dir);
    assert_eq!(status, 0);
    let rows: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(rows[0]["id"], 1);
    assert_eq!(rows[0]["email"], "ada@x.io");

    let (stdout, _, status) = run_contacts(&["show", "0"], dir);
    assert_eq!(status, 0);
    assert!(stdout.contains("Zip code:   10001"));
}

#[test]
fn test_add_requires_names() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    let (_, stderr, status) = run_contacts(&["add", "Ada", ""], dir);
    assert_ne!(status, 0);
    assert!(stderr.contains("Last name"));
}

#[test]
fn test_delete_needs_confirmation() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    add_ada(dir);

    // No answer on stdin counts as "no".
    let (stdout, _, status) = run_contacts(&["delete", "0"], dir);
    assert_eq!(status, 0);
    assert!(stdout.contains("Cancelled"));

    let (_, _, status) = run_contacts(&["delete", "0", "--yes"], dir);
    assert_eq!(status, 0);

    let (_, stderr, status) = run_contacts(&["delete", "0", "--yes"], dir);
    assert_ne!(status, 0);
    assert!(stderr.contains("No contact at row 0"));
}

#[test]
fn test_export_then_import_by_label() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    fs::create_dir(dir.join("export")).unwrap();
    add_ada(dir);

    let (stdout, _, status) = run_contacts(&["export", "0", "--yes"], dir);
    assert_eq!(status, 0);
    assert!(stdout.trim().ends_with("Lovelace, Ada.md"));

    let exported = dir.join("export").join("Lovelace, Ada.md");
    let (stdout, _, status) = run_contacts(
        &["import", exported.to_str().unwrap(), "--by-label"],
        dir,
    );
    assert_eq!(status, 0);
    assert_eq!(stdout.trim(), "2");
}

#[test]
fn test_export_without_directory_fails() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    add_ada(dir);

    let (_, stderr, status) = run_contacts(&["export", "0", "--yes"], dir);
    assert_ne!(status, 0);
    assert!(stderr.starts_with("Error: IO error"));
}

#[test]
fn test_unwritable_database_path() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    let (_, stderr, status) = run_contacts(&["--db", "missing/dir/book.sqlite", "list"], dir);
    assert_ne!(status, 0);
    assert!(stderr.contains("Database Error"));
}

#[test]
fn test_round_trip_library() {
    let temp = TempDir::new().unwrap();
    let mut repo = ContactRepository::new(Connection::open(temp.path().join("db.sqlite")).unwrap());
    repo.insert(&ADA).unwrap();

    let path = codec::export_position(&mut repo, 0, temp.path(), false).unwrap();
    let imported = codec::import_file(&mut repo, &path, ImportMapping::ByLabel).unwrap();

    let original = repo.retrieve(0).unwrap();
    let copy = repo.retrieve(1).unwrap();
    assert_eq!(imported.id, 2);
    for (i, (a, b)) in original.iter().zip(&copy).enumerate() {
        if i == contacts::Field::Email.index() {
            assert_eq!(b, "");
        } else {
            assert_eq!(a, b);
        }
    }
}

#[test]
fn test_positional_import_of_export_is_rejected() {
    let temp = TempDir::new().unwrap();
    let mut repo = ContactRepository::open_in_memory().unwrap();
    repo.insert(&ADA).unwrap();

    let path = codec::export_position(&mut repo, 0, temp.path(), false).unwrap();
    let err = codec::import_file(&mut repo, &path, ImportMapping::Positional).unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(repo.list().unwrap().len(), 1);
}

#[test]
fn test_insert_list_delete_properties() {
    let mut repo = ContactRepository::open_in_memory().unwrap();
    let before = repo.list().unwrap().len();

    repo.insert(&ADA).unwrap();
    let rows = repo.list().unwrap();
    assert_eq!(rows.len(), before + 1);
    assert_eq!(rows[0].fields(), ADA);
    assert_eq!(repo.retrieve(0).unwrap(), ADA);

    repo.delete(0).unwrap();
    assert!(repo.list().unwrap().is_empty());
    assert!(matches!(repo.retrieve(0), Err(Error::Index { .. })));
}

#[test]
fn test_edge_values_round_trip_through_files() {
    let temp = TempDir::new().unwrap();
    let mut repo = ContactRepository::open_in_memory().unwrap();
    let fields = [
        "\"Ada\"",
        "Lovelace ",
        "  555-1000",
        "ada@x.io",
        "1 Main St\nApt 2",
        "C:\\10001",
        "x\nTown: Evil",
        "'1815-12-10'",
    ];
    repo.insert(&fields).unwrap();

    let path = codec::export_position(&mut repo, 0, temp.path(), true).unwrap();
    codec::import_file(&mut repo, &path, ImportMapping::ByLabel).unwrap();

    assert_eq!(repo.retrieve(1).unwrap(), fields);
}

#[test]
fn test_write_protected_database_is_database_error() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    add_ada(dir);

    let path = dir.join("contacts.sqlite");
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_readonly(true);
    fs::set_permissions(&path, perms).unwrap();
    if fs::OpenOptions::new().write(true).open(&path).is_ok() {
        // Permission bits do not bind this user.
        return;
    }

    let (_, stderr, status) = run_contacts(&["list"], dir);
    assert_ne!(status, 0);
    assert!(stderr.contains("Database Error"), "{stderr}");
}
