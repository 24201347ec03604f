//! Integration tests for the plumbing commands.

mod common;

use std::fs;

use common::{deflate, inflate, mingit, object_path};

const HELLO_BLOB: &str = "ce013625030ba8dba906f756967f9e9ca394464a";
const HELLO_TREE: &str = "2e81171448eb9f2ee3821e3d447aa6b2fe3ddba1";
const HELLO_COMMIT: &str = "56f73adfa80698f8c335814be2b406af042956be";

#[test]
fn init_creates_skeleton() {
    let dir = tempfile::tempdir().unwrap();
    let result = mingit(dir.path(), &["init"]);

    assert_eq!(result.exit_code, 0, "stderr: {}", result.stderr);
    assert!(dir.path().join(".git/objects").is_dir());
    assert!(dir.path().join(".git/refs").is_dir());
    assert_eq!(
        fs::read_to_string(dir.path().join(".git/HEAD")).unwrap(),
        "ref: refs/heads/main\n"
    );
}

#[test]
fn cat_file_prints_planted_blob() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(mingit(dir.path(), &["init"]).exit_code, 0);

    // Plant the precomputed object for "hello\n" by hand.
    let path = object_path(dir.path(), HELLO_BLOB);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, deflate(b"blob 6\0hello\n")).unwrap();

    let result = mingit(dir.path(), &["cat-file", "-p", HELLO_BLOB]);
    assert_eq!(result.exit_code, 0, "stderr: {}", result.stderr);
    assert_eq!(result.stdout, b"hello\n");
}

#[test]
fn cat_file_type_and_size() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(mingit(dir.path(), &["init"]).exit_code, 0);

    let path = object_path(dir.path(), HELLO_BLOB);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, deflate(b"blob 6\0hello\n")).unwrap();

    let result = mingit(dir.path(), &["cat-file", "-t", HELLO_BLOB]);
    assert_eq!(result.stdout_str(), "blob\n");

    let result = mingit(dir.path(), &["cat-file", "-s", HELLO_BLOB]);
    assert_eq!(result.stdout_str(), "6\n");
}

#[test]
fn cat_file_missing_object_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(mingit(dir.path(), &["init"]).exit_code, 0);

    let result = mingit(
        dir.path(),
        &["cat-file", "-p", "0000000000000000000000000000000000000001"],
    );
    assert_ne!(result.exit_code, 0);
    assert!(result.stderr.contains("fatal:"), "stderr: {}", result.stderr);
}

#[test]
fn hash_object_writes_and_prints_digest() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(mingit(dir.path(), &["init"]).exit_code, 0);
    fs::write(dir.path().join("a.txt"), "hello\n").unwrap();

    let result = mingit(dir.path(), &["hash-object", "-w", "a.txt"]);
    assert_eq!(result.exit_code, 0, "stderr: {}", result.stderr);
    assert_eq!(result.stdout_str(), format!("{HELLO_BLOB}\n"));

    // The object file exists and inflates to the typed form.
    let stored = fs::read(object_path(dir.path(), HELLO_BLOB)).unwrap();
    assert_eq!(inflate(&stored), b"blob 6\0hello\n");
}

#[test]
fn hash_object_without_write_leaves_store_empty() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(mingit(dir.path(), &["init"]).exit_code, 0);
    fs::write(dir.path().join("a.txt"), "hello\n").unwrap();

    let result = mingit(dir.path(), &["hash-object", "a.txt"]);
    assert_eq!(result.exit_code, 0);
    assert_eq!(result.stdout_str(), format!("{HELLO_BLOB}\n"));
    assert!(!object_path(dir.path(), HELLO_BLOB).exists());
}

#[test]
fn write_tree_matches_reference_hash() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(mingit(dir.path(), &["init"]).exit_code, 0);
    fs::write(dir.path().join("a.txt"), "hello\n").unwrap();

    let result = mingit(dir.path(), &["write-tree"]);
    assert_eq!(result.exit_code, 0, "stderr: {}", result.stderr);
    assert_eq!(result.stdout_str(), format!("{HELLO_TREE}\n"));
}

#[test]
fn ls_tree_name_only_lists_entries() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(mingit(dir.path(), &["init"]).exit_code, 0);
    fs::write(dir.path().join("b.txt"), "two").unwrap();
    fs::write(dir.path().join("a.txt"), "one").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub/c.txt"), "three").unwrap();

    let tree = mingit(dir.path(), &["write-tree"]);
    let tree_hex = tree.stdout_str().trim().to_string();

    let result = mingit(dir.path(), &["ls-tree", "--name-only", &tree_hex]);
    assert_eq!(result.exit_code, 0, "stderr: {}", result.stderr);
    assert_eq!(result.stdout_str(), "a.txt\nb.txt\nsub\n");
}

#[test]
fn commit_tree_produces_stable_hash() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(mingit(dir.path(), &["init"]).exit_code, 0);
    fs::write(dir.path().join("a.txt"), "hello\n").unwrap();

    let tree = mingit(dir.path(), &["write-tree"]);
    let tree_hex = tree.stdout_str().trim().to_string();
    assert_eq!(tree_hex, HELLO_TREE);

    // The fixed placeholder signature makes the hash reproducible.
    let result = mingit(dir.path(), &["commit-tree", &tree_hex, "-m", "m"]);
    assert_eq!(result.exit_code, 0, "stderr: {}", result.stderr);
    assert_eq!(result.stdout_str(), format!("{HELLO_COMMIT}\n"));
}

#[test]
fn commit_tree_with_parent_links_history() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(mingit(dir.path(), &["init"]).exit_code, 0);
    fs::write(dir.path().join("a.txt"), "hello\n").unwrap();

    let tree_hex = mingit(dir.path(), &["write-tree"]).stdout_str().trim().to_string();
    let first = mingit(dir.path(), &["commit-tree", &tree_hex, "-m", "one"])
        .stdout_str()
        .trim()
        .to_string();

    let second = mingit(
        dir.path(),
        &["commit-tree", &tree_hex, "-p", &first, "-m", "two"],
    );
    assert_eq!(second.exit_code, 0);
    let second_hex = second.stdout_str().trim().to_string();
    assert_ne!(second_hex, first);

    // The stored commit names its parent.
    let stored = fs::read(object_path(dir.path(), &second_hex)).unwrap();
    let payload = inflate(&stored);
    let text = String::from_utf8_lossy(&payload);
    assert!(text.contains(&format!("parent {first}")));
}

#[test]
fn commit_tree_rejects_missing_tree() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(mingit(dir.path(), &["init"]).exit_code, 0);

    let result = mingit(
        dir.path(),
        &[
            "commit-tree",
            "0000000000000000000000000000000000000001",
            "-m",
            "m",
        ],
    );
    assert_ne!(result.exit_code, 0);
    assert!(result.stderr.contains("fatal:"));
}

#[test]
fn commands_outside_a_repository_fail() {
    let dir = tempfile::tempdir().unwrap();
    let result = mingit(dir.path(), &["write-tree"]);
    assert_ne!(result.exit_code, 0);
    assert!(result.stderr.contains("not a git repository"));
}
