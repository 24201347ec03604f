use std::fs;
use std::path::Path;

use bstr::ByteSlice;
use mingit_hash::ObjectId;
use mingit_object::{Object, Tree};
use mingit_store::ObjectStore;

use crate::RepoError;

/// Materialize a commit's tree into `target_dir`.
///
/// Subtrees become directories, blobs become files written with default
/// permissions. Executable entries are written as regular files (mode
/// preservation is out of scope).
pub fn checkout_commit(
    store: &ObjectStore,
    commit_oid: &ObjectId,
    target_dir: &Path,
) -> Result<(), RepoError> {
    let obj = store
        .read(commit_oid)?
        .ok_or_else(|| RepoError::ObjectNotFound(commit_oid.to_hex()))?;

    let commit = match obj {
        Object::Commit(c) => c,
        other => {
            return Err(RepoError::WrongObjectType {
                oid: commit_oid.to_hex(),
                expected: "commit",
                actual: other.object_type().as_str(),
            })
        }
    };

    checkout_tree(store, &commit.tree, target_dir)
}

/// Recursively materialize a tree into `dir`.
fn checkout_tree(store: &ObjectStore, tree_oid: &ObjectId, dir: &Path) -> Result<(), RepoError> {
    fs::create_dir_all(dir)?;

    let obj = store
        .read(tree_oid)?
        .ok_or_else(|| RepoError::ObjectNotFound(tree_oid.to_hex()))?;
    let tree: Tree = match obj {
        Object::Tree(t) => t,
        other => {
            return Err(RepoError::WrongObjectType {
                oid: tree_oid.to_hex(),
                expected: "tree",
                actual: other.object_type().as_str(),
            })
        }
    };

    for entry in tree.iter() {
        let path = dir.join(entry.name.to_str_lossy().as_ref());
        if entry.mode.is_tree() {
            checkout_tree(store, &entry.oid, &path)?;
        } else {
            let obj = store
                .read(&entry.oid)?
                .ok_or_else(|| RepoError::ObjectNotFound(entry.oid.to_hex()))?;
            let blob = match obj {
                Object::Blob(b) => b,
                other => {
                    return Err(RepoError::WrongObjectType {
                        oid: entry.oid.to_hex(),
                        expected: "blob",
                        actual: other.object_type().as_str(),
                    })
                }
            };
            fs::write(&path, &blob.data)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::write_tree;
    use bstr::BString;
    use mingit_object::{Commit, ObjectType, Signature};

    fn store_commit_of(store: &ObjectStore, tree: ObjectId) -> ObjectId {
        let commit = Commit {
            tree,
            parents: Vec::new(),
            author: Signature::placeholder(),
            committer: Signature::placeholder(),
            extra_headers: Vec::new(),
            message: BString::from("checkout test\n"),
        };
        store
            .write_raw(ObjectType::Commit, &commit.serialize_payload())
            .unwrap()
    }

    #[test]
    fn checkout_roundtrips_a_worktree() {
        let src = tempfile::tempdir().unwrap();
        fs::write(src.path().join("a.txt"), "hello\n").unwrap();
        fs::create_dir_all(src.path().join("sub")).unwrap();
        fs::write(src.path().join("sub/b.txt"), "nested content").unwrap();

        let store_dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::open(store_dir.path());
        let tree = write_tree(&store, src.path()).unwrap();
        let commit = store_commit_of(&store, tree);

        let dst = tempfile::tempdir().unwrap();
        checkout_commit(&store, &commit, dst.path()).unwrap();

        assert_eq!(fs::read(dst.path().join("a.txt")).unwrap(), b"hello\n");
        assert_eq!(
            fs::read(dst.path().join("sub/b.txt")).unwrap(),
            b"nested content"
        );
    }

    #[test]
    fn checkout_of_non_commit_fails() {
        let store_dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::open(store_dir.path());
        let blob = store.write_raw(ObjectType::Blob, b"not a commit").unwrap();

        let dst = tempfile::tempdir().unwrap();
        let err = checkout_commit(&store, &blob, dst.path()).unwrap_err();
        assert!(matches!(err, RepoError::WrongObjectType { .. }));
    }

    #[test]
    fn checkout_of_missing_commit_fails() {
        let store_dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::open(store_dir.path());
        let missing = ObjectId::from_hex("0000000000000000000000000000000000000001").unwrap();

        let dst = tempfile::tempdir().unwrap();
        let err = checkout_commit(&store, &missing, dst.path()).unwrap_err();
        assert!(matches!(err, RepoError::ObjectNotFound(_)));
    }

    #[test]
    fn checkout_with_missing_blob_fails() {
        let store_dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::open(store_dir.path());

        // Tree referencing a blob that was never stored.
        let tree = mingit_object::Tree {
            entries: vec![mingit_object::TreeEntry {
                mode: mingit_object::FileMode::Regular,
                name: BString::from("ghost.txt"),
                oid: ObjectId::from_hex("1111111111111111111111111111111111111111").unwrap(),
            }],
        };
        let tree_oid = store
            .write_raw(ObjectType::Tree, &tree.serialize_payload())
            .unwrap();
        let commit = store_commit_of(&store, tree_oid);

        let dst = tempfile::tempdir().unwrap();
        let err = checkout_commit(&store, &commit, dst.path()).unwrap_err();
        assert!(matches!(err, RepoError::ObjectNotFound(_)));
    }
}
