use std::fs;
use std::path::Path;

use bstr::BString;
use mingit_hash::ObjectId;
use mingit_object::{FileMode, ObjectType, Tree, TreeEntry};
use mingit_store::ObjectStore;

use crate::RepoError;

/// Recursively store a directory as tree objects. Returns the root tree's
/// OID.
///
/// Files become `100644` blobs, directories become `40000` subtrees.
/// Entries named `.git` are skipped at every level.
pub fn write_tree(store: &ObjectStore, dir: &Path) -> Result<ObjectId, RepoError> {
    let mut entries = Vec::new();

    let mut dir_entries: Vec<_> = fs::read_dir(dir)?.collect::<Result<_, _>>()?;
    dir_entries.sort_by_key(|e| e.file_name());

    for dir_entry in dir_entries {
        let name = dir_entry.file_name();
        if name == ".git" {
            continue;
        }
        let name = BString::from(name.to_string_lossy().as_bytes());
        let path = dir_entry.path();
        let file_type = dir_entry.file_type()?;

        if file_type.is_dir() {
            let oid = write_tree(store, &path)?;
            entries.push(TreeEntry {
                mode: FileMode::Tree,
                name,
                oid,
            });
        } else if file_type.is_file() {
            let content = fs::read(&path)?;
            let oid = store.write_raw(ObjectType::Blob, &content)?;
            entries.push(TreeEntry {
                mode: FileMode::Regular,
                name,
                oid,
            });
        }
        // Anything else (sockets, symlinks, ...) is out of scope.
    }

    let tree = Tree { entries };
    Ok(store.write_raw(ObjectType::Tree, &tree.serialize_payload())?)
}
