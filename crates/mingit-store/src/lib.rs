//! Content-addressed loose object storage.
//!
//! Each object lives at `.git/objects/XX/YYYY...` where `XX` is the first
//! byte of the OID in hex and `YYYY...` is the rest. The file content is
//! zlib-compressed `"<type> <size>\0<payload>"`; the OID is the SHA-1 of the
//! uncompressed form.

mod read;
mod write;

use std::path::{Path, PathBuf};

use mingit_hash::ObjectId;

/// Interface to the loose object directory (`.git/objects/`).
pub struct ObjectStore {
    /// Path to the objects directory.
    objects_dir: PathBuf,
}

impl ObjectStore {
    /// Open the object store at the given objects directory.
    pub fn open(objects_dir: impl AsRef<Path>) -> Self {
        Self {
            objects_dir: objects_dir.as_ref().to_path_buf(),
        }
    }

    /// Get the objects directory path.
    pub fn objects_dir(&self) -> &Path {
        &self.objects_dir
    }

    /// Get the file path for a given OID.
    pub fn object_path(&self, oid: &ObjectId) -> PathBuf {
        self.objects_dir.join(oid.loose_path())
    }
}

/// Errors from loose object operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("corrupt object {oid}: {reason}")]
    Corrupt { oid: String, reason: String },

    #[error("decompression error for {oid}: {source}")]
    Decompress {
        oid: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("object parse error: {0}")]
    Object(#[from] mingit_object::ObjectError),

    #[error("hash error: {0}")]
    Hash(#[from] mingit_hash::HashError),
}
