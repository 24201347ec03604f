//! Repository handling: the `.git` skeleton, writing a worktree as tree
//! objects, and checking a commit out into a directory.

mod checkout;
mod init;
mod worktree;

pub use checkout::checkout_commit;
pub use worktree::write_tree;

use std::path::{Path, PathBuf};

use mingit_store::ObjectStore;

/// Errors from repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("not a git repository: {0}")]
    NotARepository(PathBuf),

    #[error("object not found: {0}")]
    ObjectNotFound(String),

    #[error("expected a {expected}, found a {actual}: {oid}")]
    WrongObjectType {
        oid: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Store(#[from] mingit_store::StoreError),
}

/// A repository with an explicit work tree and metadata directory.
///
/// Paths are threaded through explicitly; nothing here changes the process
/// working directory.
#[derive(Debug)]
pub struct Repository {
    work_tree: PathBuf,
    git_dir: PathBuf,
}

impl Repository {
    /// Open an existing repository at `work_tree`.
    pub fn open(work_tree: impl AsRef<Path>) -> Result<Self, RepoError> {
        let work_tree = work_tree.as_ref().to_path_buf();
        let git_dir = work_tree.join(".git");
        if !git_dir.is_dir() {
            return Err(RepoError::NotARepository(work_tree));
        }
        Ok(Self { work_tree, git_dir })
    }

    /// Initialize a repository at `work_tree`, creating the skeleton.
    ///
    /// Re-initializing an existing repository is a safe no-op.
    pub fn init(work_tree: impl AsRef<Path>) -> Result<Self, RepoError> {
        let work_tree = work_tree.as_ref().to_path_buf();
        let git_dir = work_tree.join(".git");
        init::create_skeleton(&git_dir)?;
        Ok(Self { work_tree, git_dir })
    }

    /// The work tree path.
    pub fn work_tree(&self) -> &Path {
        &self.work_tree
    }

    /// The `.git` directory path.
    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    /// Open the repository's object store.
    pub fn objects(&self) -> ObjectStore {
        ObjectStore::open(self.git_dir.join("objects"))
    }
}
