use std::fs;
use std::path::Path;

use crate::RepoError;

/// Create the `.git` skeleton:
/// - `HEAD` (pointing to the default branch)
/// - `objects/`
/// - `refs/`
///
/// Re-running over an existing repository is a safe no-op; existing data is
/// never overwritten.
pub fn create_skeleton(git_dir: &Path) -> Result<(), RepoError> {
    if git_dir.join("HEAD").is_file() {
        return Ok(());
    }

    fs::create_dir_all(git_dir)?;
    fs::create_dir_all(git_dir.join("objects"))?;
    fs::create_dir_all(git_dir.join("refs"))?;

    fs::write(git_dir.join("HEAD"), "ref: refs/heads/main\n")?;

    Ok(())
}
