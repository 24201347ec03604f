use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use mingit_repo::{checkout_commit, Repository};

#[derive(Args)]
pub struct CloneArgs {
    /// Repository URL (smart HTTP)
    repository: String,

    /// Destination directory
    dest_dir: Option<String>,
}

pub fn run(args: &CloneArgs) -> Result<i32> {
    let stderr = io::stderr();
    let mut err = stderr.lock();

    let dest = match &args.dest_dir {
        Some(d) => PathBuf::from(d),
        None => infer_directory(&args.repository)?,
    };

    if dest.exists() && std::fs::read_dir(&dest)?.next().is_some() {
        bail!(
            "destination path '{}' already exists and is not an empty directory",
            dest.display()
        );
    }

    writeln!(err, "Cloning into '{}'...", dest.display())?;

    std::fs::create_dir_all(&dest)?;
    let repo = Repository::init(&dest)?;
    let store = repo.objects();

    let remote = args.repository.trim_end_matches('/');
    let (pack, want) = mingit_protocol::fetch::fetch_pack(remote)?;
    mingit_pack::unpack::unpack(&store, &pack)?;

    checkout_commit(&store, &want, repo.work_tree())?;

    Ok(0)
}

/// Derive a destination directory from the repository URL.
fn infer_directory(url: &str) -> Result<PathBuf> {
    let name = url
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(url)
        .trim_end_matches(".git");
    if name.is_empty() {
        bail!("cannot infer directory name from '{}'", url);
    }
    Ok(PathBuf::from(name))
}
