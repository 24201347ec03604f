use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use mingit_repo::write_tree;

use super::open_repo;

#[derive(Args)]
pub struct WriteTreeArgs {}

pub fn run(_args: &WriteTreeArgs) -> Result<i32> {
    let repo = open_repo()?;
    let store = repo.objects();
    let oid = write_tree(&store, repo.work_tree())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", oid.to_hex())?;
    Ok(0)
}
