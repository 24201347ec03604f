use std::io::{self, Write};

use anyhow::Result;
use bstr::BString;
use clap::Args;
use mingit_hash::ObjectId;
use mingit_object::{Commit, ObjectType, Signature};

use super::open_repo;

#[derive(Args)]
pub struct CommitTreeArgs {
    /// Tree object ID
    tree: String,

    /// Parent commit(s)
    #[arg(short = 'p', num_args = 1)]
    parent: Vec<String>,

    /// Commit message
    #[arg(short = 'm', required = true)]
    message: String,
}

pub fn run(args: &CommitTreeArgs) -> Result<i32> {
    let repo = open_repo()?;
    let store = repo.objects();

    let tree = ObjectId::from_hex(&args.tree)?;
    if !store.contains(&tree) {
        anyhow::bail!("not a valid object name: {}", args.tree);
    }

    let parents: Vec<ObjectId> = args
        .parent
        .iter()
        .map(|p| ObjectId::from_hex(p))
        .collect::<std::result::Result<_, _>>()?;

    let mut message = BString::from(args.message.as_str());
    if !message.ends_with(b"\n") {
        message.push(b'\n');
    }

    let commit = Commit {
        tree,
        parents,
        author: Signature::placeholder(),
        committer: Signature::placeholder(),
        extra_headers: Vec::new(),
        message,
    };

    let oid = store.write_raw(ObjectType::Commit, &commit.serialize_payload())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", oid.to_hex())?;
    Ok(0)
}
