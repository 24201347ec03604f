use std::io::{self, Write};

use anyhow::{bail, Result};
use bstr::ByteSlice;
use clap::Args;
use mingit_hash::ObjectId;
use mingit_object::{ObjectType, Tree};

use super::open_repo;

#[derive(Args)]
pub struct LsTreeArgs {
    /// List only entry names
    #[arg(long)]
    name_only: bool,

    /// Tree object ID (40 hex digits)
    tree: String,
}

pub fn run(args: &LsTreeArgs) -> Result<i32> {
    let repo = open_repo()?;
    let store = repo.objects();
    let oid = ObjectId::from_hex(&args.tree)?;

    let (obj_type, payload) = store
        .read_raw(&oid)?
        .ok_or_else(|| anyhow::anyhow!("object not found: {}", oid.to_hex()))?;
    if obj_type != ObjectType::Tree {
        bail!("not a tree object: {}", oid.to_hex());
    }
    let tree = Tree::parse(&payload)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    for entry in tree.iter() {
        if args.name_only {
            writeln!(out, "{}", entry.name.as_bstr())?;
        } else {
            let type_name = if entry.mode.is_tree() { "tree" } else { "blob" };
            writeln!(
                out,
                "{} {} {}\t{}",
                String::from_utf8_lossy(entry.mode.as_bytes()),
                type_name,
                entry.oid.to_hex(),
                entry.name.as_bstr(),
            )?;
        }
    }

    Ok(0)
}
