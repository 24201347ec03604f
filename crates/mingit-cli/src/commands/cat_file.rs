use std::io::{self, Write};

use anyhow::{bail, Result};
use clap::Args;
use mingit_hash::ObjectId;

use super::open_repo;

#[derive(Args)]
pub struct CatFileArgs {
    /// Pretty-print the object content
    #[arg(short = 'p', conflicts_with_all = ["type_only", "size"])]
    pretty: bool,

    /// Show object type
    #[arg(short = 't', conflicts_with_all = ["pretty", "size"])]
    type_only: bool,

    /// Show object size
    #[arg(short = 's', conflicts_with_all = ["pretty", "type_only"])]
    size: bool,

    /// Object ID (40 hex digits)
    object: String,
}

pub fn run(args: &CatFileArgs) -> Result<i32> {
    if !args.pretty && !args.type_only && !args.size {
        bail!("one of -p, -t, or -s is required");
    }

    let repo = open_repo()?;
    let store = repo.objects();
    let oid = ObjectId::from_hex(&args.object)?;

    let (obj_type, payload) = store
        .read_raw(&oid)?
        .ok_or_else(|| anyhow::anyhow!("object not found: {}", oid.to_hex()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.type_only {
        writeln!(out, "{}", obj_type)?;
    } else if args.size {
        writeln!(out, "{}", payload.len())?;
    } else {
        out.write_all(&payload)?;
    }

    Ok(0)
}
