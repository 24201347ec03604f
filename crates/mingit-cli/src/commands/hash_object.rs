use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use mingit_hash::Hasher;
use mingit_object::ObjectType;

use super::open_repo;

#[derive(Args)]
pub struct HashObjectArgs {
    /// Actually write the object into the object database
    #[arg(short = 'w')]
    write: bool,

    /// File to hash
    file: String,
}

pub fn run(args: &HashObjectArgs) -> Result<i32> {
    let data = std::fs::read(&args.file)?;

    let oid = if args.write {
        let repo = open_repo()?;
        repo.objects().write_raw(ObjectType::Blob, &data)?
    } else {
        Hasher::hash_object("blob", &data)?
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", oid.to_hex())?;
    Ok(0)
}
