use anyhow::Result;
use clap::Args;
use mingit_repo::Repository;

#[derive(Args)]
pub struct InitArgs {}

pub fn run(_args: &InitArgs) -> Result<i32> {
    Repository::init(std::env::current_dir()?)?;
    println!("Initialized git directory");
    Ok(0)
}
