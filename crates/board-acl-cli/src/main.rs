//! Board ACL CLI
//!
//! Command-line interface for inspecting board permissions.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::Result;
use board_acl_cli::{run, Args};
use clap::Parser;

fn main() -> Result<()> {
    let args = Args::parse();
    let output = run(&args)?;
    println!("{output}");
    Ok(())
}
