//! A CLI for inspecting Aseprite files and importing them as textures.

mod cli;
mod cmds;

use crate::cli::Cli;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    Cli::parse().run()?;
    Ok(())
}
