use std::path::PathBuf;

use clap::Parser;

use crate::cmds::{info::print_info, read_file};

#[derive(Parser)]
pub(super) struct Info {
    /// Path to the Aseprite file.
    file: PathBuf,
}

impl Info {
    pub(super) fn run(&self) -> anyhow::Result<()> {
        let file = read_file(&self.file)?;
        print_info(&file, std::io::stdout().lock())?;
        Ok(())
    }
}
