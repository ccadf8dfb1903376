use std::path::PathBuf;

use clap::Parser;

use crate::cmds::write_png;

#[derive(Parser)]
pub(super) struct Icon {
    /// Path of the PNG to write.
    output: PathBuf,
}

impl Icon {
    pub(super) fn run(&self) -> anyhow::Result<()> {
        write_png(asedev::icon::file_icon(), &self.output)
    }
}
