mod icon;
mod import;
mod info;

use clap::Parser;

#[derive(Parser)]
#[clap(name = "asedev", version)]
pub(crate) struct Cli {
    #[clap(subcommand)]
    command: Cmd,
}

impl Cli {
    pub(crate) fn run(&self) -> anyhow::Result<()> {
        match &self.command {
            Cmd::Info(info) => info.run()?,
            Cmd::Import(import) => import.run()?,
            Cmd::Icon(icon) => icon.run()?,
        }
        Ok(())
    }
}

#[derive(clap::Subcommand)]
enum Cmd {
    /// Prints the header, layer tree and chunks of a file.
    #[clap(name = "info")]
    Info(info::Info),

    /// Flattens a file into PNG textures, and optionally quads.
    #[clap(name = "import")]
    Import(import::Import),

    /// Writes the file icon as a PNG.
    #[clap(name = "icon")]
    Icon(icon::Icon),
}
