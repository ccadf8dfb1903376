use std::path::PathBuf;

use clap::Parser;

use crate::cmds::import::{load_settings, run_import};

#[derive(Parser)]
pub(super) struct Import {
    /// Path to the Aseprite file.
    file: PathBuf,

    /// Directory to write the textures into. Created if missing.
    #[clap(long, short)]
    out: PathBuf,

    /// TOML file with import settings.
    #[clap(long, short)]
    config: Option<PathBuf>,

    /// Generate quads from the sheet group, overriding the config file.
    #[clap(long)]
    quads: bool,

    /// World units per pixel for generated quads.
    #[clap(long)]
    scale: Option<f32>,
}

impl Import {
    pub(super) fn run(&self) -> anyhow::Result<()> {
        let mut settings = load_settings(self.config.as_deref())?;
        if self.quads {
            settings.generate_quads = true;
        }
        if let Some(scale) = self.scale {
            settings.quad_scale = scale;
        }
        run_import(&self.file, &self.out, &settings)
    }
}
