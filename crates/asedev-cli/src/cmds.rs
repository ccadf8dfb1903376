pub(crate) mod import;
pub(crate) mod info;

use std::path::Path;

use anyhow::Context as _;
use asedev::{compose::Raster, format::AsepriteFile};

pub(crate) fn read_file(path: &Path) -> anyhow::Result<AsepriteFile> {
    let data = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    AsepriteFile::from_bytes(&data).with_context(|| format!("decoding {}", path.display()))
}

/// Writes a raster as an RGBA PNG, top row first.
pub(crate) fn write_png(raster: &Raster, path: &Path) -> anyhow::Result<()> {
    let image = image::RgbaImage::from_raw(
        u32::from(raster.width()),
        u32::from(raster.height()),
        raster.to_rgba_top_down(),
    )
    .context("raster size does not match its pixel data")?;
    image
        .save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    log::info!("Wrote {}", path.display());
    Ok(())
}
