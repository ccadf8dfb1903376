use std::{fs, io::BufWriter, path::Path};

use anyhow::Context as _;
use asedev::import::{ImportSettings, import};
use serde::Serialize;

use crate::cmds::write_png;

/// One entry of the `<base>_textures.json` manifest.
#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct TextureEntry<'a> {
    name: &'a str,
    file: String,
    group: &'a str,
    linear: bool,
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> anyhow::Result<()> {
    let writer = BufWriter::new(
        fs::File::create(path).with_context(|| format!("creating {}", path.display()))?,
    );
    serde_json::to_writer_pretty(writer, value)
        .with_context(|| format!("writing {}", path.display()))?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

pub(crate) fn load_settings(path: Option<&Path>) -> anyhow::Result<ImportSettings> {
    let Some(path) = path else {
        return Ok(ImportSettings::default());
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

pub(crate) fn run_import(
    input: &Path,
    out_dir: &Path,
    settings: &ImportSettings,
) -> anyhow::Result<()> {
    let base_name = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .with_context(|| format!("{} has no usable file name", input.display()))?;

    let data = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let output = import(&data, base_name, settings)
        .with_context(|| format!("importing {}", input.display()))?;

    fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;
    let mut manifest = Vec::new();
    for texture in output.textures() {
        let file_name = format!("{}.png", texture.name());
        write_png(texture.raster(), &out_dir.join(&file_name))?;
        manifest.push(TextureEntry {
            name: texture.name(),
            file: file_name,
            group: texture.group_name(),
            linear: texture.is_linear(),
        });
    }
    write_json(&out_dir.join(format!("{base_name}_textures.json")), &manifest)?;

    if !output.quads().is_empty() {
        write_json(&out_dir.join(format!("{base_name}_quads.json")), output.quads())?;
    }

    println!(
        "{}: {} texture(s), {} quad(s)",
        input.display(),
        output.textures().len(),
        output.quads().len()
    );
    Ok(())
}
