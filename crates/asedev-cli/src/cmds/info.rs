use std::io::Write;

use asedev::format::{AsepriteFile, LayerChunk, LayerFlags, LayerType};
use itertools::Itertools as _;

fn flag_names(flags: LayerFlags) -> String {
    flags.iter_names().map(|(name, _)| name.to_lowercase()).join("|")
}

fn describe_layer(layer: &LayerChunk) -> String {
    let kind = match layer.layer_type() {
        LayerType::Normal => "layer".to_owned(),
        LayerType::Group => "group".to_owned(),
        LayerType::Tilemap { tileset_index } => format!("tilemap(tileset {tileset_index})"),
    };
    format!(
        "{indent}{name:?} {kind} [{flags}] blend={blend:?} opacity={opacity}",
        indent = "  ".repeat(usize::from(layer.child_level())),
        name = layer.name(),
        flags = flag_names(layer.flags()),
        blend = layer.blend_mode(),
        opacity = layer.opacity(),
    )
}

pub(crate) fn print_info<W: Write>(file: &AsepriteFile, mut out: W) -> std::io::Result<()> {
    let header = file.header();
    let (pixel_width, pixel_height) = header.pixel_ratio();
    let (grid_x, grid_y, grid_width, grid_height) = header.grid();
    writeln!(out, "size:         {}x{}", header.width(), header.height())?;
    writeln!(
        out,
        "color depth:  {:?} ({} bpp)",
        header.color_depth(),
        header.color_depth().bits()
    )?;
    writeln!(out, "frames:       {}", header.frame_count())?;
    writeln!(out, "flags:        {:?}", header.flags())?;
    writeln!(out, "pixel ratio:  {pixel_width}:{pixel_height}")?;
    writeln!(
        out,
        "colors:       {} (transparent index {})",
        header.num_colors(),
        header.transparent_index()
    )?;
    writeln!(out, "grid:         ({grid_x}, {grid_y}) {grid_width}x{grid_height}")?;

    for (index, frame) in file.frames().iter().enumerate() {
        writeln!(out)?;
        writeln!(out, "frame {index} ({} ms)", frame.duration_ms())?;
        writeln!(out, "  layers:")?;
        for layer in frame.layers() {
            writeln!(out, "    {}", describe_layer(layer))?;
        }
        writeln!(out, "  cels:")?;
        for cel in frame.cels() {
            let (x, y) = cel.position();
            writeln!(
                out,
                "    layer {} at ({x}, {y}) {}x{} opacity={}",
                cel.layer_index(),
                cel.width(),
                cel.height(),
                cel.opacity()
            )?;
        }
        if !frame.skipped_chunk_types().is_empty() {
            writeln!(
                out,
                "  skipped chunks: {}",
                frame
                    .skipped_chunk_types()
                    .iter()
                    .map(|chunk_type| format!("{chunk_type:#06x}"))
                    .join(", ")
            )?;
        }
    }
    Ok(())
}
