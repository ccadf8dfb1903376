use crate::{
    compose::{BlendOp, Raster, TextureGroup, mul8},
    errors::{FormatError, Result},
    format::Header,
};

/// Flattens one texture group onto a transparent canvas the size of the file.
///
/// Members are drawn in order. Cel rows run top-down while the canvas is
/// stored bottom-up, so each cel is flipped vertically as it is placed. Any
/// pixel landing outside the canvas is an error; nothing is clipped.
pub fn composite_group(group: &TextureGroup<'_>, header: &Header) -> Result<Raster> {
    let (width, height) = (header.width(), header.height());
    let mut canvas = Raster::new(width, height);

    for &(cel, layer) in group.members() {
        let op = BlendOp::for_mode(layer.blend_mode())?;
        let opacity = mul8(layer.opacity(), cel.opacity());
        let colors = cel.to_colors(header.color_depth())?;

        let (cel_x, cel_y) = cel.position();
        let top = i32::from(height) - i32::from(cel_y) - 1;
        let cel_width = usize::from(cel.width());

        for h in 0..cel.height() {
            let row_start = usize::from(h) * cel_width;
            for w in 0..cel.width() {
                let x = i32::from(cel_x) + i32::from(w);
                let y = top - i32::from(h);
                let index = canvas.index_of(x, y).ok_or(FormatError::OutOfCanvas {
                    x,
                    y,
                    width,
                    height,
                })?;
                let source = colors[row_start + usize::from(w)];
                canvas.pixels[index] = op.apply(canvas.pixels[index], source, opacity);
            }
        }
    }

    log::debug!(
        "Composited group {:?} from {} layer(s)",
        group.name(),
        group.members().len()
    );
    Ok(canvas)
}
