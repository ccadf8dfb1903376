use crate::{
    errors::{NotSupportedError, Result},
    format::{
        Color, ColorDepth,
        chunk::{ChunkContext, ChunkType},
    },
    utils::{compression, mem_reader::MemReader},
};

/// Cel type code for a zlib-compressed image.
const COMPRESSED_IMAGE: u16 = 2;

/// One layer's raster contribution to a frame.
#[derive(Clone, Debug)]
pub struct CelChunk {
    layer_index: u16,
    x: i16,
    y: i16,
    opacity: u8,
    width: u16,
    height: u16,
    /// Decompressed pixels in the file's color depth, row-major, top row
    /// first.
    pixels: Vec<u8>,
}

impl CelChunk {
    #[must_use]
    pub fn layer_index(&self) -> u16 {
        self.layer_index
    }

    /// Position of the cel's top-left pixel on the canvas.
    #[must_use]
    pub fn position(&self) -> (i16, i16) {
        (self.x, self.y)
    }

    #[must_use]
    pub fn opacity(&self) -> u8 {
        self.opacity
    }

    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[must_use]
    pub fn raw_pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Unpacks the raw pixel bytes into colors, top row first.
    pub fn to_colors(&self, depth: ColorDepth) -> Result<Vec<Color>, NotSupportedError> {
        match depth {
            ColorDepth::Rgba => Ok(self
                .pixels
                .chunks_exact(4)
                .map(|px| Color::from_rgba(px[0], px[1], px[2], px[3]))
                .collect()),
            ColorDepth::Indexed | ColorDepth::Grayscale | ColorDepth::Unknown(_) => {
                Err(NotSupportedError::ColorDepth(depth))
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn from_colors(
        layer_index: u16,
        (x, y): (i16, i16),
        opacity: u8,
        (width, height): (u16, u16),
        colors: &[Color],
    ) -> Self {
        assert_eq!(colors.len(), usize::from(width) * usize::from(height));
        Self {
            layer_index,
            x,
            y,
            opacity,
            width,
            height,
            pixels: colors.iter().flat_map(|color| color.to_bytes()).collect(),
        }
    }
}

impl ChunkType for CelChunk {
    const CHUNK_TYPE: u16 = 0x2005;

    fn from_block<M>(mut reader: M, context: &ChunkContext) -> Result<Self>
    where
        M: MemReader,
    {
        let layer_index = reader.read_u16_le()?;
        let x = reader.read_i16_le()?;
        let y = reader.read_i16_le()?;
        let opacity = reader.read_u8()?;
        let cel_type = reader.read_u16_le()?;
        reader.skip("reserved", 7)?;

        if cel_type != COMPRESSED_IMAGE {
            return Err(NotSupportedError::CelType(cel_type).into());
        }

        let width = reader.read_u16_le()?;
        let height = reader.read_u16_le()?;
        let expected_len =
            usize::from(width) * usize::from(height) * context.color_depth.bytes_per_pixel()?;
        let payload = reader.read_remaining()?;
        let pixels = compression::inflate_exact(&payload, expected_len)?;

        Ok(Self {
            layer_index,
            x,
            y,
            opacity,
            width,
            height,
            pixels,
        })
    }
}
