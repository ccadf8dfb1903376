use crate::{
    errors::{FormatError, Result},
    format::{
        BlendMode, LayerFlags, LayerType,
        chunk::{ChunkContext, ChunkType},
    },
    utils::mem_reader::MemReader,
};

/// One node of the flattened layer tree.
///
/// Layers appear in draw order (bottom-most first); the hierarchy is encoded
/// only by [`child_level`](Self::child_level).
#[derive(Clone, Debug)]
pub struct LayerChunk {
    flags: LayerFlags,
    layer_type: LayerType,
    child_level: u16,
    blend_mode: BlendMode,
    opacity: u8,
    name: String,
}

impl LayerChunk {
    #[must_use]
    pub fn flags(&self) -> LayerFlags {
        self.flags
    }

    #[must_use]
    pub fn layer_type(&self) -> LayerType {
        self.layer_type
    }

    /// Depth in the layer tree. Zero is top level.
    #[must_use]
    pub fn child_level(&self) -> u16 {
        self.child_level
    }

    #[must_use]
    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    #[must_use]
    pub fn opacity(&self) -> u8 {
        self.opacity
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.flags.contains(LayerFlags::VISIBLE)
    }

    #[must_use]
    pub fn is_reference(&self) -> bool {
        self.flags.contains(LayerFlags::REFERENCE_LAYER)
    }

    #[must_use]
    pub fn tileset_index(&self) -> Option<u16> {
        match self.layer_type {
            LayerType::Tilemap { tileset_index } => Some(tileset_index),
            LayerType::Normal | LayerType::Group => None,
        }
    }

    #[cfg(test)]
    pub(crate) fn new(name: &str, child_level: u16, flags: LayerFlags) -> Self {
        Self {
            flags,
            layer_type: LayerType::Normal,
            child_level,
            blend_mode: BlendMode::Normal,
            opacity: 255,
            name: name.to_owned(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_blend(mut self, blend_mode: BlendMode, opacity: u8) -> Self {
        self.blend_mode = blend_mode;
        self.opacity = opacity;
        self
    }
}

impl ChunkType for LayerChunk {
    const CHUNK_TYPE: u16 = 0x2004;

    fn from_block<M>(mut reader: M, _context: &ChunkContext) -> Result<Self>
    where
        M: MemReader,
    {
        let flags = LayerFlags::from_bits_retain(reader.read_u16_le()?);
        let layer_type_val = reader.read_u16_le()?;
        let child_level = reader.read_u16_le()?;
        let _default_width = reader.read_u16_le()?;
        let _default_height = reader.read_u16_le()?;
        let blend_mode = BlendMode::from_u16(reader.read_u16_le()?);
        let opacity = reader.read_u8()?;
        reader.skip("padding", 3)?;
        let name = reader.read_string()?;

        let layer_type = match layer_type_val {
            0 => LayerType::Normal,
            1 => LayerType::Group,
            2 => LayerType::Tilemap {
                tileset_index: reader.read_u16_le()?,
            },
            other => return Err(FormatError::UnknownLayerType(other).into()),
        };

        if !reader.is_empty() {
            log::trace!(
                "Ignoring {} trailing bytes in layer {name:?}",
                reader.remaining()
            );
        }

        Ok(Self {
            flags,
            layer_type,
            child_level,
            blend_mode,
            opacity,
            name,
        })
    }
}
