use crate::{
    errors::{FormatError, Result},
    format::{
        CelChunk, LayerChunk,
        chunk::{Chunk, ChunkContext},
    },
    utils::mem_reader::MemReader,
};

const MAGIC: u16 = 0xF1FA;

/// Size of the frame header, including the leading size field.
const FRAME_HEADER_SIZE: usize = 16;

/// One frame of the file, with its chunks partitioned by kind.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    duration_ms: u16,
    layers: Vec<LayerChunk>,
    cels: Vec<CelChunk>,
    skipped_chunk_types: Vec<u16>,
}

impl Frame {
    pub(super) fn read<M: MemReader>(
        reader: &mut M,
        index: usize,
        context: &ChunkContext,
    ) -> Result<Self> {
        let frame_size = reader.read_u32_le()?;
        let body_len = usize::try_from(frame_size)
            .ok()
            .filter(|&size| size >= FRAME_HEADER_SIZE)
            .map(|size| size - 4)
            .ok_or(FormatError::FrameTooSmall {
                frame: index,
                declared: frame_size,
            })?;
        let mut reader = reader.read_to_subreader(&format!("frame[{index}]"), body_len)?;

        let magic = reader.read_u16_le()?;
        if magic != MAGIC {
            return Err(FormatError::BadMagic {
                what: "frame",
                expected: MAGIC,
                found: magic,
            }
            .into());
        }
        let legacy_chunk_count = reader.read_u16_le()?;
        let duration_ms = reader.read_u16_le()?;
        reader.skip("reserved", 2)?;
        let chunk_count = match reader.read_u32_le()? {
            0 => u32::from(legacy_chunk_count),
            count => count,
        };

        let mut frame = Frame {
            duration_ms,
            ..Frame::default()
        };
        for _ in 0..chunk_count {
            match Chunk::read(&mut reader, context)? {
                Chunk::Layer(layer) => frame.layers.push(layer),
                Chunk::Cel(cel) => frame.cels.push(cel),
                Chunk::Skipped(chunk_type) => frame.skipped_chunk_types.push(chunk_type),
            }
        }

        if !reader.is_empty() {
            return Err(FormatError::FrameTrailingData {
                frame: index,
                unread: reader.remaining(),
            }
            .into());
        }

        Ok(frame)
    }

    #[must_use]
    pub fn duration_ms(&self) -> u16 {
        self.duration_ms
    }

    /// The layer chunks of this frame, bottom-most first.
    #[must_use]
    pub fn layers(&self) -> &[LayerChunk] {
        &self.layers
    }

    #[must_use]
    pub fn cels(&self) -> &[CelChunk] {
        &self.cels
    }

    /// Type codes of the chunks that were skipped, in file order.
    #[must_use]
    pub fn skipped_chunk_types(&self) -> &[u16] {
        &self.skipped_chunk_types
    }

    #[cfg(test)]
    pub(crate) fn from_parts(layers: Vec<LayerChunk>, cels: Vec<CelChunk>) -> Self {
        Self {
            duration_ms: 0,
            layers,
            cels,
            skipped_chunk_types: Vec::new(),
        }
    }
}
