use crate::{
    errors::{FormatError, Result},
    format::{CelChunk, ColorDepth, LayerChunk},
    utils::mem_reader::MemReader,
};

/// Size of the `(size, type)` header preceding every chunk body.
pub(super) const CHUNK_HEADER_SIZE: usize = 6;

/// File-wide state a chunk body may need to be decoded.
#[derive(Debug, Clone, Copy)]
pub(super) struct ChunkContext {
    pub(super) color_depth: ColorDepth,
}

/// A chunk body type with a fixed type code.
pub(super) trait ChunkType: Sized {
    const CHUNK_TYPE: u16;

    /// Decodes the chunk from a reader bounded to exactly its body.
    fn from_block<M>(block: M, context: &ChunkContext) -> Result<Self>
    where
        M: MemReader;
}

#[derive(Debug)]
pub(super) enum Chunk {
    Layer(LayerChunk),
    Cel(CelChunk),
    /// A chunk this crate does not interpret, identified by its type code.
    Skipped(u16),
}

impl Chunk {
    pub(super) fn read<M: MemReader>(reader: &mut M, context: &ChunkContext) -> Result<Self> {
        let chunk_size = reader.read_u32_le()?;
        let chunk_type = reader.read_u16_le()?;
        let body_len = usize::try_from(chunk_size)
            .ok()
            .and_then(|size| size.checked_sub(CHUNK_HEADER_SIZE))
            .ok_or(FormatError::ChunkTooSmall {
                chunk_type,
                size: chunk_size,
            })?;
        let body = reader.read_to_subreader(&format!("chunk {chunk_type:#06x}"), body_len)?;

        Ok(match chunk_type {
            LayerChunk::CHUNK_TYPE => Chunk::Layer(LayerChunk::from_block(body, context)?),
            CelChunk::CHUNK_TYPE => Chunk::Cel(CelChunk::from_block(body, context)?),
            other => {
                log::debug!("Skipping chunk of type {other:#06x} ({body_len} bytes)");
                Chunk::Skipped(other)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use datalit::datalit;

    use super::*;
    use crate::{
        errors::Error,
        utils::{
            mem_reader::SliceMemReader,
            testing::{TestLayer, chunk},
        },
    };

    const CONTEXT: ChunkContext = ChunkContext {
        color_depth: ColorDepth::Rgba,
    };

    #[test]
    fn skips_unknown_chunk_types() {
        let mut data = chunk(0x2019, &[1, 2, 3, 4]);
        data.extend(TestLayer::new("after", 0).chunk());
        let mut reader = SliceMemReader::new(&data);

        assert!(matches!(
            Chunk::read(&mut reader, &CONTEXT).unwrap(),
            Chunk::Skipped(0x2019)
        ));
        let Chunk::Layer(layer) = Chunk::read(&mut reader, &CONTEXT).unwrap() else {
            panic!("expected a layer chunk");
        };
        assert_eq!(layer.name(), "after");
        assert!(reader.is_empty());
    }

    #[test]
    fn rejects_size_smaller_than_header() {
        let data = datalit! {
            @endian = le,
            5u32,
            0x2004u16,
        };
        let err = Chunk::read(&mut SliceMemReader::new(&data[..]), &CONTEXT).unwrap_err();
        assert!(matches!(
            err,
            Error::Format(FormatError::ChunkTooSmall {
                chunk_type: 0x2004,
                size: 5
            })
        ));
    }

    #[test]
    fn rejects_size_past_end_of_data() {
        let data = datalit! {
            @endian = le,
            20u32,
            0x2019u16,
            0u32,
        };
        let err = Chunk::read(&mut SliceMemReader::new(&data[..]), &CONTEXT).unwrap_err();
        assert!(matches!(err, Error::Format(FormatError::InvalidData(_))));
    }
}
