use crate::{
    errors::{FormatError, Result},
    format::{Frame, Header, chunk::ChunkContext},
    utils::mem_reader::{MemReader, SliceMemReader},
};

/// A fully decoded Aseprite file.
#[derive(Debug, Clone)]
pub struct AsepriteFile {
    header: Header,
    frames: Vec<Frame>,
}

impl AsepriteFile {
    /// Decodes a complete file from memory.
    ///
    /// The header's declared size must equal `data.len()`, and every byte must
    /// belong to the header or one of the declared frames.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut reader = SliceMemReader::new(data);
        let header = Header::read(&mut reader)?;

        let declared = header.file_size();
        if usize::try_from(declared).ok() != Some(data.len()) {
            return Err(FormatError::FileSizeMismatch {
                declared,
                actual: data.len(),
            }
            .into());
        }

        let context = ChunkContext {
            color_depth: header.color_depth(),
        };
        let frames = (0..usize::from(header.frame_count()))
            .map(|index| Frame::read(&mut reader, index, &context))
            .collect::<Result<Vec<_>>>()?;

        if !reader.is_empty() {
            return Err(FormatError::TrailingData {
                unread: reader.remaining(),
            }
            .into());
        }

        log::debug!(
            "Decoded {}x{} file with {} frame(s)",
            header.width(),
            header.height(),
            frames.len()
        );
        Ok(Self { header, frames })
    }

    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        errors::Error,
        format::ColorDepth,
        utils::testing::{TestLayer, cel_chunk, chunk, file, frame},
    };

    #[test]
    fn decodes_synthetic_file() {
        let data = file(
            2,
            2,
            &[frame(&[
                TestLayer::new("Color", 0).chunk(),
                cel_chunk(0, (0, 0), 255, (2, 2), &[0xFF; 16]),
                chunk(0x2019, &[0; 10]),
            ])],
        );
        let file = AsepriteFile::from_bytes(&data).unwrap();

        assert_eq!(file.header().color_depth(), ColorDepth::Rgba);
        assert_eq!(file.frames().len(), 1);
        let frame = &file.frames()[0];
        assert_eq!(frame.layers()[0].name(), "Color");
        assert_eq!(frame.cels()[0].raw_pixels(), &[0xFF; 16]);
        assert_eq!(frame.skipped_chunk_types(), [0x2019]);
    }

    #[test]
    fn decodes_every_frame() {
        let data = file(1, 1, &[frame(&[]), frame(&[])]);
        assert_eq!(AsepriteFile::from_bytes(&data).unwrap().frames().len(), 2);
    }

    #[test]
    fn bad_magic_fails_before_frames() {
        let mut data = file(1, 1, &[vec![0xAA; 16]]);
        data[4..6].copy_from_slice(&0u16.to_le_bytes());
        assert!(matches!(
            AsepriteFile::from_bytes(&data),
            Err(Error::Format(FormatError::BadMagic { what: "file", .. }))
        ));
    }

    #[test]
    fn rejects_file_size_mismatch() {
        let mut data = file(1, 1, &[frame(&[])]);
        data.push(0);
        assert!(matches!(
            AsepriteFile::from_bytes(&data),
            Err(Error::Format(FormatError::FileSizeMismatch { .. }))
        ));
    }

    #[test]
    fn rejects_bytes_after_last_frame() {
        let mut data = file(1, 1, &[frame(&[])]);
        data.extend_from_slice(&[0; 5]);
        let size = u32::try_from(data.len()).unwrap();
        data[..4].copy_from_slice(&size.to_le_bytes());
        assert!(matches!(
            AsepriteFile::from_bytes(&data),
            Err(Error::Format(FormatError::TrailingData { unread: 5 }))
        ));
    }
}
