//! Builders for synthetic Aseprite files used across the test suites.

use std::io::Write as _;

use flate2::{Compression, write::ZlibEncoder};

pub(crate) const LAYER_CHUNK: u16 = 0x2004;
pub(crate) const CEL_CHUNK: u16 = 0x2005;

pub(crate) fn zlib(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Wraps a chunk body with its `(size, type)` header.
pub(crate) fn chunk(chunk_type: u16, body: &[u8]) -> Vec<u8> {
    let mut data = u32::try_from(body.len() + 6).unwrap().to_le_bytes().to_vec();
    data.extend_from_slice(&chunk_type.to_le_bytes());
    data.extend_from_slice(body);
    data
}

pub(crate) struct TestLayer<'a> {
    pub(crate) name: &'a str,
    pub(crate) child_level: u16,
    pub(crate) flags: u16,
    pub(crate) layer_type: u16,
    pub(crate) blend_mode: u16,
    pub(crate) opacity: u8,
}

impl<'a> TestLayer<'a> {
    /// A visible, fully opaque normal layer.
    pub(crate) fn new(name: &'a str, child_level: u16) -> Self {
        Self {
            name,
            child_level,
            flags: 1,
            layer_type: 0,
            blend_mode: 0,
            opacity: 255,
        }
    }

    pub(crate) fn body(&self) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&self.flags.to_le_bytes());
        data.extend_from_slice(&self.layer_type.to_le_bytes());
        data.extend_from_slice(&self.child_level.to_le_bytes());
        data.extend_from_slice(&[0; 4]);
        data.extend_from_slice(&self.blend_mode.to_le_bytes());
        data.push(self.opacity);
        data.extend_from_slice(&[0; 3]);
        data.extend_from_slice(&u16::try_from(self.name.len()).unwrap().to_le_bytes());
        data.extend_from_slice(self.name.as_bytes());
        if self.layer_type == 2 {
            data.extend_from_slice(&0u16.to_le_bytes());
        }
        data
    }

    pub(crate) fn chunk(&self) -> Vec<u8> {
        chunk(LAYER_CHUNK, &self.body())
    }
}

/// A compressed-image cel body with the payload given as raw pixel bytes.
pub(crate) fn cel_body(
    layer_index: u16,
    (x, y): (i16, i16),
    opacity: u8,
    (width, height): (u16, u16),
    pixels: &[u8],
) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&layer_index.to_le_bytes());
    data.extend_from_slice(&x.to_le_bytes());
    data.extend_from_slice(&y.to_le_bytes());
    data.push(opacity);
    data.extend_from_slice(&2u16.to_le_bytes());
    data.extend_from_slice(&[0; 7]);
    data.extend_from_slice(&width.to_le_bytes());
    data.extend_from_slice(&height.to_le_bytes());
    data.extend_from_slice(&zlib(pixels));
    data
}

pub(crate) fn cel_chunk(
    layer_index: u16,
    position: (i16, i16),
    opacity: u8,
    size: (u16, u16),
    pixels: &[u8],
) -> Vec<u8> {
    chunk(CEL_CHUNK, &cel_body(layer_index, position, opacity, size, pixels))
}

/// A frame holding the given chunks. Both chunk counts are written, so a
/// frame with no chunks reads as empty under either.
pub(crate) fn frame(chunks: &[Vec<u8>]) -> Vec<u8> {
    let body: Vec<u8> = chunks.concat();
    let mut data = u32::try_from(body.len() + 16).unwrap().to_le_bytes().to_vec();
    data.extend_from_slice(&0xF1FAu16.to_le_bytes());
    data.extend_from_slice(&u16::try_from(chunks.len()).unwrap_or(u16::MAX).to_le_bytes());
    data.extend_from_slice(&100u16.to_le_bytes());
    data.extend_from_slice(&[0; 2]);
    data.extend_from_slice(&u32::try_from(chunks.len()).unwrap().to_le_bytes());
    data.extend_from_slice(&body);
    data
}

/// A 32-bit RGBA file header followed by the given frames.
pub(crate) fn file(width: u16, height: u16, frames: &[Vec<u8>]) -> Vec<u8> {
    let body: Vec<u8> = frames.concat();
    let mut data = u32::try_from(body.len() + 128).unwrap().to_le_bytes().to_vec();
    data.extend_from_slice(&0xA5E0u16.to_le_bytes());
    data.extend_from_slice(&u16::try_from(frames.len()).unwrap().to_le_bytes());
    data.extend_from_slice(&width.to_le_bytes());
    data.extend_from_slice(&height.to_le_bytes());
    data.extend_from_slice(&32u16.to_le_bytes());
    data.extend_from_slice(&1u32.to_le_bytes());
    data.extend_from_slice(&100u16.to_le_bytes());
    data.extend_from_slice(&[0; 8]);
    data.push(0);
    data.extend_from_slice(&[0; 3]);
    data.extend_from_slice(&0u16.to_le_bytes());
    data.extend_from_slice(&[1, 1]);
    data.extend_from_slice(&[0; 4]);
    data.extend_from_slice(&16u16.to_le_bytes());
    data.extend_from_slice(&16u16.to_le_bytes());
    data.extend_from_slice(&[0; 84]);
    data.extend_from_slice(&body);
    data
}
