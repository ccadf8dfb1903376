//! Error types returned by decoding, compositing and importing.

use crate::{
    format::{BlendMode, ColorDepth},
    utils::{compression::DecompressError, errors::InvalidDataError},
};

/// The file is malformed: it contradicts the Aseprite format itself.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error(transparent)]
    InvalidData(#[from] InvalidDataError),
    #[error("Bad {what} magic number: expected {expected:#06x}, found {found:#06x}")]
    BadMagic {
        what: &'static str,
        expected: u16,
        found: u16,
    },
    #[error("Header declares a file size of {declared} bytes, but the input has {actual}")]
    FileSizeMismatch { declared: u32, actual: usize },
    #[error("Frame {frame} declares a size of {declared} bytes, smaller than its header")]
    FrameTooSmall { frame: usize, declared: u32 },
    #[error("Frame {frame} has {unread} bytes left after its last chunk")]
    FrameTrailingData { frame: usize, unread: usize },
    #[error("Chunk of type {chunk_type:#06x} declares a size of {size} bytes, smaller than its header")]
    ChunkTooSmall { chunk_type: u16, size: u32 },
    #[error("{unread} bytes left after the last frame")]
    TrailingData { unread: usize },
    #[error("Cel payload: {0}")]
    Decompress(#[from] DecompressError),
    #[error("Unknown layer type {0}")]
    UnknownLayerType(u16),
    #[error("Cel refers to layer {layer_index}, but the file has {layer_count} layers")]
    CelLayerOutOfRange { layer_index: u16, layer_count: usize },
    #[error("Layer {name:?} at child level {child_level} has no top-level ancestor")]
    OrphanLayer { name: String, child_level: u16 },
    #[error("Pixel at ({x}, {y}) falls outside the {width}x{height} canvas")]
    OutOfCanvas {
        x: i32,
        y: i32,
        width: u16,
        height: u16,
    },
}

/// The file is well formed but uses a feature this crate does not handle.
#[derive(Debug, thiserror::Error)]
pub enum NotSupportedError {
    #[error("Only single-frame files are supported, found {0} frames")]
    MultipleFrames(u16),
    #[error("Only square pixels are supported, found a {width}:{height} pixel ratio")]
    PixelAspect { width: u8, height: u8 },
    #[error("Unsupported color depth {0:?}")]
    ColorDepth(ColorDepth),
    #[error("Unsupported cel type {0}, only compressed images are supported")]
    CelType(u16),
    #[error("Unsupported blend mode {0:?}")]
    BlendMode(BlendMode),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    NotSupported(#[from] NotSupportedError),
}

impl From<InvalidDataError> for Error {
    fn from(err: InvalidDataError) -> Self {
        Self::Format(err.into())
    }
}

impl From<DecompressError> for Error {
    fn from(err: DecompressError) -> Self {
        Self::Format(err.into())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
