//! Decoders for the Aseprite binary file format.
//!
//! File format reference: <https://github.com/aseprite/aseprite/blob/main/docs/ase-file-specs.md>
//!
//! Only the structures needed to flatten a single frame are decoded in full:
//! the file header, frame headers, layer chunks and compressed-image cel
//! chunks. Every other chunk is skipped and its type recorded.

use bitflags::bitflags;

use crate::errors::NotSupportedError;

mod cel;
mod chunk;
mod file;
mod frame;
mod header;
mod layer;

pub use self::cel::CelChunk;
pub use self::file::AsepriteFile;
pub use self::frame::Frame;
pub use self::header::{HEADER_SIZE, Header, HeaderFlags};
pub use self::layer::LayerChunk;

/// The color depth (bits per pixel) of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorDepth {
    /// 8-bit indices into a palette.
    Indexed,
    /// 16-bit Grayscale (Gray, Alpha).
    Grayscale,
    /// 32-bit RGBA (Red, Green, Blue, Alpha).
    Rgba,
    /// A bit depth the format does not define.
    Unknown(u16),
}

impl ColorDepth {
    #[must_use]
    pub fn from_bits(bits: u16) -> Self {
        match bits {
            8 => Self::Indexed,
            16 => Self::Grayscale,
            32 => Self::Rgba,
            other => Self::Unknown(other),
        }
    }

    #[must_use]
    pub fn bits(self) -> u16 {
        match self {
            Self::Indexed => 8,
            Self::Grayscale => 16,
            Self::Rgba => 32,
            Self::Unknown(bits) => bits,
        }
    }

    pub fn bytes_per_pixel(self) -> Result<usize, NotSupportedError> {
        match self {
            Self::Indexed => Ok(1),
            Self::Grayscale => Ok(2),
            Self::Rgba => Ok(4),
            Self::Unknown(_) => Err(NotSupportedError::ColorDepth(self)),
        }
    }
}

/// An RGBA color value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl Color {
    pub const TRANSPARENT: Self = Self::from_rgba(0, 0, 0, 0);

    /// Creates a new `Color` from RGBA components.
    #[must_use]
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[must_use]
    pub fn red(&self) -> u8 {
        self.r
    }

    #[must_use]
    pub fn green(&self) -> u8 {
        self.g
    }

    #[must_use]
    pub fn blue(&self) -> u8 {
        self.b
    }

    #[must_use]
    pub fn alpha(&self) -> u8 {
        self.a
    }

    #[must_use]
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

bitflags! {
    /// Flags for a layer.
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    pub struct LayerFlags: u16 {
        /// The layer is visible.
        const VISIBLE = 0x0001;
        /// The layer is editable.
        const EDITABLE = 0x0002;
        /// Movement on this layer is locked.
        const LOCK_MOVEMENT = 0x0004;
        /// This is the background layer.
        const BACKGROUND = 0x0008;
        /// Prefer linked cels when creating new frames.
        const PREFER_LINKED_CELS = 0x0010;
        /// The layer group should be displayed collapsed in the UI.
        const DISPLAY_COLLAPSED = 0x0020;
        /// This is a reference layer.
        const REFERENCE_LAYER = 0x0040;
    }
}

/// The type of a layer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LayerType {
    /// A normal image layer.
    Normal,
    /// A group layer that contains other layers.
    Group,
    /// A tilemap layer.
    Tilemap {
        /// The index of the tileset used by this layer.
        tileset_index: u16,
    },
}

/// The blend mode recorded for a layer.
///
/// Values outside the known range are kept as [`BlendMode::Unknown`] so a
/// file can still be inspected; they are rejected once compositing needs them.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BlendMode {
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
    Addition,
    Subtraction,
    Divide,
    Unknown(u16),
}

impl BlendMode {
    #[must_use]
    pub fn from_u16(value: u16) -> Self {
        match value {
            0 => Self::Normal,
            1 => Self::Multiply,
            2 => Self::Screen,
            3 => Self::Overlay,
            4 => Self::Darken,
            5 => Self::Lighten,
            6 => Self::ColorDodge,
            7 => Self::ColorBurn,
            8 => Self::HardLight,
            9 => Self::SoftLight,
            10 => Self::Difference,
            11 => Self::Exclusion,
            12 => Self::Hue,
            13 => Self::Saturation,
            14 => Self::Color,
            15 => Self::Luminosity,
            16 => Self::Addition,
            17 => Self::Subtraction,
            18 => Self::Divide,
            other => Self::Unknown(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_depth_bits_round_trip() {
        for bits in [8, 16, 32, 24] {
            assert_eq!(ColorDepth::from_bits(bits).bits(), bits);
        }
        assert_eq!(ColorDepth::from_bits(24), ColorDepth::Unknown(24));
    }

    #[test]
    fn unknown_color_depth_has_no_pixel_size() {
        assert_eq!(ColorDepth::Rgba.bytes_per_pixel().unwrap(), 4);
        assert!(matches!(
            ColorDepth::Unknown(24).bytes_per_pixel(),
            Err(NotSupportedError::ColorDepth(ColorDepth::Unknown(24)))
        ));
    }

    #[test]
    fn blend_mode_values() {
        assert_eq!(BlendMode::from_u16(0), BlendMode::Normal);
        assert_eq!(BlendMode::from_u16(17), BlendMode::Subtraction);
        assert_eq!(BlendMode::from_u16(18), BlendMode::Divide);
        assert_eq!(BlendMode::from_u16(99), BlendMode::Unknown(99));
    }
}
