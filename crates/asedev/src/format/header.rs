use bitflags::bitflags;

use crate::{errors::FormatError, format::ColorDepth, utils::mem_reader::MemReader};

/// Size of the file header in bytes.
pub const HEADER_SIZE: usize = 128;

const MAGIC: u16 = 0xA5E0;

bitflags! {
    /// Flags for the whole file.
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    pub struct HeaderFlags: u32 {
        /// Layer opacity is valid.
        const HAS_LAYER_OPACITY = 0x0001;
        /// Layer group blend mode is valid.
        const HAS_LAYER_GROUP_BLEND = 0x0002;
        /// Layers have UUIDs.
        const HAS_LAYER_UUIDS = 0x0004;
    }
}

/// The fixed-size header at the start of every Aseprite file.
#[derive(Debug, Clone)]
pub struct Header {
    file_size: u32,
    frame_count: u16,
    width: u16,
    height: u16,
    color_depth: ColorDepth,
    flags: HeaderFlags,
    /// Deprecated in favor of per-frame durations.
    speed_ms: u16,
    transparent_index: u8,
    num_colors: u16,
    pixel_width: u8,
    pixel_height: u8,
    grid_x: i16,
    grid_y: i16,
    grid_width: u16,
    grid_height: u16,
}

impl Header {
    /// Reads the header, checking the magic number before any other field is
    /// interpreted.
    pub(crate) fn read<M: MemReader>(reader: &mut M) -> Result<Self, FormatError> {
        let mut reader = reader.read_to_subreader("header", HEADER_SIZE)?;
        let file_size = reader.read_u32_le()?;
        let magic = reader.read_u16_le()?;
        if magic != MAGIC {
            return Err(FormatError::BadMagic {
                what: "file",
                expected: MAGIC,
                found: magic,
            });
        }
        let frame_count = reader.read_u16_le()?;
        let width = reader.read_u16_le()?;
        let height = reader.read_u16_le()?;
        let color_depth = ColorDepth::from_bits(reader.read_u16_le()?);
        let flags = HeaderFlags::from_bits_retain(reader.read_u32_le()?);
        let speed_ms = reader.read_u16_le()?;
        reader.skip("reserved", 8)?;
        let transparent_index = reader.read_u8()?;
        reader.skip("reserved", 3)?;
        let num_colors = reader.read_u16_le()?;
        let pixel_width = reader.read_u8()?;
        let pixel_height = reader.read_u8()?;
        let grid_x = reader.read_i16_le()?;
        let grid_y = reader.read_i16_le()?;
        let grid_width = reader.read_u16_le()?;
        let grid_height = reader.read_u16_le()?;
        // The remaining 84 bytes are reserved.

        Ok(Self {
            file_size,
            frame_count,
            width,
            height,
            color_depth,
            flags,
            speed_ms,
            transparent_index,
            num_colors,
            pixel_width,
            pixel_height,
            grid_x,
            grid_y,
            grid_width,
            grid_height,
        })
    }

    /// Total size of the file in bytes, header included.
    #[must_use]
    pub fn file_size(&self) -> u32 {
        self.file_size
    }

    #[must_use]
    pub fn frame_count(&self) -> u16 {
        self.frame_count
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
    pub fn color_depth(&self) -> ColorDepth {
        self.color_depth
    }

    #[must_use]
    pub fn flags(&self) -> HeaderFlags {
        self.flags
    }

    #[must_use]
    pub fn speed_ms(&self) -> u16 {
        self.speed_ms
    }

    #[must_use]
    pub fn transparent_index(&self) -> u8 {
        self.transparent_index
    }

    #[must_use]
    pub fn num_colors(&self) -> u16 {
        self.num_colors
    }

    /// The pixel aspect ratio as `(width, height)`. `(0, 0)` means square.
    #[must_use]
    pub fn pixel_ratio(&self) -> (u8, u8) {
        (self.pixel_width, self.pixel_height)
    }

    /// Grid origin and cell size as `(x, y, width, height)`.
    #[must_use]
    pub fn grid(&self) -> (i16, i16, u16, u16) {
        (self.grid_x, self.grid_y, self.grid_width, self.grid_height)
    }
}
