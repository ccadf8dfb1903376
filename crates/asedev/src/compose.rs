//! Flattening of a frame's layers into RGBA rasters.

mod blend;
mod canvas;
mod groups;

pub use self::blend::{BlendOp, blend_normal, mul8};
pub use self::canvas::composite_group;
pub use self::groups::{ExclusionReason, ExclusionRules, TextureGroup, build_groups};

use crate::format::Color;

/// A flattened RGBA image.
///
/// Rows are stored bottom-up: row 0 is the bottom row of the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u16,
    height: u16,
    pixels: Vec<Color>,
}

impl Raster {
    /// A fully transparent raster.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::TRANSPARENT; usize::from(width) * usize::from(height)],
        }
    }

    /// Builds a raster from bottom-up rows. Returns `None` if the pixel count
    /// does not match the dimensions.
    #[must_use]
    pub fn from_pixels(width: u16, height: u16, pixels: Vec<Color>) -> Option<Self> {
        (pixels.len() == usize::from(width) * usize::from(height)).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// All pixels, bottom row first.
    #[must_use]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// The pixel at column `x` of row `y`, counting rows from the bottom.
    #[must_use]
    pub fn pixel(&self, x: u16, y: u16) -> Option<Color> {
        self.index_of(i32::from(x), i32::from(y))
            .map(|index| self.pixels[index])
    }

    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|&x| x < usize::from(self.width))?;
        let y = usize::try_from(y).ok().filter(|&y| y < usize::from(self.height))?;
        Some(y * usize::from(self.width) + x)
    }

    /// RGBA bytes with the top row first, as image encoders expect.
    #[must_use]
    pub fn to_rgba_top_down(&self) -> Vec<u8> {
        let row_len = usize::from(self.width).max(1);
        self.pixels
            .chunks(row_len)
            .rev()
            .flat_map(|row| row.iter().flat_map(|color| color.to_bytes()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_down_bytes_reverse_rows() {
        let bottom = Color::from_rgba(1, 1, 1, 1);
        let top = Color::from_rgba(2, 2, 2, 2);
        let raster = Raster::from_pixels(2, 2, vec![bottom, bottom, top, top]).unwrap();
        assert_eq!(
            raster.to_rgba_top_down(),
            [2, 2, 2, 2, 2, 2, 2, 2, 1, 1, 1, 1, 1, 1, 1, 1]
        );
        assert_eq!(raster.pixel(0, 1), Some(top));
        assert_eq!(raster.pixel(2, 0), None);
    }

    #[test]
    fn from_pixels_checks_length() {
        assert!(Raster::from_pixels(2, 2, vec![Color::TRANSPARENT; 3]).is_none());
        assert_eq!(Raster::new(3, 2).pixels().len(), 6);
    }
}
