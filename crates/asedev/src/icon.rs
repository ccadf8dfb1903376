//! The 16x16 icon shown for imported Aseprite files.

use std::sync::LazyLock;

use crate::{compose::Raster, format::Color};

pub const ICON_SIZE: u16 = 16;

const TRANSPARENT: Color = Color::TRANSPARENT;
const BORDER: Color = Color::from_rgba(102, 84, 97, 255);
const SHADOW: Color = Color::from_rgba(125, 145, 158, 255);
const WHITE: Color = Color::from_rgba(255, 255, 255, 255);

/// A page with a folded corner, bottom row first to match [`Raster`].
const ICON_ROWS: [&str; 16] = [
    "................",
    "..bbbbbbbbbbbb..",
    "..bssssssssssb..",
    "..bwwwwwwwwwwb..",
    "..bwwwwwwwwwwb..",
    "..bwwwwwwwwwwb..",
    "..bwwwwwwwwwwb..",
    "..bwwwwwwwwwwb..",
    "..bwwbwwwwbwwb..",
    "..bwwbwwwwbwwb..",
    "..bwwbwwwsbssb..",
    "..bwwbwwwbbbbb..",
    "..bwwwwwwbwwwb..",
    "..bwwwwwwbwwb...",
    "..bwwwwwwbwb....",
    "..bbbbbbbbb.....",
];

static FILE_ICON: LazyLock<Raster> = LazyLock::new(|| {
    let pixels = ICON_ROWS
        .iter()
        .flat_map(|row| row.bytes())
        .map(|cell| match cell {
            b'b' => BORDER,
            b's' => SHADOW,
            b'w' => WHITE,
            _ => TRANSPARENT,
        })
        .collect();
    Raster::from_pixels(ICON_SIZE, ICON_SIZE, pixels)
        .unwrap_or_else(|| Raster::new(ICON_SIZE, ICON_SIZE))
});

/// Returns the file icon, building it on first use.
#[must_use]
pub fn file_icon() -> &'static Raster {
    &FILE_ICON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_rows_are_square() {
        assert!(ICON_ROWS.iter().all(|row| row.len() == usize::from(ICON_SIZE)));
    }

    #[test]
    fn icon_is_memoized() {
        assert!(std::ptr::eq(file_icon(), file_icon()));
    }

    #[test]
    fn icon_has_folded_corner_at_top_right() {
        let icon = file_icon();
        assert_eq!((icon.width(), icon.height()), (16, 16));
        assert_eq!(icon.pixel(0, 0), Some(TRANSPARENT));
        assert_eq!(icon.pixel(2, 15), Some(BORDER));
        assert_eq!(icon.pixel(12, 15), Some(TRANSPARENT));
        assert_eq!(icon.pixel(3, 2), Some(SHADOW));
        assert_eq!(icon.pixel(3, 3), Some(WHITE));
    }
}
