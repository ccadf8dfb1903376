//! Segmentation of a sprite sheet into rectangular islands and quad meshes.

mod grid;
mod island;
mod quad;

pub use self::grid::{Cell, OccupancyGrid};
pub use self::island::IslandRect;
pub use self::quad::{QUAD_TRIANGLES, Quad, QuadMesh};

use crate::compose::Raster;

/// Builds one quad per alpha-connected island of `raster`.
#[must_use]
pub fn build_quads(raster: &Raster, base_name: &str, scale: f32) -> Vec<Quad> {
    let (width, height) = (raster.width(), raster.height());
    let islands = OccupancyGrid::from_raster(raster).into_islands();
    log::debug!("Found {} island(s) in {base_name:?}", islands.len());
    islands
        .iter()
        .map(|island| Quad::from_island(island, base_name, scale, width, height))
        .collect()
}
