use glam::{Vec2, Vec3, Vec4};
use serde::Serialize;

use crate::sheet::IslandRect;

/// Triangle indices shared by every quad: two counter-clockwise triangles
/// when viewed from -Z.
pub const QUAD_TRIANGLES: [u32; 6] = [0, 3, 1, 3, 0, 2];

const NORMAL: Vec3 = Vec3::NEG_Z;
const TANGENT: Vec4 = Vec4::new(1.0, 0.0, 0.0, -1.0);

/// A textured rectangle in the XY plane.
///
/// Vertices are ordered bottom-left, bottom-right, top-left, top-right.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuadMesh {
    name: String,
    vertices: [Vec3; 4],
    uvs: [Vec2; 4],
    triangles: [u32; 6],
    normals: [Vec3; 4],
    tangents: [Vec4; 4],
}

impl QuadMesh {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn vertices(&self) -> &[Vec3; 4] {
        &self.vertices
    }

    #[must_use]
    pub fn uvs(&self) -> &[Vec2; 4] {
        &self.uvs
    }

    #[must_use]
    pub fn triangles(&self) -> &[u32; 6] {
        &self.triangles
    }

    #[must_use]
    pub fn normals(&self) -> &[Vec3; 4] {
        &self.normals
    }

    #[must_use]
    pub fn tangents(&self) -> &[Vec4; 4] {
        &self.tangents
    }
}

/// A quad mesh and where to place its local origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quad {
    mesh: QuadMesh,
    origin: Vec3,
}

impl Quad {
    /// Builds the quad covering `island` on a `sheet_width` by `sheet_height`
    /// sheet, with one pixel spanning `scale` world units.
    ///
    /// The mesh's local origin is its bottom-left corner. Placing every quad of
    /// a sheet at its [`origin`](Self::origin) lays the islands out exactly as
    /// on the sheet, with the sheet's bottom-left corner at world `(0, 0)`.
    #[must_use]
    pub fn from_island(
        island: &IslandRect,
        base_name: &str,
        scale: f32,
        sheet_width: u16,
        sheet_height: u16,
    ) -> Self {
        let width = f32::from(island.width()) * scale;
        let height = f32::from(island.height()) * scale;

        let sheet_width = f32::from(sheet_width);
        let sheet_height = f32::from(sheet_height);
        let min_u = f32::from(island.min_x()) / sheet_width;
        let max_u = (f32::from(island.max_x()) + 1.0) / sheet_width;
        let min_v = 1.0 - f32::from(island.min_y()) / sheet_height;
        let max_v = 1.0 - (f32::from(island.max_y()) + 1.0) / sheet_height;

        let mesh = QuadMesh {
            name: format!("{base_name}_({}, {})", island.min_x(), island.min_y()),
            vertices: [
                Vec3::ZERO,
                Vec3::new(width, 0.0, 0.0),
                Vec3::new(0.0, height, 0.0),
                Vec3::new(width, height, 0.0),
            ],
            uvs: [
                Vec2::new(min_u, max_v),
                Vec2::new(max_u, max_v),
                Vec2::new(min_u, min_v),
                Vec2::new(max_u, min_v),
            ],
            triangles: QUAD_TRIANGLES,
            normals: [NORMAL; 4],
            tangents: [TANGENT; 4],
        };

        let bottom_row = sheet_height - 1.0 - f32::from(island.max_y());
        let origin = Vec3::new(f32::from(island.min_x()) * scale, bottom_row * scale, 0.0);

        Self { mesh, origin }
    }

    #[must_use]
    pub fn mesh(&self) -> &QuadMesh {
        &self.mesh
    }

    /// World position of the mesh's bottom-left corner.
    #[must_use]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }
}
