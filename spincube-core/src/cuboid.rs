//! Cuboid face geometry shared by picking and rendering
//!
//! The box is built face by face in a fixed order so that triangle indices,
//! GPU draw ranges, and hit-test results all agree on which logical face is
//! which: triangles `2k` and `2k + 1` always belong to face `k`.

use crate::error::{Error, Result};
use crate::{Point3f, Vector3f};
use serde::{Deserialize, Serialize};

/// One of the six logical faces of a cuboid, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaceIndex {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl FaceIndex {
    /// All faces in render order
    pub const ALL: [FaceIndex; 6] = [
        FaceIndex::PosX,
        FaceIndex::NegX,
        FaceIndex::PosY,
        FaceIndex::NegY,
        FaceIndex::PosZ,
        FaceIndex::NegZ,
    ];

    /// Face owning a triangle; two triangles per face in render order
    pub fn from_triangle(triangle: usize) -> Result<Self> {
        FaceIndex::try_from(triangle / 2)
    }

    /// Outward unit normal of the face on an unrotated cuboid
    pub fn outward_normal(&self) -> Vector3f {
        match self {
            FaceIndex::PosX => Vector3f::new(1.0, 0.0, 0.0),
            FaceIndex::NegX => Vector3f::new(-1.0, 0.0, 0.0),
            FaceIndex::PosY => Vector3f::new(0.0, 1.0, 0.0),
            FaceIndex::NegY => Vector3f::new(0.0, -1.0, 0.0),
            FaceIndex::PosZ => Vector3f::new(0.0, 0.0, 1.0),
            FaceIndex::NegZ => Vector3f::new(0.0, 0.0, -1.0),
        }
    }
}

impl TryFrom<usize> for FaceIndex {
    type Error = Error;

    fn try_from(index: usize) -> Result<Self> {
        match index {
            0 => Ok(FaceIndex::PosX),
            1 => Ok(FaceIndex::NegX),
            2 => Ok(FaceIndex::PosY),
            3 => Ok(FaceIndex::NegY),
            4 => Ok(FaceIndex::PosZ),
            5 => Ok(FaceIndex::NegZ),
            _ => Err(Error::InvalidFaceIndex(index)),
        }
    }
}

impl From<FaceIndex> for usize {
    fn from(face: FaceIndex) -> usize {
        match face {
            FaceIndex::PosX => 0,
            FaceIndex::NegX => 1,
            FaceIndex::PosY => 2,
            FaceIndex::NegY => 3,
            FaceIndex::PosZ => 4,
            FaceIndex::NegZ => 5,
        }
    }
}

/// In-plane basis of a face: the axes its local u and v run along.
fn face_basis(face: FaceIndex) -> (Vector3f, Vector3f) {
    match face {
        FaceIndex::PosX => (Vector3f::new(0.0, 0.0, -1.0), Vector3f::new(0.0, 1.0, 0.0)),
        FaceIndex::NegX => (Vector3f::new(0.0, 0.0, 1.0), Vector3f::new(0.0, 1.0, 0.0)),
        FaceIndex::PosY => (Vector3f::new(1.0, 0.0, 0.0), Vector3f::new(0.0, 0.0, -1.0)),
        FaceIndex::NegY => (Vector3f::new(1.0, 0.0, 0.0), Vector3f::new(0.0, 0.0, 1.0)),
        FaceIndex::PosZ => (Vector3f::new(1.0, 0.0, 0.0), Vector3f::new(0.0, 1.0, 0.0)),
        FaceIndex::NegZ => (Vector3f::new(-1.0, 0.0, 0.0), Vector3f::new(0.0, 1.0, 0.0)),
    }
}

/// Axis-aligned box geometry with four vertices per face.
///
/// Vertices are not shared between faces, so each face carries its own
/// normals and uvs; 24 vertices and 36 indices in total. Winding is
/// counter-clockwise seen from outside.
#[derive(Debug, Clone)]
pub struct Cuboid {
    pub half_extents: Vector3f,
    pub positions: Vec<Point3f>,
    pub normals: Vec<Vector3f>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl Cuboid {
    /// Build a box with the given half extents, centered at the origin
    pub fn new(half_extents: Vector3f) -> Self {
        let mut positions = Vec::with_capacity(24);
        let mut normals = Vec::with_capacity(24);
        let mut uvs = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        for (face_idx, face) in FaceIndex::ALL.iter().enumerate() {
            let normal = face.outward_normal();
            let (u_axis, v_axis) = face_basis(*face);
            let center = normal.component_mul(&half_extents);
            let u_half = u_axis.component_mul(&half_extents);
            let v_half = v_axis.component_mul(&half_extents);

            // Corners counter-clockwise from the face's lower-left.
            for (su, sv, uv) in [
                (-1.0, -1.0, [0.0, 0.0]),
                (1.0, -1.0, [1.0, 0.0]),
                (1.0, 1.0, [1.0, 1.0]),
                (-1.0, 1.0, [0.0, 1.0]),
            ] {
                positions.push(Point3f::from(center + u_half * su + v_half * sv));
                normals.push(normal);
                uvs.push(uv);
            }

            let base = (face_idx * 4) as u32;
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self {
            half_extents,
            positions,
            normals,
            uvs,
            indices,
        }
    }

    /// Build a cube with the given half edge length
    pub fn cube(half: f32) -> Self {
        Self::new(Vector3f::new(half, half, half))
    }

    /// Number of triangles in the geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate over triangles paired with the face that owns them
    pub fn triangles(&self) -> impl Iterator<Item = (FaceIndex, [Point3f; 3])> + '_ {
        self.indices.chunks_exact(3).enumerate().map(|(tri, idx)| {
            let face = FaceIndex::ALL[tri / 2];
            (
                face,
                [
                    self.positions[idx[0] as usize],
                    self.positions[idx[1] as usize],
                    self.positions[idx[2] as usize],
                ],
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cube_has_expected_counts() {
        let cube = Cuboid::cube(1.0);
        assert_eq!(cube.positions.len(), 24);
        assert_eq!(cube.normals.len(), 24);
        assert_eq!(cube.uvs.len(), 24);
        assert_eq!(cube.indices.len(), 36);
        assert_eq!(cube.triangle_count(), 12);
    }

    #[test]
    fn test_face_index_round_trip() {
        for face in FaceIndex::ALL {
            let index = usize::from(face);
            assert_eq!(FaceIndex::try_from(index).unwrap(), face);
        }
        assert!(FaceIndex::try_from(6).is_err());
    }

    #[test]
    fn test_two_triangles_per_face() {
        assert_eq!(FaceIndex::from_triangle(0).unwrap(), FaceIndex::PosX);
        assert_eq!(FaceIndex::from_triangle(1).unwrap(), FaceIndex::PosX);
        assert_eq!(FaceIndex::from_triangle(4).unwrap(), FaceIndex::PosY);
        assert_eq!(FaceIndex::from_triangle(5).unwrap(), FaceIndex::PosY);
        assert_eq!(FaceIndex::from_triangle(11).unwrap(), FaceIndex::NegZ);
        assert!(FaceIndex::from_triangle(12).is_err());
    }

    #[test]
    fn test_normals_point_outward() {
        let cube = Cuboid::new(Vector3f::new(1.0, 2.0, 3.0));
        for (position, normal) in cube.positions.iter().zip(&cube.normals) {
            assert!(position.coords.dot(normal) > 0.0);
        }
    }

    #[test]
    fn test_winding_is_counter_clockwise_from_outside() {
        let cube = Cuboid::cube(1.0);
        for (face, tri) in cube.triangles() {
            let cross = (tri[1] - tri[0]).cross(&(tri[2] - tri[0]));
            assert!(
                cross.dot(&face.outward_normal()) > 0.0,
                "face {:?} winds clockwise",
                face
            );
        }
    }

    #[test]
    fn test_triangles_report_owning_face() {
        let cube = Cuboid::cube(1.0);
        for (tri_idx, (face, tri)) in cube.triangles().enumerate() {
            assert_eq!(FaceIndex::from_triangle(tri_idx).unwrap(), face);
            // All three corners lie in the face plane.
            let normal = face.outward_normal();
            let half = normal.abs().dot(&cube.half_extents);
            for corner in tri {
                assert_relative_eq!(corner.coords.dot(&normal), half);
            }
        }
    }

    #[test]
    fn test_uvs_span_unit_square() {
        let cube = Cuboid::cube(1.0);
        for quad in cube.uvs.chunks_exact(4) {
            assert_eq!(quad, [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        }
    }
}
