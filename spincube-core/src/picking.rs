//! Screen-ray construction and cube face picking
//!
//! Click and hover handling both reduce to the same query: cast a ray from
//! the camera through a screen position and ask which logical face of the
//! (possibly rotated) cuboid it strikes first. Misses are an ordinary `None`.

use crate::{Camera, Cuboid, FaceIndex, Point3f, Vector3f, Viewport};
use nalgebra::{UnitQuaternion, Vector2, Vector4};

/// A ray in world space.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Point3f,
    pub direction: Vector3f,
}

impl Ray {
    /// Build the world-space ray from the camera through a screen position.
    ///
    /// The screen position is converted to normalized device coordinates
    /// (x right, y up), unprojected through the inverse view-projection, and
    /// joined with the camera position. Returns `None` when the matrices are
    /// not invertible, which a well-formed perspective camera never produces.
    pub fn from_screen(screen: Vector2<f32>, camera: &Camera, viewport: Viewport) -> Option<Ray> {
        let ndc_x = (screen.x / viewport.width as f32) * 2.0 - 1.0;
        let ndc_y = -(screen.y / viewport.height as f32) * 2.0 + 1.0;

        let inverse = camera.view_projection_matrix().try_inverse()?;
        let homogeneous = inverse * Vector4::new(ndc_x, ndc_y, 0.5, 1.0);
        if homogeneous.w == 0.0 {
            return None;
        }
        let through = Point3f::new(
            homogeneous.x / homogeneous.w,
            homogeneous.y / homogeneous.w,
            homogeneous.z / homogeneous.w,
        );

        Some(Ray {
            origin: camera.position,
            direction: (through - camera.position).normalize(),
        })
    }

    /// Möller-Trumbore intersection against a single triangle.
    ///
    /// Back faces are culled, matching a raycast against front-side
    /// materials. Returns the ray parameter of the hit.
    pub fn intersect_triangle(&self, triangle: &[Point3f; 3]) -> Option<f32> {
        const EPSILON: f32 = 1e-7;

        let edge1 = triangle[1] - triangle[0];
        let edge2 = triangle[2] - triangle[0];

        let pvec = self.direction.cross(&edge2);
        let det = edge1.dot(&pvec);
        if det < EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;

        let tvec = self.origin - triangle[0];
        let u = tvec.dot(&pvec) * inv_det;
        if u < 0.0 || u > 1.0 {
            return None;
        }

        let qvec = tvec.cross(&edge1);
        let v = self.direction.dot(&qvec) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = edge2.dot(&qvec) * inv_det;
        if t > EPSILON {
            Some(t)
        } else {
            None
        }
    }
}

/// Result of a successful face hit-test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceHit {
    pub face: FaceIndex,
    /// Ray parameter of the intersection; world distance from the camera.
    pub distance: f32,
}

/// Find the nearest cuboid face under a screen position.
///
/// The pick ray is transformed into the cuboid's local frame by the inverse
/// of `orientation`, then tested against every face triangle; the hit with
/// the smallest ray parameter wins.
///
/// # Arguments
/// * `screen` - Position in physical pixels, origin at the top-left
/// * `camera` - Camera the scene was rendered with
/// * `viewport` - Current render surface dimensions
/// * `orientation` - Accumulated rotation of the cuboid
/// * `cuboid` - Geometry to test against
///
/// # Returns
/// The hit face and its distance, or `None` for a miss
pub fn hit_test(
    screen: Vector2<f32>,
    camera: &Camera,
    viewport: Viewport,
    orientation: &UnitQuaternion<f32>,
    cuboid: &Cuboid,
) -> Option<FaceHit> {
    let ray = Ray::from_screen(screen, camera, viewport)?;

    let inverse = orientation.inverse();
    let local = Ray {
        origin: inverse.transform_point(&ray.origin),
        direction: inverse.transform_vector(&ray.direction),
    };

    let mut nearest: Option<FaceHit> = None;
    for (face, triangle) in cuboid.triangles() {
        if let Some(distance) = local.intersect_triangle(&triangle) {
            if nearest.map_or(true, |hit| distance < hit.distance) {
                nearest = Some(FaceHit { face, distance });
            }
        }
    }
    nearest
}
