//! Trackball hemisphere projection and incremental rotation
//!
//! Drag rotation works by mapping 2D pointer offsets onto a unit upper
//! hemisphere and rotating the object by the arc between successive
//! hemisphere points. The projection and the rotation derivation are pure
//! functions; the drag state machine in [`crate::spin`] drives them.

use crate::Vector3f;
use nalgebra::{Unit, UnitQuaternion, Vector2};

/// Viewport dimensions in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Create a viewport from pixel dimensions. Zero extents (a minimized
    /// window) clamp to one pixel so projections and aspect ratios stay
    /// finite.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Half the viewport width in pixels
    pub fn half_width(&self) -> f32 {
        self.width as f32 / 2.0
    }

    /// Half the viewport height in pixels
    pub fn half_height(&self) -> f32 {
        self.height as f32 / 2.0
    }

    /// Width-over-height aspect ratio
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Project a pointer offset onto the unit upper hemisphere.
///
/// Each offset component is normalized by half the viewport extent (y
/// inverted so screen-up is hemisphere-up) and clamped to [-1, 1]. Offsets
/// inside the unit disk lift onto the upper hemisphere; offsets outside it
/// are pulled back onto the equator.
///
/// # Arguments
/// * `offset` - Pointer displacement in pixels relative to the drag origin
/// * `viewport` - Current viewport dimensions
///
/// # Returns
/// A unit-length vector with non-negative z
pub fn project_on_hemisphere(offset: Vector2<f32>, viewport: Viewport) -> Vector3f {
    let nx = (offset.x / viewport.half_width()).clamp(-1.0, 1.0);
    let ny = (-offset.y / viewport.half_height()).clamp(-1.0, 1.0);

    let planar = (nx * nx + ny * ny).sqrt();
    if planar > 1.0 {
        Vector3f::new(nx, ny, 0.0).normalize()
    } else {
        Vector3f::new(nx, ny, (1.0 - planar * planar).sqrt())
    }
}

/// Compute the incremental rotation carrying `start` onto `end`.
///
/// The arc angle between the two hemisphere points is scaled by
/// `sensitivity` before the quaternion is built. The cosine ratio is clamped
/// to [-1, 1] first: floating-point error pushes raw dot products past the
/// domain of `acos`, which would poison the orientation with NaN.
///
/// Coincident points (and antipodal ones, which leave no usable rotation
/// axis) produce the identity rotation.
///
/// # Arguments
/// * `start` - Hemisphere point at the beginning of the increment
/// * `end` - Hemisphere point at the end of the increment
/// * `sensitivity` - Multiplier applied to the arc angle
///
/// # Returns
/// A unit quaternion rotating `start` toward `end`
pub fn rotation_between(
    start: &Vector3f,
    end: &Vector3f,
    sensitivity: f32,
) -> UnitQuaternion<f32> {
    let denom = start.norm() * end.norm();
    if denom == 0.0 {
        return UnitQuaternion::identity();
    }

    let cos = (start.dot(end) / denom).clamp(-1.0, 1.0);
    let angle = cos.acos();
    if angle == 0.0 {
        return UnitQuaternion::identity();
    }

    let axis = start.cross(end);
    if axis.norm_squared() == 0.0 {
        return UnitQuaternion::identity();
    }

    UnitQuaternion::from_axis_angle(&Unit::new_normalize(axis), angle * sensitivity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_relative_eq, relative_eq};

    fn viewport() -> Viewport {
        Viewport::new(800, 600)
    }

    #[test]
    fn test_inside_disk_projects_onto_hemisphere() {
        let samples = [
            Vector2::new(0.0, 0.0),
            Vector2::new(120.0, -40.0),
            Vector2::new(-200.0, 100.0),
            Vector2::new(50.0, 50.0),
        ];
        for offset in samples {
            let p = project_on_hemisphere(offset, viewport());
            assert_relative_eq!(p.norm(), 1.0, epsilon = 1e-6);
            assert!(p.z >= 0.0, "z must be non-negative, got {}", p.z);
        }
    }

    #[test]
    fn test_outside_disk_clamps_to_equator() {
        let samples = [
            Vector2::new(400.0, 300.0),
            Vector2::new(-400.0, 300.0),
            Vector2::new(390.0, -290.0),
            Vector2::new(10_000.0, -10_000.0),
        ];
        for offset in samples {
            let p = project_on_hemisphere(offset, viewport());
            assert_relative_eq!(p.norm(), 1.0, epsilon = 1e-6);
            assert_relative_eq!(p.z, 0.0);
        }
    }

    #[test]
    fn test_origin_projects_to_pole() {
        let p = project_on_hemisphere(Vector2::zeros(), viewport());
        assert_relative_eq!(p, Vector3f::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_zero_size_viewport_clamps_to_one_pixel() {
        let viewport = Viewport::new(0, 0);
        assert_eq!(viewport.width, 1);
        assert_eq!(viewport.height, 1);
        assert_relative_eq!(viewport.aspect(), 1.0);

        let p = project_on_hemisphere(Vector2::new(35.0, -20.0), viewport);
        assert!(p.iter().all(|c| c.is_finite()));
        assert_relative_eq!(p.norm(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_y_axis_is_inverted() {
        // Screen y grows downward; hemisphere y grows upward.
        let p = project_on_hemisphere(Vector2::new(0.0, -150.0), viewport());
        assert!(p.y > 0.0);
    }

    #[test]
    fn test_coincident_points_give_identity() {
        let samples = [
            Vector3f::new(0.0, 0.0, 1.0),
            Vector3f::new(0.6, 0.0, 0.8),
            Vector3f::new(-0.3, 0.4, (1.0f32 - 0.25).sqrt()),
        ];
        for p in samples {
            let q = rotation_between(&p, &p, 2.0);
            assert_eq!(q, UnitQuaternion::identity());
        }
    }

    #[test]
    fn test_rotation_carries_start_onto_end() {
        let pairs = [
            (Vector3f::new(0.0, 0.0, 1.0), Vector3f::new(0.3, 0.0, (1.0f32 - 0.09).sqrt())),
            (Vector3f::new(0.0, 0.0, 1.0), Vector3f::new(0.0, -0.5, (1.0f32 - 0.25).sqrt())),
            (Vector3f::new(0.5, 0.5, (0.5f32).sqrt()), Vector3f::new(-0.2, 0.1, (1.0f32 - 0.05).sqrt())),
        ];
        for (a, b) in pairs {
            // Unit sensitivity so the rotation lands exactly on b.
            let q = rotation_between(&a, &b, 1.0);
            let rotated = (q * a).normalize();
            assert!(
                relative_eq!(rotated, b.normalize(), epsilon = 1e-5),
                "expected {:?} to land on {:?}, got {:?}",
                a,
                b,
                rotated
            );
        }
    }

    #[test]
    fn test_sensitivity_scales_angle() {
        let a = Vector3f::new(0.0, 0.0, 1.0);
        let b = Vector3f::new(0.2, 0.0, (1.0f32 - 0.04).sqrt());
        let single = rotation_between(&a, &b, 1.0).angle();
        let double = rotation_between(&a, &b, 2.0).angle();
        assert_relative_eq!(double, single * 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_near_parallel_points_stay_finite() {
        // Dot products of nearly identical vectors overshoot 1.0; the clamp
        // must keep acos out of NaN territory.
        let a = Vector3f::new(0.577_350_3, 0.577_350_3, 0.577_350_3);
        let b = a * 1.000_000_1;
        let q = rotation_between(&a, &b, 2.0);
        assert!(q.angle().is_finite());
        assert!(q.into_inner().norm().is_finite());
    }

    #[test]
    fn test_antipodal_points_give_identity() {
        let a = Vector3f::new(1.0, 0.0, 0.0);
        let b = Vector3f::new(-1.0, 0.0, 0.0);
        let q = rotation_between(&a, &b, 2.0);
        assert_eq!(q, UnitQuaternion::identity());
    }
}
