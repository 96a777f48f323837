//! Camera types for the interactive scene

use crate::{Point3f, Vector3f, Viewport};
use nalgebra::{Matrix4, Perspective3, Vector2};
use serde::{Deserialize, Serialize};

/// Maps z from the GL convention [-1, 1] produced by [`Perspective3`] to the
/// [0, 1] range wgpu clip space expects.
#[rustfmt::skip]
pub fn depth_range_correction() -> Matrix4<f32> {
    Matrix4::new(
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 0.5, 0.5,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// A perspective camera for viewing the scene
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3f,
    pub target: Point3f,
    pub up: Vector3f,
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Create a new camera
    pub fn new(
        position: Point3f,
        target: Point3f,
        up: Vector3f,
        fov: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            position,
            target,
            up,
            fov,
            aspect_ratio,
            near,
            far,
        }
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Get the projection matrix in wgpu clip-space conventions
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        let perspective = Perspective3::new(self.aspect_ratio, self.fov, self.near, self.far);
        depth_range_correction() * perspective.into_inner()
    }

    /// Get the combined view-projection matrix
    pub fn view_projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update the aspect ratio after a resize
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.aspect_ratio = viewport.aspect();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Point3f::new(0.0, 0.0, 100.0),
            Point3f::new(0.0, 0.0, 0.0),
            Vector3f::new(0.0, 1.0, 0.0),
            std::f32::consts::FRAC_PI_4,
            16.0 / 9.0,
            0.1,
            1000.0,
        )
    }
}

/// Tuning for the pointer-parallax camera glide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlideConfig {
    /// World units of parallax target per pixel of pointer offset from center.
    pub follow_factor: f32,
    /// Fraction of the remaining distance covered per frame.
    pub ease: f32,
    /// Where the camera spawns; gliding home from here is the intro swoop.
    pub spawn: [f32; 3],
}

impl Default for GlideConfig {
    fn default() -> Self {
        Self {
            follow_factor: 0.05,
            ease: 0.015,
            spawn: [100.0, 100.0, 100.0],
        }
    }
}

/// A camera that glides toward a pointer-derived parallax target.
///
/// The view direction is pinned to -Z; only the position moves. Each pointer
/// move retargets x and y (y negated so the scene leans away from the
/// pointer), and each frame eases the position a fixed fraction toward the
/// target. The z coordinate never changes.
#[derive(Debug, Clone)]
pub struct GlideCamera {
    camera: Camera,
    config: GlideConfig,
    target: Vector2<f32>,
}

impl GlideCamera {
    /// Create a glide camera at the configured spawn position
    pub fn new(viewport: Viewport, config: GlideConfig) -> Self {
        let camera = Camera {
            position: Point3f::new(config.spawn[0], config.spawn[1], config.spawn[2]),
            aspect_ratio: viewport.aspect(),
            ..Camera::default()
        };
        let mut glide = Self {
            camera,
            config,
            target: Vector2::zeros(),
        };
        glide.aim();
        glide
    }

    /// Current camera state
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Parallax target currently eased toward
    pub fn target(&self) -> Vector2<f32> {
        self.target
    }

    /// Update the aspect ratio after a resize
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.camera.set_viewport(viewport);
    }

    /// Retarget the parallax from an absolute pointer position
    pub fn on_pointer_move(&mut self, position: Vector2<f32>, viewport: Viewport) {
        self.target.x = (position.x - viewport.half_width()) * self.config.follow_factor;
        self.target.y = -((position.y - viewport.half_height()) * self.config.follow_factor);
    }

    /// Ease one frame toward the parallax target
    pub fn update(&mut self) {
        self.camera.position.x += (self.target.x - self.camera.position.x) * self.config.ease;
        self.camera.position.y += (self.target.y - self.camera.position.y) * self.config.ease;
        self.aim();
    }

    fn aim(&mut self) {
        self.camera.target = self.camera.position + Vector3f::new(0.0, 0.0, -1.0);
    }
}
