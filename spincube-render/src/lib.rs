//! # Spincube Render
//!
//! GPU rendering for the spincube scene using WGPU.
//!
//! This crate draws the three layers of the scene: a panoramic sky box, a
//! mirrored shell cube sampling the same panorama, and a slightly larger
//! overlay cube carrying one texture per face.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use spincube_render::{SceneConfig, SceneRenderer};
//!
//! async fn example(window: &winit::window::Window) -> spincube_render::Result<()> {
//!     let mut renderer = SceneRenderer::new(window, SceneConfig::default()).await?;
//!
//!     // ... update camera and orientation, then draw
//!     renderer.render()?;
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod error;
pub mod scene;
pub mod texture;

// Re-export commonly used items
pub use context::GpuContext;
pub use error::{RenderError, Result};
pub use scene::{
    cuboid_vertices, CameraUniform, FaceImage, FaceParams, ModelUniform, SceneConfig,
    SceneRenderer, SceneVertex, OVERLAY_HALF_EXTENT, SHELL_HALF_EXTENT, SKY_HALF_EXTENT,
};
pub use texture::Texture;
