//! # spincube
//!
//! An interactive spinning-cube scene for Rust.
//!
//! This is the umbrella crate that provides convenient access to all spincube
//! functionality. You can use this crate to get everything in one place, or use
//! individual crates for more granular control over dependencies.
//!
//! ## Features
//!
//! - **Core**: Trackball rotation math, the drag/spin state machine, cuboid
//!   face geometry, ray-based face picking, and the glide camera
//! - **Render**: GPU rendering of the skybox, reflective shell, and textured
//!   faces using wgpu
//! - **Viewer**: Windowed interactive viewer with pointer input, background
//!   texture loading, and the access-code form overlay
//!
//! ## Quick Start
//!
//! ```rust
//! use spincube::prelude::*;
//!
//! // Project a pointer offset onto the trackball hemisphere
//! let viewport = Viewport::new(800, 600);
//! let point = project_on_hemisphere(Vector2::new(120.0, -40.0), viewport);
//! assert!(point.z >= 0.0);
//!
//! // Drive the spin state machine directly
//! let mut spin = Spinnable::new(SpinConfig::default());
//! spin.tick(viewport);
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Core only
//! - `render`: GPU scene rendering
//! - `viewer`: Interactive windowed viewer (implies `render`)
//! - `all`: Enables all features

// Re-export core functionality
pub use spincube_core::*;

// Re-export sub-crates
#[cfg(feature = "render")]
pub use spincube_render as render;

#[cfg(feature = "viewer")]
pub use spincube_viewer as viewer;

/// Convenient imports for common use cases
pub mod prelude {
    pub use spincube_core::*;

    #[cfg(feature = "render")]
    pub use spincube_render::*;

    #[cfg(feature = "viewer")]
    pub use spincube_viewer::*;
}
