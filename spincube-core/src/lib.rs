//! Core math and interaction state for spincube
//!
//! This crate provides the building blocks of the interactive scene: trackball
//! hemisphere projection, incremental rotation, the drag/spin state machine,
//! cuboid face geometry, ray-based face picking, and the glide camera.

pub mod camera;
pub mod cuboid;
pub mod error;
pub mod faces;
pub mod picking;
pub mod spin;
pub mod trackball;

pub use camera::*;
pub use cuboid::*;
pub use error::*;
pub use faces::*;
pub use picking::*;
pub use spin::*;
pub use trackball::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix4, Point3, UnitQuaternion, Vector2, Vector3};

// Type aliases for easier imports
pub type Point3f = Point3<f32>;
pub type Vector3f = Vector3<f32>;
pub type Vector2f = Vector2<f32>;
