//! Interactive windowed viewer for the spinning-cube scene
//!
//! This crate opens a window, renders the layered scene and wires up the
//! interaction model:
//! - Trackball drag rotation with inertial spin-down
//! - Pointer-parallax camera glide
//! - Face hover feedback and click-to-open links
//! - Background texture loading
//! - Access code entry form

pub mod error;
pub mod form;
pub mod loader;
pub mod navigate;
pub mod viewer;

pub use error::{Result, ViewerError};
pub use form::{validate_code, AccessForm, FormStatus, DEFAULT_ACCESS_CODES};
pub use loader::{spawn_loader, FaceSlots, LoaderEvent, FALLBACK_FACE_COLOR};
pub use navigate::{Navigator, SystemNavigator};
pub use viewer::{SceneViewer, ViewerConfig};

use spincube_core::FaceBindings;

/// Open the scene in a window with default settings
pub fn show(bindings: FaceBindings) -> Result<()> {
    SceneViewer::new(bindings, ViewerConfig::default()).run()
}
