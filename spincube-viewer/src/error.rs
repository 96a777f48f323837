//! Error types for the windowed viewer

use thiserror::Error;

/// Errors raised while creating or running the viewer
#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("Window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("Render error: {0}")]
    Render(#[from] spincube_render::RenderError),

    #[error("Face slot {0} is out of range")]
    SlotOutOfRange(usize),

    #[error("Face slot {0} already holds a texture")]
    SlotAlreadyFilled(usize),

    #[error("{0} face slots still empty")]
    SlotsIncomplete(usize),

    #[error("Failed to open {url}: {reason}")]
    Navigation { url: String, reason: String },
}

/// Result type alias for viewer operations
pub type Result<T> = std::result::Result<T, ViewerError>;
