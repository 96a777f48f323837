//! Error types for GPU rendering

use thiserror::Error;

/// Errors raised while setting up or driving the GPU scene
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("No compatible GPU adapter found")]
    AdapterNotFound,

    #[error("Device creation failed: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),

    #[error("Surface creation failed: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),

    #[error("Surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}

/// Result type alias for rendering operations
pub type Result<T> = std::result::Result<T, RenderError>;
