//! Error types for spincube

use thiserror::Error;

/// Main error type for spincube operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid face index: {0}")]
    InvalidFaceIndex(usize),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for spincube operations
pub type Result<T> = std::result::Result<T, Error>;
