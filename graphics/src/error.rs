//! Graphics error types.

use thiserror::Error;

/// Errors that can occur while creating surfaces or running blur passes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphicsError {
    /// A surface with no pixels was used as a blur source.
    #[error("invalid surface: {width}x{height}")]
    InvalidSurface { width: u32, height: u32 },
    /// An invalid parameter was provided.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// Failed to create a resource.
    #[error("resource creation failed: {0}")]
    ResourceCreationFailed(String),
    /// The surface was not created by this provider or was already released.
    #[error("unknown surface")]
    UnknownSurface,
    /// No device could be opened for the backend.
    #[error("device unavailable: {0}")]
    DeviceUnavailable(String),
    /// Backend-specific failure.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Result alias used throughout the graphics crate.
pub type GraphicsResult<T> = Result<T, GraphicsError>;
