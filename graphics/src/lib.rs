//! # polyblur graphics
//!
//! Dual Kawase pyramid blur over pluggable render surfaces.
//!
//! ## Overview
//!
//! This crate provides:
//! - [`SurfaceProvider`] - Trait for anything that can create, render into and release surfaces
//! - [`dual_blur`] / [`DualBlur`] - The blur itself, as a function and as a stateful effect
//! - [`shader`] - WGSL kernels and the matching CPU tap tables
//! - [`sprite`] - Quad vertices for sprites that show a blurred atlas frame
//! - Backends: Dummy (records calls), CPU (`image`) and wgpu
//!
//! ## Example
//!
//! ```ignore
//! use polyblur_graphics::{BlurConfig, CpuBackend, CpuSurface, dual_blur};
//!
//! let mut backend = CpuBackend::new();
//! let source = CpuSurface::from_rgba8(&image);
//! let output = dual_blur(&mut backend, &source, &BlurConfig::default())?;
//! let blurred = output.surface.to_rgba8();
//! ```

pub mod backend;
pub mod blur;
pub mod error;
pub mod shader;
pub mod sprite;
pub mod types;

// Re-export main types for convenience
pub use backend::SurfaceProvider;
pub use blur::{BlurConfig, BlurOutput, DualBlur, dual_blur};
pub use error::{GraphicsError, GraphicsResult};
pub use sprite::{BlurSpriteVertex, assemble_quad};
pub use types::{BlurKernel, Extent2d, KernelParams, PassKind, SurfaceOrigin};

#[cfg(feature = "cpu")]
pub use backend::cpu::{CpuBackend, CpuSurface};
#[cfg(feature = "dummy")]
pub use backend::dummy::{DummyBackend, DummyOp, DummySurface};
#[cfg(feature = "wgpu-backend")]
pub use backend::wgpu_backend::{WgpuBackend, WgpuSurface};

/// Graphics library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the library version. Call once at startup if you want it in the log.
pub fn init() {
    log::info!("polyblur graphics v{} initialized", VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[cfg(feature = "dummy")]
    #[test]
    fn test_dummy_backend() {
        let backend = DummyBackend::new();
        assert!(backend.name() == "Dummy Backend");
    }
}
