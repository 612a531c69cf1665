//! Surface provider abstraction.
//!
//! The blur pipeline never touches pixels itself. It asks a
//! [`SurfaceProvider`] to create render surfaces, to run a pass from one
//! surface into another, and to release surfaces it no longer needs.
//!
//! # Available Backends
//!
//! - `dummy` (default): Records operations, no pixels. Used for testing
//! - `cpu` (default): `image`-backed surfaces filtered on the CPU
//! - `wgpu-backend`: Render targets on a headless wgpu device

#[cfg(feature = "dummy")]
pub mod dummy;

#[cfg(feature = "cpu")]
pub mod cpu;

#[cfg(feature = "wgpu-backend")]
pub mod wgpu_backend;

use crate::error::GraphicsResult;
use crate::types::{Extent2d, PassKind, SurfaceOrigin};

/// Creates, renders into and releases 2D render surfaces.
///
/// Surfaces are plain owned values. Dropping one without calling
/// [`SurfaceProvider::release_surface`] is allowed but leaves cleanup to
/// `Drop`, which for GPU backends means an unpredictable point in time.
pub trait SurfaceProvider {
    /// Handle to a render surface.
    type Surface;

    /// Get the backend name.
    fn name(&self) -> &'static str;

    /// Row order of the surfaces this provider renders into.
    fn origin(&self) -> SurfaceOrigin {
        SurfaceOrigin::TopLeft
    }

    /// Create an uninitialized surface.
    fn create_surface(&mut self, extent: Extent2d, label: &str) -> GraphicsResult<Self::Surface>;

    /// Free a surface and everything it owns.
    fn release_surface(&mut self, surface: Self::Surface);

    fn extent(&self, surface: &Self::Surface) -> Extent2d;

    /// Run `pass` reading `source` and covering all of `target`.
    fn render(
        &mut self,
        source: &Self::Surface,
        target: &mut Self::Surface,
        pass: PassKind,
    ) -> GraphicsResult<()>;
}
