//! Common utilities for blur integration tests.
//!
//! Backends have different surface types, so tests go through
//! [`run_blur`], which uploads an image to the requested backend, blurs it
//! and reports what came out.

use image::{Rgba, RgbaImage};

use polyblur_graphics::{
    BlurConfig, CpuBackend, CpuSurface, DummyBackend, Extent2d, GraphicsResult, SurfaceProvider,
    dual_blur,
};

// ============================================================================
// Backend Enumeration
// ============================================================================

/// Available surface providers for testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Dummy backend (no pixels).
    Dummy,
    /// CPU backend (`image` surfaces).
    Cpu,
    /// wgpu backend on a headless device.
    WebGpu,
}

impl Backend {
    /// Check if this backend is compiled in.
    pub fn is_available(&self) -> bool {
        match self {
            Backend::Dummy | Backend::Cpu => true,
            #[cfg(feature = "wgpu-backend")]
            Backend::WebGpu => true,
            #[cfg(not(feature = "wgpu-backend"))]
            Backend::WebGpu => false,
        }
    }

    /// Whether blur results carry pixels.
    pub fn has_pixels(&self) -> bool {
        !matches!(self, Backend::Dummy)
    }
}

/// What a blur run produced.
#[derive(Debug)]
pub struct BlurSummary {
    pub extent: Extent2d,
    pub levels: Vec<Extent2d>,
    pub flip_y: bool,
    /// Result pixels, `None` for the dummy backend.
    pub pixels: Option<RgbaImage>,
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Blur `image` on `backend`. Returns `None` when the backend cannot run
/// here (not compiled in, or no GPU adapter).
pub fn run_blur(
    backend: Backend,
    image: &RgbaImage,
    config: &BlurConfig,
) -> Option<GraphicsResult<BlurSummary>> {
    init_logger();
    if !backend.is_available() {
        return None;
    }
    match backend {
        Backend::Dummy => {
            let mut provider = DummyBackend::new();
            let extent = Extent2d::new(image.width(), image.height());
            let source = provider.create_surface(extent, "source").ok()?;
            Some(summarize(&mut provider, &source, config, |_, _| None))
        }
        Backend::Cpu => {
            let mut provider = CpuBackend::new();
            let source = CpuSurface::from_rgba8(image);
            Some(summarize(&mut provider, &source, config, |_, s| {
                Some(s.to_rgba8())
            }))
        }
        Backend::WebGpu => run_wgpu(image, config),
    }
}

#[cfg(feature = "wgpu-backend")]
fn run_wgpu(image: &RgbaImage, config: &BlurConfig) -> Option<GraphicsResult<BlurSummary>> {
    let mut provider = match polyblur_graphics::WgpuBackend::new() {
        Ok(provider) => provider,
        Err(err) => {
            eprintln!("wgpu unavailable: {err}");
            return None;
        }
    };
    let source = provider.upload_image(image).ok()?;
    Some(summarize(&mut provider, &source, config, |p, s| {
        p.read_image(s).ok()
    }))
}

#[cfg(not(feature = "wgpu-backend"))]
fn run_wgpu(_image: &RgbaImage, _config: &BlurConfig) -> Option<GraphicsResult<BlurSummary>> {
    None
}

fn summarize<P: SurfaceProvider>(
    provider: &mut P,
    source: &P::Surface,
    config: &BlurConfig,
    read: impl Fn(&P, &P::Surface) -> Option<RgbaImage>,
) -> GraphicsResult<BlurSummary> {
    let output = dual_blur(provider, source, config)?;
    let pixels = read(provider, &output.surface);
    let summary = BlurSummary {
        extent: output.extent,
        levels: output.levels,
        flip_y: output.flip_y,
        pixels,
    };
    provider.release_surface(output.surface);
    Ok(summary)
}

// ============================================================================
// Test images
// ============================================================================

pub fn flat_image(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(color))
}

/// Black image with a single white pixel in the middle.
pub fn dot_image(size: u32) -> RgbaImage {
    let mut image = flat_image(size, size, [0, 0, 0, 255]);
    image.put_pixel(size / 2, size / 2, Rgba([255, 255, 255, 255]));
    image
}

/// Check that every channel of every pixel is within `tolerance` of `expected`.
pub fn all_pixels_near(image: &RgbaImage, expected: [u8; 4], tolerance: u8) -> bool {
    image.pixels().all(|p| {
        p.0.iter()
            .zip(expected)
            .all(|(&a, b)| a.abs_diff(b) <= tolerance)
    })
}
