//! CPU surface provider.
//!
//! Surfaces are `Rgba32FImage`s. Passes evaluate the same tap tables the
//! WGSL kernels use, with bilinear clamp-to-edge sampling, so results match
//! the GPU path up to rounding.

use image::{Rgba, Rgba32FImage, RgbaImage};

use crate::error::{GraphicsError, GraphicsResult};
use crate::shader::kernel_taps;
use crate::types::{Extent2d, PassKind};

use super::SurfaceProvider;

/// Surface handed out by [`CpuBackend`].
#[derive(Debug, Clone, PartialEq)]
pub struct CpuSurface {
    image: Rgba32FImage,
}

impl CpuSurface {
    pub fn from_rgba32f(image: Rgba32FImage) -> Self {
        Self { image }
    }

    /// Convert an 8-bit image, mapping channels to `[0, 1]`.
    pub fn from_rgba8(image: &RgbaImage) -> Self {
        let converted = Rgba32FImage::from_fn(image.width(), image.height(), |x, y| {
            let Rgba(c) = *image.get_pixel(x, y);
            Rgba(c.map(|v| v as f32 / 255.0))
        });
        Self { image: converted }
    }

    pub fn image(&self) -> &Rgba32FImage {
        &self.image
    }

    pub fn into_image(self) -> Rgba32FImage {
        self.image
    }

    /// Convert to 8 bits per channel, clamping to `[0, 1]`.
    pub fn to_rgba8(&self) -> RgbaImage {
        RgbaImage::from_fn(self.image.width(), self.image.height(), |x, y| {
            let Rgba(c) = *self.image.get_pixel(x, y);
            Rgba(c.map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8))
        })
    }

    pub fn extent(&self) -> Extent2d {
        Extent2d::new(self.image.width(), self.image.height())
    }

    /// Bilinear sample at normalized `uv`, clamping to the edge texels.
    pub fn sample(&self, u: f32, v: f32) -> [f32; 4] {
        let (w, h) = self.image.dimensions();
        if w == 0 || h == 0 {
            return [0.0; 4];
        }
        let x = u * w as f32 - 0.5;
        let y = v * h as f32 - 0.5;
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;

        let texel = |tx: f32, ty: f32| -> [f32; 4] {
            let cx = (tx.max(0.0) as u32).min(w - 1);
            let cy = (ty.max(0.0) as u32).min(h - 1);
            self.image.get_pixel(cx, cy).0
        };
        let a = texel(x0, y0);
        let b = texel(x0 + 1.0, y0);
        let c = texel(x0, y0 + 1.0);
        let d = texel(x0 + 1.0, y0 + 1.0);

        std::array::from_fn(|i| {
            let top = a[i] + (b[i] - a[i]) * fx;
            let bottom = c[i] + (d[i] - c[i]) * fx;
            top + (bottom - top) * fy
        })
    }
}

/// CPU surface provider.
#[derive(Debug, Default)]
pub struct CpuBackend {
    passes: usize,
}

impl CpuBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of passes rendered so far.
    pub fn passes_rendered(&self) -> usize {
        self.passes
    }
}

impl SurfaceProvider for CpuBackend {
    type Surface = CpuSurface;

    fn name(&self) -> &'static str {
        "CPU Backend"
    }

    fn create_surface(&mut self, extent: Extent2d, label: &str) -> GraphicsResult<CpuSurface> {
        if extent.is_empty() {
            return Err(GraphicsError::InvalidSurface {
                width: extent.width,
                height: extent.height,
            });
        }
        log::trace!("CpuBackend: creating surface {:?} ({})", label, extent);
        Ok(CpuSurface {
            image: Rgba32FImage::new(extent.width, extent.height),
        })
    }

    fn release_surface(&mut self, surface: CpuSurface) {
        log::trace!("CpuBackend: releasing surface ({})", surface.extent());
        drop(surface);
    }

    fn extent(&self, surface: &CpuSurface) -> Extent2d {
        surface.extent()
    }

    fn render(
        &mut self,
        source: &CpuSurface,
        target: &mut CpuSurface,
        pass: PassKind,
    ) -> GraphicsResult<()> {
        let extent = target.extent();
        log::trace!(
            "CpuBackend: {} pass {} -> {}",
            pass.label(),
            source.extent(),
            extent
        );

        let (tw, th) = (extent.width as f32, extent.height as f32);
        match pass {
            PassKind::Capture => {
                for (x, y, pixel) in target.image.enumerate_pixels_mut() {
                    let u = (x as f32 + 0.5) / tw;
                    let v = (y as f32 + 0.5) / th;
                    *pixel = Rgba(source.sample(u, v));
                }
            }
            PassKind::Kernel(kernel, params) => {
                let [hx, hy] = params.half_pixel();
                let taps = kernel_taps(kernel);
                for (x, y, pixel) in target.image.enumerate_pixels_mut() {
                    let u = (x as f32 + 0.5) / tw;
                    let v = (y as f32 + 0.5) / th;
                    let mut sum = [0.0_f32; 4];
                    for &([dx, dy], weight) in taps {
                        let s = source.sample(u + dx * hx, v + dy * hy);
                        for (acc, value) in sum.iter_mut().zip(s) {
                            *acc += value * weight;
                        }
                    }
                    *pixel = Rgba(sum);
                }
            }
        }

        self.passes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BlurKernel, KernelParams};

    fn checker(size: u32) -> CpuSurface {
        CpuSurface::from_rgba32f(Rgba32FImage::from_fn(size, size, |x, y| {
            let on = if (x + y) % 2 == 0 { 1.0 } else { 0.0 };
            Rgba([on, on, on, 1.0])
        }))
    }

    #[test]
    fn test_sample_hits_texel_centers() {
        let surface = checker(4);
        assert_eq!(surface.sample(0.125, 0.125), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(surface.sample(0.375, 0.125), [0.0, 0.0, 0.0, 1.0]);
        // Halfway between two texels
        assert_eq!(surface.sample(0.25, 0.125)[0], 0.5);
    }

    #[test]
    fn test_sample_clamps_outside() {
        let surface = checker(4);
        assert_eq!(surface.sample(-3.0, -3.0), surface.sample(0.0, 0.0));
        assert_eq!(surface.sample(9.0, 0.125), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_capture_same_size_is_copy() {
        let mut backend = CpuBackend::new();
        let source = checker(8);
        let mut target = backend.create_surface(Extent2d::new(8, 8), "copy").unwrap();
        backend.render(&source, &mut target, PassKind::Capture).unwrap();
        assert_eq!(target, source);
    }

    #[test]
    fn test_downsample_averages_checker() {
        let mut backend = CpuBackend::new();
        let source = checker(8);
        let mut target = backend.create_surface(Extent2d::new(4, 4), "down").unwrap();
        let params = KernelParams::new(Extent2d::new(8, 8), 1.0);
        backend
            .render(
                &source,
                &mut target,
                PassKind::Kernel(BlurKernel::Downsample, params),
            )
            .unwrap();

        for pixel in target.image().pixels() {
            assert!((pixel.0[0] - 0.5).abs() < 0.3);
            assert!((pixel.0[3] - 1.0).abs() < 1e-6);
        }
        assert_eq!(backend.passes_rendered(), 1);
    }

    #[test]
    fn test_rgba8_conversion() {
        let image = RgbaImage::from_pixel(2, 2, Rgba([255, 128, 0, 255]));
        let surface = CpuSurface::from_rgba8(&image);
        assert_eq!(surface.to_rgba8(), image);
    }

    #[test]
    fn test_empty_surface_rejected() {
        let mut backend = CpuBackend::new();
        assert!(matches!(
            backend.create_surface(Extent2d::new(0, 3), "empty"),
            Err(GraphicsError::InvalidSurface { .. })
        ));
    }
}
