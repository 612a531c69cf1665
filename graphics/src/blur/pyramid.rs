//! Dual Kawase pyramid orchestration.

use crate::backend::SurfaceProvider;
use crate::error::{GraphicsError, GraphicsResult};
use crate::types::{BlurKernel, Extent2d, KernelParams, PassKind, SurfaceOrigin};

use super::BlurConfig;

/// Result of [`dual_blur`].
#[derive(Debug)]
pub struct BlurOutput<S> {
    /// The blurred surface. The caller owns it and should release it
    /// through the provider that created it.
    pub surface: S,
    /// Size of `surface`, always the size of the source.
    pub extent: Extent2d,
    /// Display the surface mirrored vertically.
    pub flip_y: bool,
    /// Downsample resolutions, largest first.
    pub levels: Vec<Extent2d>,
}

impl<S> BlurOutput<S> {
    /// Total render passes that produced this output.
    pub fn pass_count(&self) -> usize {
        1 + 2 * self.levels.len()
    }
}

/// Blur `source` with a dual Kawase pyramid.
///
/// The source is captured at its own size, shrunk `iterations` times with
/// the downsample kernel, then grown back through the same sizes in reverse
/// with the upsample kernel. Each level is `max(floor(side * scale), 1)`.
/// Both kernels see the source resolution and `config.offset`.
///
/// Only two intermediate surfaces are alive at any time. Every surface
/// created here except the returned one is released before returning,
/// including on error. A source without pixels is rejected before anything
/// is allocated.
pub fn dual_blur<P: SurfaceProvider>(
    provider: &mut P,
    source: &P::Surface,
    config: &BlurConfig,
) -> GraphicsResult<BlurOutput<P::Surface>> {
    config.validate()?;

    let extent = provider.extent(source);
    if extent.is_empty() {
        log::warn!("dual_blur: source is {}, nothing to blur", extent);
        return Err(GraphicsError::InvalidSurface {
            width: extent.width,
            height: extent.height,
        });
    }

    log::debug!(
        "dual_blur: {} source, {} iterations, scale {}, offset {} on {}",
        extent,
        config.iterations,
        config.scale,
        config.offset,
        provider.name()
    );

    let mut last = provider.create_surface(extent, "blur capture")?;
    if let Err(err) = provider.render(source, &mut last, PassKind::Capture) {
        provider.release_surface(last);
        return Err(err);
    }

    let params = KernelParams::new(extent, config.offset);
    let mut pyramid = Vec::new();
    let mut size = extent;

    for _ in 0..config.iterations {
        pyramid.push(size);
        size = size.scaled(config.scale);
        last = ping_pong(
            provider,
            last,
            size,
            PassKind::Kernel(BlurKernel::Downsample, params),
        )?;
    }

    for &size in pyramid.iter().rev() {
        last = ping_pong(
            provider,
            last,
            size,
            PassKind::Kernel(BlurKernel::Upsample, params),
        )?;
    }

    let levels: Vec<Extent2d> = pyramid
        .iter()
        .map(|level| level.scaled(config.scale))
        .collect();
    let passes = 1 + 2 * levels.len();
    let flip_y = provider.origin() == SurfaceOrigin::BottomLeft && passes % 2 == 1;

    Ok(BlurOutput {
        extent: provider.extent(&last),
        surface: last,
        flip_y,
        levels,
    })
}

/// Render `last` into a fresh surface of `extent` and release `last`.
fn ping_pong<P: SurfaceProvider>(
    provider: &mut P,
    last: P::Surface,
    extent: Extent2d,
    pass: PassKind,
) -> GraphicsResult<P::Surface> {
    let mut next = match provider.create_surface(extent, pass.label()) {
        Ok(surface) => surface,
        Err(err) => {
            provider.release_surface(last);
            return Err(err);
        }
    };

    let rendered = provider.render(&last, &mut next, pass);
    provider.release_surface(last);
    match rendered {
        Ok(()) => Ok(next),
        Err(err) => {
            provider.release_surface(next);
            Err(err)
        }
    }
}
