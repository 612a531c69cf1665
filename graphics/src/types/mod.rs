//! Common types shared by providers and the blur pipeline.

// ============================================================================
// Extent
// ============================================================================

/// Pixel size of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Extent2d {
    pub width: u32,
    pub height: u32,
}

impl Extent2d {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either side is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Scale both sides, flooring and keeping at least one pixel.
    pub fn scaled(&self, scale: f32) -> Self {
        let side = |v: u32| ((v as f32 * scale).floor() as u32).max(1);
        Self::new(side(self.width), side(self.height))
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn as_vec2(&self) -> [f32; 2] {
        [self.width as f32, self.height as f32]
    }
}

impl std::fmt::Display for Extent2d {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

// ============================================================================
// Coordinate convention
// ============================================================================

/// Where row zero of a surface lives.
///
/// Providers whose render targets are stored bottom-up (GL style) report
/// [`SurfaceOrigin::BottomLeft`]; every pass then mirrors the image
/// vertically, and the blur result carries a flag telling the consumer
/// whether to flip it for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SurfaceOrigin {
    #[default]
    TopLeft,
    BottomLeft,
}

// ============================================================================
// Passes
// ============================================================================

/// The two dual Kawase kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlurKernel {
    /// 5-tap filter used while shrinking.
    Downsample,
    /// 8-tap filter used while growing back.
    Upsample,
}

impl BlurKernel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Downsample => "downsample",
            Self::Upsample => "upsample",
        }
    }
}

/// Parameters fed to both kernels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelParams {
    /// Resolution the half-pixel step is derived from.
    pub resolution: [f32; 2],
    /// Blur radius, in half pixels.
    pub offset: f32,
}

impl KernelParams {
    pub fn new(resolution: Extent2d, offset: f32) -> Self {
        Self {
            resolution: resolution.as_vec2(),
            offset,
        }
    }

    /// Tap spacing in UV units.
    pub fn half_pixel(&self) -> [f32; 2] {
        let step = |r: f32| if r > 0.0 { 0.5 / r * self.offset } else { 0.0 };
        [step(self.resolution[0]), step(self.resolution[1])]
    }
}

/// What a single render call does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PassKind {
    /// Copy the source into the target, resampling if sizes differ.
    Capture,
    /// Filter the source into the target with a blur kernel.
    Kernel(BlurKernel, KernelParams),
}

impl PassKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Capture => "capture",
            Self::Kernel(kernel, _) => kernel.label(),
        }
    }
}
