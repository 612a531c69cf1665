//! WGSL sources for the blur passes.
//!
//! Every pass draws one oversized triangle covering the target and samples
//! the source through a bilinear, clamp-to-edge sampler. The kernels read
//! their `(resolution, offset)` from a uniform at binding 2.
//!
//! The tap layouts are also exported as tables so that CPU implementations
//! filter with exactly the same weights.

use crate::types::{BlurKernel, PassKind};

/// Shared vertex stage and bindings.
pub const FULLSCREEN_SHADER: &str = r#"
struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

struct KernelParams {
    resolution: vec2<f32>,
    offset: f32,
    _padding: f32,
};

@group(0) @binding(0) var source_texture: texture_2d<f32>;
@group(0) @binding(1) var source_sampler: sampler;
@group(0) @binding(2) var<uniform> params: KernelParams;

@vertex
fn vs_main(@builtin(vertex_index) index: u32) -> VertexOutput {
    let x = f32((index << 1u) & 2u);
    let y = f32(index & 2u);
    var out: VertexOutput;
    out.position = vec4<f32>(x * 2.0 - 1.0, 1.0 - y * 2.0, 0.0, 1.0);
    out.uv = vec2<f32>(x, y);
    return out;
}

fn tap(uv: vec2<f32>) -> vec4<f32> {
    return textureSample(source_texture, source_sampler, uv);
}

fn half_pixel() -> vec2<f32> {
    return 0.5 / params.resolution * params.offset;
}
"#;

/// Plain copy.
pub const CAPTURE_SHADER: &str = r#"
@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return tap(in.uv);
}
"#;

/// Dual Kawase downsample: centre weighted 4, four diagonals weighted 1.
pub const DOWNSAMPLE_SHADER: &str = r#"
@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let h = half_pixel();
    var sum = tap(in.uv) * 4.0;
    sum += tap(in.uv - h);
    sum += tap(in.uv + h);
    sum += tap(in.uv + vec2<f32>(h.x, -h.y));
    sum += tap(in.uv - vec2<f32>(h.x, -h.y));
    return sum / 8.0;
}
"#;

/// Dual Kawase upsample: four axis taps at two half pixels weighted 1,
/// four diagonals weighted 2.
pub const UPSAMPLE_SHADER: &str = r#"
@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let h = half_pixel();
    var sum = tap(in.uv + vec2<f32>(-h.x * 2.0, 0.0));
    sum += tap(in.uv + vec2<f32>(-h.x, h.y)) * 2.0;
    sum += tap(in.uv + vec2<f32>(0.0, h.y * 2.0));
    sum += tap(in.uv + vec2<f32>(h.x, h.y)) * 2.0;
    sum += tap(in.uv + vec2<f32>(h.x * 2.0, 0.0));
    sum += tap(in.uv + vec2<f32>(h.x, -h.y)) * 2.0;
    sum += tap(in.uv + vec2<f32>(0.0, -h.y * 2.0));
    sum += tap(in.uv + vec2<f32>(-h.x, -h.y)) * 2.0;
    return sum / 12.0;
}
"#;

/// A kernel tap: offset in half pixels and weight.
pub type Tap = ([f32; 2], f32);

pub const DOWNSAMPLE_TAPS: [Tap; 5] = [
    ([0.0, 0.0], 4.0 / 8.0),
    ([-1.0, -1.0], 1.0 / 8.0),
    ([1.0, 1.0], 1.0 / 8.0),
    ([1.0, -1.0], 1.0 / 8.0),
    ([-1.0, 1.0], 1.0 / 8.0),
];

pub const UPSAMPLE_TAPS: [Tap; 8] = [
    ([-2.0, 0.0], 1.0 / 12.0),
    ([-1.0, 1.0], 2.0 / 12.0),
    ([0.0, 2.0], 1.0 / 12.0),
    ([1.0, 1.0], 2.0 / 12.0),
    ([2.0, 0.0], 1.0 / 12.0),
    ([1.0, -1.0], 2.0 / 12.0),
    ([0.0, -2.0], 1.0 / 12.0),
    ([-1.0, -1.0], 2.0 / 12.0),
];

/// Taps of a kernel.
pub fn kernel_taps(kernel: BlurKernel) -> &'static [Tap] {
    match kernel {
        BlurKernel::Downsample => &DOWNSAMPLE_TAPS,
        BlurKernel::Upsample => &UPSAMPLE_TAPS,
    }
}

/// Complete WGSL module for a pass, entry points `vs_main` and `fs_main`.
pub fn kernel_source(pass: PassKind) -> String {
    let fragment = match pass {
        PassKind::Capture => CAPTURE_SHADER,
        PassKind::Kernel(BlurKernel::Downsample, _) => DOWNSAMPLE_SHADER,
        PassKind::Kernel(BlurKernel::Upsample, _) => UPSAMPLE_SHADER,
    };
    format!("{FULLSCREEN_SHADER}\n{fragment}")
}
