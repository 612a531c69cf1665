//! Quad vertices for sprites that display a blurred atlas frame.
//!
//! Besides position, UV and color each vertex carries the [`UvRemap`]
//! factors of its frame, so a fragment shader can tell where inside the
//! frame it is even when the frame is packed and rotated in an atlas.

use polyblur_core::math::Rect;
use polyblur_core::{TextureRegion, UvRemap};

/// Vertex layout: position, UV, remap `p`, remap `q`, RGBA8 color.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BlurSpriteVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    pub p: [f32; 2],
    pub q: [f32; 2],
    pub color: [u8; 4],
}

impl BlurSpriteVertex {
    /// Size of one vertex in bytes.
    pub const STRIDE: usize = std::mem::size_of::<Self>();
}

/// Index order for one quad built by [`assemble_quad`].
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 1, 3, 2];

/// Build the four corners of a sprite quad covering `rect`.
///
/// Corners are bottom-left, bottom-right, top-left, top-right, matching
/// the corner order of [`TextureRegion::uv`].
pub fn assemble_quad(
    rect: Rect,
    region: &TextureRegion,
    color: [u8; 4],
) -> ([BlurSpriteVertex; 4], [u16; 6]) {
    let remap = UvRemap::from_region(region);
    let (l, b) = (rect.x, rect.y);
    let (r, t) = (rect.x + rect.width, rect.y + rect.height);
    let corners = [[l, b], [r, b], [l, t], [r, t]];

    let vertices = std::array::from_fn(|i| BlurSpriteVertex {
        position: corners[i],
        uv: region.corner_uv(i),
        p: remap.p,
        q: remap.q,
        color,
    });
    (vertices, QUAD_INDICES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyblur_core::math::Vec2;
    use polyblur_core::UvBounds;

    #[test]
    fn test_vertex_stride() {
        assert_eq!(BlurSpriteVertex::STRIDE, 36);
    }

    #[test]
    fn test_quad_corners_and_remap() {
        let region = TextureRegion::from_atlas(
            Vec2::new(256.0, 256.0),
            Rect::new(64.0, 128.0, 64.0, 32.0),
            false,
        );
        let (vertices, indices) = assemble_quad(
            Rect::new(-32.0, -16.0, 64.0, 32.0),
            &region,
            [255, 255, 255, 128],
        );

        assert_eq!(indices, [0, 1, 2, 1, 3, 2]);
        assert_eq!(vertices[0].position, [-32.0, -16.0]);
        assert_eq!(vertices[3].position, [32.0, 16.0]);

        // Remapped corner UVs land on the unit square
        let remap = UvRemap::from_region(&region);
        let local: Vec<[f32; 2]> = vertices.iter().map(|v| remap.apply(v.uv)).collect();
        for (uv, expected) in local.iter().zip([[0.0, 1.0], [1.0, 1.0], [0.0, 0.0], [1.0, 0.0]]) {
            assert!((uv[0] - expected[0]).abs() < 1e-5);
            assert!((uv[1] - expected[1]).abs() < 1e-5);
        }
        assert!(vertices.iter().all(|v| v.color == [255, 255, 255, 128]));
    }

    #[test]
    fn test_rotated_region_swaps_remap() {
        let bounds = UvBounds::new(0.25, 0.5, 0.75, 0.5);
        let region = TextureRegion::with_uv_bounds(Vec2::splat(16.0), bounds, true);
        let (vertices, _) = assemble_quad(Rect::from_size(16.0, 16.0), &region, [0; 4]);
        let straight = UvRemap::from_region(&TextureRegion::with_uv_bounds(
            Vec2::splat(16.0),
            bounds,
            false,
        ));
        assert_eq!(vertices[0].p, [straight.p[1], straight.p[0]]);
        assert_eq!(vertices[0].q, [straight.q[1], straight.q[0]]);
    }
}
