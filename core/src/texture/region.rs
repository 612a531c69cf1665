//! Atlas region data and UV derivation.

use crate::math::{Rect, Vec2};

/// UV extents of a region along the sprite's own axes.
///
/// `left`/`right` are the U values at the sprite's left and right edges,
/// `bottom`/`top` the V values at its bottom and top edges. For a rotated
/// region these are picked from the swapped corner slots, so a mesh
/// builder must swap the resulting `(u, v)` pair back.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UvBounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl UvBounds {
    pub const fn new(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    /// Bounds covering a whole texture with V growing upwards.
    pub const FULL: Self = Self::new(0.0, 1.0, 0.0, 1.0);
}

/// A sprite frame inside a texture atlas.
///
/// The eight UV values are stored per quad corner in the order
/// bottom-left, bottom-right, top-left, top-right, each as `(u, v)`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureRegion {
    original_size: Vec2,
    rect: Rect,
    offset: Vec2,
    rotated: bool,
    uv: [f32; 8],
}

impl TextureRegion {
    /// Build a region from its placement in an atlas texture.
    ///
    /// `rect` is given in atlas pixels with its size in sprite space, i.e.
    /// a rotated region occupies `rect.height x rect.width` pixels in the
    /// atlas. Atlas V runs top-down. Rotated regions follow the packer's
    /// 90° clockwise convention.
    pub fn from_atlas(texture_size: Vec2, rect: Rect, rotated: bool) -> Self {
        let tex_w = texture_size.x;
        let tex_h = texture_size.y;
        let div = |n: f32, d: f32| if d == 0.0 { 0.0 } else { n / d };

        let uv = if rotated {
            let l = div(rect.x, tex_w);
            let r = div(rect.x + rect.height, tex_w);
            let b = div(rect.y + rect.width, tex_h);
            let t = div(rect.y, tex_h);
            [l, t, l, b, r, t, r, b]
        } else {
            let l = div(rect.x, tex_w);
            let r = div(rect.x + rect.width, tex_w);
            let b = div(rect.y + rect.height, tex_h);
            let t = div(rect.y, tex_h);
            [l, b, r, b, l, t, r, t]
        };

        Self {
            original_size: rect.size(),
            rect,
            offset: Vec2::ZERO,
            rotated,
            uv,
        }
    }

    /// Build a region directly from sprite-space UV bounds.
    pub fn with_uv_bounds(original_size: Vec2, bounds: UvBounds, rotated: bool) -> Self {
        let UvBounds {
            left,
            right,
            bottom,
            top,
        } = bounds;
        let uv = if rotated {
            [bottom, left, bottom, right, top, left, top, right]
        } else {
            [left, bottom, right, bottom, left, top, right, top]
        };

        Self {
            original_size,
            rect: Rect::from_size(original_size.x, original_size.y),
            offset: Vec2::ZERO,
            rotated,
            uv,
        }
    }

    /// Record trimming: the untrimmed size and the trim offset.
    pub fn with_trim(mut self, original_size: Vec2, offset: Vec2) -> Self {
        self.original_size = original_size;
        self.offset = offset;
        self
    }

    /// Untrimmed size of the sprite in pixels.
    pub fn original_size(&self) -> Vec2 {
        self.original_size
    }

    /// Trimmed rect inside the atlas.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Offset of the trimmed rect relative to the untrimmed center.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Whether the packer stored this region rotated by 90°.
    pub fn is_rotated(&self) -> bool {
        self.rotated
    }

    /// Raw per-corner UVs (bl, br, tl, tr).
    pub fn uv(&self) -> &[f32; 8] {
        &self.uv
    }

    /// UV of a single corner (`0` = bl, `1` = br, `2` = tl, `3` = tr).
    pub fn corner_uv(&self, corner: usize) -> [f32; 2] {
        let i = (corner % 4) * 2;
        [self.uv[i], self.uv[i + 1]]
    }

    /// Sprite-space UV extents.
    pub fn uv_bounds(&self) -> UvBounds {
        let uv = &self.uv;
        if self.rotated {
            UvBounds::new(uv[5], uv[3], uv[0], uv[6])
        } else {
            UvBounds::new(uv[0], uv[6], uv[3], uv[5])
        }
    }
}

/// Per-quad factors mapping atlas UVs into `[0, 1]` frame-local space.
///
/// `local = uv * p + q`, componentwise. Shaders that sample neighbours of a
/// packed frame use this to know where the frame's edges are.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvRemap {
    pub p: [f32; 2],
    pub q: [f32; 2],
}

impl UvRemap {
    pub const IDENTITY: Self = Self {
        p: [1.0, 1.0],
        q: [0.0, 0.0],
    };

    pub fn from_region(region: &TextureRegion) -> Self {
        let b = region.uv_bounds();
        let recip = |d: f32| if d == 0.0 { 0.0 } else { 1.0 / d };

        let px = recip(b.right - b.left);
        let qx = -b.left * px;
        let py = recip(b.bottom - b.top);
        let qy = -b.top * py;

        if region.is_rotated() {
            Self {
                p: [py, px],
                q: [qy, qx],
            }
        } else {
            Self {
                p: [px, py],
                q: [qx, qy],
            }
        }
    }

    /// Apply the remap to an atlas UV.
    pub fn apply(&self, uv: [f32; 2]) -> [f32; 2] {
        [uv[0] * self.p[0] + self.q[0], uv[1] * self.p[1] + self.q[1]]
    }
}

impl Default for UvRemap {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_from_atlas_unrotated() {
        let region = TextureRegion::from_atlas(
            Vec2::new(256.0, 128.0),
            Rect::new(64.0, 32.0, 64.0, 32.0),
            false,
        );
        let b = region.uv_bounds();
        assert!(approx(b.left, 0.25));
        assert!(approx(b.right, 0.5));
        assert!(approx(b.top, 0.25));
        assert!(approx(b.bottom, 0.5));
        assert_eq!(region.original_size(), Vec2::new(64.0, 32.0));
    }

    #[test]
    fn test_from_atlas_rotated_uses_swapped_extent() {
        // 20x10 sprite stored as 10x20 in the atlas
        let region = TextureRegion::from_atlas(
            Vec2::new(100.0, 100.0),
            Rect::new(0.0, 0.0, 20.0, 10.0),
            true,
        );
        let uv = region.uv();
        assert!(approx(uv[4], 0.1)); // r = (x + h) / w
        assert!(approx(uv[3], 0.2)); // b = (y + w) / h
    }

    #[test]
    fn test_uv_bounds_roundtrip_through_constructor() {
        let bounds = UvBounds::new(0.1, 0.4, 0.9, 0.6);
        for rotated in [false, true] {
            let region = TextureRegion::with_uv_bounds(Vec2::splat(32.0), bounds, rotated);
            assert_eq!(region.uv_bounds(), bounds);
        }
    }

    #[test]
    fn test_uv_remap_maps_edges_to_unit_range() {
        let region = TextureRegion::from_atlas(
            Vec2::new(200.0, 200.0),
            Rect::new(50.0, 20.0, 100.0, 40.0),
            false,
        );
        let remap = UvRemap::from_region(&region);
        let b = region.uv_bounds();

        let lo = remap.apply([b.left, b.top]);
        let hi = remap.apply([b.right, b.bottom]);
        assert!(approx(lo[0], 0.0) && approx(lo[1], 0.0));
        assert!(approx(hi[0], 1.0) && approx(hi[1], 1.0));
    }

    #[test]
    fn test_uv_remap_rotated_swaps_components() {
        let bounds = UvBounds::new(0.0, 0.5, 0.25, 0.0);
        let straight = UvRemap::from_region(&TextureRegion::with_uv_bounds(
            Vec2::ONE,
            bounds,
            false,
        ));
        let rotated =
            UvRemap::from_region(&TextureRegion::with_uv_bounds(Vec2::ONE, bounds, true));
        assert_eq!(rotated.p, [straight.p[1], straight.p[0]]);
        assert_eq!(rotated.q, [straight.q[1], straight.q[0]]);
    }

    #[test]
    fn test_degenerate_region_remap_is_finite() {
        let region = TextureRegion::from_atlas(Vec2::ZERO, Rect::default(), false);
        let remap = UvRemap::from_region(&region);
        assert!(remap.p.iter().chain(remap.q.iter()).all(|v| v.is_finite()));
    }
}
