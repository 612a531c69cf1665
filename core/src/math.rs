//! Math type aliases and helper functions.

pub use glam::{UVec2, Vec2};

/// Clamp `t` to `[0, 1]`.
#[inline]
pub fn clamp01(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Linear interpolation with the weight clamped to `[0, 1]`.
///
/// Unlike a plain lerp this never extrapolates past `a` or `b`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + clamp01(t) * (b - a)
}

/// Round to one decimal place.
#[inline]
pub fn round_tenth(x: f32) -> f32 {
    (x * 10.0).round() / 10.0
}

/// Round both components of a point to one decimal place.
#[inline]
pub fn round_tenth_vec2(v: Vec2) -> Vec2 {
    Vec2::new(round_tenth(v.x), round_tenth(v.y))
}

/// Axis-aligned rectangle in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given size at the origin.
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_clamps_weight() {
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(0.0, 10.0, -1.0), 0.0);
        assert_eq!(lerp(0.0, 10.0, 2.0), 10.0);
        assert_eq!(lerp(10.0, 0.0, 0.25), 7.5);
    }

    #[test]
    fn test_round_tenth() {
        assert_eq!(round_tenth(1.26), 1.3);
        assert_eq!(round_tenth(-3.04), -3.0);
        assert_eq!(round_tenth_vec2(Vec2::new(0.04, 9.99)), Vec2::new(0.0, 10.0));
    }
}
