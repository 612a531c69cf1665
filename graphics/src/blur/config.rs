//! Blur parameters.

use crate::error::{GraphicsError, GraphicsResult};

/// Dual blur configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlurConfig {
    /// Blur radius passed to both kernels, in half pixels
    pub offset: f32,
    /// Pyramid depth, at most [`BlurConfig::MAX_ITERATIONS`]. Zero makes the
    /// blur a plain copy
    pub iterations: u32,
    /// Per-level downsample factor in `(0, 1]`
    pub scale: f32,
}

impl Default for BlurConfig {
    fn default() -> Self {
        Self {
            offset: 5.0,
            iterations: 3,
            scale: 0.5,
        }
    }
}

impl BlurConfig {
    /// Deepest accepted pyramid. Halving a 65536 pixel side 16 times
    /// already reaches 1x1.
    pub const MAX_ITERATIONS: u32 = 16;

    pub fn new(offset: f32, iterations: u32, scale: f32) -> Self {
        Self {
            offset,
            iterations,
            scale,
        }
    }

    pub fn with_offset(mut self, offset: f32) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Check that the parameters describe a runnable blur.
    pub fn validate(&self) -> GraphicsResult<()> {
        if !self.offset.is_finite() || self.offset < 0.0 {
            return Err(GraphicsError::InvalidParameter(format!(
                "blur offset must be finite and non-negative, got {}",
                self.offset
            )));
        }
        if self.iterations > Self::MAX_ITERATIONS {
            return Err(GraphicsError::InvalidParameter(format!(
                "blur iterations must be at most {}, got {}",
                Self::MAX_ITERATIONS,
                self.iterations
            )));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 || self.scale > 1.0 {
            return Err(GraphicsError::InvalidParameter(format!(
                "blur scale must be in (0, 1], got {}",
                self.scale
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BlurConfig::default();
        assert_eq!(config, BlurConfig::new(5.0, 3, 0.5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let base = BlurConfig::default();
        assert!(base.with_offset(-1.0).validate().is_err());
        assert!(base.with_offset(f32::INFINITY).validate().is_err());
        assert!(base.with_scale(0.0).validate().is_err());
        assert!(base.with_scale(1.5).validate().is_err());
        assert!(base.with_scale(f32::NAN).validate().is_err());
        assert!(base.with_scale(1.0).with_offset(0.0).validate().is_ok());
    }

    #[test]
    fn test_validate_bounds_iterations() {
        let base = BlurConfig::default();
        assert!(base.with_iterations(0).validate().is_ok());
        assert!(
            base.with_iterations(BlurConfig::MAX_ITERATIONS)
                .validate()
                .is_ok()
        );
        assert!(matches!(
            base.with_iterations(BlurConfig::MAX_ITERATIONS + 1).validate(),
            Err(GraphicsError::InvalidParameter(_))
        ));
        assert!(matches!(
            base.with_iterations(u32::MAX).validate(),
            Err(GraphicsError::InvalidParameter(_))
        ));
    }
}
