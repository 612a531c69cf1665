//! A blur that stays in sync with its parameters.

use crate::backend::SurfaceProvider;
use crate::error::GraphicsResult;

use super::{BlurConfig, BlurOutput, dual_blur};

/// Owns a provider, a source surface and the current blur of it.
///
/// Parameter setters re-run the whole pyramid when the value actually
/// changes and leave everything untouched otherwise. A new output replaces
/// the previous one only after it was produced successfully; the previous
/// surface is then released.
pub struct DualBlur<P: SurfaceProvider> {
    provider: P,
    source: P::Surface,
    config: BlurConfig,
    output: Option<BlurOutput<P::Surface>>,
}

impl<P: SurfaceProvider> DualBlur<P> {
    /// Take ownership of `source` and blur it once.
    ///
    /// If that first blur fails, `source` is released through `provider`
    /// before the error is returned.
    pub fn new(mut provider: P, source: P::Surface, config: BlurConfig) -> GraphicsResult<Self> {
        let output = match dual_blur(&mut provider, &source, &config) {
            Ok(output) => output,
            Err(err) => {
                provider.release_surface(source);
                return Err(err);
            }
        };
        Ok(Self {
            provider,
            source,
            config,
            output: Some(output),
        })
    }

    pub fn config(&self) -> &BlurConfig {
        &self.config
    }

    /// Current blur result.
    pub fn output(&self) -> Option<&BlurOutput<P::Surface>> {
        self.output.as_ref()
    }

    pub fn source(&self) -> &P::Surface {
        &self.source
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Returns whether the blur was re-run.
    pub fn set_offset(&mut self, offset: f32) -> GraphicsResult<bool> {
        self.set_config(self.config.with_offset(offset))
    }

    /// Returns whether the blur was re-run.
    pub fn set_iterations(&mut self, iterations: u32) -> GraphicsResult<bool> {
        self.set_config(self.config.with_iterations(iterations))
    }

    /// Returns whether the blur was re-run.
    pub fn set_scale(&mut self, scale: f32) -> GraphicsResult<bool> {
        self.set_config(self.config.with_scale(scale))
    }

    /// Apply `config`, re-running the blur if it differs from the current one.
    ///
    /// On error the previous config and output are kept.
    pub fn set_config(&mut self, config: BlurConfig) -> GraphicsResult<bool> {
        if config == self.config && self.output.is_some() {
            return Ok(false);
        }
        let output = dual_blur(&mut self.provider, &self.source, &config)?;
        log::debug!(
            "DualBlur: offset {}, iterations {}, scale {}",
            config.offset,
            config.iterations,
            config.scale
        );
        self.config = config;
        self.replace_output(output);
        Ok(true)
    }

    /// Re-run the blur with the current config, e.g. after the source
    /// surface's contents changed.
    pub fn refresh(&mut self) -> GraphicsResult<()> {
        let output = dual_blur(&mut self.provider, &self.source, &self.config)?;
        self.replace_output(output);
        Ok(())
    }

    /// Release the current output, keeping the source.
    pub fn clear_output(&mut self) {
        if let Some(old) = self.output.take() {
            self.provider.release_surface(old.surface);
        }
    }

    /// Take everything apart. The caller becomes responsible for releasing
    /// the source and the output.
    pub fn into_parts(self) -> (P, P::Surface, Option<BlurOutput<P::Surface>>) {
        (self.provider, self.source, self.output)
    }

    fn replace_output(&mut self, output: BlurOutput<P::Surface>) {
        if let Some(old) = self.output.replace(output) {
            self.provider.release_surface(old.surface);
        }
    }
}

impl<P: SurfaceProvider + std::fmt::Debug> std::fmt::Debug for DualBlur<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DualBlur")
            .field("provider", &self.provider)
            .field("config", &self.config)
            .field("extent", &self.provider.extent(&self.source))
            .field("has_output", &self.output.is_some())
            .finish()
    }
}
