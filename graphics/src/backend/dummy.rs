//! Dummy surface provider for testing.
//!
//! This backend doesn't produce pixels. It hands out numbered surfaces and
//! records every call, which is enough to check how the blur pipeline
//! allocates, renders and releases.

use std::collections::HashSet;

use crate::error::{GraphicsError, GraphicsResult};
use crate::types::{Extent2d, PassKind, SurfaceOrigin};

use super::SurfaceProvider;

/// Surface handed out by [`DummyBackend`].
#[derive(Debug, PartialEq, Eq)]
pub struct DummySurface {
    id: u64,
    extent: Extent2d,
}

impl DummySurface {
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// A recorded provider call.
#[derive(Debug, Clone, PartialEq)]
pub enum DummyOp {
    Create {
        id: u64,
        extent: Extent2d,
        label: String,
    },
    Release {
        id: u64,
    },
    Render {
        source: u64,
        target: u64,
        extent: Extent2d,
        pass: PassKind,
    },
}

/// Dummy surface provider.
#[derive(Debug, Default)]
pub struct DummyBackend {
    origin: SurfaceOrigin,
    next_id: u64,
    live: HashSet<u64>,
    peak_live: usize,
    ops: Vec<DummyOp>,
    fail_create_at: Option<usize>,
    creates: usize,
}

impl DummyBackend {
    /// Create a new dummy backend.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_origin(mut self, origin: SurfaceOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// Make the `n`-th surface creation (zero based) fail.
    pub fn with_failing_create(mut self, n: usize) -> Self {
        self.fail_create_at = Some(n);
        self
    }

    /// Every call made so far, in order.
    pub fn ops(&self) -> &[DummyOp] {
        &self.ops
    }

    /// Number of surfaces created and not yet released.
    pub fn live_surfaces(&self) -> usize {
        self.live.len()
    }

    /// Highest number of simultaneously live surfaces.
    pub fn peak_live_surfaces(&self) -> usize {
        self.peak_live
    }

    pub fn is_live(&self, surface: &DummySurface) -> bool {
        self.live.contains(&surface.id)
    }

    /// Extents of all render targets, in render order.
    pub fn render_extents(&self) -> Vec<Extent2d> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DummyOp::Render { extent, .. } => Some(*extent),
                _ => None,
            })
            .collect()
    }

    /// Forget recorded calls and reset the peak to the current live count.
    pub fn clear_ops(&mut self) {
        self.ops.clear();
        self.peak_live = self.live.len();
    }
}

impl SurfaceProvider for DummyBackend {
    type Surface = DummySurface;

    fn name(&self) -> &'static str {
        "Dummy Backend"
    }

    fn origin(&self) -> SurfaceOrigin {
        self.origin
    }

    fn create_surface(&mut self, extent: Extent2d, label: &str) -> GraphicsResult<DummySurface> {
        let attempt = self.creates;
        self.creates += 1;
        if self.fail_create_at == Some(attempt) {
            return Err(GraphicsError::ResourceCreationFailed(format!(
                "injected failure creating {label:?}"
            )));
        }

        let id = self.next_id;
        self.next_id += 1;
        log::trace!("DummyBackend: creating surface {} {:?} ({})", id, label, extent);

        self.live.insert(id);
        self.peak_live = self.peak_live.max(self.live.len());
        self.ops.push(DummyOp::Create {
            id,
            extent,
            label: label.to_string(),
        });
        Ok(DummySurface { id, extent })
    }

    fn release_surface(&mut self, surface: DummySurface) {
        log::trace!("DummyBackend: releasing surface {}", surface.id);
        if !self.live.remove(&surface.id) {
            log::warn!("DummyBackend: surface {} released twice", surface.id);
        }
        self.ops.push(DummyOp::Release { id: surface.id });
    }

    fn extent(&self, surface: &DummySurface) -> Extent2d {
        surface.extent
    }

    fn render(
        &mut self,
        source: &DummySurface,
        target: &mut DummySurface,
        pass: PassKind,
    ) -> GraphicsResult<()> {
        if !self.live.contains(&source.id) || !self.live.contains(&target.id) {
            return Err(GraphicsError::UnknownSurface);
        }
        log::trace!(
            "DummyBackend: {} pass {} -> {} ({})",
            pass.label(),
            source.id,
            target.id,
            target.extent
        );
        self.ops.push(DummyOp::Render {
            source: source.id,
            target: target.id,
            extent: target.extent,
            pass,
        });
        Ok(())
    }
}
