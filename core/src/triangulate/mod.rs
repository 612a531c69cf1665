//! Simple-polygon triangulation.
//!
//! The mesh builder only needs "give me triangles for this contour, or tell
//! me you can't". [`Triangulator`] captures that, and
//! [`EarClipTriangulator`] is the implementation used by default.

mod ear_clip;

pub use ear_clip::EarClipTriangulator;

use thiserror::Error;

use crate::math::Vec2;

/// Why a contour could not be triangulated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TriangulationError {
    #[error("contour has {0} vertices, at least 3 are required")]
    TooFewVertices(usize),
    #[error("vertex {0} has a non-finite coordinate")]
    NonFiniteVertex(usize),
    #[error("contour encloses no area")]
    DegenerateContour,
    #[error("edges {first} and {second} intersect")]
    SelfIntersecting { first: usize, second: usize },
    #[error("no ear found with {remaining} vertices left")]
    EarNotFound { remaining: usize },
}

/// Triangulates a single closed contour.
///
/// Implementations return triangles as index triples into `contour`. The
/// contour is borrowed, never modified, and is implicitly closed (the last
/// point connects back to the first).
pub trait Triangulator {
    fn triangulate(&self, contour: &[Vec2]) -> Result<Vec<[u32; 3]>, TriangulationError>;

    /// Short name used in log messages.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
