//! Ear clipping for simple polygons of either winding.

use super::{TriangulationError, Triangulator};
use crate::math::Vec2;

/// Ear-clipping triangulator.
///
/// Input is validated first: fewer than three points, non-finite
/// coordinates, self-intersecting edges and zero-area contours are
/// rejected. A valid contour of `n` points always yields `n - 2`
/// triangles that reference every input index.
#[derive(Debug, Clone, Copy, Default)]
pub struct EarClipTriangulator;

impl EarClipTriangulator {
    pub fn new() -> Self {
        Self
    }
}

impl Triangulator for EarClipTriangulator {
    fn triangulate(&self, contour: &[Vec2]) -> Result<Vec<[u32; 3]>, TriangulationError> {
        let n = contour.len();
        if n < 3 {
            return Err(TriangulationError::TooFewVertices(n));
        }
        if let Some(i) = contour.iter().position(|p| !p.is_finite()) {
            return Err(TriangulationError::NonFiniteVertex(i));
        }

        let points: Vec<[f64; 2]> = contour
            .iter()
            .map(|p| [p.x as f64, p.y as f64])
            .collect();

        check_simple(&points)?;

        let area = signed_area(&points);
        if area == 0.0 {
            return Err(TriangulationError::DegenerateContour);
        }

        // Walk the contour counter-clockwise regardless of input winding.
        let mut remaining: Vec<usize> = if area > 0.0 {
            (0..n).collect()
        } else {
            (0..n).rev().collect()
        };

        let mut triangles = Vec::with_capacity(n - 2);
        while remaining.len() > 3 {
            let ear = find_ear(&points, &remaining)
                .or_else(|| find_collinear(&points, &remaining))
                .ok_or(TriangulationError::EarNotFound {
                    remaining: remaining.len(),
                })?;

            let len = remaining.len();
            let prev = remaining[(ear + len - 1) % len];
            let next = remaining[(ear + 1) % len];
            triangles.push([prev as u32, remaining[ear] as u32, next as u32]);
            remaining.remove(ear);
        }
        triangles.push([
            remaining[0] as u32,
            remaining[1] as u32,
            remaining[2] as u32,
        ]);

        log::trace!(
            "ear clipping produced {} triangles for {} vertices",
            triangles.len(),
            n
        );
        Ok(triangles)
    }

    fn name(&self) -> &'static str {
        "ear-clip"
    }
}

fn orient(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> f64 {
    (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
}

fn signed_area(points: &[[f64; 2]]) -> f64 {
    let n = points.len();
    let twice: f64 = (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a[0] * b[1] - b[0] * a[1]
        })
        .sum();
    twice * 0.5
}

/// `p` lies within the bounding box of segment `a-b` (used once collinearity is known).
fn within_box(a: [f64; 2], b: [f64; 2], p: [f64; 2]) -> bool {
    p[0] >= a[0].min(b[0])
        && p[0] <= a[0].max(b[0])
        && p[1] >= a[1].min(b[1])
        && p[1] <= a[1].max(b[1])
}

fn segments_intersect(p1: [f64; 2], p2: [f64; 2], p3: [f64; 2], p4: [f64; 2]) -> bool {
    let d1 = orient(p3, p4, p1);
    let d2 = orient(p3, p4, p2);
    let d3 = orient(p1, p2, p3);
    let d4 = orient(p1, p2, p4);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && within_box(p3, p4, p1))
        || (d2 == 0.0 && within_box(p3, p4, p2))
        || (d3 == 0.0 && within_box(p1, p2, p3))
        || (d4 == 0.0 && within_box(p1, p2, p4))
}

/// Reject contours whose edges cross, touch, or fold back onto each other.
fn check_simple(points: &[[f64; 2]]) -> Result<(), TriangulationError> {
    let n = points.len();
    let edge = |i: usize| (points[i], points[(i + 1) % n]);

    for i in 0..n {
        // Adjacent edges may only share their common vertex.
        let (a, b) = edge(i);
        let c = points[(i + 2) % n];
        if orient(a, b, c) == 0.0 {
            let back = (b[0] - a[0]) * (c[0] - b[0]) + (b[1] - a[1]) * (c[1] - b[1]);
            if back < 0.0 {
                return Err(TriangulationError::SelfIntersecting {
                    first: i,
                    second: (i + 1) % n,
                });
            }
        }

        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let (c, d) = edge(j);
            if segments_intersect(a, b, c, d) {
                return Err(TriangulationError::SelfIntersecting {
                    first: i,
                    second: j,
                });
            }
        }
    }
    Ok(())
}

fn corners(points: &[[f64; 2]], remaining: &[usize], at: usize) -> ([f64; 2], [f64; 2], [f64; 2]) {
    let len = remaining.len();
    (
        points[remaining[(at + len - 1) % len]],
        points[remaining[at]],
        points[remaining[(at + 1) % len]],
    )
}

fn find_ear(points: &[[f64; 2]], remaining: &[usize]) -> Option<usize> {
    let len = remaining.len();
    (0..len).find(|&at| {
        let (a, b, c) = corners(points, remaining, at);
        if orient(a, b, c) <= 0.0 {
            return false;
        }

        // Only reflex vertices can sit inside a convex ear.
        !(0..len).any(|k| {
            let p = points[remaining[k]];
            if p == a || p == b || p == c {
                return false;
            }
            let (pa, pb, pc) = corners(points, remaining, k);
            orient(pa, pb, pc) < 0.0
                && orient(a, b, p) >= 0.0
                && orient(b, c, p) >= 0.0
                && orient(c, a, p) >= 0.0
        })
    })
}

/// A 180° vertex can always be dropped without changing the outline.
fn find_collinear(points: &[[f64; 2]], remaining: &[usize]) -> Option<usize> {
    (0..remaining.len()).find(|&at| {
        let (a, b, c) = corners(points, remaining, at);
        orient(a, b, c) == 0.0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f32, f32)]) -> Vec<Vec2> {
        raw.iter().map(|&(x, y)| Vec2::new(x, y)).collect()
    }

    fn covers_all(tris: &[[u32; 3]], n: usize) -> bool {
        (0..n as u32).all(|i| tris.iter().any(|t| t.contains(&i)))
    }

    #[test]
    fn test_square_both_windings() {
        let ccw = pts(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)]);
        let cw: Vec<Vec2> = ccw.iter().rev().copied().collect();

        for contour in [ccw, cw] {
            let tris = EarClipTriangulator.triangulate(&contour).unwrap();
            assert_eq!(tris.len(), 2);
            assert!(covers_all(&tris, 4));
        }
    }

    #[test]
    fn test_concave_polygon() {
        // Arrow shape with one reflex vertex at index 3
        let contour = pts(&[
            (0.0, 0.0),
            (50.0, 20.0),
            (100.0, 0.0),
            (50.0, 100.0),
        ]);
        let tris = EarClipTriangulator.triangulate(&contour).unwrap();
        assert_eq!(tris.len(), 2);
        assert!(covers_all(&tris, 4));
        // Every emitted triangle is non-degenerate and counter-clockwise
        for t in &tris {
            let [a, b, c] = t.map(|i| {
                let p = contour[i as usize];
                [p.x as f64, p.y as f64]
            });
            assert!(orient(a, b, c) > 0.0);
        }
    }

    #[test]
    fn test_collinear_vertex_is_kept() {
        let contour = pts(&[
            (0.0, 0.0),
            (50.0, 0.0),
            (100.0, 0.0),
            (100.0, 100.0),
            (0.0, 100.0),
        ]);
        let tris = EarClipTriangulator.triangulate(&contour).unwrap();
        assert_eq!(tris.len(), 3);
        assert!(covers_all(&tris, 5));
    }

    #[test]
    fn test_bowtie_is_rejected() {
        let contour = pts(&[(0.0, 0.0), (100.0, 100.0), (100.0, 0.0), (0.0, 100.0)]);
        assert!(matches!(
            EarClipTriangulator.triangulate(&contour),
            Err(TriangulationError::SelfIntersecting { .. })
        ));
    }

    #[test]
    fn test_spike_is_rejected() {
        let contour = pts(&[(0.0, 0.0), (100.0, 0.0), (50.0, 0.0), (50.0, 50.0)]);
        assert!(matches!(
            EarClipTriangulator.triangulate(&contour),
            Err(TriangulationError::SelfIntersecting { .. })
        ));
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(
            EarClipTriangulator.triangulate(&pts(&[(0.0, 0.0), (1.0, 1.0)])),
            Err(TriangulationError::TooFewVertices(2))
        );
        assert_eq!(
            EarClipTriangulator.triangulate(&pts(&[(0.0, 0.0), (f32::NAN, 1.0), (1.0, 0.0)])),
            Err(TriangulationError::NonFiniteVertex(1))
        );
    }
}
