//! Plain vertex-sequence polygon and the free functions that act on it.
//!
//! Purpose
//! - Hold the caller's vertices (CCW, n ≥ 3) as `Vector2<f64>` in order.
//! - Provide the primitives the coordinate converters and the grid solver
//!   share: bounding box, centroid, segment projection, containment oracle.
//!
//! Simplicity (no self-intersections) is assumed, never checked. Every
//! function here stays total on bad input: degenerate polygons yield `None`
//! or non-finite numbers, not panics.

use nalgebra::Vector2;

use super::types::{Aabb, GeomCfg};
use super::util::{cross, near_zero};

/// Ordered polygon vertices, expected counter-clockwise.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<Vector2<f64>>,
}

impl Polygon {
    #[inline]
    pub fn new(vertices: Vec<Vector2<f64>>) -> Self {
        Self { vertices }
    }

    /// Build from flat `[x0, y0, x1, y1, ...]`. A trailing odd value is ignored.
    pub fn from_flat(coords: &[f64]) -> Self {
        let vertices = coords
            .chunks_exact(2)
            .map(|c| Vector2::new(c[0], c[1]))
            .collect();
        Self { vertices }
    }

    /// Flat `[x0, y0, x1, y1, ...]` view for callers that store coordinates that way.
    pub fn to_flat(&self) -> Vec<f64> {
        self.vertices.iter().flat_map(|v| [v.x, v.y]).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Edges `(v_i, v_{i+1})` including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Vector2<f64>, Vector2<f64>)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    #[inline]
    pub fn bounding_box(&self) -> Option<Aabb> {
        Aabb::from_points(&self.vertices)
    }

    /// Shoelace signed area; positive for CCW in a y-up frame.
    pub fn signed_area(&self) -> f64 {
        0.5 * self.edges().map(|(a, b)| cross(a, b)).sum::<f64>()
    }

    #[inline]
    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Area-weighted centroid. `None` for zero area.
    pub fn centroid(&self) -> Option<Vector2<f64>> {
        let mut area = 0.0;
        let mut acc = Vector2::zeros();
        for (a, b) in self.edges() {
            let c = cross(a, b);
            area += c;
            acc += (a + b) * c;
        }
        if area == 0.0 || !area.is_finite() {
            return None;
        }
        Some(acc / (3.0 * area))
    }

    /// Even-odd containment oracle. Points exactly on an edge may go either way.
    pub fn contains(&self, p: Vector2<f64>) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let vi = self.vertices[i];
            let vj = self.vertices[j];
            if (vi.y > p.y) != (vj.y > p.y) {
                let x_at = (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x;
                if p.x < x_at {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Apply `v ↦ center + scale * v` to every vertex.
    pub fn transformed(&self, center: Vector2<f64>, scale: f64) -> Self {
        Self {
            vertices: self.vertices.iter().map(|v| center + v * scale).collect(),
        }
    }

    /// Reverse the winding in place (CW ↔ CCW).
    pub fn reverse(&mut self) {
        self.vertices.reverse();
    }
}

/// Projection parameter of `p` onto segment `a → b`: `((p−a)·(b−a)) / |b−a|²`.
///
/// Unclamped; `None` for a zero-length segment.
#[inline]
pub fn segment_param(p: Vector2<f64>, a: Vector2<f64>, b: Vector2<f64>) -> Option<f64> {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 == 0.0 {
        return None;
    }
    Some((p - a).dot(&ab) / len2)
}

/// Closest point on segment `a → b` to `p` (returns `a` for a zero-length segment).
pub fn closest_point_on_segment(p: Vector2<f64>, a: Vector2<f64>, b: Vector2<f64>) -> Vector2<f64> {
    match segment_param(p, a, b) {
        Some(t) => a + (b - a) * t.clamp(0.0, 1.0),
        None => a,
    }
}

/// Tolerant test whether `p` lies on segment `a → b`.
pub fn point_on_segment(p: Vector2<f64>, a: Vector2<f64>, b: Vector2<f64>, cfg: GeomCfg) -> bool {
    let q = closest_point_on_segment(p, a, b);
    near_zero((p - q).norm(), cfg.eps_near_zero)
}

/// Regular polygon with unit radius scaled by `radius` around `center`.
///
/// Vertex k sits at angle `-2πk/sides`, which winds counter-clockwise on a
/// y-down canvas and clockwise in a y-up frame.
pub fn regular_polygon(sides: usize, center: Vector2<f64>, radius: f64) -> Polygon {
    let step = -std::f64::consts::TAU / sides as f64;
    let vertices = (0..sides)
        .map(|k| {
            let a = k as f64 * step;
            center + Vector2::new(a.cos(), a.sin()) * radius
        })
        .collect();
    Polygon { vertices }
}
