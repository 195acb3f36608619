//! Basic 2D value types: tolerances and the axis-aligned bounding box.
//!
//! - `GeomCfg`: centralizes the near-zero epsilon used by tolerant predicates.
//! - `Aabb`: `{x, y, width, height}` rectangle, derived from vertices per call.

use nalgebra::Vector2;

/// Geometry configuration (tolerances).
#[derive(Clone, Copy, Debug)]
pub struct GeomCfg {
    /// Magnitudes below this count as zero in tolerant predicates.
    pub eps_near_zero: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_near_zero: 1e-5,
        }
    }
}

/// Axis-aligned bounding box with origin at the minimum corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Aabb {
    /// Minimal box enclosing `points`. `None` for an empty slice.
    pub fn from_points(points: &[Vector2<f64>]) -> Option<Self> {
        let first = points.first()?;
        let (mut xmin, mut ymin) = (first.x, first.y);
        let (mut xmax, mut ymax) = (first.x, first.y);
        for p in &points[1..] {
            xmin = xmin.min(p.x);
            xmax = xmax.max(p.x);
            ymin = ymin.min(p.y);
            ymax = ymax.max(p.y);
        }
        Some(Self {
            x: xmin,
            y: ymin,
            width: xmax - xmin,
            height: ymax - ymin,
        })
    }

    #[inline]
    pub fn min(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    #[inline]
    pub fn max(&self) -> Vector2<f64> {
        Vector2::new(self.x + self.width, self.y + self.height)
    }

    /// Closed containment test.
    #[inline]
    pub fn contains(&self, p: Vector2<f64>) -> bool {
        p.x >= self.x
            && p.y >= self.y
            && p.x <= self.x + self.width
            && p.y <= self.y + self.height
    }

    /// True when either side has zero (or non-finite) extent.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite())
    }
}
