//! Closed-form barycentric coordinates for a single triangle.
//!
//! Cramer's rule over the edge vectors `v0 = b − a`, `v1 = c − a`,
//! `v2 = p − a`. A collinear triangle has `denom = 0` and yields NaN weights;
//! use [`try_convert`] to get a typed error instead.

use nalgebra::Vector2;

use crate::error::{CoordError, Result};

/// Weights `[u, v, w]` of `p` with respect to triangle `[a, b, c]`.
pub fn convert(p: Vector2<f64>, tri: &[Vector2<f64>; 3]) -> [f64; 3] {
    let [a, b, c] = *tri;
    let v0 = b - a;
    let v1 = c - a;
    let v2 = p - a;
    let d00 = v0.dot(&v0);
    let d01 = v0.dot(&v1);
    let d11 = v1.dot(&v1);
    let d20 = v2.dot(&v0);
    let d21 = v2.dot(&v1);
    let denom = d00 * d11 - d01 * d01;
    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    [1.0 - v - w, v, w]
}

/// Like [`convert`], reporting a collinear triangle as `DegenerateGeometry`.
pub fn try_convert(p: Vector2<f64>, tri: &[Vector2<f64>; 3]) -> Result<[f64; 3]> {
    let w = convert(p, tri);
    if w.iter().all(|x| x.is_finite()) {
        Ok(w)
    } else {
        Err(CoordError::degenerate("triangle has zero area"))
    }
}

/// `u·a + v·b + w·c`.
#[inline]
pub fn interpolate(weights: &[f64; 3], tri: &[Vector2<f64>; 3]) -> Vector2<f64> {
    tri[0] * weights[0] + tri[1] * weights[1] + tri[2] * weights[2]
}
