//! Mean-value coordinates for arbitrary simple polygons.
//!
//! Area/dot formulation (Hormann & Floater): for vertex i with neighbours
//! i−1 and i+1, and `d_k = v_k − p`, `r_k = |d_k|`,
//!
//! ```text
//! w_i = (r_{i-1} − d_{i-1}·d_i / r_i) / A_{i-1,i}  +  (r_{i+1} − d_i·d_{i+1} / r_i) / A_{i,i+1}
//! ```
//!
//! where `A` is the signed area of the triangle (p, v_k, v_{k+1}). The
//! on-vertex and on-edge cases are detected in the same pass and return
//! immediately; a zero-area triangle that is not the on-edge case (p on the
//! edge's line, outside the segment) contributes nothing. A zero-length edge
//! is `DegenerateGeometry` unless `p` sits exactly on that vertex.

use nalgebra::Vector2;
use tracing::trace;

use crate::error::{CoordError, Result};
use crate::geom2::util::cross;
use crate::geom2::Polygon;
use crate::interp::Weights;

/// Mean-value weights of `p` with respect to `poly` (CCW, n ≥ 3).
///
/// Clockwise input still reproduces `p` (the sign flips cancel in the
/// normalization), but individual weights are then not guaranteed positive
/// inside the kernel.
pub fn convert(p: Vector2<f64>, poly: &Polygon) -> Result<Weights> {
    let verts = &poly.vertices;
    let n = verts.len();
    if n < 3 {
        return Err(CoordError::degenerate(format!(
            "mean-value coordinates need at least 3 vertices, got {n}"
        )));
    }

    let mut weights = vec![0.0; n];
    let mut sum = 0.0;
    for i in 0..n {
        let prev = verts[(i + n - 1) % n];
        let cur = verts[i];
        let next = verts[(i + 1) % n];

        let d1 = cur - p;
        let d2 = next - p;

        let r1 = d1.norm();
        if r1 == 0.0 {
            trace!(vertex = i, "query on vertex");
            let mut one_hot = vec![0.0; n];
            one_hot[i] = 1.0;
            return Ok(one_hot);
        }
        if (next - cur).norm_squared() == 0.0 {
            return Err(CoordError::degenerate(format!(
                "zero-length edge {i} -> {}",
                (i + 1) % n
            )));
        }

        let area1 = 0.5 * cross(d1, d2);
        let dot1 = d1.dot(&d2);
        if area1 == 0.0 && dot1 < 0.0 {
            trace!(edge = i, "query on edge");
            let r2 = d2.norm();
            let mut split = vec![0.0; n];
            split[i] = r2 / (r1 + r2);
            split[(i + 1) % n] = 1.0 - split[i];
            return Ok(split);
        }

        let d0 = prev - p;
        let area0 = 0.5 * cross(d0, d1);
        if area0 != 0.0 {
            let r0 = d0.norm();
            let dot0 = d0.dot(&d1);
            weights[i] += (r0 - dot0 / r1) / area0;
        }
        if area1 != 0.0 {
            let r2 = d2.norm();
            weights[i] += (r2 - dot1 / r1) / area1;
        }
        sum += weights[i];
    }

    if sum == 0.0 || !sum.is_finite() {
        return Err(CoordError::degenerate(format!(
            "mean-value weight sum is {sum}"
        )));
    }
    let inv = 1.0 / sum;
    for w in &mut weights {
        *w *= inv;
    }
    Ok(weights)
}

/// Weighted sum of the polygon's vertices.
#[inline]
pub fn interpolate(weights: &[f64], poly: &Polygon) -> Option<Vector2<f64>> {
    crate::interp::interpolate(weights, &poly.vertices)
}
