//! Flat convenience surface over the coordinate modules.
//!
//! Each function reads the vertices it is given and retains nothing; the
//! module functions they wrap remain the primary API.

use nalgebra::Vector2;

use crate::error::{CoordError, Result};
use crate::geom2::Polygon;
use crate::harmonic::{HarmonicCfg, HarmonicField};
use crate::interp::Weights;

pub use crate::geom2::rand::{draw_star_polygon, RadialCfg, ReplayToken, VertexCount};
pub use crate::geom2::{regular_polygon, Aabb, GeomCfg, Placement};
pub use crate::grid::Grid;
pub use crate::harmonic::{CellKind, Convergence, SolveOutcome, SolveWorker};
pub use crate::interp::{interpolate_attr, interpolate_scalar};

/// Harmonic solve with default `max_sweeps`.
pub fn solve_harmonic(polygon: &Polygon, resolution: usize, threshold: f64) -> Result<HarmonicField> {
    let cfg = HarmonicCfg::default()
        .with_resolution(resolution)
        .with_threshold(threshold);
    crate::harmonic::solve(polygon, &cfg)
}

/// Weights of the field cell containing `point`, owned.
///
/// Exterior cells give an empty vector; points outside the solved box are
/// `OutOfDomain`.
pub fn query_field(field: &HarmonicField, point: Vector2<f64>) -> Result<Weights> {
    field.query(point).map(<[f64]>::to_vec)
}

pub fn convert_mean_value(point: Vector2<f64>, polygon: &Polygon) -> Result<Weights> {
    crate::mean_value::convert(point, polygon)
}

/// Triangle barycentric weights; NaN for a degenerate triangle.
pub fn convert_barycentric(point: Vector2<f64>, triangle: &[Vector2<f64>; 3]) -> [f64; 3] {
    crate::barycentric::convert(point, triangle)
}

/// Like [`convert_barycentric`], for arbitrary-length vertex slices.
pub fn convert_barycentric_slice(point: Vector2<f64>, vertices: &[Vector2<f64>]) -> Result<[f64; 3]> {
    let tri: &[Vector2<f64>; 3] = vertices.try_into().map_err(|_| {
        CoordError::degenerate(format!(
            "barycentric coordinates need exactly 3 vertices, got {}",
            vertices.len()
        ))
    })?;
    crate::barycentric::try_convert(point, tri)
}

/// Weighted sum of `target_vertices`.
pub fn interpolate(weights: &[f64], target_vertices: &[Vector2<f64>]) -> Option<Vector2<f64>> {
    crate::interp::interpolate(weights, target_vertices)
}
