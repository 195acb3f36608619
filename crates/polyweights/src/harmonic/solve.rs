//! Solve driver: grid construction followed by the three phases.

use tracing::{debug, debug_span};

use super::classify::{flood_exterior, promote_interior};
use super::raster::rasterize_boundary;
use super::relax::relax;
use super::types::{Cell, CellMap, HarmonicCfg, HarmonicField};
use crate::error::{CoordError, Result};
use crate::geom2::Polygon;

/// Solve harmonic coordinates for `poly` on a `cfg.resolution²` grid.
///
/// Errors
/// - `InvalidParameter` for an out-of-range `cfg`.
/// - `DegenerateGeometry` for fewer than 3 vertices or a bounding box with
///   zero (or non-finite) width or height.
///
/// Hitting `cfg.max_sweeps` is not an error: the field is returned with
/// `Convergence::CapReached` (see [`HarmonicField::ensure_converged`]).
pub fn solve(poly: &Polygon, cfg: &HarmonicCfg) -> Result<HarmonicField> {
    solve_with_cancel(poly, cfg, &|| false)
}

pub(crate) fn solve_with_cancel(
    poly: &Polygon,
    cfg: &HarmonicCfg,
    cancelled: &dyn Fn() -> bool,
) -> Result<HarmonicField> {
    cfg.validate()?;
    let n = poly.len();
    if n < 3 {
        return Err(CoordError::degenerate(format!(
            "harmonic coordinates need at least 3 vertices, got {n}"
        )));
    }
    if poly.vertices.iter().any(|v| !(v.x.is_finite() && v.y.is_finite())) {
        return Err(CoordError::degenerate("polygon has a non-finite vertex"));
    }
    let bbox = poly
        .bounding_box()
        .ok_or_else(|| CoordError::degenerate("polygon has no vertices"))?;
    if bbox.is_degenerate() {
        return Err(CoordError::degenerate(format!(
            "bounding box {}x{} has no area",
            bbox.width, bbox.height
        )));
    }

    let res = cfg.resolution;
    let _span = debug_span!("harmonic_solve", vertices = n, resolution = res).entered();
    let map = CellMap::new(&bbox, res);
    let mut cells = vec![Cell::untyped(); res * res];

    let boundary = rasterize_boundary(&mut cells, poly, &map);
    let exterior = flood_exterior(&mut cells, res);
    let interior = promote_interior(&mut cells, n);
    debug!(
        boundary,
        exterior,
        interior = interior.len(),
        "cells classified"
    );

    let report = relax(&mut cells, &interior, res, n, cfg, cancelled)?;

    Ok(HarmonicField {
        cells,
        resolution: res,
        bbox,
        cell_width: bbox.width / res as f64,
        cell_height: bbox.height / res as f64,
        vertex_count: n,
        report,
        map,
    })
}
