//! Boundary rasterization: Bresenham walk per polygon edge.
//!
//! Every touched cell becomes Boundary and receives a hat-function weight
//! vector: `1 − t` at the edge's start vertex, `t` at its end vertex, where
//! `t` is the projection of the cell onto the edge in grid space. Endpoints
//! are the (clamped, floored) cells of the two vertices, so a vertex's own
//! cell gets weight 1 for that vertex. A cell touched by several edges keeps
//! the last edge's pair.

use nalgebra::Vector2;

use super::types::{Cell, CellKind, CellMap};
use crate::geom2::{segment_param, Polygon};

/// Integer line from `(x0, y0)` to `(x1, y1)`, both ends included.
pub(crate) fn bresenham(x0: isize, y0: isize, x1: isize, y1: isize) -> Vec<(isize, isize)> {
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;
    let (mut x, mut y) = (x0, y0);
    let mut out = Vec::with_capacity((dx.max(dy) + 1) as usize);
    loop {
        out.push((x, y));
        if x == x1 && y == y1 {
            return out;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}

/// Mark the polygon outline as Boundary cells with hat-function weights.
///
/// Returns the number of distinct boundary cells.
pub(crate) fn rasterize_boundary(cells: &mut [Cell], poly: &Polygon, map: &CellMap) -> usize {
    let n = poly.len();
    let res = map.resolution;
    let mut boundary = 0usize;
    for i in 0..n {
        let next = (i + 1) % n;
        let (ax, ay) = map.to_cell(poly.vertices[i]);
        let (bx, by) = map.to_cell(poly.vertices[next]);
        let a = Vector2::new(ax as f64, ay as f64);
        let b = Vector2::new(bx as f64, by as f64);
        for (x, y) in bresenham(ax as isize, ay as isize, bx as isize, by as isize) {
            // The walk stays inside the bounding rectangle of its endpoints.
            let idx = y as usize * res + x as usize;
            let cell = &mut cells[idx];
            if cell.kind != CellKind::Boundary {
                cell.kind = CellKind::Boundary;
                cell.weights = vec![0.0; n];
                boundary += 1;
            } else {
                cell.weights.fill(0.0);
            }
            let t = segment_param(Vector2::new(x as f64, y as f64), a, b)
                .unwrap_or(0.0)
                .clamp(0.0, 1.0);
            cell.weights[i] = 1.0 - t;
            cell.weights[next] = t;
        }
    }
    boundary
}
