//! Jacobi relaxation of interior weights (discrete Laplace, Dirichlet boundary).
//!
//! Each sweep sets every Interior cell to the mean of its four neighbours'
//! previous-sweep weights. Two flat buffers (`cur`, `next`, stride = vertex
//! count) are swapped between sweeps, so a sweep never reads its own writes.
//! Boundary entries are copied into both buffers once and never rewritten.
//! Neighbours outside the grid or without weights contribute zero; the
//! divisor is always 4.

use tracing::{debug, trace, warn};

use super::types::{Cell, CellKind, Convergence, ConvergenceReport, HarmonicCfg};
use crate::error::{CoordError, Result};

/// Relax `interior` cells in place until the mean absolute change drops
/// below `cfg.threshold` or `cfg.max_sweeps` is reached.
///
/// `cancelled` is polled once per sweep.
pub(crate) fn relax(
    cells: &mut [Cell],
    interior: &[usize],
    res: usize,
    n: usize,
    cfg: &HarmonicCfg,
    cancelled: &dyn Fn() -> bool,
) -> Result<ConvergenceReport> {
    if interior.is_empty() || n == 0 {
        debug!("no interior cells; relaxation skipped");
        return Ok(ConvergenceReport {
            status: Convergence::Skipped,
            sweeps: 0,
            residual: 0.0,
            trace: Vec::new(),
        });
    }

    let mut cur = vec![0.0; cells.len() * n];
    for (idx, cell) in cells.iter().enumerate() {
        if matches!(cell.kind, CellKind::Boundary | CellKind::Interior) && cell.weights.len() == n {
            cur[idx * n..(idx + 1) * n].copy_from_slice(&cell.weights);
        }
    }
    let mut next = cur.clone();

    let neighbours: Vec<[Option<usize>; 4]> = interior
        .iter()
        .map(|&idx| {
            let (i, j) = (idx % res, idx / res);
            [
                (i > 0).then(|| idx - 1),
                (i + 1 < res).then(|| idx + 1),
                (j > 0).then(|| idx - res),
                (j + 1 < res).then(|| idx + res),
            ]
        })
        .collect();

    let denom = (interior.len() * n) as f64;
    let mut trace_log = Vec::new();
    let mut sweeps = 0usize;
    let mut residual = f64::INFINITY;
    let mut status = Convergence::CapReached;

    while sweeps < cfg.max_sweeps {
        if cancelled() {
            debug!(sweeps, "relaxation cancelled");
            return Err(CoordError::Cancelled);
        }
        let mut delta = 0.0;
        for (&idx, nbs) in interior.iter().zip(&neighbours) {
            for k in 0..n {
                let sum: f64 = nbs.iter().flatten().map(|&nb| cur[nb * n + k]).sum();
                let value = 0.25 * sum;
                let slot = idx * n + k;
                delta += (value - cur[slot]).abs();
                next[slot] = value;
            }
        }
        std::mem::swap(&mut cur, &mut next);
        sweeps += 1;
        residual = delta / denom;
        if cfg.record_trace {
            trace_log.push(residual);
        }
        if sweeps % 500 == 0 {
            trace!(sweeps, residual, "relaxation progress");
        }
        if residual < cfg.threshold {
            status = Convergence::Converged;
            break;
        }
    }

    match status {
        Convergence::CapReached => warn!(
            sweeps,
            residual,
            threshold = cfg.threshold,
            "relaxation hit the sweep cap; interior weights are approximate"
        ),
        _ => debug!(sweeps, residual, "relaxation converged"),
    }

    for &idx in interior {
        cells[idx].weights.copy_from_slice(&cur[idx * n..(idx + 1) * n]);
    }

    Ok(ConvergenceReport {
        status,
        sweeps,
        residual,
        trace: trace_log,
    })
}
