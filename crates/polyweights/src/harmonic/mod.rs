//! Harmonic coordinates on a regular grid.
//!
//! Purpose
//! - Approximate harmonic coordinates (no closed form) by solving a discrete
//!   Laplace equation over the polygon's bounding box with Dirichlet values
//!   fixed on the rasterized outline.
//! - Return the whole solved grid (`HarmonicField`) so callers can query any
//!   point without re-solving.
//!
//! Phases (one module each, independently tested)
//! 1. `raster`: Bresenham outline → Boundary cells with hat-function weights.
//! 2. `classify`: 4-connected flood fill from the grid border → Exterior;
//!    leftovers → Interior (zero weights).
//! 3. `relax`: Jacobi sweeps until the mean absolute change < threshold, with
//!    a sweep cap that flags the field as approximate instead of failing.
//!
//! Cell lifecycle: Untyped → Boundary | Exterior | Interior, fixed once
//! relaxation starts. Cells live in a flat row-major `Vec`, neighbours by
//! computed index only.
//!
//! `worker::SolveWorker` runs solves off the caller's thread with
//! last-request-wins cancellation; its output equals `solve`.

mod classify;
mod raster;
mod relax;
mod solve;
mod types;
pub mod worker;

pub use solve::solve;
pub use types::{
    Cell, CellCounts, CellKind, Convergence, ConvergenceReport, HarmonicCfg, HarmonicField,
};
pub use worker::{SolveOutcome, SolveWorker};

#[cfg(test)]
mod tests;
