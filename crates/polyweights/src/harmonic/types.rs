//! Data types for the harmonic solve: configuration, cells, and the field.
//!
//! Kept small and explicit so `raster`, `classify` and `relax` read as the
//! three steps they are.

use nalgebra::Vector2;

use crate::error::{CoordError, Result};
use crate::geom2::Aabb;
use crate::grid::Grid;

/// Solver configuration, passed into every solve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HarmonicCfg {
    /// Cells per side.
    pub resolution: usize,
    /// Mean absolute per-sweep change below which relaxation stops.
    pub threshold: f64,
    /// Safety cap on Jacobi sweeps.
    pub max_sweeps: usize,
    /// Keep the per-sweep residual history in the report.
    pub record_trace: bool,
}

impl Default for HarmonicCfg {
    fn default() -> Self {
        Self {
            resolution: 64,
            threshold: 1e-5,
            max_sweeps: 10_000,
            record_trace: false,
        }
    }
}

impl HarmonicCfg {
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_max_sweeps(mut self, max_sweeps: usize) -> Self {
        self.max_sweeps = max_sweeps;
        self
    }

    pub fn with_trace(mut self, record: bool) -> Self {
        self.record_trace = record;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.resolution == 0 {
            return Err(CoordError::invalid_param(
                "resolution",
                self.resolution,
                "must be at least 1",
            ));
        }
        if !(self.threshold.is_finite() && self.threshold > 0.0) {
            return Err(CoordError::invalid_param(
                "threshold",
                self.threshold,
                "must be finite and positive",
            ));
        }
        if self.max_sweeps == 0 {
            return Err(CoordError::invalid_param(
                "max_sweeps",
                self.max_sweeps,
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Classification of a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellKind {
    Untyped,
    Boundary,
    Interior,
    Exterior,
}

/// One grid cell. `weights` is empty for Exterior (and Untyped) cells.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub kind: CellKind,
    pub weights: Vec<f64>,
}

impl Cell {
    pub(crate) fn untyped() -> Self {
        Self {
            kind: CellKind::Untyped,
            weights: Vec::new(),
        }
    }
}

/// Outcome of the relaxation phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Convergence {
    /// Mean absolute change fell below the threshold.
    Converged,
    /// No interior cells; nothing to relax.
    Skipped,
    /// Sweep cap reached first; interior weights are approximate.
    CapReached,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConvergenceReport {
    pub status: Convergence,
    pub sweeps: usize,
    /// Mean absolute change of the last sweep (0 when skipped).
    pub residual: f64,
    /// Residual of every sweep, when `HarmonicCfg::record_trace` is set.
    pub trace: Vec<f64>,
}

/// Per-kind cell tally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellCounts {
    pub untyped: usize,
    pub boundary: usize,
    pub interior: usize,
    pub exterior: usize,
}

/// World ↦ cell mapping shared by rasterization and queries:
/// `floor(clamp((c − min) * scale, 0, resolution − 1))`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct CellMap {
    pub min: Vector2<f64>,
    pub scale: Vector2<f64>,
    pub resolution: usize,
}

impl CellMap {
    pub fn new(bbox: &Aabb, resolution: usize) -> Self {
        let r = resolution as f64;
        Self {
            min: bbox.min(),
            scale: Vector2::new(r / bbox.width, r / bbox.height),
            resolution,
        }
    }

    /// Continuous grid-space position of a world point.
    #[inline]
    pub fn to_grid(&self, p: Vector2<f64>) -> Vector2<f64> {
        (p - self.min).component_mul(&self.scale)
    }

    /// Integer cell coordinates, clamped into the grid.
    #[inline]
    pub fn to_cell(&self, p: Vector2<f64>) -> (usize, usize) {
        let g = self.to_grid(p);
        let hi = (self.resolution - 1) as f64;
        (g.x.clamp(0.0, hi).floor() as usize, g.y.clamp(0.0, hi).floor() as usize)
    }
}

/// Solved harmonic coordinate field.
///
/// Cells are stored row-major, `index = j * resolution + i`, matching
/// [`Grid::index`] for [`HarmonicField::grid`].
#[derive(Clone, Debug)]
pub struct HarmonicField {
    pub cells: Vec<Cell>,
    pub resolution: usize,
    pub bbox: Aabb,
    /// World width of one cell.
    pub cell_width: f64,
    /// World height of one cell.
    pub cell_height: f64,
    pub vertex_count: usize,
    pub report: ConvergenceReport,
    pub(crate) map: CellMap,
}

impl HarmonicField {
    /// Overlay grid aligned with the field's cells.
    pub fn grid(&self) -> Grid {
        Grid::new(self.bbox.width, self.bbox.height, self.resolution, self.resolution)
            .at(self.bbox.x, self.bbox.y)
    }

    /// Linear cell index for a world point, `None` outside the bbox.
    pub fn cell_index_of(&self, p: Vector2<f64>) -> Option<usize> {
        if !self.bbox.contains(p) {
            return None;
        }
        let (i, j) = self.map.to_cell(p);
        Some(j * self.resolution + i)
    }

    /// Weights of the cell containing `p`.
    ///
    /// Exterior cells yield an empty slice; points outside the bbox are
    /// `OutOfDomain`.
    pub fn query(&self, p: Vector2<f64>) -> Result<&[f64]> {
        self.cell_index_of(p)
            .map(|idx| self.cells[idx].weights.as_slice())
            .ok_or(CoordError::OutOfDomain { x: p.x, y: p.y })
    }

    pub fn cell(&self, i: usize, j: usize) -> Option<&Cell> {
        if i >= self.resolution || j >= self.resolution {
            return None;
        }
        self.cells.get(j * self.resolution + i)
    }

    pub fn weights_at(&self, i: usize, j: usize) -> Option<&[f64]> {
        self.cell(i, j).map(|c| c.weights.as_slice())
    }

    pub fn cell_counts(&self) -> CellCounts {
        count_kinds(&self.cells)
    }

    /// Indices of all cells of `kind`.
    pub fn cells_of_kind(&self, kind: CellKind) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, c)| c.kind == kind)
            .map(|(idx, _)| idx)
    }

    /// World rectangle covered by cell `index`.
    pub fn cell_rect(&self, index: usize) -> Aabb {
        let (i, j) = (index % self.resolution, index / self.resolution);
        Aabb {
            x: self.bbox.x + i as f64 * self.cell_width,
            y: self.bbox.y + j as f64 * self.cell_height,
            width: self.cell_width,
            height: self.cell_height,
        }
    }

    /// World-space center of cell `index`.
    pub fn cell_center(&self, index: usize) -> Vector2<f64> {
        let r = self.cell_rect(index);
        Vector2::new(r.x + 0.5 * r.width, r.y + 0.5 * r.height)
    }

    #[inline]
    pub fn is_approximate(&self) -> bool {
        self.report.status == Convergence::CapReached
    }

    /// `NonConvergence` if the sweep cap was hit.
    pub fn ensure_converged(&self) -> Result<()> {
        if self.is_approximate() {
            return Err(CoordError::NonConvergence {
                sweeps: self.report.sweeps,
                residual: self.report.residual,
            });
        }
        Ok(())
    }
}

pub(crate) fn count_kinds(cells: &[Cell]) -> CellCounts {
    let mut counts = CellCounts::default();
    for c in cells {
        match c.kind {
            CellKind::Untyped => counts.untyped += 1,
            CellKind::Boundary => counts.boundary += 1,
            CellKind::Interior => counts.interior += 1,
            CellKind::Exterior => counts.exterior += 1,
        }
    }
    counts
}
