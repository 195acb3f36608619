//! JSON shapes for CLI output.

use nalgebra::Vector2;
use polyweights::harmonic::{CellCounts, CellKind, Convergence, HarmonicField};
use serde::Serialize;

#[derive(Serialize)]
pub struct WeightsOut {
    pub point: [f64; 2],
    pub weights: Vec<f64>,
    pub sum: f64,
    /// Weighted vertex sum; equals `point` for a faithful conversion.
    pub roundtrip: Option<[f64; 2]>,
}

impl WeightsOut {
    pub fn new(point: Vector2<f64>, weights: Vec<f64>, roundtrip: Option<Vector2<f64>>) -> Self {
        Self {
            point: [point.x, point.y],
            sum: weights.iter().sum(),
            weights,
            roundtrip: roundtrip.map(|r| [r.x, r.y]),
        }
    }
}

#[derive(Serialize)]
pub struct CountsOut {
    pub boundary: usize,
    pub interior: usize,
    pub exterior: usize,
    pub untyped: usize,
}

impl From<CellCounts> for CountsOut {
    fn from(c: CellCounts) -> Self {
        Self {
            boundary: c.boundary,
            interior: c.interior,
            exterior: c.exterior,
            untyped: c.untyped,
        }
    }
}

#[derive(Serialize)]
pub struct ReportOut {
    pub status: &'static str,
    pub sweeps: usize,
    pub residual: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub trace: Vec<f64>,
}

/// Query result against a solved field; `error` set for out-of-domain points.
#[derive(Serialize)]
pub struct QueryOut {
    pub point: [f64; 2],
    pub kind: Option<&'static str>,
    pub weights: Vec<f64>,
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct FieldSummary {
    pub resolution: usize,
    /// `[x, y, width, height]`
    pub bbox: [f64; 4],
    pub cell_width: f64,
    pub cell_height: f64,
    pub vertex_count: usize,
    pub counts: CountsOut,
    pub report: ReportOut,
    pub queries: Vec<QueryOut>,
}

#[derive(Serialize)]
pub struct CellOut<'a> {
    pub kind: &'static str,
    pub weights: &'a [f64],
}

/// Full dump: summary plus every cell in row-major order.
#[derive(Serialize)]
pub struct FieldDump<'a> {
    #[serde(flatten)]
    pub summary: FieldSummary,
    pub cells: Vec<CellOut<'a>>,
}

pub fn kind_name(kind: CellKind) -> &'static str {
    match kind {
        CellKind::Untyped => "untyped",
        CellKind::Boundary => "boundary",
        CellKind::Interior => "interior",
        CellKind::Exterior => "exterior",
    }
}

pub fn status_name(status: Convergence) -> &'static str {
    match status {
        Convergence::Converged => "converged",
        Convergence::Skipped => "skipped",
        Convergence::CapReached => "cap_reached",
    }
}

pub fn summarize(field: &HarmonicField, points: &[Vector2<f64>]) -> FieldSummary {
    let queries = points
        .iter()
        .map(|p| {
            let kind = field.cell_index_of(*p).map(|idx| kind_name(field.cells[idx].kind));
            match field.query(*p) {
                Ok(w) => QueryOut {
                    point: [p.x, p.y],
                    kind,
                    weights: w.to_vec(),
                    error: None,
                },
                Err(e) => QueryOut {
                    point: [p.x, p.y],
                    kind,
                    weights: Vec::new(),
                    error: Some(e.to_string()),
                },
            }
        })
        .collect();
    FieldSummary {
        resolution: field.resolution,
        bbox: [field.bbox.x, field.bbox.y, field.bbox.width, field.bbox.height],
        cell_width: field.cell_width,
        cell_height: field.cell_height,
        vertex_count: field.vertex_count,
        counts: field.cell_counts().into(),
        report: ReportOut {
            status: status_name(field.report.status),
            sweeps: field.report.sweeps,
            residual: field.report.residual,
            trace: field.report.trace.clone(),
        },
        queries,
    }
}

pub fn dump<'a>(field: &'a HarmonicField, points: &[Vector2<f64>]) -> FieldDump<'a> {
    FieldDump {
        summary: summarize(field, points),
        cells: field
            .cells
            .iter()
            .map(|c| CellOut {
                kind: kind_name(c.kind),
                weights: &c.weights,
            })
            .collect(),
    }
}
