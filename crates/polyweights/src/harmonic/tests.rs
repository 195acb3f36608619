use super::*;
use crate::error::CoordError;
use crate::geom2::{closest_point_on_segment, regular_polygon, Polygon};
use crate::interp::interpolate;
use nalgebra::{vector, Vector2};

fn square(side: f64) -> Polygon {
    Polygon::from_flat(&[0.0, 0.0, side, 0.0, side, side, 0.0, side])
}

/// Concave hexagon used by the interactive harmonic demo.
fn arrow() -> Polygon {
    Polygon::from_flat(&[
        250.0, 50.0, 50.0, 250.0, 200.0, 450.0, 150.0, 200.0, 250.0, 200.0, 450.0, 400.0,
    ])
}

fn distance_to_outline(poly: &Polygon, p: Vector2<f64>) -> f64 {
    poly.edges()
        .map(|(a, b)| (p - closest_point_on_segment(p, a, b)).norm())
        .fold(f64::INFINITY, f64::min)
}

#[test]
fn square_res4_ring_and_core() {
    let field = solve(&square(4.0), &HarmonicCfg::default().with_resolution(4)).unwrap();
    assert_eq!(field.cells.len(), 16);
    assert_eq!((field.cell_width, field.cell_height), (1.0, 1.0));
    for j in 0..4 {
        for i in 0..4 {
            let on_ring = i == 0 || j == 0 || i == 3 || j == 3;
            let kind = field.cell(i, j).unwrap().kind;
            let expected = if on_ring { CellKind::Boundary } else { CellKind::Interior };
            assert_eq!(kind, expected, "cell ({i}, {j})");
        }
    }
    // Vertices at 4.0 clamp into cell 3, so the outline is the outer ring and a 2x2 core stays Interior.
    let counts = field.cell_counts();
    assert_eq!(
        counts,
        CellCounts {
            untyped: 0,
            boundary: 12,
            interior: 4,
            exterior: 0
        }
    );
    // Corners are one-hot, edge cells split linearly.
    assert_eq!(field.weights_at(0, 0).unwrap(), &[1.0, 0.0, 0.0, 0.0]);
    assert_eq!(field.weights_at(3, 3).unwrap(), &[0.0, 0.0, 1.0, 0.0]);
    let w = field.weights_at(1, 0).unwrap();
    assert!((w[0] - 2.0 / 3.0).abs() < 1e-12 && (w[1] - 1.0 / 3.0).abs() < 1e-12);
    assert_eq!(field.report.status, Convergence::Converged);
}

#[test]
fn fully_boundary_grid_skips_relaxation() {
    let field = solve(&square(4.0), &HarmonicCfg::default().with_resolution(2)).unwrap();
    assert_eq!(field.cell_counts().boundary, 4);
    assert_eq!(field.cell_counts().interior, 0);
    assert_eq!(field.report.status, Convergence::Skipped);
    assert_eq!(field.report.sweeps, 0);
    assert!(field.ensure_converged().is_ok());
}

#[test]
fn interior_weights_partition_unity() {
    let cfg = HarmonicCfg::default()
        .with_resolution(16)
        .with_threshold(1e-10);
    let field = solve(&arrow(), &cfg).unwrap();
    assert_eq!(field.report.status, Convergence::Converged);
    for idx in field.cells_of_kind(CellKind::Interior) {
        let w = &field.cells[idx].weights;
        assert_eq!(w.len(), 6);
        assert!((w.iter().sum::<f64>() - 1.0).abs() < 1e-6, "cell {idx}: {w:?}");
        assert!(w.iter().all(|x| *x >= 0.0));
    }
}

#[test]
fn boundary_cells_carry_adjacent_pairs() {
    let poly = arrow();
    let n = poly.len();
    let field = solve(&poly, &HarmonicCfg::default().with_resolution(32)).unwrap();
    for idx in field.cells_of_kind(CellKind::Boundary) {
        let w = &field.cells[idx].weights;
        assert!((w.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        let nonzero: Vec<usize> = (0..n).filter(|&k| w[k] != 0.0).collect();
        match nonzero.as_slice() {
            [_] => {}
            [a, b] => assert!((a + 1) % n == *b || (b + 1) % n == *a, "{w:?}"),
            other => panic!("cell {idx} has weights on {other:?}"),
        }
    }
    // Every vertex's own cell is one-hot for that vertex.
    for (k, v) in poly.vertices.iter().enumerate() {
        let w = field.query(*v).unwrap();
        assert_eq!(w[k], 1.0, "vertex {k}: {w:?}");
    }
}

#[test]
fn concave_polygon_leaves_nothing_untyped() {
    let poly = arrow();
    for res in [17, 32, 64] {
        let field = solve(&poly, &HarmonicCfg::default().with_resolution(res)).unwrap();
        let counts = field.cell_counts();
        assert_eq!(counts.untyped, 0, "resolution {res}");
        assert_eq!(
            counts.boundary + counts.interior + counts.exterior,
            res * res
        );
        assert!(counts.exterior > 0 && counts.interior > 0);
    }
}

#[test]
fn convex_classification_matches_oracle() {
    let mut hex = regular_polygon(6, vector![10.0, -4.0], 7.5);
    hex.reverse();
    assert!(hex.is_ccw());
    let res = 40;
    let field = solve(&hex, &HarmonicCfg::default().with_resolution(res)).unwrap();
    let slack = 2.0 * field.cell_width.max(field.cell_height);

    // Border cells are all Boundary or Exterior.
    for i in 0..res {
        for (ci, cj) in [(i, 0), (i, res - 1), (0, i), (res - 1, i)] {
            let kind = field.cell(ci, cj).unwrap().kind;
            assert!(matches!(kind, CellKind::Boundary | CellKind::Exterior));
        }
    }
    for (idx, cell) in field.cells.iter().enumerate() {
        let c = field.cell_center(idx);
        let near = distance_to_outline(&hex, c) <= slack;
        match cell.kind {
            CellKind::Exterior => assert!(!hex.contains(c) || near, "exterior cell {idx} inside"),
            CellKind::Interior => assert!(hex.contains(c) || near, "interior cell {idx} outside"),
            CellKind::Boundary => assert!(near, "boundary cell {idx} far from outline"),
            CellKind::Untyped => panic!("untyped cell {idx}"),
        }
    }
}

#[test]
fn residual_is_non_increasing() {
    let cfg = HarmonicCfg::default()
        .with_resolution(24)
        .with_threshold(1e-7)
        .with_trace(true);
    let field = solve(&arrow(), &cfg).unwrap();
    let trace = &field.report.trace;
    assert_eq!(trace.len(), field.report.sweeps);
    assert!(trace.len() > 10);
    for w in trace.windows(2) {
        assert!(w[1] <= w[0] * (1.0 + 1e-12) + 1e-18, "{} -> {}", w[0], w[1]);
    }
    assert_eq!(trace.last().copied(), Some(field.report.residual));
    assert!(field.report.residual < 1e-7);
}

#[test]
fn square_reproduces_positions() {
    // Harmonic coordinates have linear precision; discretization costs about a cell.
    let poly = square(32.0);
    let cfg = HarmonicCfg::default()
        .with_resolution(32)
        .with_threshold(1e-6);
    let field = solve(&poly, &cfg).unwrap();
    field.ensure_converged().unwrap();
    for p in [vector![16.0, 16.0], vector![5.5, 20.25], vector![30.0, 2.0]] {
        let w = field.query(p).unwrap();
        let back = interpolate(w, &poly.vertices).unwrap();
        assert!((back - p).norm() < 1.5, "{p:?} -> {back:?}");
    }
}

#[test]
fn query_domains() {
    let poly = arrow();
    let field = solve(&poly, &HarmonicCfg::default().with_resolution(32)).unwrap();

    let outside = vector![10.0, 10.0];
    assert_eq!(
        field.query(outside),
        Err(CoordError::OutOfDomain { x: 10.0, y: 10.0 })
    );
    assert!(field.query(vector![f64::NAN, 100.0]).is_err());

    // Inside the bbox but outside the polygon: an exterior cell, no weights.
    let corner = vector![430.0, 60.0];
    assert!(!poly.contains(corner));
    assert_eq!(field.query(corner).unwrap(), &[] as &[f64]);

    let inside = vector![200.0, 150.0];
    assert!(poly.contains(inside));
    let w = field.query(inside).unwrap();
    assert_eq!(w.len(), 6);
    assert!((w.iter().sum::<f64>() - 1.0).abs() < 1e-2);

    // Far corner of the bbox is still in the domain.
    let far = field.bbox.max();
    assert!(field.cell_index_of(far).is_some());
}

#[test]
fn field_grid_matches_cell_layout() {
    let field = solve(&arrow(), &HarmonicCfg::default().with_resolution(8)).unwrap();
    let grid = field.grid();
    let pts = grid.world_points();
    assert_eq!(pts.len(), field.cells.len());
    for idx in [0, 7, 8, 37, 63] {
        let (i, j) = grid.coords(idx);
        assert_eq!(grid.index(i, j), Some(idx));
        let r = field.cell_rect(idx);
        assert!((pts[idx] - vector![r.x, r.y]).norm() < 1e-9);
        assert_eq!(grid.cell_of(field.cell_center(idx)), Some((i, j)));
        assert_eq!(field.cell_index_of(field.cell_center(idx)), Some(idx));
    }
}

#[test]
fn resolving_is_deterministic() {
    let cfg = HarmonicCfg::default().with_resolution(20);
    let a = solve(&arrow(), &cfg).unwrap();
    let b = solve(&arrow(), &cfg).unwrap();
    assert_eq!(a.cells, b.cells);
    assert_eq!(a.report, b.report);
}

#[test]
fn sweep_cap_flags_field_as_approximate() {
    let cfg = HarmonicCfg::default()
        .with_resolution(32)
        .with_threshold(1e-12)
        .with_max_sweeps(3);
    let field = solve(&arrow(), &cfg).unwrap();
    assert_eq!(field.report.status, Convergence::CapReached);
    assert_eq!(field.report.sweeps, 3);
    assert!(field.is_approximate());
    assert!(matches!(
        field.ensure_converged(),
        Err(CoordError::NonConvergence { sweeps: 3, .. })
    ));
    // Best-effort weights are still there.
    assert!(field
        .cells_of_kind(CellKind::Interior)
        .any(|idx| field.cells[idx].weights.iter().any(|w| *w > 0.0)));
}

#[test]
fn degenerate_inputs_are_reported() {
    let cfg = HarmonicCfg::default();
    let line = Polygon::from_flat(&[0.0, 0.0, 1.0, 1.0, 2.0, 2.0]);
    let flat = Polygon::from_flat(&[0.0, 0.0, 1.0, 0.0, 2.0, 0.0]);
    let two = Polygon::from_flat(&[0.0, 0.0, 1.0, 1.0]);
    let nan = Polygon::from_flat(&[0.0, 0.0, f64::NAN, 1.0, 2.0, 2.0]);
    assert!(matches!(
        solve(&flat, &cfg),
        Err(CoordError::DegenerateGeometry { .. })
    ));
    assert!(matches!(
        solve(&two, &cfg),
        Err(CoordError::DegenerateGeometry { .. })
    ));
    assert!(matches!(
        solve(&nan, &cfg),
        Err(CoordError::DegenerateGeometry { .. })
    ));
    // Colinear but diagonal: non-degenerate box, no interior.
    let field = solve(&line, &cfg.with_resolution(8)).unwrap();
    assert_eq!(field.cell_counts().interior, 0);
    assert_eq!(field.report.status, Convergence::Skipped);
}

#[test]
fn invalid_parameters_are_rejected() {
    let poly = square(1.0);
    for cfg in [
        HarmonicCfg::default().with_resolution(0),
        HarmonicCfg::default().with_threshold(0.0),
        HarmonicCfg::default().with_threshold(f64::NAN),
        HarmonicCfg::default().with_max_sweeps(0),
    ] {
        assert!(matches!(
            solve(&poly, &cfg),
            Err(CoordError::InvalidParameter { .. })
        ));
    }
}

#[test]
fn worker_matches_direct_solve() {
    let cfg = HarmonicCfg::default().with_resolution(16);
    let worker = SolveWorker::spawn().unwrap();
    assert!(worker.recv_latest().is_none());
    let generation = worker.submit(arrow(), cfg);
    let outcome = worker.recv_latest().unwrap();
    assert_eq!(outcome.generation, generation);
    let direct = solve(&arrow(), &cfg).unwrap();
    assert_eq!(outcome.result.unwrap().cells, direct.cells);
}

#[test]
fn worker_cancels_superseded_solve() {
    let worker = SolveWorker::spawn().unwrap();
    let slow = HarmonicCfg::default()
        .with_resolution(160)
        .with_threshold(1e-15)
        .with_max_sweeps(1_000_000);
    let g1 = worker.submit(arrow(), slow);
    let g2 = worker.submit(square(4.0), HarmonicCfg::default().with_resolution(4));

    let first = worker.recv().unwrap();
    assert_eq!(first.generation, g1);
    assert!(matches!(first.result, Err(CoordError::Cancelled)));

    let second = worker.recv().unwrap();
    assert_eq!(second.generation, g2);
    assert_eq!(second.result.unwrap().cell_counts().interior, 4);
    assert!(worker.try_recv().is_none());
}

#[test]
fn worker_runs_on_named_thread() {
    let worker = SolveWorker::spawn().unwrap();
    let handle = worker.handle.as_ref().unwrap();
    assert_eq!(handle.thread().name(), Some(worker::THREAD_NAME));
    assert_eq!(worker.latest_generation(), 0);
}
