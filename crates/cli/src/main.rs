use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nalgebra::Vector2;
use polyweights::grid::Grid;
use polyweights::harmonic::{self, HarmonicCfg};
use polyweights::{barycentric, interp, mean_value};
use serde_json::json;
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

mod args;
mod output;
mod provenance;

use args::{parse_point, parse_triangle, PolygonArgs};
use provenance::Payload;

#[derive(Parser)]
#[command(name = "polyweights")]
#[command(about = "Generalized barycentric coordinates: convert, solve, inspect")]
struct Cmd {
    /// Free-form label recorded in provenance sidecars (repeatable)
    #[arg(long, global = true)]
    tag: Vec<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Triangle barycentric weights of a point
    Barycentric {
        /// `x0,y0,x1,y1,x2,y2`
        #[arg(long, allow_hyphen_values = true)]
        triangle: String,
        #[arg(long, allow_hyphen_values = true)]
        point: String,
    },
    /// Mean-value weights of a point in a polygon
    MeanValue {
        #[command(flatten)]
        poly: PolygonArgs,
        #[arg(long, allow_hyphen_values = true)]
        point: String,
    },
    /// Solve harmonic coordinates on a grid and query points
    Harmonic {
        #[command(flatten)]
        poly: PolygonArgs,
        #[arg(long, default_value_t = HarmonicCfg::default().resolution)]
        resolution: usize,
        #[arg(long, default_value_t = HarmonicCfg::default().threshold)]
        threshold: f64,
        #[arg(long, default_value_t = HarmonicCfg::default().max_sweeps)]
        max_sweeps: usize,
        /// Query point `x,y` (repeatable)
        #[arg(long, allow_hyphen_values = true)]
        point: Vec<String>,
        /// Record the per-sweep residual
        #[arg(long)]
        trace: bool,
        /// Write the full field (every cell) as JSON plus a provenance sidecar
        #[arg(long)]
        out: Option<String>,
    },
    /// Regular point grid (row-major cell corners)
    Grid {
        #[arg(long, default_value_t = 1.0)]
        width: f64,
        #[arg(long, default_value_t = 1.0)]
        height: f64,
        #[arg(long, default_value_t = 1)]
        cols: usize,
        #[arg(long, default_value_t = 1)]
        rows: usize,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        x: f64,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        y: f64,
        #[arg(long)]
        out: Option<String>,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    SubscriberBuilder::default()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    let tags = cmd.tag;
    match cmd.action {
        Action::Barycentric { triangle, point } => run_barycentric(&triangle, &point),
        Action::MeanValue { poly, point } => run_mean_value(&poly, &point),
        Action::Harmonic {
            poly,
            resolution,
            threshold,
            max_sweeps,
            point,
            trace,
            out,
        } => {
            let cfg = HarmonicCfg::default()
                .with_resolution(resolution)
                .with_threshold(threshold)
                .with_max_sweeps(max_sweeps)
                .with_trace(trace);
            run_harmonic(&poly, cfg, &point, out.as_deref(), tags)
        }
        Action::Grid {
            width,
            height,
            cols,
            rows,
            x,
            y,
            out,
        } => run_grid(Grid::new(width, height, cols, rows).at(x, y), out.as_deref(), tags),
        Action::Report => report(tags),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_barycentric(triangle: &str, point: &str) -> Result<()> {
    let tri = parse_triangle(triangle).context("parsing --triangle")?;
    let p = parse_point(point).context("parsing --point")?;
    let weights = barycentric::try_convert(p, &tri)?;
    tracing::info!(?weights, "barycentric");
    let back = barycentric::interpolate(&weights, &tri);
    print_json(&output::WeightsOut::new(p, weights.to_vec(), Some(back)))
}

fn run_mean_value(poly: &PolygonArgs, point: &str) -> Result<()> {
    let polygon = poly.resolve()?;
    let p = parse_point(point).context("parsing --point")?;
    let weights = mean_value::convert(p, &polygon)?;
    tracing::info!(vertices = polygon.len(), "mean-value");
    let back = interp::interpolate(&weights, &polygon.vertices);
    print_json(&output::WeightsOut::new(p, weights, back))
}

fn run_harmonic(
    poly: &PolygonArgs,
    cfg: HarmonicCfg,
    points: &[String],
    out: Option<&str>,
    tags: Vec<String>,
) -> Result<()> {
    let polygon = poly.resolve()?;
    let pts = points
        .iter()
        .map(|s| parse_point(s).with_context(|| format!("parsing --point {s:?}")))
        .collect::<Result<Vec<Vector2<f64>>>>()?;
    tracing::info!(
        vertices = polygon.len(),
        resolution = cfg.resolution,
        threshold = cfg.threshold,
        "harmonic solve"
    );
    let field = harmonic::solve(&polygon, &cfg)?;
    if field.is_approximate() {
        tracing::warn!(sweeps = field.report.sweeps, "field did not converge; weights are approximate");
    }
    print_json(&output::summarize(&field, &pts))?;

    if let Some(path) = out {
        let params = json!({
            "source": poly.to_json(),
            "vertices": polygon.to_flat(),
            "resolution": cfg.resolution,
            "threshold": cfg.threshold,
            "max_sweeps": cfg.max_sweeps,
        });
        let value = serde_json::to_value(output::dump(&field, &pts))?;
        let sidecar =
            provenance::write_artifact(path, &value, Payload::new("harmonic", params).with_tags(tags))?;
        tracing::info!(out = path, sidecar = %sidecar.display(), "field written");
    }
    Ok(())
}

fn run_grid(grid: Grid, out: Option<&str>, tags: Vec<String>) -> Result<()> {
    let points: Vec<[f64; 2]> = grid.world_points().iter().map(|p| [p.x, p.y]).collect();
    let value = json!({
        "cols": grid.cols,
        "rows": grid.rows,
        "col_width": grid.col_width(),
        "row_height": grid.row_height(),
        "points": points,
    });
    match out {
        Some(path) => {
            let params = json!({
                "width": grid.width,
                "height": grid.height,
                "cols": grid.cols,
                "rows": grid.rows,
                "x": grid.x,
                "y": grid.y,
            });
            let sidecar =
                provenance::write_artifact(path, &value, Payload::new("grid", params).with_tags(tags))?;
            tracing::info!(out = path, sidecar = %sidecar.display(), "grid written");
            Ok(())
        }
        None => print_json(&value),
    }
}

fn report(tags: Vec<String>) -> Result<()> {
    let payload = Payload::new("report", json!({})).with_tags(tags);
    print_json(&provenance::provenance_doc(&payload, &[]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cmd::command().debug_assert();
    }

    #[test]
    fn harmonic_defaults_follow_library() {
        let cmd = Cmd::try_parse_from(["polyweights", "harmonic", "--random-seed", "1"]).unwrap();
        match cmd.action {
            Action::Harmonic {
                resolution,
                threshold,
                max_sweeps,
                point,
                ..
            } => {
                let d = HarmonicCfg::default();
                assert_eq!((resolution, threshold, max_sweeps), (d.resolution, d.threshold, d.max_sweeps));
                assert!(point.is_empty());
            }
            _ => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn polygon_and_seed_conflict() {
        let parsed = Cmd::try_parse_from([
            "polyweights",
            "mean-value",
            "--polygon",
            "0,0,1,0,0,1",
            "--random-seed",
            "2",
            "--point",
            "0.2,0.2",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn grid_writes_artifact_and_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.json");
        let grid = Grid::new(2.0, 2.0, 2, 2).at(-1.0, -1.0);
        run_grid(grid, path.to_str(), vec!["t".into()]).unwrap();
        let doc: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(doc["points"].as_array().unwrap().len(), 4);
        assert_eq!(doc["points"][3], json!([0.0, 0.0]));
        assert!(dir.path().join("grid.provenance.json").exists());
    }

    #[test]
    fn harmonic_writes_field_dump() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("field.json");
        let poly = PolygonArgs {
            polygon: Some("0,0,4,0,4,4,0,4".into()),
            random_seed: None,
            vertices: 8,
            radius: 100.0,
        };
        let cfg = HarmonicCfg::default().with_resolution(4);
        run_harmonic(&poly, cfg, &["2,2".into()], path.to_str(), Vec::new()).unwrap();
        let doc: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(doc["resolution"], 4);
        assert_eq!(doc["counts"]["interior"], 4);
        assert_eq!(doc["cells"].as_array().unwrap().len(), 16);
        assert_eq!(doc["queries"][0]["kind"], "interior");
    }
}
