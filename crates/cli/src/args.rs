//! Argument parsing helpers: coordinate lists and the polygon source.

use anyhow::{bail, Context, Result};
use clap::Args;
use nalgebra::Vector2;
use polyweights::geom2::rand::{draw_star_polygon, RadialCfg, ReplayToken, VertexCount};
use polyweights::Polygon;
use serde_json::{json, Value};

/// Where the polygon comes from: an explicit list or a seeded random star.
#[derive(Args, Debug, Clone)]
pub struct PolygonArgs {
    /// Flat vertex list `x0,y0,x1,y1,...`
    #[arg(long, allow_hyphen_values = true, conflicts_with = "random_seed")]
    pub polygon: Option<String>,
    /// Seed for a random star-shaped polygon
    #[arg(long)]
    pub random_seed: Option<u64>,
    /// Vertex count of the random polygon
    #[arg(long, default_value_t = 8)]
    pub vertices: usize,
    /// Mean radius of the random polygon
    #[arg(long, default_value_t = 100.0)]
    pub radius: f64,
}

impl PolygonArgs {
    pub fn resolve(&self) -> Result<Polygon> {
        match (&self.polygon, self.random_seed) {
            (Some(flat), _) => {
                let coords = parse_coords(flat).context("parsing --polygon")?;
                if coords.len() % 2 != 0 {
                    bail!("--polygon needs an even number of coordinates, got {}", coords.len());
                }
                if coords.len() < 6 {
                    bail!("--polygon needs at least 3 vertices");
                }
                Ok(Polygon::from_flat(&coords))
            }
            (None, Some(seed)) => {
                if self.vertices < 3 {
                    bail!("--vertices must be at least 3, got {}", self.vertices);
                }
                let cfg = RadialCfg {
                    vertex_count: VertexCount::Fixed(self.vertices),
                    base_radius: self.radius,
                    ..RadialCfg::default()
                };
                Ok(draw_star_polygon(cfg, ReplayToken { seed, index: 0 }))
            }
            (None, None) => bail!("pass --polygon or --random-seed"),
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "polygon": self.polygon,
            "random_seed": self.random_seed,
            "vertices": self.vertices,
            "radius": self.radius,
        })
    }
}

/// Comma- or whitespace-separated floats.
pub fn parse_coords(s: &str) -> Result<Vec<f64>> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(|t| {
            let v: f64 = t.parse().with_context(|| format!("bad number {t:?}"))?;
            if !v.is_finite() {
                bail!("non-finite coordinate {t:?}");
            }
            Ok(v)
        })
        .collect()
}

/// `x,y` → point.
pub fn parse_point(s: &str) -> Result<Vector2<f64>> {
    match parse_coords(s)?.as_slice() {
        [x, y] => Ok(Vector2::new(*x, *y)),
        other => bail!("expected a point `x,y`, got {} values", other.len()),
    }
}

/// Exactly three vertices.
pub fn parse_triangle(s: &str) -> Result<[Vector2<f64>; 3]> {
    match parse_coords(s)?.as_slice() {
        [x0, y0, x1, y1, x2, y2] => Ok([
            Vector2::new(*x0, *y0),
            Vector2::new(*x1, *y1),
            Vector2::new(*x2, *y2),
        ]),
        other => bail!("expected a triangle `x0,y0,x1,y1,x2,y2`, got {} values", other.len()),
    }
}
