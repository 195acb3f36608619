//! Generalized barycentric coordinates for planar polygons.
//!
//! Three coordinate systems express a point as convex-ish weights over a
//! polygon's vertices, so per-vertex attributes can be blended smoothly:
//! - `barycentric`: closed form for triangles.
//! - `mean_value`: closed form for arbitrary simple polygons (weights may go
//!   negative outside the kernel of concave polygons).
//! - `harmonic`: grid-based Laplace solve; non-negative and smooth inside
//!   concave polygons, at the cost of a relaxation pass.
//!
//! Supporting modules: `geom2` (polygon primitives and random polygons),
//! `grid` (overlay point grids), `interp` (weights → position/attribute),
//! `error` (shared `CoordError`).
//!
//! API Policy
//! - `api` is the flat convenience surface; the modules remain the source of
//!   truth and may change shape between minor versions.

pub mod api;
pub mod barycentric;
pub mod error;
pub mod geom2;
pub mod grid;
pub mod harmonic;
pub mod interp;
pub mod mean_value;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{CoordError, Result};
pub use geom2::{Aabb, GeomCfg, Polygon};
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::error::{CoordError, Result};
    pub use crate::geom2::rand::{draw_star_polygon, RadialCfg, ReplayToken, VertexCount};
    pub use crate::geom2::{regular_polygon, Aabb, GeomCfg, Placement, Polygon};
    pub use crate::grid::Grid;
    pub use crate::harmonic::{CellKind, Convergence, HarmonicCfg, HarmonicField, SolveWorker};
    pub use crate::interp::Weights;
    pub use nalgebra::Vector2 as Vec2;
}
