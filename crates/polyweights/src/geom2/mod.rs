//! Planar polygon primitives shared by every coordinate system.
//!
//! Purpose
//! - Provide a plain vertex-sequence `Polygon` and the free functions the
//!   converters need: bounding box, centroid, segment projection, containment.
//! - Keep the API minimal and numerically explicit (eps-aware via `GeomCfg`).
//!
//! Code cross-refs: `Polygon`, `Placement`, `Aabb`, `GeomCfg`, `segment_param`,
//! `point_on_segment`, `regular_polygon`.

mod placement;
pub mod polygon;
pub mod rand;
mod types;
pub mod util;

pub use polygon::{
    closest_point_on_segment, point_on_segment, regular_polygon, segment_param, Polygon,
};
pub use placement::Placement;
pub use types::{Aabb, GeomCfg};
