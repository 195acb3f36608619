//! Placement of a shape in the world: translation, rotation, axis scale.
//!
//! `to_world` scales in local axes, rotates by `-angle`, then translates, so
//! a positive angle turns counter-clockwise on a y-down canvas. `to_local`
//! undoes the three steps in reverse order.

use nalgebra::{Rotation2, Vector2};

use super::polygon::Polygon;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub translation: Vector2<f64>,
    /// Radians.
    pub angle: f64,
    pub scale: Vector2<f64>,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            translation: Vector2::zeros(),
            angle: 0.0,
            scale: Vector2::new(1.0, 1.0),
        }
    }
}

impl Placement {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            translation: Vector2::new(x, y),
            ..Self::default()
        }
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_scale(mut self, sx: f64, sy: f64) -> Self {
        self.scale = Vector2::new(sx, sy);
        self
    }

    /// Local → world.
    pub fn to_world(&self, p: Vector2<f64>) -> Vector2<f64> {
        Rotation2::new(-self.angle) * p.component_mul(&self.scale) + self.translation
    }

    /// World → local. A zero scale component yields non-finite coordinates.
    pub fn to_local(&self, p: Vector2<f64>) -> Vector2<f64> {
        (Rotation2::new(self.angle) * (p - self.translation)).component_div(&self.scale)
    }

    /// Every vertex mapped to world space.
    pub fn polygon_to_world(&self, poly: &Polygon) -> Polygon {
        Polygon::new(poly.vertices.iter().map(|v| self.to_world(*v)).collect())
    }

    /// Every vertex mapped to local space.
    pub fn polygon_to_local(&self, poly: &Polygon) -> Polygon {
        Polygon::new(poly.vertices.iter().map(|v| self.to_local(*v)).collect())
    }
}
