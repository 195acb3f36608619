use nalgebra::Vector2;

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// Parameter `t` with `lerp(a, b, t) == value`. Non-finite when `a == b`.
#[inline]
pub fn inverse_lerp(a: f64, b: f64, value: f64) -> f64 {
    (value - a) / (b - a)
}

#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

#[inline]
pub fn near_zero(value: f64, eps: f64) -> bool {
    value.abs() < eps
}

/// Euclidean modulo for ring indexing; `wrap_index(-1, 3) == 2`.
#[inline]
pub fn wrap_index(i: isize, n: usize) -> usize {
    i.rem_euclid(n as isize) as usize
}

/// 2D cross product `a × b` (z-component).
#[inline]
pub fn cross(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Signed doubled area of triangle (a, b, c); positive when CCW.
#[inline]
pub fn orient(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    cross(b - a, c - a)
}
