//! Apply a weight vector to vertex-indexed values.
//!
//! The same weighted sum serves every coordinate system: positions (the
//! round trip back to the query point), scalars, and fixed-size attributes
//! such as RGBA colours. Weights are not checked for summing to one.

use nalgebra::Vector2;

/// Weight vector: one entry per polygon vertex, in vertex order.
pub type Weights = Vec<f64>;

/// Weighted sum of `vertices`. `None` if there are fewer weights than vertices.
pub fn interpolate(weights: &[f64], vertices: &[Vector2<f64>]) -> Option<Vector2<f64>> {
    if weights.len() < vertices.len() {
        return None;
    }
    Some(
        vertices
            .iter()
            .zip(weights)
            .fold(Vector2::zeros(), |acc, (v, w)| acc + v * *w),
    )
}

/// Weighted sum of per-vertex scalars.
pub fn interpolate_scalar(weights: &[f64], values: &[f64]) -> Option<f64> {
    if weights.len() < values.len() {
        return None;
    }
    Some(values.iter().zip(weights).map(|(v, w)| v * w).sum())
}

/// Weighted sum of per-vertex `N`-component attributes.
pub fn interpolate_attr<const N: usize>(weights: &[f64], values: &[[f64; N]]) -> Option<[f64; N]> {
    if weights.len() < values.len() {
        return None;
    }
    let mut out = [0.0; N];
    for (value, w) in values.iter().zip(weights) {
        for (o, c) in out.iter_mut().zip(value) {
            *o += w * c;
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn weighted_sum_of_positions() {
        let verts = [vector![0.0, 0.0], vector![4.0, 0.0], vector![0.0, 2.0]];
        let p = interpolate(&[0.5, 0.25, 0.25], &verts).unwrap();
        assert!((p - vector![1.0, 0.5]).norm() < 1e-12);
    }

    #[test]
    fn too_few_weights_is_rejected() {
        let verts = [vector![0.0, 0.0], vector![1.0, 0.0], vector![0.0, 1.0]];
        assert!(interpolate(&[1.0, 0.0], &verts).is_none());
        assert!(interpolate_scalar(&[1.0], &[1.0, 2.0]).is_none());
        assert!(interpolate_attr::<3>(&[], &[[1.0, 0.0, 0.0]]).is_none());
    }

    #[test]
    fn scalars_and_colours() {
        assert_eq!(interpolate_scalar(&[0.25, 0.75], &[4.0, 8.0]), Some(7.0));
        let rgba = [[1.0, 0.0, 0.0, 1.0], [0.0, 0.0, 1.0, 1.0]];
        let c = interpolate_attr(&[0.5, 0.5], &rgba).unwrap();
        assert_eq!(c, [0.5, 0.0, 0.5, 1.0]);
    }
}
