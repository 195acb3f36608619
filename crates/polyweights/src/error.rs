//! Error type shared by the coordinate converters and the harmonic solver.
//!
//! Every error is local to a single solve or query. Callers display it or
//! retry with an adjusted resolution/threshold.

use thiserror::Error;

/// Result alias using [`CoordError`].
pub type Result<T> = std::result::Result<T, CoordError>;

/// Errors reported by coordinate computations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordError {
    /// Input geometry cannot produce meaningful weights.
    #[error("degenerate geometry: {reason}")]
    DegenerateGeometry { reason: String },

    /// Query point lies outside the solved grid.
    #[error("point ({x}, {y}) lies outside the solved field")]
    OutOfDomain { x: f64, y: f64 },

    /// Relaxation hit the sweep cap before meeting the threshold.
    #[error("relaxation did not converge after {sweeps} sweeps (residual {residual:e})")]
    NonConvergence { sweeps: usize, residual: f64 },

    /// A configuration value is out of range.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: &'static str,
    },

    /// The solve was superseded by a newer request.
    #[error("solve cancelled by a newer request")]
    Cancelled,
}

impl CoordError {
    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}
