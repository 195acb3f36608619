//! Regular `cols × rows` point grid with a world-space offset.
//!
//! A pure data generator: `points()` yields the top-left corner of every
//! cell in row-major order, `index(i, j) = j * cols + i`. The harmonic solver
//! uses the same linear indexing for its cells; callers use `Grid` to draw an
//! overlay aligned with a solved field.

use nalgebra::Vector2;

/// Grid layout in local space plus a placement offset `(x, y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
    pub width: f64,
    pub height: f64,
    pub cols: usize,
    pub rows: usize,
    pub x: f64,
    pub y: f64,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            cols: 1,
            rows: 1,
            x: 0.0,
            y: 0.0,
        }
    }
}

impl Grid {
    /// Zero `cols`/`rows` are promoted to 1.
    pub fn new(width: f64, height: f64, cols: usize, rows: usize) -> Self {
        Self {
            width,
            height,
            cols: cols.max(1),
            rows: rows.max(1),
            ..Self::default()
        }
    }

    /// Same grid placed at `(x, y)`.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// `(cols, rows)` with zero read as 1, for grids built by struct literal.
    #[inline]
    fn dims(&self) -> (usize, usize) {
        (self.cols.max(1), self.rows.max(1))
    }

    #[inline]
    pub fn col_width(&self) -> f64 {
        self.width / self.dims().0 as f64
    }

    #[inline]
    pub fn row_height(&self) -> f64 {
        self.height / self.dims().1 as f64
    }

    #[inline]
    pub fn len(&self) -> usize {
        let (cols, rows) = self.dims();
        cols * rows
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Linear index of cell `(i, j)`; `None` outside the grid.
    #[inline]
    pub fn index(&self, i: usize, j: usize) -> Option<usize> {
        let (cols, rows) = self.dims();
        (i < cols && j < rows).then(|| j * cols + i)
    }

    /// Inverse of [`Grid::index`].
    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize) {
        let cols = self.dims().0;
        (index % cols, index / cols)
    }

    /// Local-space points, row-major.
    pub fn points(&self) -> Vec<Vector2<f64>> {
        let (cw, rh) = (self.col_width(), self.row_height());
        let (cols, rows) = self.dims();
        (0..rows)
            .flat_map(move |j| (0..cols).map(move |i| Vector2::new(cw * i as f64, rh * j as f64)))
            .collect()
    }

    /// Points shifted by the `(x, y)` offset.
    pub fn world_points(&self) -> Vec<Vector2<f64>> {
        let offset = Vector2::new(self.x, self.y);
        self.points().into_iter().map(|p| p + offset).collect()
    }

    /// Cell `(i, j)` containing world point `p`, or `None` outside.
    ///
    /// The far edges are inclusive so a point exactly on the right/bottom
    /// border maps to the last column/row.
    pub fn cell_of(&self, p: Vector2<f64>) -> Option<(usize, usize)> {
        let u = (p.x - self.x) / self.col_width();
        let v = (p.y - self.y) / self.row_height();
        let (cols, rows) = self.dims();
        if !(u >= 0.0 && v >= 0.0 && u <= cols as f64 && v <= rows as f64) {
            return None;
        }
        let i = (u.floor() as usize).min(cols - 1);
        let j = (v.floor() as usize).min(rows - 1);
        Some((i, j))
    }
}
