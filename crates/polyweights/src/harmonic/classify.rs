//! Region classification: exterior flood fill from the grid border.
//!
//! Any Untyped cell on the grid border is outside the polygon (the grid is
//! the bounding box, and the outline is rasterized). A 4-connected fill from
//! those seeds marks every reachable Untyped cell Exterior; Bresenham lines
//! are 8-connected, so a 4-connected fill cannot slip through a diagonal
//! step. Whatever is still Untyped afterwards is Interior.

use std::collections::VecDeque;

use super::types::{Cell, CellKind};

/// Flood-fill Exterior from every Untyped border cell. Returns the number of
/// cells marked.
pub(crate) fn flood_exterior(cells: &mut [Cell], res: usize) -> usize {
    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut marked = 0usize;

    let mut seed = |cells: &mut [Cell], idx: usize, queue: &mut VecDeque<usize>| {
        if cells[idx].kind == CellKind::Untyped {
            cells[idx].kind = CellKind::Exterior;
            queue.push_back(idx);
            marked += 1;
        }
    };

    for i in 0..res {
        seed(cells, i, &mut queue);
        seed(cells, (res - 1) * res + i, &mut queue);
        seed(cells, i * res, &mut queue);
        seed(cells, i * res + res - 1, &mut queue);
    }

    while let Some(idx) = queue.pop_front() {
        let (i, j) = (idx % res, idx / res);
        let mut push = |n: usize| {
            if cells[n].kind == CellKind::Untyped {
                cells[n].kind = CellKind::Exterior;
                queue.push_back(n);
                marked += 1;
            }
        };
        if i > 0 {
            push(idx - 1);
        }
        if i + 1 < res {
            push(idx + 1);
        }
        if j > 0 {
            push(idx - res);
        }
        if j + 1 < res {
            push(idx + res);
        }
    }
    marked
}

/// Promote the remaining Untyped cells to Interior with all-zero weights.
/// Returns their indices in ascending order.
pub(crate) fn promote_interior(cells: &mut [Cell], vertex_count: usize) -> Vec<usize> {
    let mut interior = Vec::new();
    for (idx, cell) in cells.iter_mut().enumerate() {
        if cell.kind == CellKind::Untyped {
            cell.kind = CellKind::Interior;
            cell.weights = vec![0.0; vertex_count];
            interior.push(idx);
        }
    }
    interior
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_from(rows: &[&str]) -> (Vec<Cell>, usize) {
        let res = rows.len();
        let cells = rows
            .iter()
            .flat_map(|r| r.chars())
            .map(|ch| Cell {
                kind: if ch == '#' {
                    CellKind::Boundary
                } else {
                    CellKind::Untyped
                },
                weights: Vec::new(),
            })
            .collect();
        (cells, res)
    }

    fn kinds(cells: &[Cell], res: usize) -> Vec<String> {
        cells
            .chunks(res)
            .map(|row| {
                row.iter()
                    .map(|c| match c.kind {
                        CellKind::Boundary => '#',
                        CellKind::Exterior => '.',
                        CellKind::Interior => 'o',
                        CellKind::Untyped => '?',
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn concave_outline_separates_notch() {
        // The notch opens to the top border and is exterior.
        let (mut cells, res) = grid_from(&[
            "### ###",
            "# # # #",
            "# # # #",
            "# ### #",
            "#     #",
            "#######",
            "       ",
        ]);
        flood_exterior(&mut cells, res);
        let interior = promote_interior(&mut cells, 3);
        assert_eq!(
            kinds(&cells, res),
            [
                "###.###",
                "#o#.#o#",
                "#o#.#o#",
                "#o###o#",
                "#ooooo#",
                "#######",
                ".......",
            ]
        );
        assert_eq!(interior.len(), 11);
        assert!(interior.iter().all(|&i| cells[i].weights == vec![0.0; 3]));
    }

    #[test]
    fn border_seeds_reach_around_a_blob() {
        let (mut cells, res) = grid_from(&[
            "      ",
            " #### ",
            " #  # ",
            " #### ",
            "      ",
            "      ",
        ]);
        let marked = flood_exterior(&mut cells, res);
        promote_interior(&mut cells, 4);
        assert_eq!(
            kinds(&cells, res),
            ["......", ".####.", ".#oo#.", ".####.", "......", "......"]
        );
        assert_eq!(marked, 36 - 10 - 2);
    }

    #[test]
    fn diagonal_wall_is_not_leaked() {
        // An 8-connected diamond still encloses its center.
        let (mut cells, res) = grid_from(&["     ", "  #  ", " # # ", "  #  ", "     "]);
        flood_exterior(&mut cells, res);
        let interior = promote_interior(&mut cells, 3);
        assert_eq!(
            kinds(&cells, res),
            [".....", "..#..", ".#o#.", "..#..", "....."]
        );
        assert_eq!(interior, vec![12]);
    }

    #[test]
    fn fully_boundary_grid_has_no_seeds() {
        let (mut cells, res) = grid_from(&["##", "##"]);
        assert_eq!(flood_exterior(&mut cells, res), 0);
        assert!(promote_interior(&mut cells, 4).is_empty());
    }
}
