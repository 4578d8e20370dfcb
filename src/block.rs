//! Block-wise occupancy grid derived from a thin-wall cell grid.

use serde::{Deserialize, Serialize};

use crate::grid::{CellGrid, Direction};

/// A binary occupancy grid at doubled resolution, indexed `[row][col]`.
///
/// An `N` x `N` [`CellGrid`] converts to a `(2N+1)` x `(2N+1)` block grid:
/// each cell owns a 2x2 block whose top-left sub-cell `[2y+1][2x+1]` is the
/// cell's interior and always open, while walls and the structural post at
/// every intersection occupy the rest. Row 0 and column 0 form the maze's
/// outer boundary and are always occupied.
///
/// # Examples
///
/// ```
/// use mazecast::block::BlockGrid;
/// use mazecast::grid::CellGrid;
///
/// let cells = CellGrid::new(6).unwrap();
/// let blocks = BlockGrid::from(&cells);
/// assert_eq!(blocks.size(), 13);
/// assert_eq!(blocks.at(0, 5), Some(true));
/// assert_eq!(blocks.at(1, 1), Some(false));
/// assert_eq!(blocks.at(13, 0), None);
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BlockGrid {
    size: usize,
    cells: Vec<bool>,
}

impl From<&CellGrid> for BlockGrid {
    fn from(grid: &CellGrid) -> Self {
        let n = grid.size();
        let size = 2 * n + 1;
        let mut cells = vec![false; size * size];

        // outer boundary: top row and left column
        for i in 0..size {
            cells[i] = true;
            cells[size * i] = true;
        }

        for y in 0..n {
            for x in 0..n {
                let Some(cell) = grid.at(x as i64, y as i64) else {
                    continue;
                };
                if cell.has_wall(Direction::Right) {
                    cells[size * (2 * y + 1) + 2 * x + 2] = true;
                }
                if cell.has_wall(Direction::Down) {
                    cells[size * (2 * y + 2) + 2 * x + 1] = true;
                }
                // the lower-right post of every block is structural
                cells[size * (2 * y + 2) + 2 * x + 2] = true;
            }
        }

        Self { size, cells }
    }
}

impl BlockGrid {
    /// Returns the grid dimension (`2N + 1` for an `N` x `N` cell grid).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the occupancy at `[row][col]`, or `None` if the position is
    /// out of bounds.
    pub fn at(&self, row: i64, col: i64) -> Option<bool> {
        if row < 0 || col < 0 || row >= self.size as i64 || col >= self.size as i64 {
            return None;
        }
        Some(self.cells[self.size * row as usize + col as usize])
    }

    /// Returns whether `[row][col]` is occupied; out of bounds counts as
    /// open, so a ray that leaves the grid registers a miss rather than a
    /// phantom hit.
    pub fn is_wall(&self, row: i64, col: i64) -> bool {
        self.at(row, col).unwrap_or(false)
    }
}
