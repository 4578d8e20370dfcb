//! Thin-wall cell grid structs and utilities.

use anyhow::{anyhow, Error};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

/// Enum for direction values.
///
/// The discriminant doubles as the index into a cell's wall array.
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, IntoPrimitive, TryFromPrimitive, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum Direction {
    /// Towards the top of the grid (decreasing y)
    Up = 0,
    /// Towards increasing x
    Right = 1,
    /// Towards the bottom of the grid (increasing y)
    Down = 2,
    /// Towards decreasing x
    Left = 3,
}

impl Direction {
    /// All directions, in neighbour lookup order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Returns the opposite [`Direction`].
    ///
    /// # Examples
    ///
    /// ```
    /// use mazecast::grid::Direction;
    ///
    /// assert_eq!(Direction::Up.opposite(), Direction::Down);
    /// assert_eq!(Direction::Left.opposite(), Direction::Right);
    /// ```
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    /// Returns the `(dx, dy)` offset of the adjacent cell in this direction.
    ///
    /// `y` grows downward, so [`Direction::Up`] is `(0, -1)`.
    pub fn offset(self) -> (i64, i64) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }
}

/// One unit square of the logical maze grid.
///
/// A fresh cell has all four walls present and is unvisited; the maze
/// generator is the only code that mutates it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Wall flags indexed by [`Direction`]
    pub walls: [bool; 4],
    /// Whether the maze generator has reached this cell
    pub visited: bool,
}

impl Cell {
    fn new() -> Self {
        Self {
            walls: [true; 4],
            visited: false,
        }
    }

    /// Returns whether the wall facing `direction` is present.
    pub fn has_wall(&self, direction: Direction) -> bool {
        self.walls[u8::from(direction) as usize]
    }
}

/// A square grid of [`Cell`]s addressed by `(x, y)` with `y` growing
/// downward.
///
/// Cells are stored in a flat row-major `Vec`; all accessors are
/// bounds-checked and return `None` for coordinates outside the grid.
///
/// # Examples
///
/// ```
/// use mazecast::grid::CellGrid;
///
/// let grid = CellGrid::new(4).unwrap();
/// assert_eq!(grid.size(), 4);
/// assert!(grid.at(3, 3).is_some());
/// assert!(grid.at(4, 0).is_none());
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CellGrid {
    size: usize,
    cells: Vec<Cell>,
}

impl CellGrid {
    /// Creates a `size` x `size` grid with every wall present and every cell
    /// unvisited.
    ///
    /// Returns an error if `size` is zero.
    pub fn new(size: usize) -> Result<Self, Error> {
        if size == 0 {
            return Err(anyhow!("grid size must be at least 1"));
        }
        Ok(Self {
            size,
            cells: vec![Cell::new(); size * size],
        })
    }

    /// Returns the grid dimension (cells per side).
    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.size as i64 || y >= self.size as i64 {
            return None;
        }
        Some(self.size * y as usize + x as usize)
    }

    /// Returns the [`Cell`] at the given position, or `None` if the position
    /// is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use mazecast::grid::{CellGrid, Direction};
    ///
    /// let grid = CellGrid::new(2).unwrap();
    /// assert!(grid.at(1, 1).unwrap().has_wall(Direction::Up));
    /// assert!(grid.at(-1, 0).is_none());
    /// assert!(grid.at(0, 2).is_none());
    /// ```
    pub fn at(&self, x: i64, y: i64) -> Option<&Cell> {
        let index = self.index(x, y)?;
        self.cells.get(index)
    }

    /// Mutable counterpart of [`CellGrid::at`].
    pub fn cell_mut(&mut self, x: i64, y: i64) -> Option<&mut Cell> {
        let index = self.index(x, y)?;
        self.cells.get_mut(index)
    }

    /// Returns the coordinates of the cell adjacent to `(x, y)` in the given
    /// direction, or `None` if that cell is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use mazecast::grid::{CellGrid, Direction};
    ///
    /// let grid = CellGrid::new(2).unwrap();
    /// assert_eq!(grid.neighbour(0, 0, Direction::Right), Some((1, 0)));
    /// assert_eq!(grid.neighbour(0, 0, Direction::Up), None);
    /// ```
    pub fn neighbour(&self, x: i64, y: i64, direction: Direction) -> Option<(usize, usize)> {
        let (dx, dy) = direction.offset();
        self.index(x + dx, y + dy)
            .map(|_| ((x + dx) as usize, (y + dy) as usize))
    }

    /// Clears the wall of the cell at `(x, y)` facing `direction`, and the
    /// matching wall of the adjacent cell if one exists.
    ///
    /// Carving is always symmetric: the two flags describing a shared wall
    /// never disagree. Out-of-bounds coordinates are a no-op.
    pub fn clear_wall(&mut self, x: usize, y: usize, direction: Direction) {
        if let Some(cell) = self.cell_mut(x as i64, y as i64) {
            cell.walls[u8::from(direction) as usize] = false;
        } else {
            return;
        }
        if let Some((nx, ny)) = self.neighbour(x as i64, y as i64, direction) {
            if let Some(neighbour) = self.cell_mut(nx as i64, ny as i64) {
                neighbour.walls[u8::from(direction.opposite()) as usize] = false;
            }
        }
    }
}
