//! Randomized depth-first maze carving.

use anyhow::{anyhow, Error};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::grid::{CellGrid, Direction};

/// Picks an unvisited orthogonal neighbour of `(x, y)` uniformly at random.
///
/// Candidates are gathered in up, right, down, left order; out-of-bounds and
/// already-visited cells are skipped. Returns `None` when no candidate
/// remains, which drives backtracking.
fn unvisited_neighbour<R: Rng + ?Sized>(
    grid: &CellGrid,
    x: usize,
    y: usize,
    rng: &mut R,
) -> Option<(usize, usize, Direction)> {
    let candidates: Vec<(usize, usize, Direction)> = Direction::ALL
        .iter()
        .filter_map(|&direction| {
            let (nx, ny) = grid.neighbour(x as i64, y as i64, direction)?;
            let cell = grid.at(nx as i64, ny as i64)?;
            if cell.visited {
                None
            } else {
                Some((nx, ny, direction))
            }
        })
        .collect();
    candidates.choose(rng).copied()
}

/// Carves a spanning tree into `grid`, starting from `origin`.
///
/// Iterative randomized depth-first backtracking: walk to a random unvisited
/// neighbour while one exists, clearing the shared wall on the way;
/// otherwise pop the backtracking stack. When the stack empties every cell
/// has been visited and every pair of cells is connected by exactly one path
/// of cleared walls.
///
/// The uniform random neighbour choice is the sole source of variability, so
/// a seeded `rng` pins the exact layout.
///
/// Returns an error if `origin` lies outside the grid.
pub fn carve<R: Rng + ?Sized>(
    grid: &mut CellGrid,
    origin: (usize, usize),
    rng: &mut R,
) -> Result<(), Error> {
    let (ox, oy) = origin;
    if grid.at(ox as i64, oy as i64).is_none() {
        return Err(anyhow!(
            "origin ({}, {}) is outside the {size}x{size} grid",
            ox,
            oy,
            size = grid.size()
        ));
    }

    if let Some(cell) = grid.cell_mut(ox as i64, oy as i64) {
        cell.visited = true;
    }

    let mut current = origin;
    let mut stack: Vec<(usize, usize)> = Vec::new();
    let mut next = unvisited_neighbour(grid, current.0, current.1, rng);

    while next.is_some() || !stack.is_empty() {
        match next {
            Some((nx, ny, direction)) => {
                stack.push(current);
                grid.clear_wall(current.0, current.1, direction);
                current = (nx, ny);
                if let Some(cell) = grid.cell_mut(nx as i64, ny as i64) {
                    cell.visited = true;
                }
                next = unvisited_neighbour(grid, nx, ny, rng);
            }
            None => match stack.pop() {
                Some(previous) => {
                    current = previous;
                    next = unvisited_neighbour(grid, current.0, current.1, rng);
                }
                None => break,
            },
        }
    }

    log::debug!(
        "carved {size}x{size} maze from origin ({ox}, {oy})",
        size = grid.size()
    );
    Ok(())
}

/// Creates a `size` x `size` grid and carves it from the top-left cell.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let maze = mazecast::maze::generate(6, &mut StdRng::seed_from_u64(7)).unwrap();
/// assert!(maze.at(5, 5).unwrap().visited);
/// ```
pub fn generate<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<CellGrid, Error> {
    let mut grid = CellGrid::new(size)?;
    carve(&mut grid, (0, 0), rng)?;
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::VecDeque;

    fn cleared_wall_pairs(grid: &CellGrid) -> usize {
        // count each shared wall once, via right/down only
        let mut cleared = 0;
        for y in 0..grid.size() as i64 {
            for x in 0..grid.size() as i64 {
                let cell = grid.at(x, y).unwrap();
                if !cell.has_wall(Direction::Right) && grid.at(x + 1, y).is_some() {
                    cleared += 1;
                }
                if !cell.has_wall(Direction::Down) && grid.at(x, y + 1).is_some() {
                    cleared += 1;
                }
            }
        }
        cleared
    }

    fn reachable_from_origin(grid: &CellGrid) -> usize {
        let n = grid.size();
        let mut seen = vec![false; n * n];
        let mut queue = VecDeque::new();
        seen[0] = true;
        queue.push_back((0i64, 0i64));
        while let Some((x, y)) = queue.pop_front() {
            let cell = grid.at(x, y).unwrap();
            for direction in Direction::ALL {
                if cell.has_wall(direction) {
                    continue;
                }
                if let Some((nx, ny)) = grid.neighbour(x, y, direction) {
                    if !seen[n * ny + nx] {
                        seen[n * ny + nx] = true;
                        queue.push_back((nx as i64, ny as i64));
                    }
                }
            }
        }
        seen.iter().filter(|&&s| s).count()
    }

    #[test]
    fn spanning_tree_properties() {
        for size in 1..=8 {
            let mut rng = StdRng::seed_from_u64(size as u64);
            let grid = generate(size, &mut rng).unwrap();
            for y in 0..size as i64 {
                for x in 0..size as i64 {
                    assert!(grid.at(x, y).unwrap().visited, "({x}, {y}) not visited");
                }
            }
            assert_eq!(cleared_wall_pairs(&grid), size * size - 1);
            assert_eq!(reachable_from_origin(&grid), size * size);
        }
    }

    #[test]
    fn walls_stay_symmetric() {
        let mut rng = StdRng::seed_from_u64(42);
        let grid = generate(8, &mut rng).unwrap();
        for y in 0..8i64 {
            for x in 0..8i64 {
                let cell = grid.at(x, y).unwrap();
                for direction in Direction::ALL {
                    if let Some((nx, ny)) = grid.neighbour(x, y, direction) {
                        let other = grid.at(nx as i64, ny as i64).unwrap();
                        assert_eq!(
                            cell.has_wall(direction),
                            other.has_wall(direction.opposite()),
                            "asymmetric wall between ({x}, {y}) and ({nx}, {ny})"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn single_cell_maze_keeps_outer_walls() {
        let mut rng = StdRng::seed_from_u64(0);
        let grid = generate(1, &mut rng).unwrap();
        let cell = grid.at(0, 0).unwrap();
        assert!(cell.visited);
        assert_eq!(cell.walls, [true; 4]);
    }

    #[test]
    fn two_by_two_clears_exactly_three_walls() {
        let mut rng = StdRng::seed_from_u64(123);
        let grid = generate(2, &mut rng).unwrap();
        assert_eq!(cleared_wall_pairs(&grid), 3);
        assert_eq!(reachable_from_origin(&grid), 4);
    }

    #[test]
    fn seeded_rng_pins_layout() {
        let a = generate(6, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = generate(6, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn out_of_bounds_origin_rejected() {
        let mut grid = CellGrid::new(3).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(carve(&mut grid, (3, 0), &mut rng).is_err());
    }
}
