/*
maze.rs

Copyright 2025 Hervé Quatremain

This file is part of Little Hero.

Little Hero is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Little Hero is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Little Hero. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Generate a random maze.
//!
//! The grid has odd dimensions and an outer wall. Passages are carved with a randomized
//! depth-first walk that jumps two cells at a time and opens the wall cell in between, which
//! produces a perfect maze on the odd coordinates. Two extra steps follow:
//!
//! * The cells around the end are opened at random so that the end is not a dead end.
//! * Some interior walls next to a passage are opened to add loops (braids), which gives
//!   the player more than one route.
//!
//! The start-to-end path is verified with a breadth-first search after carving, and the
//! maze is carved again if the end cannot be reached.

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::collections::VecDeque;

use super::GeneratorError;

/// Probability to open each neighbour of the end cell.
const END_NEIGHBOUR_OPEN_PROBABILITY: f64 = 0.7;

/// Probability to open an interior wall that touches a passage.
const BRAID_PROBABILITY: f64 = 0.25;

/// Number of attempts before giving up on a maze whose end is not reachable.
const MAX_ATTEMPTS: usize = 10;

/// Smallest accepted dimension.
const MIN_SIZE: usize = 5;

/// Cell coordinates. `x` is the column and `y` the row.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Maze instance.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Maze {
    /// Rows of cells. `true` is a wall.
    pub grid: Vec<Vec<bool>>,
    pub width: usize,
    pub height: usize,
    pub start: Position,
    pub end: Position,
}

/// Unit steps: up, down, left, right.
const STEPS: [(isize, isize); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

impl Maze {
    /// Generate a maze of the given dimensions.
    ///
    /// # Errors
    ///
    /// The dimensions must be odd and at least 5.
    /// The method also returns an error if no attempt produced a maze with a reachable end,
    /// which carving alone should never cause.
    pub fn generate<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        rng: &mut R,
    ) -> Result<Self, GeneratorError> {
        if width < MIN_SIZE || height < MIN_SIZE || width % 2 == 0 || height % 2 == 0 {
            return Err(GeneratorError::InvalidMazeSize(width, height));
        }
        for attempt in 1..=MAX_ATTEMPTS {
            let maze: Maze = Self::carve(width, height, rng);
            if maze.solution().is_some() {
                debug!("Maze {width}x{height} generated at attempt {attempt}");
                return Ok(maze);
            }
            debug!("Maze attempt {attempt}: the end is not reachable, carving again");
        }
        Err(GeneratorError::MazeUnreachable)
    }

    /// Carve one maze, without verifying it.
    fn carve<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Self {
        let start: Position = Position::new(1, 1);
        let end: Position = Position::new(width - 2, height - 2);
        let mut maze: Maze = Maze {
            grid: vec![vec![true; width]; height],
            width,
            height,
            start,
            end,
        };

        let mut visited: Vec<Vec<bool>> = vec![vec![false; width]; height];
        maze.carve_from(start, &mut visited, rng);

        // Do not let the end be isolated
        maze.open(end);
        for (dx, dy) in STEPS {
            if let Some(p) = maze.interior_offset(end, dx, dy)
                && rng.random_bool(END_NEIGHBOUR_OPEN_PROBABILITY)
            {
                maze.open(p);
            }
        }

        // Braid loops. Cells opened in this pass count as passages for the next cells.
        for y in 2..height - 2 {
            for x in 2..width - 2 {
                let p: Position = Position::new(x, y);
                if maze.is_wall(p)
                    && rng.random_bool(BRAID_PROBABILITY)
                    && STEPS.iter().any(|(dx, dy)| {
                        maze.offset(p, *dx, *dy)
                            .is_some_and(|n| maze.is_open(n))
                    })
                {
                    maze.open(p);
                }
            }
        }
        maze
    }

    /// Recursively carve passages from the given cell.
    fn carve_from<R: Rng + ?Sized>(
        &mut self,
        cell: Position,
        visited: &mut Vec<Vec<bool>>,
        rng: &mut R,
    ) {
        visited[cell.y][cell.x] = true;
        self.open(cell);

        let mut steps: [(isize, isize); 4] = STEPS;
        steps.shuffle(rng);
        for (dx, dy) in steps {
            let Some(next) = self.interior_offset(cell, dx * 2, dy * 2) else {
                continue;
            };
            if visited[next.y][next.x] {
                continue;
            }
            if let Some(between) = self.offset(cell, dx, dy) {
                self.open(between);
            }
            self.carve_from(next, visited, rng);
        }
    }

    /// Whether the position is inside the grid.
    pub fn contains(&self, p: Position) -> bool {
        p.x < self.width && p.y < self.height
    }

    /// Whether the cell is a wall. Positions outside the grid are walls.
    pub fn is_wall(&self, p: Position) -> bool {
        !self.is_open(p)
    }

    /// Whether the cell is a passage.
    pub fn is_open(&self, p: Position) -> bool {
        self.contains(p) && !self.grid[p.y][p.x]
    }

    fn open(&mut self, p: Position) {
        self.grid[p.y][p.x] = false;
    }

    /// Position at the given offset, or None if it falls outside the grid.
    pub fn offset(&self, p: Position, dx: isize, dy: isize) -> Option<Position> {
        let x: usize = p.x.checked_add_signed(dx)?;
        let y: usize = p.y.checked_add_signed(dy)?;
        let q: Position = Position::new(x, y);
        self.contains(q).then_some(q)
    }

    /// Position at the given offset, or None if it falls on the outer wall or outside.
    fn interior_offset(&self, p: Position, dx: isize, dy: isize) -> Option<Position> {
        self.offset(p, dx, dy)
            .filter(|q| q.x >= 1 && q.x < self.width - 1 && q.y >= 1 && q.y < self.height - 1)
    }

    /// Return the shortest path from the start to the end, both included, or None if the end
    /// cannot be reached.
    pub fn solution(&self) -> Option<Vec<Position>> {
        self.path_between(self.start, self.end)
    }

    /// Return the shortest path between two open cells, both included.
    pub fn path_between(&self, from: Position, to: Position) -> Option<Vec<Position>> {
        if !self.is_open(from) || !self.is_open(to) {
            return None;
        }
        let mut previous: Vec<Vec<Option<Position>>> = vec![vec![None; self.width]; self.height];
        let mut seen: Vec<Vec<bool>> = vec![vec![false; self.width]; self.height];
        let mut queue: VecDeque<Position> = VecDeque::new();
        seen[from.y][from.x] = true;
        queue.push_back(from);

        while let Some(p) = queue.pop_front() {
            if p == to {
                let mut path: Vec<Position> = vec![p];
                let mut current: Position = p;
                while let Some(prev) = previous[current.y][current.x] {
                    path.push(prev);
                    current = prev;
                }
                path.reverse();
                return Some(path);
            }
            for (dx, dy) in STEPS {
                if let Some(n) = self.offset(p, dx, dy)
                    && self.is_open(n)
                    && !seen[n.y][n.x]
                {
                    seen[n.y][n.x] = true;
                    previous[n.y][n.x] = Some(p);
                    queue.push_back(n);
                }
            }
        }
        None
    }

    /// Build a maze from rows of text, `#` for walls. Used by tests.
    #[cfg(test)]
    pub fn from_rows(rows: &[&str], start: Position, end: Position) -> Self {
        let grid: Vec<Vec<bool>> = rows
            .iter()
            .map(|r| r.chars().map(|c| c == '#').collect())
            .collect();
        Self {
            width: grid[0].len(),
            height: grid.len(),
            grid,
            start,
            end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn border_is_walled_and_ends_are_open() {
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..30 {
            let m: Maze = Maze::generate(13, 13, &mut rng).unwrap();
            for i in 0..13 {
                assert!(m.is_wall(Position::new(i, 0)));
                assert!(m.is_wall(Position::new(i, 12)));
                assert!(m.is_wall(Position::new(0, i)));
                assert!(m.is_wall(Position::new(12, i)));
            }
            assert!(m.is_open(m.start));
            assert!(m.is_open(m.end));
            assert_eq!(m.end, Position::new(11, 11));
        }
    }

    #[test]
    fn solution_walks_through_adjacent_open_cells() {
        let m: Maze = Maze::generate(15, 11, &mut StdRng::seed_from_u64(99)).unwrap();
        let path: Vec<Position> = m.solution().unwrap();
        assert_eq!(path.first(), Some(&m.start));
        assert_eq!(path.last(), Some(&m.end));
        for w in path.windows(2) {
            assert!(m.is_open(w[1]));
            assert_eq!(w[0].x.abs_diff(w[1].x) + w[0].y.abs_diff(w[1].y), 1);
        }
    }

    #[test]
    fn rejects_even_and_tiny_sizes() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            Maze::generate(12, 13, &mut rng),
            Err(GeneratorError::InvalidMazeSize(12, 13))
        );
        assert_eq!(
            Maze::generate(3, 3, &mut rng),
            Err(GeneratorError::InvalidMazeSize(3, 3))
        );
    }

    #[test]
    fn unreachable_end_has_no_solution() {
        let m: Maze = Maze::from_rows(
            &["#####", "#..##", "#####", "##..#", "#####"],
            Position::new(1, 1),
            Position::new(3, 3),
        );
        assert_eq!(m.solution(), None);
    }

    #[test]
    fn offsets_stay_in_bounds() {
        let m: Maze = Maze::generate(5, 5, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(m.offset(Position::new(0, 0), -1, 0), None);
        assert_eq!(m.offset(Position::new(4, 4), 1, 0), None);
        assert_eq!(m.offset(Position::new(2, 2), 1, -1), Some(Position::new(3, 1)));
    }
}
