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

//! Player movement in the maze.

use serde::Serialize;

use super::Outcome;
use crate::generator::maze::{Maze, Position};

/// Move direction.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Column and row offsets.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Direction of a one-cell step, or None if the cells are not adjacent.
    pub fn between(from: Position, to: Position) -> Option<Self> {
        Self::ALL.into_iter().find(|d| {
            let (dx, dy) = d.delta();
            from.x.checked_add_signed(dx) == Some(to.x) && from.y.checked_add_signed(dy) == Some(to.y)
        })
    }
}

/// Position of the player.
#[derive(Debug, Clone, PartialEq)]
pub struct MazeProgress {
    position: Position,
}

impl MazeProgress {
    /// The player starts at the maze start.
    pub fn new(maze: &Maze) -> Self {
        Self {
            position: maze.start,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Move the player by one cell.
    ///
    /// The move is done only if the target cell is in the grid and is not a wall. Reaching
    /// the end completes the level.
    pub fn move_player(&mut self, maze: &Maze, direction: Direction) -> Outcome {
        let (dx, dy) = direction.delta();
        match maze.offset(self.position, dx, dy) {
            Some(target) if maze.is_open(target) => {
                self.position = target;
                if target == maze.end {
                    Outcome::Complete
                } else {
                    Outcome::Correct
                }
            }
            _ => Outcome::Incorrect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn corridor() -> Maze {
        Maze::from_rows(
            &["#####", "#...#", "###.#", "#...#", "#####"],
            Position::new(1, 1),
            Position::new(1, 3),
        )
    }

    #[test]
    fn walls_block_the_player() {
        let m: Maze = corridor();
        let mut p: MazeProgress = MazeProgress::new(&m);
        assert_eq!(p.move_player(&m, Direction::Up), Outcome::Incorrect);
        assert_eq!(p.move_player(&m, Direction::Down), Outcome::Incorrect);
        assert_eq!(p.position(), Position::new(1, 1));
        assert_eq!(p.move_player(&m, Direction::Right), Outcome::Correct);
        assert_eq!(p.position(), Position::new(2, 1));
    }

    #[test]
    fn reaching_the_end_completes() {
        let m: Maze = corridor();
        let mut p: MazeProgress = MazeProgress::new(&m);
        let moves = [
            Direction::Right,
            Direction::Right,
            Direction::Down,
            Direction::Down,
            Direction::Left,
        ];
        for d in moves {
            assert_eq!(p.move_player(&m, d), Outcome::Correct);
        }
        assert_eq!(p.move_player(&m, Direction::Left), Outcome::Complete);
    }

    #[test]
    fn random_walks_never_enter_walls() {
        let mut rng = StdRng::seed_from_u64(77);
        for _ in 0..10 {
            let m: Maze = Maze::generate(13, 13, &mut rng).unwrap();
            let mut p: MazeProgress = MazeProgress::new(&m);
            for _ in 0..500 {
                let d: Direction = Direction::ALL[rng.random_range(0..4)];
                p.move_player(&m, d);
                assert!(m.contains(p.position()));
                assert!(m.is_open(p.position()));
            }
        }
    }

    #[test]
    fn moves_at_the_grid_edge_stay_in_bounds() {
        let m: Maze = Maze::from_rows(&["...", "...", "..."], Position::new(0, 0), Position::new(2, 2));
        let mut p: MazeProgress = MazeProgress::new(&m);
        assert_eq!(p.move_player(&m, Direction::Left), Outcome::Incorrect);
        assert_eq!(p.move_player(&m, Direction::Up), Outcome::Incorrect);
        assert_eq!(p.position(), Position::new(0, 0));
    }

    #[test]
    fn direction_between_adjacent_cells() {
        let a: Position = Position::new(2, 2);
        assert_eq!(Direction::between(a, Position::new(2, 1)), Some(Direction::Up));
        assert_eq!(Direction::between(a, Position::new(3, 2)), Some(Direction::Right));
        assert_eq!(Direction::between(a, Position::new(3, 3)), None);
    }
}
