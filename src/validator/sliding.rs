/*
sliding.rs

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

//! Sliding puzzle progress.
//!
//! Any two pieces can be swapped, so every arrangement is reachable. A swap that places
//! neither piece still happens, and is reported as Incorrect.

use super::{ActionError, Outcome};
use crate::generator::sliding_puzzle::{SlidingPuzzle, Tile};

/// Current arrangement of the pieces.
#[derive(Debug, Clone, PartialEq)]
pub struct SlidingProgress {
    tiles: Vec<Tile>,
}

impl SlidingProgress {
    pub fn new(puzzle: &SlidingPuzzle) -> Self {
        Self {
            tiles: puzzle.tiles.clone(),
        }
    }

    /// Pieces indexed by their current position.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Number of pieces at their correct position.
    pub fn placed(&self) -> usize {
        SlidingPuzzle::placed_count(&self.tiles)
    }

    /// Drag the piece at `from` onto the piece at `to`.
    pub fn swap(&mut self, from: usize, to: usize) -> Result<Outcome, ActionError> {
        if from >= self.tiles.len() {
            return Err(ActionError::OutOfRange(from));
        }
        if to >= self.tiles.len() {
            return Err(ActionError::OutOfRange(to));
        }
        if from == to {
            return Err(ActionError::AlreadyResolved(from));
        }
        self.tiles.swap(from, to);
        if SlidingPuzzle::arrangement_solved(&self.tiles) {
            Ok(Outcome::Complete)
        } else if self.tiles[from].correct_position == from
            || self.tiles[to].correct_position == to
        {
            Ok(Outcome::Correct)
        } else {
            Ok(Outcome::Incorrect)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn puzzle(order: &[usize]) -> SlidingPuzzle {
        SlidingPuzzle {
            grid_size: 2,
            tiles: order
                .iter()
                .map(|p| Tile {
                    symbol: "🐶",
                    correct_position: *p,
                })
                .collect(),
        }
    }

    #[test]
    fn invalid_swaps_leave_the_arrangement_unchanged() {
        let mut p: SlidingProgress = SlidingProgress::new(&puzzle(&[1, 0, 3, 2]));
        let before: SlidingProgress = p.clone();
        assert_eq!(p.swap(0, 0), Err(ActionError::AlreadyResolved(0)));
        assert_eq!(p.swap(0, 4), Err(ActionError::OutOfRange(4)));
        assert_eq!(p, before);
    }

    #[test]
    fn swap_that_places_nothing_still_moves_the_pieces() {
        let mut p: SlidingProgress = SlidingProgress::new(&puzzle(&[1, 0, 3, 2]));
        assert_eq!(p.swap(0, 2), Ok(Outcome::Incorrect));
        let order: Vec<usize> = p.tiles().iter().map(|t| t.correct_position).collect();
        assert_eq!(order, vec![3, 0, 1, 2]);
        assert_eq!(p.placed(), 0);
    }

    #[test]
    fn any_arrangement_can_be_solved_by_swaps() {
        let mut p: SlidingProgress = SlidingProgress::new(&puzzle(&[2, 3, 1, 0]));
        assert_eq!(p.swap(0, 1), Ok(Outcome::Incorrect));
        assert_eq!(p.swap(1, 2), Ok(Outcome::Correct));
        assert_eq!(p.placed(), 2);
        assert_eq!(p.swap(0, 3), Ok(Outcome::Complete));
    }

    #[test]
    fn placing_every_piece_completes() {
        let mut p: SlidingProgress = SlidingProgress::new(&puzzle(&[1, 0, 3, 2]));
        assert_eq!(p.placed(), 0);
        assert_eq!(p.swap(0, 1), Ok(Outcome::Correct));
        assert_eq!(p.placed(), 2);
        assert_eq!(p.swap(3, 2), Ok(Outcome::Complete));
    }
}
