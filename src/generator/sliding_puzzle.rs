/*
sliding_puzzle.rs

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

//! Sliding puzzle level: the nine pieces of a 3x3 picture in a random order.
//!
//! Pieces are moved by dragging one piece onto another, which swaps them. Any arrangement can
//! therefore be solved, unlike the classic fifteen puzzle.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use super::symbols::{PUZZLE_PIECES, Symbol};

/// Number of rows and columns.
pub const GRID_SIZE: usize = 3;

/// A puzzle piece.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Tile {
    pub symbol: Symbol,

    /// Position of the piece in the solved picture.
    pub correct_position: usize,
}

/// Sliding puzzle instance.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SlidingPuzzle {
    pub grid_size: usize,

    /// Pieces indexed by their current position.
    pub tiles: Vec<Tile>,
}

impl SlidingPuzzle {
    /// Shuffle the pieces. An already solved arrangement is shuffled again.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut tiles: Vec<Tile> = PUZZLE_PIECES
            .iter()
            .enumerate()
            .map(|(i, s)| Tile {
                symbol: *s,
                correct_position: i,
            })
            .collect();

        loop {
            tiles.shuffle(rng);
            if !Self::arrangement_solved(&tiles) {
                break;
            }
        }
        Self {
            grid_size: GRID_SIZE,
            tiles,
        }
    }

    /// Whether every piece is at its correct position.
    pub fn is_solved(&self) -> bool {
        Self::arrangement_solved(&self.tiles)
    }

    /// Whether every piece of the given arrangement is at its correct position.
    pub fn arrangement_solved(tiles: &[Tile]) -> bool {
        tiles
            .iter()
            .enumerate()
            .all(|(position, tile)| tile.correct_position == position)
    }

    /// Number of pieces at their correct position.
    pub fn placed_count(tiles: &[Tile]) -> usize {
        tiles
            .iter()
            .enumerate()
            .filter(|(position, tile)| tile.correct_position == *position)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn generated_puzzle_is_a_scrambled_permutation() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..50 {
            let p: SlidingPuzzle = SlidingPuzzle::generate(&mut rng);
            assert_eq!(p.tiles.len(), GRID_SIZE * GRID_SIZE);
            let mut positions: Vec<usize> = p.tiles.iter().map(|t| t.correct_position).collect();
            positions.sort_unstable();
            assert_eq!(positions, (0..9).collect::<Vec<usize>>());
            assert!(!p.is_solved());
            assert!(SlidingPuzzle::placed_count(&p.tiles) < 9);
        }
    }
}
