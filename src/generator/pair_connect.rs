/*
pair_connect.rs

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

//! Pair connection level: connect every animal to its food.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use super::symbols::Symbol;

/// A canonical pair.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Pair {
    pub left: Symbol,
    pub right: Symbol,
    pub label: &'static str,
}

const PAIRS: [Pair; 4] = [
    Pair {
        left: "🐶",
        right: "🦴",
        label: "bone",
    },
    Pair {
        left: "🐱",
        right: "🐟",
        label: "fish",
    },
    Pair {
        left: "🐰",
        right: "🥕",
        label: "carrot",
    },
    Pair {
        left: "🐻",
        right: "🍯",
        label: "honey",
    },
];

/// Pair connection instance.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PairConnect {
    pub pairs: Vec<Pair>,

    /// Display order of the left items: `left_order[i]` is the index in `pairs` of the item
    /// shown at position `i`.
    pub left_order: Vec<usize>,

    /// Display order of the right items, shuffled independently from the left ones.
    pub right_order: Vec<usize>,
}

impl PairConnect {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut pairs: Vec<Pair> = PAIRS.to_vec();
        pairs.shuffle(rng);
        let mut left_order: Vec<usize> = (0..pairs.len()).collect();
        left_order.shuffle(rng);
        let mut right_order: Vec<usize> = (0..pairs.len()).collect();
        right_order.shuffle(rng);
        Self {
            pairs,
            left_order,
            right_order,
        }
    }

    /// Symbol shown at the given left position.
    pub fn left_symbol(&self, position: usize) -> Option<Symbol> {
        self.left_order.get(position).map(|p| self.pairs[*p].left)
    }

    /// Symbol shown at the given right position.
    pub fn right_symbol(&self, position: usize) -> Option<Symbol> {
        self.right_order.get(position).map(|p| self.pairs[*p].right)
    }

    /// Index of the canonical pair linking the items at the given positions, if any.
    pub fn pair_between(&self, left_position: usize, right_position: usize) -> Option<usize> {
        let left: Symbol = self.left_symbol(left_position)?;
        let right: Symbol = self.right_symbol(right_position)?;
        self.pairs
            .iter()
            .position(|p| p.left == left && p.right == right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn every_left_item_has_exactly_one_partner() {
        let p: PairConnect = PairConnect::generate(&mut StdRng::seed_from_u64(8));
        for left in 0..p.pairs.len() {
            let partners: usize = (0..p.pairs.len())
                .filter(|right| p.pair_between(left, *right).is_some())
                .count();
            assert_eq!(partners, 1);
        }
        assert_eq!(p.pair_between(0, 4), None);
    }
}
