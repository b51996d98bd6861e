/*
memory_match.rs

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

//! Memory level: sixteen face-down cards, eight pairs.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use super::symbols::{ANIMALS, Symbol};

/// Memory instance.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MemoryMatch {
    /// Cards in display order. Every symbol appears exactly twice.
    pub deck: Vec<Symbol>,
}

impl MemoryMatch {
    /// Duplicate every animal and shuffle the deck.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck: Vec<Symbol> = ANIMALS.iter().chain(ANIMALS.iter()).copied().collect();
        deck.shuffle(rng);
        Self { deck }
    }

    /// Number of pairs to find.
    pub fn pair_count(&self) -> usize {
        self.deck.len() / 2
    }

    /// Position of the other card with the same symbol.
    pub fn partner(&self, card: usize) -> Option<usize> {
        let symbol: &Symbol = self.deck.get(card)?;
        self.deck
            .iter()
            .enumerate()
            .position(|(i, s)| i != card && s == symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn every_card_has_one_partner() {
        let m: MemoryMatch = MemoryMatch::generate(&mut StdRng::seed_from_u64(2));
        assert_eq!(m.deck.len(), 16);
        assert_eq!(m.pair_count(), 8);
        for card in 0..m.deck.len() {
            let partner: usize = m.partner(card).unwrap();
            assert_ne!(partner, card);
            assert_eq!(m.deck[partner], m.deck[card]);
            assert_eq!(m.partner(partner), Some(card));
        }
        assert_eq!(m.partner(16), None);
    }
}
