/*
odd_one_out.rs

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

//! Odd-one-out level: five animals, one differs from the others.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;

use super::symbols::{ANIMALS, Symbol};

/// Number of items in a row.
pub const ITEM_COUNT: usize = 5;

/// Odd-one-out instance.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct OddOneOut {
    /// Items in display order.
    pub items: [Symbol; ITEM_COUNT],

    /// Position of the different item.
    pub odd_index: usize,
}

impl OddOneOut {
    /// Pick two different animals and hide the minority one at a random position.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let picked: Vec<&Symbol> = ANIMALS.choose_multiple(rng, 2).collect();
        let (common, odd) = (*picked[0], *picked[1]);
        let odd_index: usize = rng.random_range(0..ITEM_COUNT);

        let mut items: [Symbol; ITEM_COUNT] = [common; ITEM_COUNT];
        items[odd_index] = odd;
        Self { items, odd_index }
    }
}
