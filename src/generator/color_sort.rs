/*
color_sort.rs

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

//! Color sort level: drop each ball into the jar of its color.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use super::symbols::Symbol;

/// Number of balls of each color.
pub const BALLS_PER_COLOR: usize = 3;

/// Ball and jar colors.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ColorId {
    Red,
    Blue,
    Yellow,
    Green,
}

impl ColorId {
    pub const ALL: [ColorId; 4] = [ColorId::Red, ColorId::Blue, ColorId::Yellow, ColorId::Green];

    /// Symbol drawn on the balls.
    pub fn symbol(self) -> Symbol {
        match self {
            ColorId::Red => "🔴",
            ColorId::Blue => "🔵",
            ColorId::Yellow => "🟡",
            ColorId::Green => "🟢",
        }
    }
}

/// A ball to sort.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Ball {
    pub color: ColorId,
    pub symbol: Symbol,
}

/// Color sort instance.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ColorSort {
    /// Balls in display order.
    pub balls: Vec<Ball>,

    /// Jars in display order, one per color.
    pub jars: Vec<ColorId>,
}

impl ColorSort {
    /// Generate three balls for each color, in a random order.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut balls: Vec<Ball> = ColorId::ALL
            .iter()
            .flat_map(|c| {
                std::iter::repeat_n(
                    Ball {
                        color: *c,
                        symbol: c.symbol(),
                    },
                    BALLS_PER_COLOR,
                )
            })
            .collect();
        balls.shuffle(rng);
        Self {
            balls,
            jars: ColorId::ALL.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn three_balls_per_jar() {
        let c: ColorSort = ColorSort::generate(&mut StdRng::seed_from_u64(4));
        assert_eq!(c.balls.len(), BALLS_PER_COLOR * c.jars.len());
        for jar in &c.jars {
            assert_eq!(
                c.balls.iter().filter(|b| b.color == *jar).count(),
                BALLS_PER_COLOR
            );
        }
    }
}
