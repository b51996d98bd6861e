/*
arithmetic.rs

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

//! Arithmetic level: a small addition or subtraction with four answer options.

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::Serialize;
use std::fmt;

use super::symbols::{ANIMALS, Symbol};

/// Number of answer options, the correct one included.
pub const OPTION_COUNT: usize = 4;

/// Largest first operand.
const MAX_OPERAND: u32 = 10;

/// Distractors are the correct answer plus a delta in this range.
const MIN_DELTA: i64 = -5;
const MAX_DELTA: i64 = 4;

/// Arithmetic operator.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Add,
    Subtract,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operator::Add => write!(f, "+"),
            Operator::Subtract => write!(f, "-"),
        }
    }
}

/// Arithmetic instance.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Arithmetic {
    pub operand_a: u32,
    pub operand_b: u32,
    pub operator: Operator,
    pub correct_answer: u32,

    /// Answer options in display order. Contains the correct answer exactly once.
    pub options: Vec<u32>,

    /// The little animal asking the question.
    pub mascot: Symbol,
}

impl Arithmetic {
    /// Generate a random problem. The second operand never exceeds the first one, so a
    /// subtraction is never negative.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let operand_a: u32 = rng.random_range(1..=MAX_OPERAND);
        let operand_b: u32 = rng.random_range(1..=operand_a);
        let operator: Operator = if rng.random_bool(0.5) {
            Operator::Add
        } else {
            Operator::Subtract
        };
        Self::with_operands(operand_a, operand_b, operator, rng)
    }

    /// Build the problem for the given operands. The random number generator is used for the
    /// distractors, their order, and the mascot.
    ///
    /// `operand_b` is clamped to `operand_a` for subtractions.
    pub fn with_operands<R: Rng + ?Sized>(
        operand_a: u32,
        operand_b: u32,
        operator: Operator,
        rng: &mut R,
    ) -> Self {
        let (operand_b, correct_answer) = match operator {
            Operator::Add => (operand_b, operand_a + operand_b),
            Operator::Subtract => {
                let b: u32 = operand_b.min(operand_a);
                (b, operand_a - b)
            }
        };

        let mut options: Vec<u32> = Vec::with_capacity(OPTION_COUNT);
        options.push(correct_answer);
        while options.len() < OPTION_COUNT {
            let wrong: i64 = correct_answer as i64 + rng.random_range(MIN_DELTA..=MAX_DELTA);
            if wrong < 0 {
                continue;
            }
            let wrong: u32 = wrong as u32;
            if !options.contains(&wrong) {
                options.push(wrong);
            }
        }
        options.shuffle(rng);

        let mascot: Symbol = *ANIMALS[..5].choose(rng).unwrap_or(&ANIMALS[0]);

        Self {
            operand_a,
            operand_b,
            operator,
            correct_answer,
            options,
            mascot,
        }
    }
}

impl fmt::Display for Arithmetic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {} = ?", self.operand_a, self.operator, self.operand_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn subtraction_of_seven_and_three() {
        let mut rng = StdRng::seed_from_u64(0);
        let a: Arithmetic = Arithmetic::with_operands(7, 3, Operator::Subtract, &mut rng);
        assert_eq!(a.correct_answer, 4);
        assert!(a.options.contains(&4));
        assert_eq!(a.to_string(), "7 - 3 = ?");
    }

    #[test]
    fn zero_result_still_gets_three_distractors() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let a: Arithmetic = Arithmetic::with_operands(4, 4, Operator::Subtract, &mut rng);
            assert_eq!(a.correct_answer, 0);
            let mut sorted = a.options.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), OPTION_COUNT);
            assert!(sorted.iter().all(|v| *v <= 4));
        }
    }

    #[test]
    fn operands_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..200 {
            let a: Arithmetic = Arithmetic::generate(&mut rng);
            assert!((1..=MAX_OPERAND).contains(&a.operand_a));
            assert!(a.operand_b >= 1 && a.operand_b <= a.operand_a);
            let expected: u32 = match a.operator {
                Operator::Add => a.operand_a + a.operand_b,
                Operator::Subtract => a.operand_a - a.operand_b,
            };
            assert_eq!(a.correct_answer, expected);
        }
    }
}
