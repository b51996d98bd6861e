/*
selection.rs

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

//! Single-action levels: odd-one-out and arithmetic.

use super::{ActionError, Outcome};
use crate::generator::arithmetic::Arithmetic;
use crate::generator::odd_one_out::OddOneOut;

/// The player selected the item at `index`.
pub fn select_odd(instance: &OddOneOut, index: usize) -> Result<Outcome, ActionError> {
    if index >= instance.items.len() {
        return Err(ActionError::OutOfRange(index));
    }
    if index == instance.odd_index {
        Ok(Outcome::Complete)
    } else {
        Ok(Outcome::Incorrect)
    }
}

/// The player chose `value`. Any value is accepted, not only the displayed options.
pub fn answer(instance: &Arithmetic, value: u32) -> Outcome {
    if value == instance.correct_answer {
        Outcome::Complete
    } else {
        Outcome::Incorrect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_item() {
        let o = OddOneOut {
            items: ["🐶", "🐶", "🐱", "🐶", "🐶"],
            odd_index: 2,
        };
        assert_eq!(select_odd(&o, 2), Ok(Outcome::Complete));
        assert_eq!(select_odd(&o, 0), Ok(Outcome::Incorrect));
        assert_eq!(select_odd(&o, 5), Err(ActionError::OutOfRange(5)));
    }
}
