/*
connect.rs

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

//! Pair connection progress.

use super::{ActionError, Outcome};
use crate::generator::pair_connect::PairConnect;

/// Selected left item and completed pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectProgress {
    /// Position of the selected left item.
    selected_left: Option<usize>,

    /// Completed status of each canonical pair.
    completed: Vec<bool>,
}

impl ConnectProgress {
    pub fn new(instance: &PairConnect) -> Self {
        Self {
            selected_left: None,
            completed: vec![false; instance.pairs.len()],
        }
    }

    pub fn selected_left(&self) -> Option<usize> {
        self.selected_left
    }

    /// Number of connected pairs.
    pub fn connected(&self) -> usize {
        self.completed.iter().filter(|c| **c).count()
    }

    /// Whether the canonical pair has been connected.
    pub fn is_connected(&self, pair: usize) -> bool {
        self.completed.get(pair).copied().unwrap_or(false)
    }

    /// Select a left item. Selecting the same item again clears the selection.
    pub fn select_left(
        &mut self,
        instance: &PairConnect,
        position: usize,
    ) -> Result<Outcome, ActionError> {
        if position >= instance.left_order.len() {
            return Err(ActionError::OutOfRange(position));
        }
        self.selected_left = if self.selected_left == Some(position) {
            None
        } else {
            Some(position)
        };
        Ok(Outcome::Pending)
    }

    /// Select a right item and try to connect it with the selected left item.
    ///
    /// The selection is cleared whatever the result.
    pub fn select_right(
        &mut self,
        instance: &PairConnect,
        position: usize,
    ) -> Result<Outcome, ActionError> {
        if position >= instance.right_order.len() {
            return Err(ActionError::OutOfRange(position));
        }
        let Some(left) = self.selected_left.take() else {
            return Err(ActionError::NoSelection);
        };
        match instance.pair_between(left, position) {
            Some(pair) if !self.completed[pair] => {
                self.completed[pair] = true;
                if self.completed.iter().all(|c| *c) {
                    Ok(Outcome::Complete)
                } else {
                    Ok(Outcome::Correct)
                }
            }
            _ => Ok(Outcome::Incorrect),
        }
    }
}
