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

//! Color sort progress.

use super::{ActionError, Outcome};
use crate::generator::color_sort::ColorSort;

/// Balls already dropped into their jar.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSortProgress {
    placed: Vec<bool>,
}

impl ColorSortProgress {
    pub fn new(instance: &ColorSort) -> Self {
        Self {
            placed: vec![false; instance.balls.len()],
        }
    }

    /// Number of balls in their jar.
    pub fn placed(&self) -> usize {
        self.placed.iter().filter(|p| **p).count()
    }

    /// Whether the given ball is already in its jar.
    pub fn is_placed(&self, ball: usize) -> bool {
        self.placed.get(ball).copied().unwrap_or(false)
    }

    /// Drop the ball into the jar. A ball dropped into the wrong jar stays where it was.
    pub fn drop_ball(
        &mut self,
        instance: &ColorSort,
        ball: usize,
        jar: usize,
    ) -> Result<Outcome, ActionError> {
        let Some(b) = instance.balls.get(ball) else {
            return Err(ActionError::OutOfRange(ball));
        };
        let Some(jar_color) = instance.jars.get(jar) else {
            return Err(ActionError::OutOfRange(jar));
        };
        if self.placed[ball] {
            return Err(ActionError::AlreadyResolved(ball));
        }
        if b.color != *jar_color {
            return Ok(Outcome::Incorrect);
        }
        self.placed[ball] = true;
        if self.placed.iter().all(|p| *p) {
            Ok(Outcome::Complete)
        } else {
            Ok(Outcome::Correct)
        }
    }
}
