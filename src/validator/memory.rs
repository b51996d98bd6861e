/*
memory.rs

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

//! Memory progress.
//!
//! The player turns two cards face up. Two cards with the same symbol are matched and stay
//! face up until the end of the level. Two different cards stay face up for a short time so
//! that the player can memorize them, and are then turned face down with [`MemoryProgress::conceal`].
//! No card can be flipped in the meantime.

use log::debug;

use super::{ActionError, Outcome};
use crate::generator::memory_match::MemoryMatch;

/// Face-up and matched cards.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryProgress {
    /// Matched status of each card.
    matched: Vec<bool>,

    /// Cards currently face up and not matched. At most two.
    face_up: Vec<usize>,
}

impl MemoryProgress {
    pub fn new(instance: &MemoryMatch) -> Self {
        Self {
            matched: vec![false; instance.deck.len()],
            face_up: Vec::with_capacity(2),
        }
    }

    /// Number of pairs found.
    pub fn matched_pairs(&self) -> usize {
        self.matched.iter().filter(|m| **m).count() / 2
    }

    /// Whether the card has been matched.
    pub fn is_matched(&self, card: usize) -> bool {
        self.matched.get(card).copied().unwrap_or(false)
    }

    /// Cards face up and not matched.
    pub fn face_up(&self) -> &[usize] {
        &self.face_up
    }

    /// Whether two mismatched cards wait to be turned face down.
    pub fn is_revealing(&self) -> bool {
        self.face_up.len() == 2
    }

    /// Turn a card face up.
    pub fn flip(&mut self, instance: &MemoryMatch, card: usize) -> Result<Outcome, ActionError> {
        if card >= instance.deck.len() {
            return Err(ActionError::OutOfRange(card));
        }
        if self.is_revealing() {
            return Err(ActionError::FeedbackPending);
        }
        if self.matched[card] || self.face_up.contains(&card) {
            return Err(ActionError::AlreadyResolved(card));
        }
        self.face_up.push(card);
        if self.face_up.len() < 2 {
            return Ok(Outcome::Pending);
        }

        let (first, second) = (self.face_up[0], self.face_up[1]);
        if instance.deck[first] != instance.deck[second] {
            debug!("Cards {first} and {second} do not match");
            return Ok(Outcome::Incorrect);
        }
        self.matched[first] = true;
        self.matched[second] = true;
        self.face_up.clear();
        if self.matched.iter().all(|m| *m) {
            Ok(Outcome::Complete)
        } else {
            Ok(Outcome::Correct)
        }
    }

    /// Turn the two mismatched cards face down and return them.
    pub fn conceal(&mut self) -> Option<(usize, usize)> {
        if !self.is_revealing() {
            return None;
        }
        let pair: (usize, usize) = (self.face_up[0], self.face_up[1]);
        self.face_up.clear();
        Some(pair)
    }
}
