/*
records.rs

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

//! Best times for each level.
//!
//! The [`LevelRecords`] object keeps a short board of the fastest completions for every level.
//! It is updated when the player completes a level, and is shown in the guardian view.

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::{Duration, SystemTime};

use crate::config::RECORDS_KEY;
use crate::saver::{self, Storage};

/// Number of entries per board.
pub const BOARD_SIZE: usize = 5;

/// A level completion.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Score {
    /// Time from the start of the level to its completion.
    pub time: Duration,

    /// Number of wrong answers and blocked moves.
    pub mistakes: usize,

    pub when: SystemTime,
}

/// Boards of the fastest completions, by level number.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct LevelRecords {
    boards: BTreeMap<u8, Vec<Score>>,
}

impl LevelRecords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the stored boards. Start with empty boards when they cannot be read.
    pub fn load<S: Storage + ?Sized>(storage: &S) -> Self {
        match saver::load_json(storage, RECORDS_KEY) {
            Ok(Some(records)) => records,
            Ok(None) => Self::new(),
            Err(e) => {
                warn!("Cannot read the level records: {e}");
                Self::new()
            }
        }
    }

    pub fn save<S: Storage + ?Sized>(&self, storage: &mut S) {
        if let Err(e) = saver::save_json(storage, RECORDS_KEY, self) {
            warn!("Cannot save the level records: {e}");
        }
    }

    /// Add a completion to the board of the level and return its position, or None if it is
    /// too slow to make it to the board.
    ///
    /// The returned position starts at 1 (fastest). A tie goes after the existing entries.
    pub fn add_score(&mut self, level: u8, time: Duration, mistakes: usize) -> Option<usize> {
        let board: &mut Vec<Score> = self.boards.entry(level).or_default();
        let index: usize = board.partition_point(|s| s.time <= time);
        if index >= BOARD_SIZE {
            return None;
        }
        board.insert(
            index,
            Score {
                time,
                mistakes,
                when: SystemTime::now(),
            },
        );
        board.truncate(BOARD_SIZE);
        Some(index + 1)
    }

    /// Board of the level, fastest first. Return None when the level was never completed.
    pub fn get(&self, level: u8) -> Option<&[Score]> {
        self.boards
            .get(&level)
            .filter(|b| !b.is_empty())
            .map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.boards.values().all(Vec::is_empty)
    }
}
