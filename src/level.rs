/*
level.rs

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

//! The eight mini-games and their position in the run.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::FromRepr;

use crate::config::LEVEL_COUNT;

/// Level kind. The discriminant is the level number.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, FromRepr)]
#[repr(u8)]
pub enum LevelKind {
    OddOneOut = 1,
    Arithmetic = 2,
    SlidingPuzzle = 3,
    ColorSort = 4,
    MemoryMatch = 5,
    PairConnect = 6,
    Maze = 7,
    ReactionChallenge = 8,
}

impl LevelKind {
    /// All the levels in play order.
    pub const ALL: [LevelKind; LEVEL_COUNT as usize] = [
        LevelKind::OddOneOut,
        LevelKind::Arithmetic,
        LevelKind::SlidingPuzzle,
        LevelKind::ColorSort,
        LevelKind::MemoryMatch,
        LevelKind::PairConnect,
        LevelKind::Maze,
        LevelKind::ReactionChallenge,
    ];

    /// Return the level for the given level number, or None if the number is not in `1..=8`.
    pub fn from_level(level: u8) -> Option<Self> {
        Self::from_repr(level)
    }

    /// Level number, starting at 1.
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Whether this is the last level of the run.
    pub fn is_last(self) -> bool {
        self.number() == LEVEL_COUNT
    }

    /// Whether the level runs against a countdown.
    pub fn is_timed(self) -> bool {
        self == LevelKind::ReactionChallenge
    }

    /// Instruction shown to the player.
    pub fn instruction(self) -> &'static str {
        match self {
            LevelKind::OddOneOut => "Find the one that is different!",
            LevelKind::Arithmetic => "Help the little animal with the sum!",
            LevelKind::SlidingPuzzle => "Drag the pieces to the right place!",
            LevelKind::ColorSort => "Drop each ball into the jar of the same color!",
            LevelKind::MemoryMatch => "Find the two matching cards!",
            LevelKind::PairConnect => "Connect each animal with its food!",
            LevelKind::Maze => "Lead the bear from the start to the finish!",
            LevelKind::ReactionChallenge => "Pop the balloons before the time runs out!",
        }
    }
}

impl fmt::Display for LevelKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LevelKind::OddOneOut => write!(f, "Odd one out"),
            LevelKind::Arithmetic => write!(f, "Arithmetic"),
            LevelKind::SlidingPuzzle => write!(f, "Sliding puzzle"),
            LevelKind::ColorSort => write!(f, "Color sort"),
            LevelKind::MemoryMatch => write!(f, "Memory match"),
            LevelKind::PairConnect => write!(f, "Pair connect"),
            LevelKind::Maze => write!(f, "Maze"),
            LevelKind::ReactionChallenge => write!(f, "Boss challenge"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_numbers_follow_play_order() {
        for (i, kind) in LevelKind::ALL.iter().enumerate() {
            assert_eq!(kind.number() as usize, i + 1);
            assert_eq!(LevelKind::from_level(kind.number()), Some(*kind));
        }
    }

    #[test]
    fn out_of_range_levels() {
        assert_eq!(LevelKind::from_level(0), None);
        assert_eq!(LevelKind::from_level(9), None);
    }

    #[test]
    fn only_the_boss_is_last_and_timed() {
        assert!(LevelKind::ReactionChallenge.is_last());
        assert!(LevelKind::ReactionChallenge.is_timed());
        assert!(!LevelKind::Maze.is_last());
        assert!(!LevelKind::Maze.is_timed());
    }
}
