/*
events.rs

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

//! Notifications sent to the presentation layer.

use serde::Serialize;
use std::time::Duration;

use crate::validator::reaction::Target;
use crate::validator::{Action, Outcome};

/// Sound effects. The audio player receives them on a channel and plays them when it can.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Cue {
    Success,
    Fail,
    Victory,
    Click,
}

impl Cue {
    /// Sound effect for the outcome of an action.
    ///
    /// Moves in the maze and balloon pops are frequent, so they only click.
    pub fn for_outcome(action: Action, outcome: Outcome) -> Self {
        match (action, outcome) {
            (_, Outcome::Complete) => Cue::Victory,
            (_, Outcome::Incorrect) => Cue::Fail,
            (_, Outcome::Pending) => Cue::Click,
            (Action::Move(_) | Action::Tap(_), Outcome::Correct) => Cue::Click,
            (_, Outcome::Correct) => Cue::Success,
        }
    }
}

/// What happened in the level.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub enum LevelEvent {
    /// A new instance of the level is on screen.
    Started { level: u8 },

    /// Result of a player action.
    Feedback { action: Action, outcome: Outcome },

    Cue(Cue),

    /// The two mismatched memory cards are face down again.
    CardsHidden(usize, usize),

    /// Remaining seconds of the boss level.
    TimeLeft(u32),

    TargetSpawned(Target),

    /// Balloons that flew away.
    TargetsExpired(Vec<u32>),

    Succeeded {
        level: u8,
        duration: Duration,
        mistakes: usize,
    },

    /// The time ran out before the player reached the target score.
    Failed { level: u8, score: u32 },

    /// Message shown on the victory overlay.
    Celebrate { message: &'static str },

    /// The victory animation is over.
    CelebrationDone { level: u8 },

    /// The player completed every level.
    Finished { player_name: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::Direction;

    #[test]
    fn cues() {
        assert_eq!(
            Cue::for_outcome(Action::Answer(3), Outcome::Correct),
            Cue::Success
        );
        assert_eq!(
            Cue::for_outcome(Action::Move(Direction::Up), Outcome::Correct),
            Cue::Click
        );
        assert_eq!(
            Cue::for_outcome(Action::Move(Direction::Up), Outcome::Incorrect),
            Cue::Fail
        );
        assert_eq!(Cue::for_outcome(Action::Tap(2), Outcome::Complete), Cue::Victory);
        assert_eq!(Cue::for_outcome(Action::Flip(0), Outcome::Pending), Cue::Click);
    }
}
