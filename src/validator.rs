/*
validator.rs

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

//! Validate player actions against a level instance.
//!
//! [`evaluate`] is the single entry point. The levels that need several actions to complete
//! (sliding puzzle, color sort, memory, connection, maze, and boss) accumulate the player's
//! progress in a [`LevelProgress`] value that the caller owns and passes with every action.
//! The odd-one-out and arithmetic levels complete with a single correct action.
//!
//! An action returns an [`Outcome`] when it applies to the level: a right or wrong answer, or
//! the first half of a two-step selection.
//! It returns an [`ActionError`] when it cannot apply at all (wrong action for the level,
//! unknown item, card already face up...). Such actions never change the progress.

pub mod color_sort;
pub mod connect;
pub mod maze;
pub mod memory;
pub mod reaction;
pub mod selection;
pub mod sliding;

use serde::Serialize;
use std::error::Error;
use std::fmt;

use crate::generator::LevelInstance;
use crate::level::LevelKind;

pub use maze::Direction;

/// A discrete player action, as mapped by the presentation layer.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Select the item at the given position (odd-one-out level).
    Select(usize),

    /// Choose an answer (arithmetic level).
    Answer(u32),

    /// Drag the piece at `from` onto the piece at `to` (sliding puzzle level).
    Swap { from: usize, to: usize },

    /// Drop a ball into a jar (color sort level).
    Drop { ball: usize, jar: usize },

    /// Turn a card face up (memory level).
    Flip(usize),

    /// Select the left item at the given position (connection level).
    SelectLeft(usize),

    /// Select the right item at the given position (connection level).
    SelectRight(usize),

    /// Move the player by one cell (maze level).
    Move(Direction),

    /// Pop the balloon with the given identifier (boss level).
    Tap(u32),
}

/// Result of an action.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// First half of a two-step action. No feedback.
    Pending,

    /// Right action. The level continues.
    Correct,

    /// Wrong action. The player can try again.
    Incorrect,

    /// The level is solved.
    Complete,
}

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum ActionError {
    /// The action does not apply to this level.
    WrongAction(LevelKind, Action),

    /// No item at this position.
    OutOfRange(usize),

    /// The item is already face up, matched, placed, or the swap does nothing.
    AlreadyResolved(usize),

    /// A right item was selected before any left item.
    NoSelection,

    /// Two mismatched cards are still face up.
    FeedbackPending,

    /// No balloon with this identifier is on screen.
    UnknownTarget(u32),

    /// No level is being played.
    NotActive,
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ActionError::WrongAction(kind, action) => {
                write!(f, "action {action:?} does not apply to the {kind} level")
            }
            ActionError::OutOfRange(i) => write!(f, "no item at position {i}"),
            ActionError::AlreadyResolved(i) => write!(f, "item {i} is already resolved"),
            ActionError::NoSelection => write!(f, "no left item selected"),
            ActionError::FeedbackPending => write!(f, "waiting for the cards to turn back"),
            ActionError::UnknownTarget(id) => write!(f, "no balloon {id} on screen"),
            ActionError::NotActive => write!(f, "no level in progress"),
        }
    }
}

impl Error for ActionError {}

/// Progress accumulated during a level.
#[derive(Debug, Clone, PartialEq)]
pub enum LevelProgress {
    /// Odd-one-out and arithmetic levels: nothing to accumulate.
    Single,
    Sliding(sliding::SlidingProgress),
    ColorSort(color_sort::ColorSortProgress),
    Memory(memory::MemoryProgress),
    Connect(connect::ConnectProgress),
    Maze(maze::MazeProgress),
    Reaction(reaction::ReactionProgress),
}

impl LevelProgress {
    /// Create the initial progress for the given instance.
    pub fn new(instance: &LevelInstance) -> Self {
        match instance {
            LevelInstance::OddOneOut(_) | LevelInstance::Arithmetic(_) => LevelProgress::Single,
            LevelInstance::SlidingPuzzle(p) => {
                LevelProgress::Sliding(sliding::SlidingProgress::new(p))
            }
            LevelInstance::ColorSort(c) => {
                LevelProgress::ColorSort(color_sort::ColorSortProgress::new(c))
            }
            LevelInstance::MemoryMatch(m) => LevelProgress::Memory(memory::MemoryProgress::new(m)),
            LevelInstance::PairConnect(p) => {
                LevelProgress::Connect(connect::ConnectProgress::new(p))
            }
            LevelInstance::Maze(m) => LevelProgress::Maze(maze::MazeProgress::new(m)),
            LevelInstance::ReactionChallenge(_) => {
                LevelProgress::Reaction(reaction::ReactionProgress::new())
            }
        }
    }
}

/// Evaluate an action against the instance and update the progress.
///
/// # Errors
///
/// Return an [`ActionError`] when the action cannot apply. The progress is not modified in
/// that case.
pub fn evaluate(
    instance: &LevelInstance,
    progress: &mut LevelProgress,
    action: Action,
) -> Result<Outcome, ActionError> {
    match (instance, progress, action) {
        (LevelInstance::OddOneOut(o), _, Action::Select(i)) => selection::select_odd(o, i),
        (LevelInstance::Arithmetic(a), _, Action::Answer(v)) => Ok(selection::answer(a, v)),
        (LevelInstance::SlidingPuzzle(_), LevelProgress::Sliding(p), Action::Swap { from, to }) => {
            p.swap(from, to)
        }
        (LevelInstance::ColorSort(c), LevelProgress::ColorSort(p), Action::Drop { ball, jar }) => {
            p.drop_ball(c, ball, jar)
        }
        (LevelInstance::MemoryMatch(m), LevelProgress::Memory(p), Action::Flip(card)) => {
            p.flip(m, card)
        }
        (LevelInstance::PairConnect(c), LevelProgress::Connect(p), Action::SelectLeft(i)) => {
            p.select_left(c, i)
        }
        (LevelInstance::PairConnect(c), LevelProgress::Connect(p), Action::SelectRight(i)) => {
            p.select_right(c, i)
        }
        (LevelInstance::Maze(m), LevelProgress::Maze(p), Action::Move(direction)) => {
            Ok(p.move_player(m, direction))
        }
        (LevelInstance::ReactionChallenge(r), LevelProgress::Reaction(p), Action::Tap(id)) => {
            p.tap(r, id)
        }
        (instance, _, action) => Err(ActionError::WrongAction(instance.kind(), action)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{self, arithmetic};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn arithmetic_seven_minus_three() {
        let mut rng = StdRng::seed_from_u64(0);
        let instance: LevelInstance = LevelInstance::Arithmetic(
            arithmetic::Arithmetic::with_operands(7, 3, arithmetic::Operator::Subtract, &mut rng),
        );
        let before: LevelInstance = instance.clone();
        let mut progress: LevelProgress = LevelProgress::new(&instance);

        assert_eq!(
            evaluate(&instance, &mut progress, Action::Answer(5)),
            Ok(Outcome::Incorrect)
        );
        assert_eq!(instance, before);
        assert_eq!(
            evaluate(&instance, &mut progress, Action::Answer(4)),
            Ok(Outcome::Complete)
        );
    }

    #[test]
    fn action_for_another_level_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let instance: LevelInstance =
            generator::generate(LevelKind::MemoryMatch, &mut rng).unwrap();
        let mut progress: LevelProgress = LevelProgress::new(&instance);
        let before: LevelProgress = progress.clone();

        assert_eq!(
            evaluate(&instance, &mut progress, Action::Answer(3)),
            Err(ActionError::WrongAction(
                LevelKind::MemoryMatch,
                Action::Answer(3)
            ))
        );
        assert_eq!(progress, before);
    }

    #[test]
    fn progress_matches_the_instance_kind() {
        let mut rng = StdRng::seed_from_u64(2);
        for kind in LevelKind::ALL {
            let instance: LevelInstance = generator::generate(kind, &mut rng).unwrap();
            let progress: LevelProgress = LevelProgress::new(&instance);
            let single: bool = matches!(progress, LevelProgress::Single);
            assert_eq!(
                single,
                matches!(kind, LevelKind::OddOneOut | LevelKind::Arithmetic)
            );
        }
    }
}
