/*
autoplay.rs

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

//! Solve the levels.
//!
//! [`next_action`] returns an action that moves the level toward completion without any
//! mistake. It is used by the demonstration mode and by the tests.

use crate::generator::LevelInstance;
use crate::generator::maze::Position;
use crate::validator::{Action, Direction, LevelProgress};

/// Return a correct next action, or None when the level cannot progress right now (solved
/// level, cards being turned face down, no balloon on screen).
pub fn next_action(instance: &LevelInstance, progress: &LevelProgress) -> Option<Action> {
    match (instance, progress) {
        (LevelInstance::OddOneOut(o), _) => Some(Action::Select(o.odd_index)),
        (LevelInstance::Arithmetic(a), _) => Some(Action::Answer(a.correct_answer)),
        (LevelInstance::SlidingPuzzle(_), LevelProgress::Sliding(p)) => p
            .tiles()
            .iter()
            .enumerate()
            .find(|(i, t)| t.correct_position != *i)
            .map(|(from, t)| Action::Swap {
                from,
                to: t.correct_position,
            }),
        (LevelInstance::ColorSort(c), LevelProgress::ColorSort(p)) => {
            let (ball, color) = c
                .balls
                .iter()
                .enumerate()
                .find(|(i, _)| !p.is_placed(*i))
                .map(|(i, b)| (i, b.color))?;
            let jar: usize = c.jars.iter().position(|j| *j == color)?;
            Some(Action::Drop { ball, jar })
        }
        (LevelInstance::MemoryMatch(m), LevelProgress::Memory(p)) => match p.face_up() {
            [] => (0..m.deck.len())
                .find(|i| !p.is_matched(*i))
                .map(Action::Flip),
            [card] => m.partner(*card).map(Action::Flip),
            _ => None,
        },
        (LevelInstance::PairConnect(c), LevelProgress::Connect(p)) => {
            if let Some(left) = p.selected_left() {
                let pair: usize = c.left_order[left];
                if !p.is_connected(pair) {
                    return c
                        .right_order
                        .iter()
                        .position(|r| *r == pair)
                        .map(Action::SelectRight);
                }
            }
            c.left_order
                .iter()
                .position(|pair| !p.is_connected(*pair))
                .map(Action::SelectLeft)
        }
        (LevelInstance::Maze(m), LevelProgress::Maze(p)) => {
            let path: Vec<Position> = m.path_between(p.position(), m.end)?;
            let next: Position = *path.get(1)?;
            Direction::between(p.position(), next).map(Action::Move)
        }
        (LevelInstance::ReactionChallenge(_), LevelProgress::Reaction(p)) => {
            // The newest balloon stays the longest on screen
            p.live().last().map(|t| Action::Tap(t.id))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator;
    use crate::level::LevelKind;
    use crate::validator::{self, Outcome};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn untimed_levels_are_solved_without_mistakes() {
        let mut rng: StdRng = StdRng::seed_from_u64(11);
        for kind in LevelKind::ALL.iter().filter(|k| !k.is_timed()) {
            for _ in 0..10 {
                let instance: LevelInstance = generator::generate(*kind, &mut rng).unwrap();
                let mut progress: LevelProgress = LevelProgress::new(&instance);
                let mut last: Option<Outcome> = None;
                for _ in 0..500 {
                    let Some(action) = next_action(&instance, &progress) else {
                        break;
                    };
                    let outcome: Outcome =
                        validator::evaluate(&instance, &mut progress, action).unwrap();
                    assert_ne!(outcome, Outcome::Incorrect, "{kind} {action:?}");
                    last = Some(outcome);
                    if outcome == Outcome::Complete {
                        break;
                    }
                }
                assert_eq!(last, Some(Outcome::Complete), "{kind}");
            }
        }
    }

    #[test]
    fn nothing_to_tap_without_balloons() {
        let mut rng: StdRng = StdRng::seed_from_u64(12);
        let instance: LevelInstance =
            generator::generate(LevelKind::ReactionChallenge, &mut rng).unwrap();
        let progress: LevelProgress = LevelProgress::new(&instance);
        assert_eq!(next_action(&instance, &progress), None);
    }
}
