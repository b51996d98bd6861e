/*
reaction.rs

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

//! Boss level progress: balloons on screen and score.
//!
//! Balloons are spawned by the level timer at the rate given by the instance and disappear
//! after their lifetime. Time is the level's own clock, a [`Duration`] since the level
//! started.

use serde::Serialize;
use std::time::Duration;

use super::{ActionError, Outcome};
use crate::generator::reaction::ReactionChallenge;

/// A balloon on screen.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Target {
    pub id: u32,

    /// Level time when the balloon disappears.
    pub expires_at: Duration,
}

/// Score and balloons on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionProgress {
    score: u32,
    live: Vec<Target>,
    next_id: u32,
}

impl Default for ReactionProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ReactionProgress {
    pub fn new() -> Self {
        Self {
            score: 0,
            live: Vec::new(),
            next_id: 0,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Balloons on screen.
    pub fn live(&self) -> &[Target] {
        &self.live
    }

    /// Spawn a balloon at the given level time, unless the screen is full.
    pub fn spawn(&mut self, rules: &ReactionChallenge, now: Duration) -> Option<Target> {
        if self.live.len() >= rules.max_live_targets {
            return None;
        }
        let target: Target = Target {
            id: self.next_id,
            expires_at: now + rules.target_lifetime,
        };
        self.next_id += 1;
        self.live.push(target);
        Some(target)
    }

    /// Remove the balloons that expired at the given level time and return their identifiers.
    pub fn expire(&mut self, now: Duration) -> Vec<u32> {
        let expired: Vec<u32> = self
            .live
            .iter()
            .filter(|t| t.expires_at <= now)
            .map(|t| t.id)
            .collect();
        self.live.retain(|t| t.expires_at > now);
        expired
    }

    /// Pop a balloon.
    pub fn tap(&mut self, rules: &ReactionChallenge, id: u32) -> Result<Outcome, ActionError> {
        let Some(index) = self.live.iter().position(|t| t.id == id) else {
            return Err(ActionError::UnknownTarget(id));
        };
        self.live.remove(index);
        self.score += 1;
        if self.score >= rules.target_score {
            Ok(Outcome::Complete)
        } else {
            Ok(Outcome::Correct)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_holds_a_limited_number_of_balloons() {
        let rules: ReactionChallenge = ReactionChallenge::default();
        let mut p: ReactionProgress = ReactionProgress::new();
        for _ in 0..rules.max_live_targets {
            assert!(p.spawn(&rules, Duration::ZERO).is_some());
        }
        assert_eq!(p.spawn(&rules, Duration::ZERO), None);
    }

    #[test]
    fn balloons_expire() {
        let rules: ReactionChallenge = ReactionChallenge::default();
        let mut p: ReactionProgress = ReactionProgress::new();
        let a: Target = p.spawn(&rules, Duration::ZERO).unwrap();
        let b: Target = p.spawn(&rules, Duration::from_secs(1)).unwrap();
        assert_eq!(p.expire(Duration::from_secs(3)), vec![a.id]);
        assert_eq!(p.live(), &[b]);
        assert_eq!(p.tap(&rules, a.id), Err(ActionError::UnknownTarget(a.id)));
    }

    #[test]
    fn reaching_the_target_score_completes() {
        let rules: ReactionChallenge = ReactionChallenge {
            target_score: 2,
            ..ReactionChallenge::default()
        };
        let mut p: ReactionProgress = ReactionProgress::new();
        let a: Target = p.spawn(&rules, Duration::ZERO).unwrap();
        let b: Target = p.spawn(&rules, Duration::ZERO).unwrap();
        assert_eq!(p.tap(&rules, a.id), Ok(Outcome::Correct));
        assert_eq!(p.tap(&rules, a.id), Err(ActionError::UnknownTarget(a.id)));
        assert_eq!(p.tap(&rules, b.id), Ok(Outcome::Complete));
        assert_eq!(p.score(), 2);
    }
}
