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

//! Boss level: pop enough balloons before the time runs out.
//!
//! The instance only holds the rules. Balloons are spawned at a fixed rate while the level
//! runs, see [`crate::validator::reaction`].

use serde::Serialize;
use std::time::Duration;

/// Boss level parameters.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ReactionChallenge {
    /// Number of balloons to pop.
    pub target_score: u32,

    /// Time available, in seconds.
    pub time_limit_secs: u32,

    /// A new balloon appears at this rate.
    pub spawn_interval: Duration,

    /// No balloon is spawned while this many are on screen.
    pub max_live_targets: usize,

    /// How long a balloon stays on screen.
    pub target_lifetime: Duration,
}

impl Default for ReactionChallenge {
    fn default() -> Self {
        Self {
            target_score: 15,
            time_limit_secs: 20,
            spawn_interval: Duration::from_millis(800),
            max_live_targets: 6,
            target_lifetime: Duration::from_millis(3000),
        }
    }
}
