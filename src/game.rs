/*
game.rs

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

//! Manage the level in progress.
//!
//! The [`LevelStateMachine`] owns the runtime state of the level on screen: the generated
//! instance, the progress of the player, the mistake counter, and the level timers. The
//! state is dropped as soon as the level ends or the player leaves it.

use log::{debug, info};
use rand::Rng;
use std::time::Duration;

use crate::config::{CELEBRATION_DELAY, COUNTDOWN_TICK, REVEAL_DELAY};
use crate::events::{Cue, LevelEvent};
use crate::generator::{self, GeneratorError, LevelInstance};
use crate::level::LevelKind;
use crate::timer::{TimerKind, Timers};
use crate::validator::{self, Action, ActionError, LevelProgress, Outcome};

/// Status of the level state machine.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LevelStatus {
    /// No level on screen.
    Idle,

    /// The player is playing.
    Active,

    /// The level is solved and the victory animation is running.
    Succeeded,

    /// The boss level timed out. The player can retry.
    Failed,
}

/// Runtime state of the level on screen.
#[derive(Debug, Clone)]
pub struct LevelState {
    pub instance: LevelInstance,
    pub progress: LevelProgress,
    timers: Timers,

    /// Remaining seconds. Only used by the timed level.
    time_left: Option<u32>,

    /// Number of Incorrect outcomes.
    mistakes: usize,
}

impl LevelState {
    fn new(instance: LevelInstance) -> Self {
        let progress: LevelProgress = LevelProgress::new(&instance);
        Self {
            instance,
            progress,
            timers: Timers::new(),
            time_left: None,
            mistakes: 0,
        }
    }

    fn level(&self) -> u8 {
        self.instance.kind().number()
    }

    fn score(&self) -> u32 {
        match &self.progress {
            LevelProgress::Reaction(p) => p.score(),
            _ => 0,
        }
    }
}

/// Level lifecycle: `Idle -> Active -> {Succeeded, Failed}`.
#[derive(Debug, Clone)]
pub struct LevelStateMachine {
    status: LevelStatus,
    state: Option<LevelState>,
}

impl Default for LevelStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelStateMachine {
    pub fn new() -> Self {
        Self {
            status: LevelStatus::Idle,
            state: None,
        }
    }

    pub fn status(&self) -> LevelStatus {
        self.status
    }

    pub fn state(&self) -> Option<&LevelState> {
        self.state.as_ref()
    }

    pub fn instance(&self) -> Option<&LevelInstance> {
        self.state.as_ref().map(|s| &s.instance)
    }

    pub fn progress(&self) -> Option<&LevelProgress> {
        self.state.as_ref().map(|s| &s.progress)
    }

    pub fn kind(&self) -> Option<LevelKind> {
        self.state.as_ref().map(|s| s.instance.kind())
    }

    /// Remaining seconds of the timed level.
    pub fn time_left(&self) -> Option<u32> {
        self.state.as_ref().and_then(|s| s.time_left)
    }

    pub fn mistakes(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.mistakes)
    }

    /// Time spent in the level.
    pub fn elapsed(&self) -> Duration {
        self.state.as_ref().map_or(Duration::ZERO, |s| s.timers.now())
    }

    /// Whether the given timer is pending.
    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.state
            .as_ref()
            .is_some_and(|s| s.timers.is_pending(kind))
    }

    /// Generate a new instance of the level and start it.
    pub fn load<R: Rng + ?Sized>(
        &mut self,
        kind: LevelKind,
        rng: &mut R,
    ) -> Result<Vec<LevelEvent>, GeneratorError> {
        let instance: LevelInstance = generator::generate(kind, rng)?;
        Ok(self.start_instance(instance))
    }

    /// Start the given instance. Any level in progress is abandoned.
    pub fn start_instance(&mut self, instance: LevelInstance) -> Vec<LevelEvent> {
        self.abandon();

        let mut state: LevelState = LevelState::new(instance);
        let level: u8 = state.level();
        let mut events: Vec<LevelEvent> = vec![LevelEvent::Started { level }];

        if let LevelInstance::ReactionChallenge(rules) = &state.instance {
            state.time_left = Some(rules.time_limit_secs);
            state
                .timers
                .schedule_repeating(TimerKind::Countdown, COUNTDOWN_TICK);
            state
                .timers
                .schedule_repeating(TimerKind::Spawn, rules.spawn_interval);
            events.push(LevelEvent::TimeLeft(rules.time_limit_secs));
        }

        info!("Level {level} ({}) started", state.instance.kind());
        self.state = Some(state);
        self.status = LevelStatus::Active;
        events
    }

    /// Evaluate a player action.
    ///
    /// # Errors
    ///
    /// Return an [`ActionError`] when no level is active or when the action cannot apply. The
    /// level is not modified in that case.
    pub fn handle_action(&mut self, action: Action) -> Result<Vec<LevelEvent>, ActionError> {
        let state: &mut LevelState = match (&mut self.state, self.status) {
            (Some(s), LevelStatus::Active) => s,
            _ => return Err(ActionError::NotActive),
        };
        if state.timers.is_pending(TimerKind::Reveal) {
            return Err(ActionError::FeedbackPending);
        }

        // A balloon past its lifetime is gone, even if the spawn timer did not remove it yet
        if let (Action::Tap(id), LevelProgress::Reaction(p)) = (action, &state.progress) {
            let now: Duration = state.timers.now();
            if p.live().iter().any(|t| t.id == id && t.expires_at <= now) {
                return Err(ActionError::UnknownTarget(id));
            }
        }

        let outcome: Outcome =
            validator::evaluate(&state.instance, &mut state.progress, action).inspect_err(|e| {
                debug!("Action {action:?} ignored: {e}");
            })?;

        let mut events: Vec<LevelEvent> = vec![
            LevelEvent::Feedback { action, outcome },
            LevelEvent::Cue(Cue::for_outcome(action, outcome)),
        ];

        match outcome {
            Outcome::Incorrect => {
                state.mistakes += 1;
                if let LevelProgress::Memory(p) = &state.progress
                    && p.is_revealing()
                {
                    state.timers.schedule(TimerKind::Reveal, REVEAL_DELAY);
                }
            }
            Outcome::Complete => {
                let level: u8 = state.level();
                let duration: Duration = state.timers.now();
                info!(
                    "Level {level} solved in {}s with {} mistakes",
                    duration.as_secs(),
                    state.mistakes
                );
                state.timers.cancel_all();
                state
                    .timers
                    .schedule(TimerKind::Celebration, CELEBRATION_DELAY);
                events.push(LevelEvent::Succeeded {
                    level,
                    duration,
                    mistakes: state.mistakes,
                });
                self.status = LevelStatus::Succeeded;
            }
            Outcome::Correct | Outcome::Pending => {}
        }
        Ok(events)
    }

    /// Move the level clock forward and fire the due timers.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<LevelEvent> {
        let mut events: Vec<LevelEvent> = Vec::new();
        let Some(state) = &mut self.state else {
            return events;
        };
        let until: Duration = state.timers.now() + elapsed;
        let mut celebrated: bool = false;

        while let Some(timer) = state.timers.pop_due(until) {
            let now: Duration = state.timers.now();
            match (timer, &mut state.progress, &state.instance) {
                (TimerKind::Countdown, LevelProgress::Reaction(p), _) => {
                    let left: u32 = state.time_left.unwrap_or(0).saturating_sub(1);
                    state.time_left = Some(left);
                    events.push(LevelEvent::TimeLeft(left));
                    if left == 0 {
                        let level: u8 = state.instance.kind().number();
                        info!("Level {level} timed out with score {}", p.score());
                        state.timers.cancel_all();
                        events.push(LevelEvent::Failed {
                            level,
                            score: p.score(),
                        });
                        events.push(LevelEvent::Cue(Cue::Fail));
                        self.status = LevelStatus::Failed;
                    }
                }
                (TimerKind::Spawn, LevelProgress::Reaction(p), LevelInstance::ReactionChallenge(r)) => {
                    let expired: Vec<u32> = p.expire(now);
                    if !expired.is_empty() {
                        events.push(LevelEvent::TargetsExpired(expired));
                    }
                    if let Some(target) = p.spawn(r, now) {
                        events.push(LevelEvent::TargetSpawned(target));
                    }
                }
                (TimerKind::Reveal, LevelProgress::Memory(p), _) => {
                    if let Some((a, b)) = p.conceal() {
                        events.push(LevelEvent::CardsHidden(a, b));
                    }
                }
                (TimerKind::Celebration, _, _) => {
                    celebrated = true;
                    break;
                }
                (timer, _, _) => debug!("Timer {timer:?} does not apply to this level"),
            }
        }

        if celebrated {
            let level: u8 = state.level();
            debug!("Celebration of level {level} done");
            events.push(LevelEvent::CelebrationDone { level });
            self.state = None;
            self.status = LevelStatus::Idle;
            return events;
        }
        state.timers.settle(until);
        events
    }

    /// Play the failed level again with a new instance.
    ///
    /// Do nothing unless the level failed.
    pub fn retry<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Vec<LevelEvent>, GeneratorError> {
        if self.status != LevelStatus::Failed {
            debug!("Nothing to retry");
            return Ok(Vec::new());
        }
        match self.kind() {
            Some(kind) => self.load(kind, rng),
            None => Ok(Vec::new()),
        }
    }

    /// Leave the level. Cancel the timers and drop the runtime state.
    pub fn abandon(&mut self) {
        if let Some(mut state) = self.state.take() {
            debug!("Leaving level {}", state.level());
            state.timers.cancel_all();
        }
        self.status = LevelStatus::Idle;
    }

    /// Score of the timed level.
    pub fn score(&self) -> u32 {
        self.state.as_ref().map_or(0, LevelState::score)
    }
}
