/*
timer.rs

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

//! Level timers on a cooperative clock.
//!
//! The level does not read the system clock. The host (a GUI main loop, a terminal loop, or
//! a test) reports elapsed time, and the due timers fire one at a time in deadline order.
//! This keeps the evaluation of player actions and timer callbacks strictly serialized, and
//! dropping or cancelling the [`Timers`] guarantees that no stale callback runs.

use log::debug;
use std::time::Duration;

/// Timer identifiers. A level has at most one timer of each kind.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TimerKind {
    /// One-second countdown of the boss level.
    Countdown,

    /// Balloon spawn rate of the boss level.
    Spawn,

    /// Delay before two mismatched memory cards are turned face down.
    Reveal,

    /// Victory animation after a level is solved.
    Celebration,
}

#[derive(Debug, Clone)]
struct Timer {
    kind: TimerKind,
    due: Duration,
    period: Option<Duration>,
}

/// Pending timers and current time.
#[derive(Debug, Clone, Default)]
pub struct Timers {
    now: Duration,
    pending: Vec<Timer>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the timers were created.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Fire `kind` once after `delay`. Replace any pending timer of the same kind.
    pub fn schedule(&mut self, kind: TimerKind, delay: Duration) {
        self.cancel(kind);
        self.pending.push(Timer {
            kind,
            due: self.now + delay,
            period: None,
        });
    }

    /// Fire `kind` every `period`. Replace any pending timer of the same kind.
    pub fn schedule_repeating(&mut self, kind: TimerKind, period: Duration) {
        let period: Duration = period.max(Duration::from_millis(1));
        self.cancel(kind);
        self.pending.push(Timer {
            kind,
            due: self.now + period,
            period: Some(period),
        });
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        self.pending.retain(|t| t.kind != kind);
    }

    pub fn cancel_all(&mut self) {
        if !self.pending.is_empty() {
            debug!("Cancelling {} timers", self.pending.len());
        }
        self.pending.clear();
    }

    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.pending.iter().any(|t| t.kind == kind)
    }

    /// Return the next timer due at or before `until` and move the clock to its deadline.
    ///
    /// Timers due at the same time fire in scheduling order. Repeating timers are
    /// rescheduled. Return None when no timer is due; call [`Timers::settle`] then.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerKind> {
        let index: usize = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(i, t)| (t.due, *i))
            .map(|(i, _)| i)?;

        let timer: Timer = self.pending.remove(index);
        self.now = self.now.max(timer.due);
        if let Some(period) = timer.period {
            self.pending.push(Timer {
                kind: timer.kind,
                due: timer.due + period,
                period: timer.period,
            });
        }
        Some(timer.kind)
    }

    /// Move the clock to `until` once all due timers have fired.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fire_all(timers: &mut Timers, elapsed: Duration) -> Vec<TimerKind> {
        let until: Duration = timers.now() + elapsed;
        let mut fired: Vec<TimerKind> = Vec::new();
        while let Some(kind) = timers.pop_due(until) {
            fired.push(kind);
        }
        timers.settle(until);
        fired
    }

    #[test]
    fn one_shot_fires_once() {
        let mut timers: Timers = Timers::new();
        timers.schedule(TimerKind::Reveal, Duration::from_millis(1000));
        assert!(fire_all(&mut timers, Duration::from_millis(999)).is_empty());
        assert_eq!(
            fire_all(&mut timers, Duration::from_millis(1)),
            vec![TimerKind::Reveal]
        );
        assert!(!timers.is_pending(TimerKind::Reveal));
        assert!(fire_all(&mut timers, Duration::from_secs(10)).is_empty());
    }

    #[test]
    fn repeating_timers_interleave_by_deadline() {
        let mut timers: Timers = Timers::new();
        timers.schedule_repeating(TimerKind::Countdown, Duration::from_millis(1000));
        timers.schedule_repeating(TimerKind::Spawn, Duration::from_millis(800));
        let fired: Vec<TimerKind> = fire_all(&mut timers, Duration::from_millis(2400));
        assert_eq!(
            fired,
            vec![
                TimerKind::Spawn,
                TimerKind::Countdown,
                TimerKind::Spawn,
                TimerKind::Countdown,
                TimerKind::Spawn,
            ]
        );
        assert_eq!(timers.now(), Duration::from_millis(2400));
    }

    #[test]
    fn cancelled_timers_never_fire() {
        let mut timers: Timers = Timers::new();
        timers.schedule_repeating(TimerKind::Countdown, Duration::from_secs(1));
        timers.schedule(TimerKind::Celebration, Duration::from_secs(2));
        timers.cancel_all();
        assert!(fire_all(&mut timers, Duration::from_secs(60)).is_empty());
    }

    #[test]
    fn rescheduling_replaces_the_pending_timer() {
        let mut timers: Timers = Timers::new();
        timers.schedule(TimerKind::Reveal, Duration::from_secs(1));
        timers.schedule(TimerKind::Reveal, Duration::from_secs(3));
        assert!(fire_all(&mut timers, Duration::from_secs(2)).is_empty());
        assert_eq!(
            fire_all(&mut timers, Duration::from_secs(1)),
            vec![TimerKind::Reveal]
        );
    }
}
