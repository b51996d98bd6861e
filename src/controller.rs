/*
controller.rs

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

//! Drive a run through the eight levels.
//!
//! The [`GameController`] ties the level state machine to the durable progress. It loads the
//! current level, records the completions and the best times, moves to the next level after
//! the victory animation, and issues the certificate when the last level is done.
//!
//! The controller sends the sound effects on an [`async_channel`] so that the audio player
//! never slows down the game. A full or closed channel drops the cue.

use async_channel::Sender;
use chrono::{DateTime, Local};
use log::{debug, info, warn};
use rand::Rng;
use rand::seq::IndexedRandom;
use std::error::Error;
use std::fmt;
use std::time::Duration;

use crate::config::LEVEL_COUNT;
use crate::events::{Cue, LevelEvent};
use crate::game::LevelStateMachine;
use crate::generator::GeneratorError;
use crate::level::LevelKind;
use crate::preferences::Preferences;
use crate::progress::{HeroKind, ProgressRecord, ProgressTracker};
use crate::records::{LevelRecords, Score};
use crate::saver::Storage;
use crate::validator::{Action, ActionError};

/// Messages shown on the victory overlay.
pub const ENCOURAGEMENTS: [&str; 8] = [
    "你真聪明！",
    "太棒了！",
    "继续加油！",
    "真厉害！",
    "做得好！",
    "加油加油！",
    "你真棒！",
    "再加把劲！",
];

/// Screen on display.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Hero selection and start button.
    Home,
    Level,
    Certificate,
}

/// Completion certificate.
#[derive(Debug, Clone, PartialEq)]
pub struct Certificate {
    pub player_name: String,
    pub hero: HeroKind,
    pub completed_at: DateTime<Local>,
}

/// Receiver of the completion certificate, such as an image exporter.
pub trait CertificateIssuer {
    fn issue(&mut self, certificate: &Certificate);
}

/// Error type for the controller operations.
#[derive(Debug, PartialEq)]
pub enum GameError {
    /// The operation is not available on the current screen.
    WrongScreen(Screen),
    Generator(GeneratorError),
    Action(ActionError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameError::WrongScreen(s) => write!(f, "Not available on the {s:?} screen"),
            GameError::Generator(e) => write!(f, "Cannot generate the level: {e}"),
            GameError::Action(e) => write!(f, "{e}"),
        }
    }
}

impl Error for GameError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GameError::WrongScreen(_) => None,
            GameError::Generator(e) => Some(e),
            GameError::Action(e) => Some(e),
        }
    }
}

impl From<GeneratorError> for GameError {
    fn from(e: GeneratorError) -> Self {
        GameError::Generator(e)
    }
}

impl From<ActionError> for GameError {
    fn from(e: ActionError) -> Self {
        GameError::Action(e)
    }
}

/// Summary for the parents.
#[derive(Debug, Clone)]
pub struct GuardianReport {
    pub player_name: String,
    pub hero: HeroKind,
    pub current_level: u8,
    pub completed: usize,
    pub started_at: Option<DateTime<Local>>,
    pub finished_at: Option<DateTime<Local>>,

    /// Best completions of each level, fastest first.
    pub records: Vec<(LevelKind, Vec<Score>)>,
}

impl fmt::Display for GuardianReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let stamp = |t: &Option<DateTime<Local>>| match t {
            Some(t) => t.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => "-".to_string(),
        };

        writeln!(f, "Player: {} {}", self.hero.symbol(), self.player_name)?;
        writeln!(f, "Completed levels: {}/{LEVEL_COUNT}", self.completed)?;
        writeln!(f, "Current level: {}", self.current_level)?;
        writeln!(f, "Started: {}", stamp(&self.started_at))?;
        writeln!(f, "Finished: {}", stamp(&self.finished_at))?;
        for (kind, scores) in &self.records {
            let times: Vec<String> = scores
                .iter()
                .map(|s| format!("{}s ({} mistakes)", s.time.as_secs(), s.mistakes))
                .collect();
            writeln!(f, "Level {} {kind}: {}", kind.number(), times.join(", "))?;
        }
        Ok(())
    }
}

/// Run through the levels.
pub struct GameController<S: Storage, R: Rng> {
    tracker: ProgressTracker<S>,
    records: LevelRecords,
    preferences: Preferences,
    machine: LevelStateMachine,
    rng: R,
    screen: Screen,
    audio: Option<Sender<Cue>>,
    issuer: Option<Box<dyn CertificateIssuer>>,
}

impl<S: Storage, R: Rng> GameController<S, R> {
    /// Create a [`GameController`] object and restore the saved progress.
    pub fn new(storage: S, rng: R) -> Self {
        let records: LevelRecords = LevelRecords::load(&storage);
        let preferences: Preferences = Preferences::load(&storage);
        Self {
            tracker: ProgressTracker::load(storage),
            records,
            preferences,
            machine: LevelStateMachine::new(),
            rng,
            screen: Screen::Home,
            audio: None,
            issuer: None,
        }
    }

    /// Send the sound effects to the given channel.
    pub fn with_audio(mut self, sender: Sender<Cue>) -> Self {
        self.audio = Some(sender);
        self
    }

    pub fn with_certificate_issuer(mut self, issuer: Box<dyn CertificateIssuer>) -> Self {
        self.issuer = Some(issuer);
        self
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn progress(&self) -> &ProgressRecord {
        self.tracker.record()
    }

    pub fn machine(&self) -> &LevelStateMachine {
        &self.machine
    }

    pub fn records(&self) -> &LevelRecords {
        &self.records
    }

    pub fn preferences(&self) -> Preferences {
        self.preferences
    }

    /// Certificate of a finished run.
    pub fn certificate(&self) -> Option<Certificate> {
        let record: &ProgressRecord = self.tracker.record();
        record.finished_at.map(|completed_at| Certificate {
            player_name: record.profile.display_name.clone(),
            hero: record.profile.hero,
            completed_at,
        })
    }

    /// Pick the hero on the home screen.
    pub fn select_hero(&mut self, hero: HeroKind) -> Result<(), GameError> {
        if self.screen != Screen::Home {
            return Err(GameError::WrongScreen(self.screen));
        }
        self.tracker.select_hero(hero);
        Ok(())
    }

    /// Leave the home screen and play the current level.
    ///
    /// When every level is already completed, go to the certificate screen instead.
    pub fn start(&mut self) -> Result<Vec<LevelEvent>, GameError> {
        if self.screen == Screen::Level {
            return Err(GameError::WrongScreen(self.screen));
        }
        self.tracker.start();
        if self.tracker.record().all_completed() {
            return Ok(self.finish());
        }
        self.load_current_level()
    }

    fn load_current_level(&mut self) -> Result<Vec<LevelEvent>, GameError> {
        let level: u8 = self.tracker.current_level();
        let Some(kind) = LevelKind::from_level(level) else {
            // The tracker keeps the level in range
            return Err(GameError::WrongScreen(self.screen));
        };
        let events: Vec<LevelEvent> = self.machine.load(kind, &mut self.rng)?;
        self.screen = Screen::Level;
        Ok(events)
    }

    /// Stamp the end of the run and issue the certificate the first time.
    fn finish(&mut self) -> Vec<LevelEvent> {
        self.machine.abandon();
        self.screen = Screen::Certificate;
        match self.tracker.finalize() {
            Ok(true) => {
                if let (Some(certificate), Some(issuer)) = (self.certificate(), &mut self.issuer) {
                    info!("Issuing the certificate");
                    issuer.issue(&certificate);
                }
            }
            Ok(false) => debug!("Run already finished"),
            Err(e) => warn!("Cannot finish the run: {e}"),
        }
        vec![LevelEvent::Finished {
            player_name: self.tracker.profile().display_name.clone(),
        }]
    }

    /// Route a player action to the level on screen.
    pub fn handle_action(&mut self, action: Action) -> Result<Vec<LevelEvent>, GameError> {
        if self.screen != Screen::Level {
            return Err(GameError::WrongScreen(self.screen));
        }
        let mut events: Vec<LevelEvent> = self.machine.handle_action(action)?;

        let solved: Option<(u8, Duration, usize)> = events.iter().find_map(|e| match e {
            LevelEvent::Succeeded {
                level,
                duration,
                mistakes,
            } => Some((*level, *duration, *mistakes)),
            _ => None,
        });
        if let Some((level, duration, mistakes)) = solved {
            if let Err(e) = self.tracker.record_completion(level) {
                warn!("Cannot record the completion of level {level}: {e}");
            }
            if let Some(position) = self.records.add_score(level, duration, mistakes) {
                debug!("Level {level} record at position {position}");
                self.records.save(self.tracker.storage_mut());
            }
            let message: &'static str = ENCOURAGEMENTS
                .choose(&mut self.rng)
                .copied()
                .unwrap_or(ENCOURAGEMENTS[0]);
            events.push(LevelEvent::Celebrate { message });
        }

        self.play(&events);
        Ok(events)
    }

    /// Move the clock forward.
    ///
    /// When the victory animation ends, load the next level, or finish the run after the last
    /// one.
    pub fn advance(&mut self, elapsed: Duration) -> Result<Vec<LevelEvent>, GameError> {
        let mut events: Vec<LevelEvent> = self.machine.advance(elapsed);
        self.play(&events);

        let celebrated: Option<LevelKind> = events.iter().find_map(|e| match e {
            LevelEvent::CelebrationDone { level } => LevelKind::from_level(*level),
            _ => None,
        });
        if let Some(kind) = celebrated {
            if kind.is_last() {
                events.extend(self.finish());
            } else {
                match self.tracker.advance() {
                    Ok(_) => events.extend(self.load_current_level()?),
                    Err(e) => {
                        warn!("Cannot move to the next level: {e}");
                        self.screen = Screen::Home;
                    }
                }
            }
        }
        Ok(events)
    }

    /// Play the failed level again.
    pub fn retry(&mut self) -> Result<Vec<LevelEvent>, GameError> {
        if self.screen != Screen::Level {
            return Err(GameError::WrongScreen(self.screen));
        }
        Ok(self.machine.retry(&mut self.rng)?)
    }

    /// Leave the level. The progress is kept and `start` resumes at the current level.
    pub fn go_home(&mut self) {
        self.machine.abandon();
        self.screen = Screen::Home;
    }

    /// Start over from the first level.
    pub fn restart(&mut self) {
        self.machine.abandon();
        self.tracker.reset();
        self.screen = Screen::Home;
    }

    /// Turn the sound effects on or off and return the new setting.
    pub fn toggle_sound(&mut self) -> bool {
        self.preferences.sound_enabled = !self.preferences.sound_enabled;
        info!(
            "Sound {}",
            if self.preferences.sound_enabled {
                "on"
            } else {
                "off"
            }
        );
        self.preferences.save(self.tracker.storage_mut());
        self.preferences.sound_enabled
    }

    pub fn guardian_report(&self) -> GuardianReport {
        let record: &ProgressRecord = self.tracker.record();
        GuardianReport {
            player_name: record.profile.display_name.clone(),
            hero: record.profile.hero,
            current_level: record.current_level,
            completed: record.completed_levels.len(),
            started_at: record.started_at,
            finished_at: record.finished_at,
            records: LevelKind::ALL
                .iter()
                .filter_map(|k| self.records.get(k.number()).map(|s| (*k, s.to_vec())))
                .collect(),
        }
    }

    /// Send the sound effects of the events to the audio player.
    fn play(&self, events: &[LevelEvent]) {
        if !self.preferences.sound_enabled {
            return;
        }
        let Some(sender) = &self.audio else {
            return;
        };
        for event in events {
            if let LevelEvent::Cue(cue) = event
                && let Err(e) = sender.try_send(*cue)
            {
                debug!("Sound effect {cue:?} dropped: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autoplay;
    use crate::game::LevelStatus;
    use crate::saver::memory::MemoryStorage;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Controller = GameController<MemoryStorage, StdRng>;

    fn controller(storage: &MemoryStorage, seed: u64) -> Controller {
        GameController::new(storage.clone(), StdRng::seed_from_u64(seed))
    }

    /// Solve the level on screen and wait for the victory animation.
    fn solve_level(c: &mut Controller) -> Vec<LevelEvent> {
        let mut events: Vec<LevelEvent> = Vec::new();
        for _ in 0..2000 {
            if c.machine().status() == LevelStatus::Succeeded {
                break;
            }
            let next: Option<Action> = match (c.machine().instance(), c.machine().progress()) {
                (Some(i), Some(p)) => autoplay::next_action(i, p),
                _ => None,
            };
            match next {
                Some(action) => events.extend(c.handle_action(action).unwrap()),
                None => events.extend(c.advance(Duration::from_millis(100)).unwrap()),
            }
        }
        events.extend(c.advance(Duration::from_secs(2)).unwrap());
        events
    }

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<Certificate>>>);

    impl CertificateIssuer for Recorder {
        fn issue(&mut self, certificate: &Certificate) {
            self.0.borrow_mut().push(certificate.clone());
        }
    }

    #[test]
    fn completed_level_moves_to_the_next_one() {
        let storage: MemoryStorage = MemoryStorage::new();
        let mut c: Controller = controller(&storage, 1);
        assert_eq!(
            c.handle_action(Action::Select(0)),
            Err(GameError::WrongScreen(Screen::Home))
        );
        let events: Vec<LevelEvent> = c.start().unwrap();
        assert!(events.contains(&LevelEvent::Started { level: 1 }));
        assert!(c.progress().started_at.is_some());

        let events: Vec<LevelEvent> = solve_level(&mut c);
        assert!(events.iter().any(|e| matches!(e, LevelEvent::Celebrate { .. })));
        assert!(events.contains(&LevelEvent::CelebrationDone { level: 1 }));
        assert!(events.contains(&LevelEvent::Started { level: 2 }));
        assert_eq!(c.progress().current_level, 2);
        assert!(c.progress().completed_levels.contains(&1));
        assert!(c.records().get(1).is_some());
    }

    #[test]
    fn going_home_keeps_the_progress() {
        let storage: MemoryStorage = MemoryStorage::new();
        let mut c: Controller = controller(&storage, 2);
        c.start().unwrap();
        solve_level(&mut c);
        c.go_home();
        assert_eq!(c.screen(), Screen::Home);
        assert_eq!(c.machine().status(), LevelStatus::Idle);
        assert_eq!(c.progress().current_level, 2);

        let mut resumed: Controller = controller(&storage, 3);
        let events: Vec<LevelEvent> = resumed.start().unwrap();
        assert!(events.contains(&LevelEvent::Started { level: 2 }));
    }

    #[test]
    fn hero_is_picked_on_the_home_screen() {
        let storage: MemoryStorage = MemoryStorage::new();
        let mut c: Controller = controller(&storage, 4);
        c.select_hero(HeroKind::Boy).unwrap();
        assert_eq!(c.progress().profile.display_name, "小勇士");
        c.start().unwrap();
        assert_eq!(
            c.select_hero(HeroKind::Girl),
            Err(GameError::WrongScreen(Screen::Level))
        );
    }

    #[test]
    fn full_run_issues_one_certificate() {
        let storage: MemoryStorage = MemoryStorage::new();
        let issued: Recorder = Recorder::default();
        let mut c: Controller =
            controller(&storage, 5).with_certificate_issuer(Box::new(issued.clone()));
        c.start().unwrap();
        for _ in 0..LEVEL_COUNT {
            solve_level(&mut c);
        }
        assert_eq!(c.screen(), Screen::Certificate);
        assert!(c.progress().is_finished());
        assert_eq!(issued.0.borrow().len(), 1);
        assert_eq!(issued.0.borrow()[0].player_name, "小勇者");

        // Starting again shows the certificate without issuing it twice
        c.go_home();
        let events: Vec<LevelEvent> = c.start().unwrap();
        assert_eq!(
            events,
            vec![LevelEvent::Finished {
                player_name: "小勇者".to_string()
            }]
        );
        assert_eq!(issued.0.borrow().len(), 1);
        assert_eq!(c.guardian_report().completed, 8);
    }

    #[test]
    fn restart_clears_the_progress() {
        let storage: MemoryStorage = MemoryStorage::new();
        let mut c: Controller = controller(&storage, 6);
        c.start().unwrap();
        solve_level(&mut c);
        c.restart();
        assert_eq!(c.screen(), Screen::Home);
        assert_eq!(c.progress(), &ProgressRecord::default());
        assert_eq!(controller(&storage, 7).progress(), &ProgressRecord::default());
    }

    #[test]
    fn cues_follow_the_sound_setting() {
        let storage: MemoryStorage = MemoryStorage::new();
        let (sender, receiver) = async_channel::unbounded::<Cue>();
        let mut c: Controller = controller(&storage, 8).with_audio(sender);
        c.start().unwrap();
        let Some(crate::generator::LevelInstance::OddOneOut(o)) = c.machine().instance().cloned()
        else {
            panic!("level 1 is not an odd-one-out level");
        };
        let wrong: usize = (o.odd_index + 1) % 5;

        c.handle_action(Action::Select(wrong)).unwrap();
        assert_eq!(receiver.try_recv(), Ok(Cue::Fail));

        assert!(!c.toggle_sound());
        assert!(!controller(&storage, 9).preferences().sound_enabled);
        c.handle_action(Action::Select(wrong)).unwrap();
        assert!(receiver.try_recv().is_err());

        assert!(c.toggle_sound());
        c.handle_action(Action::Select(o.odd_index)).unwrap();
        assert_eq!(receiver.try_recv(), Ok(Cue::Victory));
    }

    #[test]
    fn guardian_report_lists_the_records() {
        let storage: MemoryStorage = MemoryStorage::new();
        let mut c: Controller = controller(&storage, 10);
        c.start().unwrap();
        solve_level(&mut c);
        let report: GuardianReport = c.guardian_report();
        assert_eq!(report.completed, 1);
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].0, LevelKind::OddOneOut);
        let text: String = report.to_string();
        assert!(text.contains("Completed levels: 1/8"));
        assert!(text.contains("Finished: -"));
    }
}
