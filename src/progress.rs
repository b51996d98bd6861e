/*
progress.rs

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

//! Durable progress of the player through the eight levels.
//!
//! The [`ProgressTracker`] owns the [`ProgressRecord`]. Every mutation goes through the
//! tracker, which persists the full record after each change. The record is read once, when
//! the tracker is created.

use chrono::{DateTime, Local};
use clap::ValueEnum;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt;

use crate::config::{LEVEL_COUNT, PROGRESS_KEY};
use crate::saver::{self, Storage, timestamp};

/// Hero picked on the home screen.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default, Hash, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum HeroKind {
    #[default]
    Girl,
    Boy,
}

impl HeroKind {
    /// Name given to the player when they pick this hero.
    pub fn default_name(self) -> &'static str {
        match self {
            HeroKind::Girl => "小勇者",
            HeroKind::Boy => "小勇士",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            HeroKind::Girl => "👧",
            HeroKind::Boy => "👦",
        }
    }
}

impl fmt::Display for HeroKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HeroKind::Girl => write!(f, "girl"),
            HeroKind::Boy => write!(f, "boy"),
        }
    }
}

/// Hero and name of the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerProfile {
    pub hero: HeroKind,
    pub display_name: String,
}

impl PlayerProfile {
    pub fn new(hero: HeroKind) -> Self {
        Self {
            hero,
            display_name: hero.default_name().to_string(),
        }
    }
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self::new(HeroKind::default())
    }
}

/// Progress through the levels.
///
/// The completed levels are always a subset of `1..=current_level`, and `finished_at` is only
/// set when all the levels are completed.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressRecord {
    /// Level the player plays next, from 1 to [`LEVEL_COUNT`].
    pub current_level: u8,
    pub completed_levels: BTreeSet<u8>,
    pub profile: PlayerProfile,
    pub started_at: Option<DateTime<Local>>,
    pub finished_at: Option<DateTime<Local>>,
}

impl Default for ProgressRecord {
    fn default() -> Self {
        Self {
            current_level: 1,
            completed_levels: BTreeSet::new(),
            profile: PlayerProfile::default(),
            started_at: None,
            finished_at: None,
        }
    }
}

impl ProgressRecord {
    /// Whether every level has been completed.
    pub fn all_completed(&self) -> bool {
        (1..=LEVEL_COUNT).all(|l| self.completed_levels.contains(&l))
    }

    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    /// Check the consistency rules of the record.
    pub fn is_valid(&self) -> bool {
        (1..=LEVEL_COUNT).contains(&self.current_level)
            && self
                .completed_levels
                .iter()
                .all(|l| (1..=self.current_level).contains(l))
            && (self.finished_at.is_none() || self.all_completed())
    }
}

/// Stored form of the [`ProgressRecord`].
///
/// Missing and null fields fall back to their default values.
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct StoredProgress {
    #[serde(default)]
    current_level: Option<u8>,

    #[serde(default)]
    completed_levels: Option<Vec<u8>>,

    #[serde(default)]
    current_hero: Option<HeroKind>,

    #[serde(default)]
    player_name: Option<String>,

    #[serde(default, with = "timestamp")]
    start_time: Option<DateTime<Local>>,

    #[serde(default, with = "timestamp")]
    end_time: Option<DateTime<Local>>,
}

impl From<&ProgressRecord> for StoredProgress {
    fn from(record: &ProgressRecord) -> Self {
        Self {
            current_level: Some(record.current_level),
            completed_levels: Some(record.completed_levels.iter().copied().collect()),
            current_hero: Some(record.profile.hero),
            player_name: Some(record.profile.display_name.clone()),
            start_time: record.started_at,
            end_time: record.finished_at,
        }
    }
}

impl From<StoredProgress> for ProgressRecord {
    fn from(stored: StoredProgress) -> Self {
        let hero: HeroKind = stored.current_hero.unwrap_or_default();
        let display_name: String = match stored.player_name {
            Some(name) if !name.is_empty() => name,
            _ => hero.default_name().to_string(),
        };

        Self {
            current_level: match stored.current_level {
                Some(0) | None => 1,
                Some(l) => l,
            },
            completed_levels: stored.completed_levels.unwrap_or_default().into_iter().collect(),
            profile: PlayerProfile { hero, display_name },
            started_at: stored.start_time,
            finished_at: stored.end_time,
        }
    }
}

/// Error type for the progress operations that cannot apply.
#[derive(Debug, PartialEq)]
pub enum ProgressError {
    /// The level is not between 1 and the current level.
    LevelOutOfRange(u8),

    /// The current level must be completed before moving to the next one.
    LevelNotCompleted(u8),

    /// Some levels are still to be completed.
    Incomplete(usize),
}

impl fmt::Display for ProgressError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProgressError::LevelOutOfRange(l) => write!(f, "Level {l} is out of range"),
            ProgressError::LevelNotCompleted(l) => write!(f, "Level {l} is not completed"),
            ProgressError::Incomplete(n) => write!(f, "{n} levels are not completed"),
        }
    }
}

impl Error for ProgressError {}

/// Owner of the [`ProgressRecord`].
#[derive(Debug)]
pub struct ProgressTracker<S: Storage> {
    storage: S,
    record: ProgressRecord,
}

impl<S: Storage> ProgressTracker<S> {
    /// Read the stored record.
    ///
    /// A missing record starts a new game. A record that cannot be read, or that is not
    /// consistent, is deleted and a new game starts. A run with every level completed but
    /// no end time is finished on the spot.
    pub fn load(mut storage: S) -> Self {
        let record: ProgressRecord =
            match saver::load_json::<StoredProgress, S>(&storage, PROGRESS_KEY) {
                Ok(Some(stored)) => {
                    let record: ProgressRecord = stored.into();
                    if record.is_valid() {
                        debug!(
                            "Progress restored: level {}, {} levels completed",
                            record.current_level,
                            record.completed_levels.len()
                        );
                        record
                    } else {
                        warn!("Inconsistent progress record, starting a new game");
                        storage.remove(PROGRESS_KEY);
                        ProgressRecord::default()
                    }
                }
                Ok(None) => {
                    debug!("No saved progress");
                    ProgressRecord::default()
                }
                Err(e) => {
                    warn!("Cannot read the saved progress: {e}");
                    storage.remove(PROGRESS_KEY);
                    ProgressRecord::default()
                }
            };
        let mut tracker: Self = Self { storage, record };
        if tracker.record.all_completed() && !tracker.record.is_finished() {
            debug!("Every level is completed, closing the run");
            let _ = tracker.finalize();
        }
        tracker
    }

    pub fn record(&self) -> &ProgressRecord {
        &self.record
    }

    pub fn profile(&self) -> &PlayerProfile {
        &self.record.profile
    }

    pub fn current_level(&self) -> u8 {
        self.record.current_level
    }

    /// Storage for the other records of the game.
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Persist the full record.
    ///
    /// A write failure is logged and the game goes on with the record in memory.
    pub fn save(&mut self) {
        let stored: StoredProgress = (&self.record).into();
        if let Err(e) = saver::save_json(&mut self.storage, PROGRESS_KEY, &stored) {
            warn!("Cannot save the progress: {e}");
        }
    }

    /// Pick the hero. The player name becomes the hero's default name.
    pub fn select_hero(&mut self, hero: HeroKind) {
        self.record.profile = PlayerProfile::new(hero);
        self.save();
    }

    /// Record the start of the run. Only the first call stamps the start time.
    pub fn start(&mut self) {
        if self.record.started_at.is_none() {
            self.record.started_at = Some(Local::now());
            self.save();
        }
    }

    /// Mark the level as completed.
    ///
    /// Return whether the level was newly completed. Completing a level twice changes nothing.
    pub fn record_completion(&mut self, level: u8) -> Result<bool, ProgressError> {
        if level == 0 || level > self.record.current_level {
            return Err(ProgressError::LevelOutOfRange(level));
        }
        if !self.record.completed_levels.insert(level) {
            return Ok(false);
        }
        info!("Level {level} completed");
        self.save();
        Ok(true)
    }

    /// Move to the next level.
    ///
    /// Return false when the current level is already the last one.
    pub fn advance(&mut self) -> Result<bool, ProgressError> {
        let level: u8 = self.record.current_level;
        if !self.record.completed_levels.contains(&level) {
            return Err(ProgressError::LevelNotCompleted(level));
        }
        if level >= LEVEL_COUNT {
            return Ok(false);
        }
        self.record.current_level += 1;
        self.save();
        Ok(true)
    }

    /// Stamp the end of the run.
    ///
    /// Return false when the run was already finished.
    pub fn finalize(&mut self) -> Result<bool, ProgressError> {
        if !self.record.all_completed() {
            return Err(ProgressError::Incomplete(
                LEVEL_COUNT as usize - self.record.completed_levels.len(),
            ));
        }
        if self.record.is_finished() {
            return Ok(false);
        }
        self.record.finished_at = Some(Local::now());
        info!("All levels completed");
        self.save();
        Ok(true)
    }

    /// Start over: restore the defaults and delete the stored record.
    pub fn reset(&mut self) {
        info!("Resetting the progress");
        self.record = ProgressRecord::default();
        self.storage.remove(PROGRESS_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::saver::memory::MemoryStorage;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn tracker() -> ProgressTracker<MemoryStorage> {
        ProgressTracker::load(MemoryStorage::new())
    }

    #[test]
    fn missing_record_gives_defaults() {
        let t: ProgressTracker<MemoryStorage> = tracker();
        assert_eq!(t.record(), &ProgressRecord::default());
        assert_eq!(t.profile().display_name, "小勇者");
    }

    #[test]
    fn record_completion_is_idempotent() {
        let mut t: ProgressTracker<MemoryStorage> = tracker();
        assert_eq!(t.record_completion(1), Ok(true));
        let once: ProgressRecord = t.record().clone();
        assert_eq!(t.record_completion(1), Ok(false));
        assert_eq!(t.record(), &once);
    }

    #[test]
    fn levels_beyond_the_current_one_are_rejected() {
        let mut t: ProgressTracker<MemoryStorage> = tracker();
        assert_eq!(t.record_completion(2), Err(ProgressError::LevelOutOfRange(2)));
        assert_eq!(t.record_completion(0), Err(ProgressError::LevelOutOfRange(0)));
        assert_eq!(t.advance(), Err(ProgressError::LevelNotCompleted(1)));
        assert!(t.record().completed_levels.is_empty());
    }

    #[test]
    fn completed_levels_stay_below_the_current_level() {
        let mut rng: StdRng = StdRng::seed_from_u64(7);
        let mut t: ProgressTracker<MemoryStorage> = tracker();
        for _ in 0..500 {
            match rng.random_range(0..4) {
                0 => {
                    let _ = t.record_completion(rng.random_range(0..=LEVEL_COUNT + 1));
                }
                1 => {
                    let _ = t.advance();
                }
                2 => {
                    let _ = t.finalize();
                }
                _ => {
                    if rng.random_bool(0.05) {
                        t.reset();
                    }
                }
            }
            assert!(t.record().is_valid(), "{:?}", t.record());
        }
    }

    #[test]
    fn full_run_finalizes_once() {
        let mut t: ProgressTracker<MemoryStorage> = tracker();
        t.start();
        assert_eq!(t.finalize(), Err(ProgressError::Incomplete(8)));
        for level in 1..=LEVEL_COUNT {
            assert_eq!(t.record_completion(level), Ok(true));
            assert_eq!(t.advance(), Ok(level < LEVEL_COUNT));
        }
        assert_eq!(t.current_level(), LEVEL_COUNT);
        assert_eq!(t.finalize(), Ok(true));
        let finished: Option<DateTime<Local>> = t.record().finished_at;
        assert!(finished.is_some());
        assert_eq!(t.finalize(), Ok(false));
        assert_eq!(t.record().finished_at, finished);
    }

    #[test]
    fn save_then_load_gives_the_same_record() {
        let storage: MemoryStorage = MemoryStorage::new();
        let mut t: ProgressTracker<MemoryStorage> = ProgressTracker::load(storage.clone());
        t.select_hero(HeroKind::Boy);
        t.start();
        t.record_completion(1).unwrap();
        t.advance().unwrap();
        t.record_completion(2).unwrap();

        let restored: ProgressTracker<MemoryStorage> = ProgressTracker::load(storage);
        let (a, b) = (t.record(), restored.record());
        assert_eq!(a.current_level, b.current_level);
        assert_eq!(a.completed_levels, b.completed_levels);
        assert_eq!(a.profile, b.profile);
        assert_eq!(
            a.started_at.map(|t| t.timestamp()),
            b.started_at.map(|t| t.timestamp())
        );
        assert_eq!(b.profile.display_name, "小勇士");
        assert_eq!(b.finished_at, None);
    }

    #[test]
    fn finished_run_survives_a_reload() {
        let storage: MemoryStorage = MemoryStorage::new();
        let mut t: ProgressTracker<MemoryStorage> = ProgressTracker::load(storage.clone());
        t.select_hero(HeroKind::Boy);
        t.start();
        for level in 1..=LEVEL_COUNT {
            t.record_completion(level).unwrap();
            t.advance().unwrap();
        }
        assert_eq!(t.finalize(), Ok(true));

        let mut restored: ProgressTracker<MemoryStorage> = ProgressTracker::load(storage);
        let (a, b) = (t.record(), restored.record());
        assert_eq!(a.current_level, b.current_level);
        assert_eq!(a.completed_levels, b.completed_levels);
        assert_eq!(a.profile, b.profile);
        assert!(b.finished_at.is_some());
        assert_eq!(
            a.finished_at.map(|t| t.timestamp()),
            b.finished_at.map(|t| t.timestamp())
        );
        assert_eq!(restored.finalize(), Ok(false));
    }

    #[test]
    fn completed_run_without_end_time_is_finished_on_load() {
        let mut storage: MemoryStorage = MemoryStorage::new();
        storage
            .write(
                PROGRESS_KEY,
                r#"{"currentLevel": 8, "completedLevels": [1, 2, 3, 4, 5, 6, 7, 8]}"#,
            )
            .unwrap();
        let t: ProgressTracker<MemoryStorage> = ProgressTracker::load(storage.clone());
        assert!(t.record().all_completed());
        assert!(t.record().is_finished());

        let data: String = storage.read(PROGRESS_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&data).unwrap();
        assert!(value["endTime"].is_string());
    }

    #[test]
    fn stored_shape() {
        let storage: MemoryStorage = MemoryStorage::new();
        let mut t: ProgressTracker<MemoryStorage> = ProgressTracker::load(storage.clone());
        t.record_completion(1).unwrap();
        let data: String = storage.read(PROGRESS_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&data).unwrap();
        assert_eq!(value["currentLevel"], 1);
        assert_eq!(value["completedLevels"], serde_json::json!([1]));
        assert_eq!(value["currentHero"], "girl");
        assert_eq!(value["playerName"], "小勇者");
        assert!(value["startTime"].is_null());
        assert!(value["endTime"].is_null());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let mut storage: MemoryStorage = MemoryStorage::new();
        storage
            .write(PROGRESS_KEY, r#"{"currentLevel": 3, "completedLevels": [1, 2]}"#)
            .unwrap();
        let t: ProgressTracker<MemoryStorage> = ProgressTracker::load(storage);
        assert_eq!(t.current_level(), 3);
        assert_eq!(t.profile(), &PlayerProfile::default());
        assert_eq!(t.record().started_at, None);
    }

    #[test]
    fn malformed_records_are_discarded() {
        for data in [
            "{broken",
            r#"{"currentLevel": "three"}"#,
            r#"{"currentLevel": 12}"#,
            r#"{"currentLevel": 2, "completedLevels": [5]}"#,
            r#"{"currentHero": "robot"}"#,
            r#"{"currentLevel": 8, "completedLevels": [1], "endTime": "2025-06-01T10:00:00+02:00"}"#,
        ] {
            let mut storage: MemoryStorage = MemoryStorage::new();
            storage.write(PROGRESS_KEY, data).unwrap();
            let t: ProgressTracker<MemoryStorage> = ProgressTracker::load(storage.clone());
            assert_eq!(t.record(), &ProgressRecord::default(), "{data}");
            assert_eq!(storage.read(PROGRESS_KEY).unwrap(), None, "{data}");
        }
    }

    #[test]
    fn reset_deletes_the_record() {
        let storage: MemoryStorage = MemoryStorage::new();
        let mut t: ProgressTracker<MemoryStorage> = ProgressTracker::load(storage.clone());
        t.record_completion(1).unwrap();
        assert!(!storage.is_empty());
        t.reset();
        assert!(storage.is_empty());
        assert_eq!(t.record(), &ProgressRecord::default());
    }
}
