/*
config.rs

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

//! Application constants and data directory resolution.

use std::path::PathBuf;
use std::time::Duration;

/// Application identifier. Also the name of the data directory.
pub const APPLICATION_ID: &str = "io.github.herve4m.LittleHero";

pub const COPYRIGHT_NOTICE: &str = "Copyright (C) 2025 Hervé Quatremain
License GPLv3+: GNU GPL version 3 or later <https://gnu.org/licenses/gpl.html>
This is free software: you are free to change and redistribute it.
There is NO WARRANTY, to the extent permitted by law.";

/// Storage key of the progress record.
pub const PROGRESS_KEY: &str = "littleHeroProgress";

/// Storage key of the per-level records (best times).
pub const RECORDS_KEY: &str = "records";

/// Storage key of the player preferences.
pub const PREFERENCES_KEY: &str = "preferences";

/// Number of levels in a run.
pub const LEVEL_COUNT: u8 = 8;

/// How long two mismatched memory cards stay face up.
pub const REVEAL_DELAY: Duration = Duration::from_millis(1000);

/// Duration of the victory animation between two levels.
pub const CELEBRATION_DELAY: Duration = Duration::from_millis(2000);

/// Period of the boss level countdown.
pub const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

/// Width and height of the maze grid, walls included. Must be odd.
pub const MAZE_SIZE: usize = 13;

/// Return the directory where the records are saved.
///
/// The `--data-dir` option takes precedence over the user data directory of the platform.
pub fn data_dir(requested: Option<PathBuf>) -> PathBuf {
    match requested {
        Some(dir) => dir,
        None => glib::user_data_dir().join(APPLICATION_ID),
    }
}
