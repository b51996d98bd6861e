/*
preferences.rs

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

//! Player preferences.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::PREFERENCES_KEY;
use crate::saver::{self, Storage};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default = "enabled")]
    pub sound_enabled: bool,
}

fn enabled() -> bool {
    true
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            sound_enabled: true,
        }
    }
}

impl Preferences {
    pub fn load<S: Storage + ?Sized>(storage: &S) -> Self {
        match saver::load_json(storage, PREFERENCES_KEY) {
            Ok(Some(p)) => p,
            Ok(None) => Self::default(),
            Err(e) => {
                warn!("Cannot read the preferences: {e}");
                Self::default()
            }
        }
    }

    pub fn save<S: Storage + ?Sized>(&self, storage: &mut S) {
        if let Err(e) = saver::save_json(storage, PREFERENCES_KEY, self) {
            warn!("Cannot save the preferences: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::saver::memory::MemoryStorage;

    #[test]
    fn sound_is_on_by_default() {
        let mut storage: MemoryStorage = MemoryStorage::new();
        assert!(Preferences::load(&storage).sound_enabled);
        storage.write(PREFERENCES_KEY, "{}").unwrap();
        assert!(Preferences::load(&storage).sound_enabled);
    }

    #[test]
    fn preference_is_saved() {
        let mut storage: MemoryStorage = MemoryStorage::new();
        Preferences {
            sound_enabled: false,
        }
        .save(&mut storage);
        assert!(!Preferences::load(&storage).sound_enabled);
    }
}
