/*
saver.rs

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

//! Save and restore records.
//!
//! Records are stored as JSON strings under a fixed key by a [`Storage`] backend:
//!
//! * [`file::FileStorage`] writes one `<key>.json` file per record in the data directory.
//! * [`memory::MemoryStorage`] keeps the records in memory, for tests and for runs that must
//!   not touch the disk.
//!
//! Records are serialized with [`serde`]. See [`load_json`] and [`save_json`].

pub mod file;
pub mod memory;

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::error::Error;

/// Key-value backend for the saved records.
pub trait Storage {
    /// Return the record stored under `key`, or None if there is no such record.
    fn read(&self, key: &str) -> Result<Option<String>, Box<dyn Error>>;

    /// Replace the record stored under `key`.
    fn write(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>>;

    /// Delete the record. Deleting a missing record is not an error.
    fn remove(&mut self, key: &str);
}

/// Read and deserialize the record stored under `key`.
///
/// Return None if there is no such record.
pub fn load_json<T, S>(storage: &S, key: &str) -> Result<Option<T>, Box<dyn Error>>
where
    T: DeserializeOwned,
    S: Storage + ?Sized,
{
    match storage.read(key)? {
        Some(data) => Ok(Some(serde_json::from_str(&data)?)),
        None => Ok(None),
    }
}

/// Serialize and store the record under `key`.
pub fn save_json<T, S>(storage: &mut S, key: &str, value: &T) -> Result<(), Box<dyn Error>>
where
    T: Serialize + ?Sized,
    S: Storage + ?Sized,
{
    let data: String = serde_json::to_string(value)?;
    storage.write(key, &data)
}

/// Serialize and deserialize optional [`chrono::DateTime`] timestamps with Serde.
///
/// Timestamps are RFC 3339 strings. A timestamp that cannot be parsed is read as None
/// instead of failing the whole record.
pub mod timestamp {
    use chrono::{DateTime, Local};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize an optional timestamp.
    pub fn serialize<S>(time: &Option<DateTime<Local>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(t) => serializer.serialize_some(&t.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize an optional timestamp.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Local>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text: Option<String> = Option::deserialize(deserializer)?;
        Ok(text.and_then(|t| {
            DateTime::parse_from_rfc3339(&t)
                .ok()
                .map(|d| d.with_timezone(&Local))
        }))
    }
}
