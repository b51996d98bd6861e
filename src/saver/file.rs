/*
file.rs

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

//! Store the records as JSON files in the data directory.

use log::debug;
use std::error::Error;
use std::fs::{self, File, remove_file};
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::PathBuf;

use super::Storage;

/// One `<key>.json` file per record.
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// Absolute path to the data directory.
    data_dir: PathBuf,
}

impl FileStorage {
    /// Create a [`FileStorage`] object.
    ///
    /// The provided [`PathBuf`] is the path to the directory where the records must be saved.
    /// The directory is created on the first write.
    pub fn new(data_dir: PathBuf) -> Self {
        debug!("Data directory: {data_dir:?}");
        Self { data_dir }
    }

    fn path(&self, key: &str) -> PathBuf {
        let mut p: PathBuf = self.data_dir.clone();
        p.push(format!("{key}.json"));
        p
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let file: File = match File::open(self.path(key)) {
            Ok(f) => f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(None),
                _ => return Err(Box::new(error)),
            },
        };
        let mut reader: BufReader<File> = BufReader::new(file);
        let mut data: String = String::new();
        reader.read_to_string(&mut data)?;
        Ok(Some(data))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        fs::create_dir_all(&self.data_dir)?;
        let file: File = File::create(self.path(key))?;
        let mut writer: BufWriter<File> = BufWriter::new(file);
        writer.write_all(value.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        let _ = remove_file(self.path(key));
    }
}
