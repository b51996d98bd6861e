/*
generator.rs

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

//! Generate random level instances.
//!
//! Every level kind has its own module that builds a [`LevelInstance`] variant:
//!
//! * [`odd_one_out::OddOneOut`]: five animals, one of them different.
//! * [`arithmetic::Arithmetic`]: an addition or a subtraction with four answer options.
//! * [`sliding_puzzle::SlidingPuzzle`]: a shuffled 3x3 picture.
//! * [`color_sort::ColorSort`]: colored balls to drop in the matching jars.
//! * [`memory_match::MemoryMatch`]: a deck of sixteen cards, eight pairs.
//! * [`pair_connect::PairConnect`]: animals to connect with their food.
//! * [`maze::Maze`]: a grid carved with a randomized depth-first walk.
//! * [`reaction::ReactionChallenge`]: the parameters of the timed boss level.
//!
//! The random number generator is always provided by the caller so that tests and the
//! `--seed` command-line option get reproducible instances.
//! Each generated instance can be solved. For most kinds this is true by construction; mazes
//! are verified with a flood fill and carved again when the end cannot be reached.

pub mod arithmetic;
pub mod color_sort;
pub mod maze;
pub mod memory_match;
pub mod odd_one_out;
pub mod pair_connect;
pub mod reaction;
pub mod sliding_puzzle;
pub mod symbols;

use rand::Rng;
use serde::Serialize;
use std::error::Error;
use std::fmt;

use crate::config::MAZE_SIZE;
use crate::level::LevelKind;

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum GeneratorError {
    /// Maze dimensions must be odd and at least 5.
    InvalidMazeSize(usize, usize),

    /// No carved maze connected the start to the end.
    MazeUnreachable,
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GeneratorError::InvalidMazeSize(w, h) => {
                write!(f, "invalid maze size {w}x{h}: dimensions must be odd and at least 5")
            }
            GeneratorError::MazeUnreachable => {
                write!(f, "cannot carve a maze with a reachable end")
            }
        }
    }
}

impl Error for GeneratorError {}

/// One concrete puzzle for a level.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LevelInstance {
    OddOneOut(odd_one_out::OddOneOut),
    Arithmetic(arithmetic::Arithmetic),
    SlidingPuzzle(sliding_puzzle::SlidingPuzzle),
    ColorSort(color_sort::ColorSort),
    MemoryMatch(memory_match::MemoryMatch),
    PairConnect(pair_connect::PairConnect),
    Maze(maze::Maze),
    ReactionChallenge(reaction::ReactionChallenge),
}

impl LevelInstance {
    /// Level kind of the instance.
    pub fn kind(&self) -> LevelKind {
        match self {
            LevelInstance::OddOneOut(_) => LevelKind::OddOneOut,
            LevelInstance::Arithmetic(_) => LevelKind::Arithmetic,
            LevelInstance::SlidingPuzzle(_) => LevelKind::SlidingPuzzle,
            LevelInstance::ColorSort(_) => LevelKind::ColorSort,
            LevelInstance::MemoryMatch(_) => LevelKind::MemoryMatch,
            LevelInstance::PairConnect(_) => LevelKind::PairConnect,
            LevelInstance::Maze(_) => LevelKind::Maze,
            LevelInstance::ReactionChallenge(_) => LevelKind::ReactionChallenge,
        }
    }
}

/// Generate a random instance for the given level.
///
/// # Errors
///
/// Only the maze generation can fail, when no carved maze connects the start and the end
/// cells after several attempts.
pub fn generate<R: Rng + ?Sized>(
    kind: LevelKind,
    rng: &mut R,
) -> Result<LevelInstance, GeneratorError> {
    let instance: LevelInstance = match kind {
        LevelKind::OddOneOut => LevelInstance::OddOneOut(odd_one_out::OddOneOut::generate(rng)),
        LevelKind::Arithmetic => LevelInstance::Arithmetic(arithmetic::Arithmetic::generate(rng)),
        LevelKind::SlidingPuzzle => {
            LevelInstance::SlidingPuzzle(sliding_puzzle::SlidingPuzzle::generate(rng))
        }
        LevelKind::ColorSort => LevelInstance::ColorSort(color_sort::ColorSort::generate(rng)),
        LevelKind::MemoryMatch => {
            LevelInstance::MemoryMatch(memory_match::MemoryMatch::generate(rng))
        }
        LevelKind::PairConnect => {
            LevelInstance::PairConnect(pair_connect::PairConnect::generate(rng))
        }
        LevelKind::Maze => LevelInstance::Maze(maze::Maze::generate(MAZE_SIZE, MAZE_SIZE, rng)?),
        LevelKind::ReactionChallenge => {
            LevelInstance::ReactionChallenge(reaction::ReactionChallenge::default())
        }
    };
    Ok(instance)
}
