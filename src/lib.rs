/*
lib.rs

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

//! Little Hero: an eight-level adventure for young children.
//!
//! Each level is a small game built from a random instance:
//!
//! 1. Find the odd one out.
//! 2. Pick the result of an addition or a subtraction.
//! 3. Put the pieces of a picture back in place.
//! 4. Drop the balls into the jars of their color.
//! 5. Find the pairs of cards.
//! 6. Connect the animals with what they like.
//! 7. Walk out of a maze.
//! 8. Pop fifteen balloons before the time runs out.
//!
//! The [`controller::GameController`] drives a run: it loads the level, routes the player
//! actions to the [`game::LevelStateMachine`], records the progress with the
//! [`progress::ProgressTracker`], and issues a certificate at the end. The presentation layer
//! receives [`events::LevelEvent`] values and sends [`validator::Action`] values back.

pub mod autoplay;
pub mod config;
pub mod controller;
pub mod events;
pub mod game;
pub mod generator;
pub mod level;
pub mod preferences;
pub mod progress;
pub mod records;
pub mod saver;
pub mod timer;
pub mod validator;
