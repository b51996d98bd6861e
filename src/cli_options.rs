/*
cli_options.rs

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

//! Process command-line options.
//!
//! Without options, Little Hero shows the home screen summary: the player, and the level to
//! play next. The other options are intended for parents and for developers working on the
//! level generators.
//!
//! # Examples
//!
//! List the levels:
//!
//! ```text
//! $ littlehero --ls
//! 1 Odd one out
//! 2 Arithmetic
//! ...
//! ```
//!
//! Generate three mazes with a fixed seed, in JSON format:
//!
//! ```text
//! $ littlehero --level 7 --count 3 --seed 42
//! ```
//!
//! Show the guardian view:
//!
//! ```text
//! $ littlehero --parent
//! ```

use async_channel::Receiver;
use clap::Parser;
use log::{debug, error};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use littlehero::autoplay;
use littlehero::config::{self, COPYRIGHT_NOTICE};
use littlehero::controller::{Certificate, CertificateIssuer, GameController, GameError, Screen};
use littlehero::events::{Cue, LevelEvent};
use littlehero::game::{LevelStateMachine, LevelStatus};
use littlehero::generator::{self, LevelInstance};
use littlehero::level::LevelKind;
use littlehero::progress::{HeroKind, ProgressRecord};
use littlehero::saver::Storage;
use littlehero::saver::file::FileStorage;
use littlehero::saver::memory::MemoryStorage;
use littlehero::validator::Action;

/// Clock step of the demonstration when no action is possible.
const DEMO_TICK: Duration = Duration::from_millis(100);

/// Upper bound on the demonstration steps.
const DEMO_MAX_STEPS: usize = 20_000;

/// Eight-level adventure for young children.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// List the levels
    #[arg(long, default_value_t = false)]
    ls: bool,

    /// Level number (1 to 8) to generate instances for
    #[arg(short, long, group = "generate")]
    level: Option<u8>,

    /// Number of instances to generate
    #[arg(short, long, default_value_t = 1, requires = "generate")]
    count: usize,

    /// Seed of the random generator, for reproducible instances
    #[arg(short, long)]
    seed: Option<u64>,

    /// Show the progress and the best times of the player
    #[arg(short, long, default_value_t = false)]
    parent: bool,

    /// Erase the progress and start over
    #[arg(long, default_value_t = false)]
    reset: bool,

    /// Play the eight levels automatically, without touching the saved progress
    #[arg(long, default_value_t = false)]
    demo: bool,

    /// Hero of the player
    #[arg(value_enum, long)]
    hero: Option<HeroKind>,

    /// Directory of the saved records
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Print the certificate on the terminal.
struct PrintIssuer;

impl CertificateIssuer for PrintIssuer {
    fn issue(&mut self, certificate: &Certificate) {
        println!(
            "🏆 {} {} completed the eight levels on {}",
            certificate.hero.symbol(),
            certificate.player_name,
            certificate.completed_at.format("%Y-%m-%d %H:%M:%S")
        );
    }
}

fn new_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

/// Parse and process command-line options. Return the exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    let mut rng: StdRng = new_rng(args.seed);

    //
    // List the levels
    //
    if args.ls {
        for kind in LevelKind::ALL {
            println!("{} {kind}", kind.number());
        }
        return 0;
    }

    //
    // Generate instances in JSON format
    //
    if let Some(level) = args.level {
        let Some(kind) = LevelKind::from_level(level) else {
            eprintln!("Unknown level {level}. Use --ls to list the levels.");
            return 1;
        };
        for i in 0..args.count {
            debug!("Instance {i}");
            let instance: LevelInstance = match generator::generate(kind, &mut rng) {
                Ok(instance) => instance,
                Err(e) => {
                    eprintln!("Error: {e}");
                    return 1;
                }
            };
            match serde_json::to_string(&instance) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("Error: {e}");
                    return 1;
                }
            }
        }
        return 0;
    }

    if args.demo {
        return demo(rng, args.hero);
    }

    let storage: FileStorage = FileStorage::new(config::data_dir(args.data_dir));
    let mut controller: GameController<FileStorage, StdRng> = GameController::new(storage, rng);

    if args.reset {
        controller.restart();
        println!("Progress erased");
        return 0;
    }

    if let Some(hero) = args.hero {
        if let Err(e) = controller.select_hero(hero) {
            error!("Cannot select the hero: {e}");
            return 1;
        }
        println!("Hero: {} {}", hero.symbol(), hero.default_name());
    }

    if args.parent {
        print!("{}", controller.guardian_report());
        return 0;
    }

    home(&controller)
}

/// Print the home screen summary.
fn home<S: Storage>(controller: &GameController<S, StdRng>) -> u8 {
    let record: &ProgressRecord = controller.progress();
    println!(
        "{} {}",
        record.profile.hero.symbol(),
        record.profile.display_name
    );
    if record.all_completed() {
        println!("All the levels are completed. Use --reset to start over.");
        return 0;
    }
    if let Some(kind) = LevelKind::from_level(record.current_level) {
        println!("Level {}: {kind}", kind.number());
        println!("{}", kind.instruction());
    }
    0
}

/// Drain the sound effects, as an audio player would.
fn drain(audio: &Receiver<Cue>) {
    while let Ok(cue) = audio.try_recv() {
        debug!("♪ {cue:?}");
    }
}

fn print_events(events: &[LevelEvent]) {
    for event in events {
        match serde_json::to_string(event) {
            Ok(json) => println!("{json}"),
            Err(e) => error!("Cannot print the event: {e}"),
        }
    }
}

/// Play the eight levels with the built-in solver.
fn demo(rng: StdRng, hero: Option<HeroKind>) -> u8 {
    let (sender, audio) = async_channel::bounded::<Cue>(32);
    let mut controller: GameController<MemoryStorage, StdRng> =
        GameController::new(MemoryStorage::new(), rng)
            .with_audio(sender)
            .with_certificate_issuer(Box::new(PrintIssuer));

    if let Some(hero) = hero
        && let Err(e) = controller.select_hero(hero)
    {
        error!("Cannot select the hero: {e}");
        return 1;
    }

    match controller.start() {
        Ok(events) => print_events(&events),
        Err(e) => {
            eprintln!("Error: {e}");
            return 1;
        }
    }

    for _ in 0..DEMO_MAX_STEPS {
        if controller.screen() != Screen::Level {
            break;
        }
        let machine: &LevelStateMachine = controller.machine();
        let next: Option<Action> = match (machine.status(), machine.state()) {
            (LevelStatus::Active, Some(state)) => {
                autoplay::next_action(&state.instance, &state.progress)
            }
            _ => None,
        };
        let result: Result<Vec<LevelEvent>, GameError> = match (machine.status(), next) {
            (LevelStatus::Failed, _) => controller.retry(),
            (_, Some(action)) => controller.handle_action(action),
            (_, None) => controller.advance(DEMO_TICK),
        };
        match result {
            Ok(events) => print_events(&events),
            Err(e) => {
                eprintln!("Error: {e}");
                return 1;
            }
        }
        drain(&audio);
    }

    if controller.screen() == Screen::Certificate {
        0
    } else {
        eprintln!("The demonstration did not complete");
        1
    }
}
