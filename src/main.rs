//! Arena Shooter headless runner
//!
//! Plays a session with the autopilot and prints the final world snapshot as
//! JSON. Usage: `arena-shooter [seed] [ticks] [level.json] [tuning.json]`

use std::error::Error;
use std::path::Path;

use arena_shooter::LevelLayout;
use arena_shooter::Tuning;
use arena_shooter::consts::SIM_DT_MS;
use arena_shooter::sim::{GameEvent, GameState, TickInput, tick};

const DEFAULT_SEED: u64 = 12345;
const DEFAULT_TICKS: u64 = 60 * 60;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(s) => s.parse()?,
        None => DEFAULT_SEED,
    };
    let ticks = match args.next() {
        Some(s) => s.parse()?,
        None => DEFAULT_TICKS,
    };
    let level = match args.next() {
        Some(path) => LevelLayout::from_path(Path::new(&path))?,
        None => LevelLayout::default(),
    };
    let tuning = match args.next() {
        Some(path) => Tuning::from_json(&std::fs::read_to_string(path)?)?,
        None => Tuning::default(),
    };

    log::info!("Arena Shooter (headless) starting: seed {}, {} ticks", seed, ticks);

    let mut state = GameState::new(seed, level, tuning);
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };

    for _ in 0..ticks {
        tick(&mut state, &input, SIM_DT_MS);
        for event in &state.events {
            match event {
                GameEvent::EnemyKilled { enemy, .. } => log::debug!("Killed enemy {}", enemy),
                GameEvent::DoorOpened { door, cost } => log::info!("Opened door {} for {}", door, cost),
                GameEvent::GameOver => log::info!("Game over after {} ms", state.time_ms),
                _ => {}
            }
        }
        if state.is_game_over() {
            break;
        }
    }

    log::info!(
        "Finished at {} ms: {} kills, {} currency, health {:.1}",
        state.time_ms,
        state.player.kills,
        state.player.currency,
        state.player.health
    );
    println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
    Ok(())
}
