//! Headless demo driver
//!
//! Runs a scripted flight against the simulation core with a fixed-timestep
//! accumulator, logging HUD values and events. Doubles as an end-to-end
//! exercise of the public API; any real front end wires its own input and
//! drawing around the same calls.

use std::path::Path;

use glam::DVec2;

use orbit_hopper::consts::{MAX_SUBSTEPS, SIM_DT};
use orbit_hopper::sim::{GamePhase, GameState, TickInput, tick};
use orbit_hopper::tuning::Tuning;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
    let tuning = match std::env::args().nth(2) {
        Some(path) => Tuning::load(Path::new(&path)),
        None => Tuning::default(),
    };

    log::info!("orbit-hopper demo, seed {seed}");

    let arena = DVec2::new(1280.0, 720.0);
    let mut state = GameState::new(seed, 4, arena, &tuning);
    let mut input = TickInput {
        start: true,
        thrust_forward: true,
        ..TickInput::default()
    };

    // 30 simulated seconds of flight at 60 fps, substepped to SIM_DT
    let frame_dt = 1.0 / 60.0;
    let mut accumulator = 0.0;
    for frame in 0..(30 * 60) {
        // Nudge the nose now and then so the flight isn't a straight line
        input.turn_left = frame % 120 < 10;

        accumulator += frame_dt;
        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            for event in tick(&mut state, &input, SIM_DT, &tuning) {
                log::info!("event at t={:.2}: {event:?}", state.time_secs);
            }
            accumulator -= SIM_DT;
            substeps += 1;
            input.start = false; // one-shot
        }

        if frame % 60 == 0 {
            println!(
                "t={:5.1}s phase={:?} speed={:8.2} dist={:8.2} fuel={:6.2}",
                state.time_secs,
                state.phase,
                state.speed(),
                state.distance_to_end(),
                state.fuel(),
            );
        }

        if state.phase == GamePhase::Won {
            println!("victory after {:.1}s", state.time_secs);
            break;
        }
    }
}
