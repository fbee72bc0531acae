//! Game state and core simulation types
//!
//! Everything a round owns lives here; nothing is ambient. The host holds a
//! [`GameState`] handle and reads planets, rocket and phase out of it for
//! drawing.

use glam::DVec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::worldgen::generate_world;
use crate::normalize_angle;
use crate::tuning::Tuning;

/// Fewest planets a round can have (a start and an end)
pub const MIN_PLANETS: u32 = 2;

/// Planet fill colors handed to the host (0xRRGGBB)
pub const START_COLOR: u32 = 0x4a8fe7;
pub const END_COLOR: u32 = 0xe74a4a;
pub const OBSTACLE_COLOR: u32 = 0x888888;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// World generated, physics not yet running
    Idle,
    /// Active flight
    Running,
    /// Destroyed; explosion timer running, physics frozen
    Exploding,
    /// Reached the end planet; frozen until the host starts the next round
    Won,
}

/// Discrete notifications handed to the host each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A thrust/turn intent was active with the tank empty (repeats while held)
    FuelDepleted,
    /// Survivable planet contact; velocity was reflected and damped
    SoftBounce { impact: f64 },
    /// Impact force exceeded the destruction threshold
    Destroyed { impact: f64 },
    /// Arrived at the end planet
    Victory,
}

/// A massive body. Immutable for the duration of one round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Planet {
    pub pos: DVec2,
    pub radius: f64,
    /// density × radius²
    pub mass: f64,
    /// Fill color, opaque to the core
    pub color: u32,
}

/// One round's bodies plus the arena they live in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub planets: Vec<Planet>,
    /// Index of the launch planet
    pub start: usize,
    /// Index of the destination planet
    pub end: usize,
    /// Arena width/height; positions wrap toroidally at these extents
    pub arena: DVec2,
}

impl World {
    pub fn start_planet(&self) -> &Planet {
        &self.planets[self.start]
    }

    pub fn end_planet(&self) -> &Planet {
        &self.planets[self.end]
    }
}

/// The controllable body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Rocket {
    pub pos: DVec2,
    pub vel: DVec2,
    pub acc: DVec2,
    /// Sprite angle in radians; 0 points straight up
    pub angle: f64,
    /// Per-frame angular increment set by the turn intents
    pub angular_vel: f64,
    pub fuel: f64,
}

/// Deferred one-shot work tied to a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerKind {
    /// Full round reset once the explosion animation has played out
    ResetAfterExplosion,
    /// Drop the current HUD message
    ClearMessage,
}

/// A scheduled, cancellable timer.
///
/// Timers from a previous round never fire: they are pruned on reset and the
/// round id is checked again when one comes due.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScheduledTimer {
    pub round: u64,
    /// Simulation-time deadline in seconds
    pub fires_at: f64,
    pub kind: TimerKind,
}

/// RNG seed wrapper so state snapshots stay serializable.
///
/// Each round draws from its own PCG stream, so regeneration is a pure
/// function of (seed, round) with no retained generator state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn rng_for_round(&self, round: u64) -> Pcg32 {
        Pcg32::new(self.seed, round)
    }
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    /// Planet count for the current round
    pub difficulty: u32,
    /// Monotonic round counter; timers carry the round they belong to
    pub round: u64,
    /// Simulation time in seconds (advances while Running or Exploding)
    pub time_secs: f64,
    pub phase: GamePhase,
    pub world: World,
    pub rocket: Rocket,
    /// Pending one-shot timers
    pub timers: Vec<ScheduledTimer>,
    /// Current HUD message, if any
    pub message: Option<String>,
}

impl GameState {
    /// Create a session and generate its first round (phase `Idle`).
    pub fn new(seed: u64, difficulty: u32, arena: DVec2, tuning: &Tuning) -> Self {
        let mut state = Self {
            seed,
            rng_state: RngState::new(seed),
            difficulty: difficulty.clamp(MIN_PLANETS, tuning.max_difficulty.max(MIN_PLANETS)),
            round: 0,
            time_secs: 0.0,
            phase: GamePhase::Idle,
            world: World {
                planets: Vec::new(),
                start: 0,
                end: 0,
                arena,
            },
            rocket: Rocket::default(),
            timers: Vec::new(),
            message: None,
        };
        state.reset_round(tuning);
        state
    }

    /// Start a fresh round: new world, rocket re-seated on the start planet,
    /// pending timers dropped.
    pub fn reset_round(&mut self, tuning: &Tuning) {
        self.round += 1;
        self.timers.clear();
        self.message = None;
        self.phase = GamePhase::Idle;

        let mut rng = self.rng_state.rng_for_round(self.round);
        self.world = generate_world(&mut rng, self.difficulty, self.world.arena, tuning);

        // Seat the rocket on a random point of the start planet's surface,
        // nose pointing away from the planet.
        let start = self.world.start_planet();
        let surface_angle = rng.random_range(0.0..std::f64::consts::TAU);
        let offset = DVec2::new(surface_angle.cos(), surface_angle.sin())
            * (start.radius + tuning.rocket_radius);
        self.rocket = Rocket {
            pos: start.pos + offset,
            vel: DVec2::ZERO,
            acc: DVec2::ZERO,
            angle: normalize_angle(surface_angle + std::f64::consts::FRAC_PI_2),
            angular_vel: 0.0,
            fuel: tuning.max_fuel,
        };

        log::debug!(
            "round {} started: {} planets, rocket at {:.1},{:.1}",
            self.round,
            self.world.planets.len(),
            self.rocket.pos.x,
            self.rocket.pos.y
        );
    }

    /// Bump the planet count (capped) and reset — the post-victory flow.
    pub fn advance_difficulty_and_reset(&mut self, tuning: &Tuning) {
        self.difficulty = (self.difficulty + 1).min(tuning.max_difficulty.max(MIN_PLANETS));
        self.reset_round(tuning);
    }

    /// Schedule a one-shot timer `delay` seconds from now, tied to this round.
    pub fn schedule(&mut self, kind: TimerKind, delay: f64) {
        self.timers.push(ScheduledTimer {
            round: self.round,
            fires_at: self.time_secs + delay,
            kind,
        });
    }

    // === HUD values (derived, never stored) ===

    /// Current speed
    pub fn speed(&self) -> f64 {
        self.rocket.vel.length()
    }

    /// Center-to-center distance to the destination planet
    pub fn distance_to_end(&self) -> f64 {
        (self.rocket.pos - self.world.end_planet().pos).length()
    }

    /// Remaining fuel
    pub fn fuel(&self) -> f64 {
        self.rocket.fuel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena() -> DVec2 {
        DVec2::new(1280.0, 720.0)
    }

    #[test]
    fn test_new_session_starts_idle_on_start_planet() {
        let tuning = Tuning::default();
        let state = GameState::new(7, 4, arena(), &tuning);

        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.world.planets.len(), 4);
        assert_eq!(state.rocket.fuel, tuning.max_fuel);
        assert_eq!(state.rocket.vel, DVec2::ZERO);

        let start = state.world.start_planet();
        let dist = (state.rocket.pos - start.pos).length();
        assert!((dist - (start.radius + tuning.rocket_radius)).abs() < 1e-9);
    }

    #[test]
    fn test_difficulty_is_clamped() {
        let tuning = Tuning::default();
        let low = GameState::new(1, 0, arena(), &tuning);
        assert_eq!(low.difficulty, MIN_PLANETS);
        let high = GameState::new(1, 99, arena(), &tuning);
        assert_eq!(high.difficulty, tuning.max_difficulty);
    }

    #[test]
    fn test_reset_round_drops_timers_and_message() {
        let tuning = Tuning::default();
        let mut state = GameState::new(3, 3, arena(), &tuning);
        state.message = Some("boom".to_string());
        state.schedule(TimerKind::ClearMessage, 1.0);
        let round_before = state.round;

        state.reset_round(&tuning);

        assert!(state.timers.is_empty());
        assert!(state.message.is_none());
        assert_eq!(state.round, round_before + 1);
    }

    #[test]
    fn test_rounds_differ_but_are_reproducible() {
        let tuning = Tuning::default();
        let mut a = GameState::new(42, 3, arena(), &tuning);
        let first_rocket = a.rocket.pos;
        a.reset_round(&tuning);
        assert_ne!(a.rocket.pos, first_rocket);

        // Same seed replays the same sequence of rounds
        let mut b = GameState::new(42, 3, arena(), &tuning);
        b.reset_round(&tuning);
        assert_eq!(a.rocket.pos, b.rocket.pos);
        assert_eq!(a.world.planets.len(), b.world.planets.len());
    }

    #[test]
    fn test_hud_values_are_derived() {
        let tuning = Tuning::default();
        let mut state = GameState::new(5, 2, arena(), &tuning);
        state.rocket.vel = DVec2::new(3.0, 4.0);
        assert!((state.speed() - 5.0).abs() < 1e-12);
        assert_eq!(state.fuel(), tuning.max_fuel);
        let end = state.world.end_planet().pos;
        assert!((state.distance_to_end() - (state.rocket.pos - end).length()).abs() < 1e-12);
    }
}
