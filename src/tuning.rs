//! Data-driven gameplay constants
//!
//! Every number the simulation consumes lives here so hosts can retune the
//! game without recompiling. Defaults are the shipped arcade balance.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// All externally supplied simulation constants.
///
/// Loaded from JSON with per-field fallback: a minimal file can override just
/// the values you care about.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Gravity & rocket ===
    /// Engine-scaled gravitational constant (not SI)
    pub g: f64,
    pub rocket_mass: f64,
    /// Forward/backward control force
    pub thrust: f64,
    /// Per-frame angular velocity magnitude while turning
    pub torque: f64,
    /// Collision radius of the rocket
    pub rocket_radius: f64,

    // === Fuel ===
    pub max_fuel: f64,
    /// Consumed per second while thrusting (each direction separately)
    pub fuel_consumption_thrust: f64,
    /// Consumed per second while turning
    pub fuel_consumption_turn: f64,

    // === Collision response ===
    /// Bounce damping: post-bounce velocity is scaled by (1 - friction)
    pub friction: f64,
    /// Impact force strictly above this destroys the rocket
    pub collision_threshold: f64,
    /// Extra reach when checking arrival at the end planet
    pub arrival_margin: f64,
    /// Squared distance below which gravity is skipped (singularity guard)
    pub gravity_epsilon_sq: f64,

    // === World generation ===
    /// Planet mass is density × radius²
    pub planet_density: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    /// Minimum surface-to-surface separation between planets
    pub min_spacing: f64,
    /// Cap on total planet area as a fraction of arena area
    pub max_area_fraction: f64,

    // === Round flow ===
    /// Seconds from destruction to the automatic round reset
    pub explosion_duration: f64,
    /// Seconds a HUD message stays up
    pub message_duration: f64,
    /// Planet-count ceiling for difficulty
    pub max_difficulty: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            g: 6.6743e-11 * 1e12,
            rocket_mass: 1.0,
            thrust: 500.0,
            torque: 0.05,
            rocket_radius: 10.0,

            max_fuel: 500.0,
            fuel_consumption_thrust: 0.5,
            fuel_consumption_turn: 0.1,

            friction: 0.5,
            collision_threshold: 150.0,
            arrival_margin: 1.0,
            gravity_epsilon_sq: 10.0,

            planet_density: 10.0,
            min_radius: 20.0,
            max_radius: 80.0,
            min_spacing: 150.0,
            max_area_fraction: 0.4,

            explosion_duration: 2.0,
            message_duration: 3.0,
            max_difficulty: 10,
        }
    }
}

impl Tuning {
    /// Load tuning from a JSON file, falling back to defaults on any failure.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(err) => {
                    log::warn!("Bad tuning file {}: {err}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No tuning file at {}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Save tuning as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)
    }
}
