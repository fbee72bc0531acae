//! Procedural planet placement
//!
//! Rejection sampling with a bounded retry budget: when a spacing level
//! cannot be satisfied the spacing relaxes and sampling restarts, so
//! generation terminates even for configurations the arena cannot honestly
//! hold.

use glam::DVec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{END_COLOR, OBSTACLE_COLOR, Planet, START_COLOR, World};
use crate::tuning::Tuning;

/// Placement attempts before the spacing requirement is relaxed
const ATTEMPTS_PER_LEVEL: u32 = 128;
/// Spacing relaxations before accepting overlap outright
const MAX_RELAXATIONS: u32 = 8;

/// Generate a round's planets and pick the mutually farthest pair as
/// start/end.
pub fn generate_world(rng: &mut Pcg32, count: u32, arena: DVec2, tuning: &Tuning) -> World {
    let count = count.max(2) as usize;

    // Cap the radius so `count` planets can never exceed the area budget
    let area_budget = tuning.max_area_fraction * arena.x * arena.y;
    let radius_cap = (area_budget / (count as f64 * std::f64::consts::PI)).sqrt();
    let eff_max = tuning.max_radius.min(radius_cap);
    let eff_min = tuning.min_radius.min(eff_max);

    let mut planets: Vec<Planet> = Vec::with_capacity(count);
    for _ in 0..count {
        let radius = rng.random_range(eff_min..=eff_max);
        let pos = place_planet(rng, radius, arena, tuning.min_spacing, &planets);
        planets.push(Planet {
            pos,
            radius,
            mass: tuning.planet_density * radius * radius,
            color: OBSTACLE_COLOR,
        });
    }

    // The mutually farthest pair becomes launch/destination; the first pair
    // found in scan order wins ties, lower index is the start.
    let (start, end) = farthest_pair(&planets);
    planets[start].color = START_COLOR;
    planets[end].color = END_COLOR;

    World {
        planets,
        start,
        end,
        arena,
    }
}

/// Find a position for one planet. The spacing halves each time the attempt
/// budget runs out; a final hard cap accepts overlap rather than looping
/// forever.
fn place_planet(
    rng: &mut Pcg32,
    radius: f64,
    arena: DVec2,
    spacing: f64,
    placed: &[Planet],
) -> DVec2 {
    let mut spacing = spacing;
    for relaxation in 0..=MAX_RELAXATIONS {
        for _ in 0..ATTEMPTS_PER_LEVEL {
            let pos = sample_inset(rng, radius, arena);
            if fits(pos, radius, spacing, placed) {
                if relaxation > 0 {
                    log::debug!("placed planet after relaxing spacing to {spacing:.1}");
                }
                return pos;
            }
        }
        spacing = if spacing < 2.0 { 0.0 } else { spacing / 2.0 };
    }

    log::warn!("planet placement budget exhausted; accepting overlap");
    sample_inset(rng, radius, arena)
}

/// Uniform position within the arena, inset by the planet radius
fn sample_inset(rng: &mut Pcg32, radius: f64, arena: DVec2) -> DVec2 {
    let x = if arena.x > radius * 2.0 {
        rng.random_range(radius..arena.x - radius)
    } else {
        arena.x / 2.0
    };
    let y = if arena.y > radius * 2.0 {
        rng.random_range(radius..arena.y - radius)
    } else {
        arena.y / 2.0
    };
    DVec2::new(x, y)
}

fn fits(pos: DVec2, radius: f64, spacing: f64, placed: &[Planet]) -> bool {
    placed
        .iter()
        .all(|p| pos.distance(p.pos) >= radius + p.radius + spacing)
}

/// Indices of the pair with maximum center-to-center distance
fn farthest_pair(planets: &[Planet]) -> (usize, usize) {
    let mut best = (0, 1);
    let mut best_dist_sq = f64::NEG_INFINITY;
    for i in 0..planets.len() {
        for j in (i + 1)..planets.len() {
            let d = planets[i].pos.distance_squared(planets[j].pos);
            if d > best_dist_sq {
                best_dist_sq = d;
                best = (i, j);
            }
        }
    }
    best
}
