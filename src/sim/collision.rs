//! Planet contact detection and resolution
//!
//! Circle-circle overlap against each planet in iteration order; only the
//! first contact is resolved per frame. Survivable hits reflect and damp the
//! velocity and push the rocket back to the surface; hard hits end the round.

use crate::tuning::Tuning;

use super::state::{Rocket, World};
use super::vec2::project_onto_or_zero;

/// What the resolution pass decided this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionOutcome {
    /// No contact, destination not reached
    None,
    /// Velocity was reflected and damped in place
    Bounced { impact: f64 },
    /// Impact force exceeded the destruction threshold
    Destroyed { impact: f64 },
    /// Within arrival range of the end planet
    Arrived,
}

/// Detect and resolve rocket/planet contact, then check for arrival.
///
/// The destination planet is excluded from the overlap scan: touching it is
/// how you win. Only the first overlapping planet in iteration order is
/// handled; simultaneous contacts wait for the next frame. The arrival check
/// runs only on frames without a collision.
pub fn resolve_collisions(rocket: &mut Rocket, world: &World, tuning: &Tuning) -> CollisionOutcome {
    for (idx, planet) in world.planets.iter().enumerate() {
        if idx == world.end {
            continue;
        }

        let offset = rocket.pos - planet.pos;
        let dist = offset.length();
        if dist >= tuning.rocket_radius + planet.radius {
            continue;
        }

        let impact = rocket.vel.length() * tuning.rocket_mass;
        if impact > tuning.collision_threshold {
            return CollisionOutcome::Destroyed { impact };
        }

        // Reflect the normal component, damp everything by friction, and
        // push the rocket out along the normal so it can't stay embedded.
        let normal = offset.normalize_or_zero();
        let parallel = project_onto_or_zero(rocket.vel, normal);
        let orthogonal = rocket.vel - parallel;
        rocket.vel = (orthogonal - parallel) * (1.0 - tuning.friction);

        let overlap = tuning.rocket_radius + planet.radius - dist;
        rocket.pos += normal * overlap;

        return CollisionOutcome::Bounced { impact };
    }

    let end = world.end_planet();
    let reach = tuning.rocket_radius + end.radius + tuning.arrival_margin;
    if (rocket.pos - end.pos).length() < reach {
        return CollisionOutcome::Arrived;
    }

    CollisionOutcome::None
}
