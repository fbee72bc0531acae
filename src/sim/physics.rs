//! Per-tick flight integration
//!
//! Order within a tick is fixed: gravity accumulation, control forces,
//! anti-sinking radial clamp, kinematic update, angle update, toroidal wrap.
//! No RNG here: identical inputs produce identical states.

use glam::DVec2;

use super::state::{GameEvent, Rocket, World};
use super::tick::TickInput;
use super::vec2::{div_or_keep, project_onto_or_zero};
use crate::heading_axis;
use crate::tuning::Tuning;

/// Advance the rocket by one timestep under gravity and control intent.
///
/// Pushes a `FuelDepleted` event whenever a control intent is held with an
/// empty tank. Collision resolution happens separately, after this.
pub fn integrate(
    rocket: &mut Rocket,
    world: &World,
    input: &TickInput,
    dt: f64,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) {
    let mut force = DVec2::ZERO;

    // Gravity from every planet; the squared-distance floor avoids the
    // singularity at a planet's exact center.
    for planet in &world.planets {
        let to_planet = planet.pos - rocket.pos;
        let dist_sq = to_planet.length_squared();
        if dist_sq > tuning.gravity_epsilon_sq {
            let magnitude = tuning.g * tuning.rocket_mass * planet.mass / dist_sq;
            force += to_planet.normalize_or_zero() * magnitude;
        }
    }

    // Control forces, fuel permitting. Forward and backward may both fire
    // (forces cancel, fuel doesn't); left wins a simultaneous turn press.
    let heading = heading_axis(rocket.angle);
    if rocket.fuel > 0.0 {
        if input.thrust_forward {
            force += heading * tuning.thrust;
            rocket.fuel -= tuning.fuel_consumption_thrust * dt;
        }
        if input.thrust_backward {
            force -= heading * tuning.thrust;
            rocket.fuel -= tuning.fuel_consumption_thrust * dt;
        }
        if input.turn_left {
            rocket.angular_vel = -tuning.torque;
            rocket.fuel -= tuning.fuel_consumption_turn * dt;
        } else if input.turn_right {
            rocket.angular_vel = tuning.torque;
            rocket.fuel -= tuning.fuel_consumption_turn * dt;
        } else {
            rocket.angular_vel = 0.0;
        }
    } else {
        rocket.angular_vel = 0.0;
        if input.any_control() {
            events.push(GameEvent::FuelDepleted);
        }
    }
    rocket.fuel = rocket.fuel.max(0.0);

    rocket.acc = div_or_keep(force, tuning.rocket_mass);

    // Already overlapping a planet: drop the inward velocity/acceleration
    // components so the rocket cannot sink while it de-penetrates.
    radial_clamp(rocket, world, tuning);

    // Full kinematic step, then the velocity update
    rocket.pos += rocket.vel * dt + rocket.acc * (0.5 * dt * dt);
    rocket.vel += rocket.acc * dt;

    // Angular velocity is a per-frame increment by convention
    rocket.angle += rocket.angular_vel;

    wrap(&mut rocket.pos, world.arena);
}

/// Zero the velocity/acceleration components pointing into the nearest
/// planet while the rocket is inside it.
fn radial_clamp(rocket: &mut Rocket, world: &World, tuning: &Tuning) {
    let Some(nearest) = world.planets.iter().min_by(|a, b| {
        let da = rocket.pos.distance_squared(a.pos);
        let db = rocket.pos.distance_squared(b.pos);
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    }) else {
        return;
    };

    if rocket.pos.distance(nearest.pos) >= tuning.rocket_radius + nearest.radius {
        return;
    }

    let normal = (rocket.pos - nearest.pos).normalize_or_zero();
    let v_in = project_onto_or_zero(rocket.vel, normal);
    if v_in.dot(normal) < 0.0 {
        rocket.vel -= v_in;
    }
    let a_in = project_onto_or_zero(rocket.acc, normal);
    if a_in.dot(normal) < 0.0 {
        rocket.acc -= a_in;
    }
}

/// Toroidal wrap at the arena edges; velocity is untouched
fn wrap(pos: &mut DVec2, arena: DVec2) {
    if pos.x < 0.0 {
        pos.x = arena.x;
    } else if pos.x > arena.x {
        pos.x = 0.0;
    }
    if pos.y < 0.0 {
        pos.y = arena.y;
    } else if pos.y > arena.y {
        pos.y = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_with(planets: Vec<(f64, f64, f64)>, tuning: &Tuning) -> World {
        let planets: Vec<_> = planets
            .into_iter()
            .map(|(x, y, r)| super::super::state::Planet {
                pos: DVec2::new(x, y),
                radius: r,
                mass: tuning.planet_density * r * r,
                color: 0,
            })
            .collect();
        let end = planets.len() - 1;
        World {
            planets,
            start: 0,
            end,
            arena: DVec2::new(1280.0, 720.0),
        }
    }

    fn rocket_at(x: f64, y: f64, fuel: f64) -> Rocket {
        Rocket {
            pos: DVec2::new(x, y),
            fuel,
            ..Rocket::default()
        }
    }

    #[test]
    fn test_zero_gravity_rocket_stays_put() {
        let tuning = Tuning {
            g: 0.0,
            ..Tuning::default()
        };
        let world = world_with(vec![(200.0, 200.0, 30.0)], &tuning);
        // At rest, one unit off the surface, no control input
        let mut rocket = rocket_at(200.0 + 30.0 + tuning.rocket_radius + 1.0, 200.0, 100.0);
        let before = rocket.pos;

        let mut events = Vec::new();
        for _ in 0..100 {
            integrate(
                &mut rocket,
                &world,
                &TickInput::default(),
                1.0 / 60.0,
                &tuning,
                &mut events,
            );
        }

        assert_eq!(rocket.pos, before);
        assert_eq!(rocket.vel, DVec2::ZERO);
        assert!(events.is_empty());
    }

    #[test]
    fn test_integration_is_deterministic() {
        let tuning = Tuning::default();
        let world = world_with(vec![(300.0, 300.0, 40.0), (900.0, 500.0, 50.0)], &tuning);
        let input = TickInput {
            thrust_forward: true,
            turn_right: true,
            ..TickInput::default()
        };

        let mut a = rocket_at(600.0, 100.0, 500.0);
        let mut b = a.clone();
        let mut events = Vec::new();
        for _ in 0..240 {
            integrate(&mut a, &world, &input, 1.0 / 120.0, &tuning, &mut events);
            integrate(&mut b, &world, &input, 1.0 / 120.0, &tuning, &mut events);
        }

        assert_eq!(a.pos, b.pos);
        assert_eq!(a.vel, b.vel);
        assert_eq!(a.angle, b.angle);
        assert_eq!(a.fuel, b.fuel);
    }

    #[test]
    fn test_fuel_decreases_and_never_goes_negative() {
        let tuning = Tuning::default();
        let world = world_with(vec![(300.0, 300.0, 40.0)], &tuning);
        let input = TickInput {
            thrust_forward: true,
            turn_left: true,
            ..TickInput::default()
        };

        let mut rocket = rocket_at(600.0, 100.0, 0.005);
        let mut last_fuel = rocket.fuel;
        let mut events = Vec::new();
        for _ in 0..10 {
            integrate(&mut rocket, &world, &input, 1.0 / 60.0, &tuning, &mut events);
            assert!(rocket.fuel <= last_fuel);
            assert!(rocket.fuel >= 0.0);
            last_fuel = rocket.fuel;
        }
        assert_eq!(rocket.fuel, 0.0);
    }

    #[test]
    fn test_empty_tank_forces_coast() {
        let tuning = Tuning::default();
        let world = world_with(vec![(300.0, 300.0, 40.0)], &tuning);
        let input = TickInput {
            thrust_forward: true,
            turn_left: true,
            ..TickInput::default()
        };

        // Same starting point, one with fuel, one without
        let mut empty = rocket_at(600.0, 100.0, 0.0);
        let mut coasting = rocket_at(600.0, 100.0, 0.0);
        let mut events = Vec::new();
        integrate(&mut empty, &world, &input, 1.0 / 60.0, &tuning, &mut events);
        let mut none = Vec::new();
        integrate(
            &mut coasting,
            &world,
            &TickInput::default(),
            1.0 / 60.0,
            &tuning,
            &mut none,
        );

        // Gravity only: intent had no effect beyond the depletion event
        assert_eq!(empty.pos, coasting.pos);
        assert_eq!(empty.vel, coasting.vel);
        assert_eq!(empty.angular_vel, 0.0);
        assert!(events.contains(&GameEvent::FuelDepleted));
        assert!(none.is_empty());
    }

    #[test]
    fn test_left_wins_simultaneous_turn_press() {
        let tuning = Tuning::default();
        let world = world_with(vec![(300.0, 300.0, 40.0)], &tuning);
        let input = TickInput {
            turn_left: true,
            turn_right: true,
            ..TickInput::default()
        };

        let mut rocket = rocket_at(600.0, 100.0, 100.0);
        let mut events = Vec::new();
        integrate(&mut rocket, &world, &input, 1.0 / 60.0, &tuning, &mut events);
        assert_eq!(rocket.angular_vel, -tuning.torque);
    }

    #[test]
    fn test_position_wraps_toroidally() {
        let tuning = Tuning {
            g: 0.0,
            ..Tuning::default()
        };
        let world = world_with(vec![(300.0, 300.0, 40.0)], &tuning);

        let mut rocket = rocket_at(1279.5, 100.0, 0.0);
        rocket.vel = DVec2::new(120.0, 0.0);
        let mut events = Vec::new();
        integrate(
            &mut rocket,
            &world,
            &TickInput::default(),
            1.0 / 60.0,
            &tuning,
            &mut events,
        );

        assert_eq!(rocket.pos.x, 0.0);
        assert_eq!(rocket.vel, DVec2::new(120.0, 0.0));
    }

    #[test]
    fn test_radial_clamp_stops_sinking() {
        let tuning = Tuning::default();
        let world = world_with(vec![(200.0, 200.0, 50.0)], &tuning);

        // Embedded in the planet, moving straight at its center
        let mut rocket = rocket_at(200.0 + 45.0, 200.0, 0.0);
        rocket.vel = DVec2::new(-80.0, 0.0);
        let mut events = Vec::new();
        integrate(
            &mut rocket,
            &world,
            &TickInput::default(),
            1.0 / 60.0,
            &tuning,
            &mut events,
        );

        // The inward component is gone, so the rocket got no closer
        let normal = (rocket.pos - DVec2::new(200.0, 200.0)).normalize_or_zero();
        assert!(rocket.vel.dot(normal) >= -1e-9);
        assert!(rocket.pos.x >= 245.0 - 1e-9);
    }
}
