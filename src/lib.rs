//! Orbit Hopper - a gravity-slingshot rocket arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (gravity, flight control, collisions, game state)
//! - `tuning`: Data-driven gameplay constants
//!
//! Rendering and input devices live in the host application: the core consumes
//! a normalized [`sim::TickInput`] plus a frame delta, and hands back mutated
//! state along with discrete [`sim::GameEvent`]s for the host to present.

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::DVec2;

/// Frame-stepping defaults for host loops
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f64 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
}

/// Normalize angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f64) -> f64 {
    use std::f64::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit vector the rocket's nose points along for a given sprite angle.
///
/// Sprite angle 0 points straight up (negative y in screen coordinates), so
/// the heading axis is the sprite angle rotated back by a quarter turn.
#[inline]
pub fn heading_axis(angle: f64) -> DVec2 {
    use std::f64::consts::FRAC_PI_2;
    DVec2::new((angle - FRAC_PI_2).cos(), (angle - FRAC_PI_2).sin())
}
