//! Per-frame orchestration
//!
//! One `tick` call advances the session by one frame: host round controls,
//! due timers, then the phase machine. Physics and contact resolution run
//! only while `Running`.

use super::collision::{CollisionOutcome, resolve_collisions};
use super::physics::integrate;
use super::state::{GameEvent, GamePhase, GameState, MIN_PLANETS, TimerKind};
use crate::tuning::Tuning;

/// Device-independent input intent for one frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub thrust_forward: bool,
    pub thrust_backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    /// Begin flight from `Idle`
    pub start: bool,
    /// Abandon the round and regenerate at the current difficulty
    pub reset: bool,
    /// Post-victory: raise the planet count and start over
    pub next_round: bool,
    /// Host UI changed the planet-count slider
    pub set_difficulty: Option<u32>,
}

impl TickInput {
    /// True when any fuel-consuming intent is held
    pub fn any_control(&self) -> bool {
        self.thrust_forward || self.thrust_backward || self.turn_left || self.turn_right
    }
}

/// Advance the session by one frame.
///
/// Returns the discrete events the host should react to this frame. Events
/// are never stored; state transitions that do not apply to the current
/// phase are no-ops.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f64, tuning: &Tuning) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let dt = dt.max(0.0);

    // Host-driven round controls apply in any phase and cancel pending timers
    if let Some(level) = input.set_difficulty {
        state.difficulty = level.clamp(MIN_PLANETS, tuning.max_difficulty.max(MIN_PLANETS));
        state.reset_round(tuning);
        return events;
    }
    if input.reset {
        state.reset_round(tuning);
        return events;
    }

    // Time advances while physics or the explosion animation is live
    if matches!(state.phase, GamePhase::Running | GamePhase::Exploding) {
        state.time_secs += dt;
    }

    fire_due_timers(state, tuning);

    match state.phase {
        GamePhase::Idle => {
            if input.start {
                state.phase = GamePhase::Running;
                log::info!("round {} launched", state.round);
            }
        }

        GamePhase::Running => {
            integrate(
                &mut state.rocket,
                &state.world,
                input,
                dt,
                tuning,
                &mut events,
            );

            match resolve_collisions(&mut state.rocket, &state.world, tuning) {
                CollisionOutcome::None => {}
                CollisionOutcome::Bounced { impact } => {
                    events.push(GameEvent::SoftBounce { impact });
                    state.message =
                        Some("Collision! Trajectory reflected, speed reduced".to_string());
                    state.schedule(TimerKind::ClearMessage, tuning.message_duration);
                }
                CollisionOutcome::Destroyed { impact } => {
                    events.push(GameEvent::Destroyed { impact });
                    state.phase = GamePhase::Exploding;
                    state.message = Some("Rocket destroyed!".to_string());
                    state.schedule(TimerKind::ResetAfterExplosion, tuning.explosion_duration);
                    state.schedule(TimerKind::ClearMessage, tuning.message_duration);
                    log::info!("round {} lost, impact {impact:.1}", state.round);
                }
                CollisionOutcome::Arrived => {
                    events.push(GameEvent::Victory);
                    state.phase = GamePhase::Won;
                    log::info!("round {} won", state.round);
                }
            }
        }

        GamePhase::Exploding => {
            // Physics frozen; the reset timer fired above flips us back to Idle
        }

        GamePhase::Won => {
            if input.next_round {
                state.advance_difficulty_and_reset(tuning);
            }
        }
    }

    events
}

/// Fire every due timer. Timers carrying a stale round id were cancelled by
/// a reset and are silently dropped.
fn fire_due_timers(state: &mut GameState, tuning: &Tuning) {
    let now = state.time_secs;
    let due: Vec<_> = state
        .timers
        .iter()
        .copied()
        .filter(|t| t.fires_at <= now)
        .collect();
    state.timers.retain(|t| t.fires_at > now);

    for timer in due {
        if timer.round != state.round {
            continue;
        }
        match timer.kind {
            TimerKind::ResetAfterExplosion => state.reset_round(tuning),
            TimerKind::ClearMessage => state.message = None,
        }
    }
}
