//! Flight systems.
//!
//! ## Pipeline (runs in order every tick while playing)
//!
//! 1. [`super::input::resolve_input_system`] reduces keys and buttons to an `InputFrame`.
//! 2. [`flight_control_system`] applies launch, boost and thrust from the frame.
//! 3. [`integration_system`] adds gravity to velocity and velocity to position.
//! 4. [`proximity_system`] docks or kills the rocket near the nearest surface.
//!
//! The **input abstraction layer** (`InputFrame`) keeps these systems
//! testable: tests write the frame directly and run only the step under test.

use super::input::{InputFrame, InputToken};
use super::state::{FlightState, MovementClass, PlayerStatus};
use crate::config::GameConfig;
use crate::economy::RocketEconomy;
use crate::gravity::{BodyRegistry, GravityField};
use bevy::prelude::*;

// ── Step 2: Intent → velocity ─────────────────────────────────────────────────

/// Apply this tick's input to the rocket.
///
/// | Input                  | Effect                                              |
/// |------------------------|-----------------------------------------------------|
/// | `Launch` edge          | leave `Docked`/`Dead` with dock grace               |
/// | boost pressed          | velocity ×multiplier, rate → boost acceleration     |
/// | boost released         | exact pre-boost velocity restored                   |
/// | `Thrust(dir)` held     | velocity += dir × rate, delta-V −= rate × factor    |
///
/// Boost is a modifier, so thrust held together with it uses the boost rate.
///
/// While docked or dead only `Launch` is honoured.
pub fn flight_control_system(
    frame: Res<InputFrame>,
    mut flight: ResMut<FlightState>,
    mut economy: ResMut<RocketEconomy>,
    config: Res<GameConfig>,
) {
    if frame.action == Some(InputToken::Launch) && flight.launch() {
        info!("Launched from {:?}", flight.spawn_point);
    }

    if flight.status != PlayerStatus::Flying {
        flight.end_boost();
        flight.movement = MovementClass::Idle;
        return;
    }

    if frame.boost_started {
        flight.start_boost(config.boost_velocity_multiplier);
    } else if !frame.boost_held() {
        flight.end_boost();
    }

    flight.movement = match frame.token {
        InputToken::Thrust(direction) => {
            flight.apply_thrust(direction, &mut economy, config.acceleration_factor);
            MovementClass::Thrusting(direction)
        }
        InputToken::Mine => MovementClass::Mining,
        _ if flight.is_boosting => MovementClass::Boosting,
        _ => MovementClass::Idle,
    };
}

// ── Step 3: Integration ───────────────────────────────────────────────────────

/// `velocity += gravity; position += velocity` while flying.
pub fn integration_system(field: Res<GravityField>, mut flight: ResMut<FlightState>) {
    if flight.status != PlayerStatus::Flying {
        return;
    }
    flight.integrate(field.acceleration);
}

// ── Step 4: Docking and collision ─────────────────────────────────────────────

/// Resolve docking and collision against the body nearest the new position.
pub fn proximity_system(
    registry: Res<BodyRegistry>,
    mut flight: ResMut<FlightState>,
    config: Res<GameConfig>,
) {
    let Some((id, _)) = registry.nearest(flight.position) else {
        return;
    };
    let Some(body) = registry.get(id) else {
        return;
    };
    let clearance = body.clearance(flight.position);
    match flight.resolve_proximity(clearance, config.dock_threshold) {
        Some(PlayerStatus::Docked) => info!("Docked near {}", body.name),
        Some(PlayerStatus::Dead) => warn!("Crashed into {}; relocated to spawn", body.name),
        _ => {}
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────
