//! Simulation plugin: resource setup and the ordered per-tick pipeline.
//!
//! ## Tick order
//!
//! | # | System                          | Purpose                                   |
//! |---|---------------------------------|-------------------------------------------|
//! | 1 | [`sample_frame_rate_system`]    | feed the once-per-second frame-rate sensor |
//! | 2 | [`gravity_system`]              | nearest body + acceleration vector        |
//! | 3 | `resolve_input_system`          | keys + buttons → one input token          |
//! | 4 | `flight_control_system`         | launch, boost, thrust                     |
//! | 5 | `integration_system`            | semi-implicit Euler step                  |
//! | 6 | `proximity_system`              | dock / collision                          |
//! | 7 | `mining_system`                 | draws into the ore batch                  |
//! | 8 | `trade_system`                  | sell / upgrade                            |
//! | 9 | `telemetry_system`              | snapshot for the presentation layer       |
//!
//! The whole tuple is `.chain()`ed and runs only in [`GameState::Playing`].

use crate::catalog::ResourceCatalog;
use crate::config::{load_game_config, GameConfig};
use crate::economy::{trade_system, RocketEconomy, TradeReport};
use crate::gravity::{BodyRegistry, GravityField};
use crate::menu::GameState;
use crate::mining::{mining_system, MiningLaser, MiningRng, OreBatch, ResourceTable};
use crate::player::control::{flight_control_system, integration_system, proximity_system};
use crate::player::input::{resolve_input_system, InputFrame, KeyPressLimiter, OnScreenInput};
use crate::player::state::FlightState;
use crate::telemetry::{telemetry_system, FlightTelemetry};
use crate::world::setup_world;
use bevy::math::DVec3;
use bevy::prelude::*;

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameConfig>()
            .init_resource::<BodyRegistry>()
            .init_resource::<ResourceCatalog>()
            .init_resource::<GravityField>()
            .init_resource::<ResourceTable>()
            .init_resource::<MiningRng>()
            .init_resource::<MiningLaser>()
            .init_resource::<OreBatch>()
            .init_resource::<RocketEconomy>()
            .init_resource::<TradeReport>()
            .init_resource::<FlightState>()
            .init_resource::<InputFrame>()
            .init_resource::<OnScreenInput>()
            .init_resource::<KeyPressLimiter>()
            .init_resource::<FlightTelemetry>()
            // PreStartup: the initial OnEnter(Playing) runs before Startup and
            // must already see the configured world.
            .add_systems(
                PreStartup,
                (load_game_config, setup_world, setup_simulation).chain(),
            )
            .add_systems(
                Update,
                (
                    sample_frame_rate_system,
                    gravity_system,
                    resolve_input_system,
                    flight_control_system,
                    integration_system,
                    proximity_system,
                    mining_system,
                    trade_system,
                    telemetry_system,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

/// Startup system: rebuild all simulation state from the loaded config.
pub fn setup_simulation(mut commands: Commands, config: Res<GameConfig>) {
    commands.insert_resource(GravityField::new(
        config.gravity_const,
        config.frame_rate_mode,
        config.initial_frame_rate,
        config.fixed_frame_rate,
    ));
    commands.insert_resource(ResourceTable::standard(config.draws_per_mining_action));
    commands.insert_resource(MiningRng::from_seed(config.rng_seed));
    commands.insert_resource(RocketEconomy {
        delta_v: config.initial_delta_v,
        ..RocketEconomy::new(config.ore_capacity_kg)
    });
    commands.insert_resource(OreBatch::default());
    commands.insert_resource(FlightState::new(
        DVec3::from_array(config.spawn_point),
        config.base_acceleration,
        config.boost_acceleration,
    ));
    commands.insert_resource(KeyPressLimiter::new(config.key_press_rate_cap));

    info!(
        "Simulation ready: {:?} frame rate, {} draws per mining action",
        config.frame_rate_mode, config.draws_per_mining_action
    );
}

// ── Gravity steps ─────────────────────────────────────────────────────────────

/// Feed this tick's wall-clock duration to the frame-rate sensor.
pub fn sample_frame_rate_system(time: Res<Time>, mut field: ResMut<GravityField>) {
    field.sample_frame(time.delta_secs_f64());
}

/// Select the nearest body and cache this tick's gravity vector.
pub fn gravity_system(
    registry: Res<BodyRegistry>,
    flight: Res<FlightState>,
    mut field: ResMut<GravityField>,
) {
    field.update(&registry, flight.position);
    field.acceleration_vector(&registry, flight.position);
}
