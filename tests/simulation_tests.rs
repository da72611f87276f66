//! Headless end-to-end tests of the per-tick simulation pipeline.
//!
//! Each test drives a [`MinimalPlugins`] app in `GameState::Playing` with the
//! full [`SimulationPlugin`], pressing keys through `ButtonInput<KeyCode>` and
//! on-screen buttons through `OnScreenInput`.  The built-in solar system is
//! used; the rocket spawns inside the home base's dock zone.

use bevy::math::DVec3;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use prospector::config::GameConfig;
use prospector::economy::{RocketEconomy, TechTier};
use prospector::gravity::{BodyRegistry, FrameRateMode, GravityField};
use prospector::menu::GameState;
use prospector::mining::{MiningLaser, OreBatch};
use prospector::player::{FlightState, InputToken, OnScreenInput, PlayerStatus};
use prospector::simulation::SimulationPlugin;
use prospector::telemetry::FlightTelemetry;
use prospector::world::HOME_BASE;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn sim_app(config: GameConfig) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_state(GameState::Playing);
    app.init_resource::<ButtonInput<KeyCode>>();
    app.insert_resource(config);
    app.add_plugins(SimulationPlugin);
    app
}

fn seeded() -> GameConfig {
    GameConfig {
        rng_seed: Some(11),
        ..GameConfig::default()
    }
}

fn press(app: &mut App, key: KeyCode) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(key);
}

fn release(app: &mut App, key: KeyCode) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .release(key);
}

/// Press `key` for exactly one tick.
fn tap(app: &mut App, key: KeyCode) {
    press(app, key);
    app.update();
    release(app, key);
    app.update();
}

fn flight(app: &App) -> &FlightState {
    app.world().resource::<FlightState>()
}

fn economy(app: &App) -> &RocketEconomy {
    app.world().resource::<RocketEconomy>()
}

// ── Startup ───────────────────────────────────────────────────────────────────

#[test]
fn startup_builds_world_and_docks_at_home_base() {
    let mut app = sim_app(seeded());
    app.update();

    assert_eq!(app.world().resource::<BodyRegistry>().len(), 11);
    assert_eq!(flight(&app).status, PlayerStatus::Docked);
    assert_eq!(flight(&app).velocity, DVec3::ZERO);
    assert_eq!(economy(&app).delta_v, 676.0);

    let telemetry = app.world().resource::<FlightTelemetry>();
    assert_eq!(telemetry.nearest_body, HOME_BASE);
    assert_eq!(telemetry.resources, "water, oxygen, iron, aluminum");
    assert_eq!(telemetry.status, PlayerStatus::Docked);
}

// ── Flight ────────────────────────────────────────────────────────────────────

#[test]
fn launch_then_thrust_burns_delta_v() {
    let mut app = sim_app(seeded());
    app.update();
    tap(&mut app, KeyCode::KeyL);
    assert_eq!(flight(&app).status, PlayerStatus::Flying);
    let start = flight(&app).position;

    press(&mut app, KeyCode::KeyW);
    for _ in 0..10 {
        app.update();
    }
    release(&mut app, KeyCode::KeyW);

    let expected = 676.0 - 10.0 * 0.196 * 10.0;
    assert!((economy(&app).delta_v - expected).abs() < 1e-9);
    // Default heading is −Z, away from the base.
    assert!(flight(&app).position.z < start.z);
    assert_eq!(flight(&app).status, PlayerStatus::Flying);
}

#[test]
fn thrust_without_delta_v_does_nothing() {
    let mut app = sim_app(seeded());
    app.update();
    tap(&mut app, KeyCode::KeyL);
    app.world_mut().resource_mut::<RocketEconomy>().delta_v = 0.0;
    let before = flight(&app).velocity;

    press(&mut app, KeyCode::KeyR);
    app.update();

    // Only gravity may have changed the velocity; it is far smaller than one
    // thrust increment.
    let change = (flight(&app).velocity - before).length();
    assert!(change < 0.001, "velocity changed by {change}");
    assert_eq!(economy(&app).delta_v, 0.0);
}

#[test]
fn boost_release_restores_velocity() {
    let mut app = sim_app(GameConfig {
        frame_rate_mode: FrameRateMode::Fixed,
        gravity_const: 1e-30,
        ..seeded()
    });
    app.update();
    tap(&mut app, KeyCode::KeyL);
    app.world_mut().resource_mut::<FlightState>().velocity = DVec3::new(0.0, 0.0, -1.0);

    press(&mut app, KeyCode::Space);
    app.update();
    assert!(flight(&app).is_boosting);
    let boosted = flight(&app).velocity;
    assert!((boosted.z + 100.0).abs() < 1e-6, "boosted = {boosted:?}");

    release(&mut app, KeyCode::Space);
    app.update();
    assert!(!flight(&app).is_boosting);
    let restored = flight(&app).velocity;
    assert!((restored.z + 1.0).abs() < 1e-6, "restored = {restored:?}");
    // Boost never draws delta-V.
    assert_eq!(economy(&app).delta_v, 676.0);
}

/// Launched rocket with negligible gravity, moving at (0, 0, −1).
fn drifting_app() -> App {
    let mut app = sim_app(GameConfig {
        frame_rate_mode: FrameRateMode::Fixed,
        gravity_const: 1e-30,
        ..seeded()
    });
    app.update();
    tap(&mut app, KeyCode::KeyL);
    app.world_mut().resource_mut::<FlightState>().velocity = DVec3::new(0.0, 0.0, -1.0);
    app
}

#[test]
fn thrust_held_with_boost_uses_boost_rate() {
    let mut app = drifting_app();

    press(&mut app, KeyCode::Space);
    app.update();
    assert!(flight(&app).is_boosting);

    press(&mut app, KeyCode::KeyW);
    app.update();
    assert!(flight(&app).is_boosting);
    let velocity = flight(&app).velocity;
    // ×100 on activation, then one boosted forward step of 200.
    assert!((velocity.z + 300.0).abs() < 1e-6, "velocity = {velocity:?}");
    // 200 × 10 exceeds the chemical tank.
    assert_eq!(economy(&app).delta_v, 0.0);

    release(&mut app, KeyCode::Space);
    release(&mut app, KeyCode::KeyW);
    app.update();
    assert!(!flight(&app).is_boosting);
    assert!((flight(&app).velocity.z + 1.0).abs() < 1e-6);
}

#[test]
fn boost_works_on_an_empty_tank_but_thrust_does_not() {
    let mut app = drifting_app();
    app.world_mut().resource_mut::<RocketEconomy>().delta_v = 0.0;

    press(&mut app, KeyCode::Space);
    app.update();
    assert!(flight(&app).is_boosting);
    let boosted = flight(&app).velocity;
    assert!((boosted.z + 100.0).abs() < 1e-6, "boosted = {boosted:?}");

    press(&mut app, KeyCode::KeyW);
    app.update();
    assert!(flight(&app).is_boosting);
    assert!((flight(&app).velocity - boosted).length() < 1e-6);
    assert_eq!(economy(&app).delta_v, 0.0);
}

#[test]
fn flying_into_a_planet_is_fatal() {
    let mut app = sim_app(seeded());
    app.update();
    let earth = {
        let registry = app.world().resource::<BodyRegistry>();
        let id = registry.find("earth").expect("earth exists");
        registry.get(id).map(|b| b.position).expect("earth body")
    };
    {
        let mut state = app.world_mut().resource_mut::<FlightState>();
        state.status = PlayerStatus::Flying;
        // At the exact centre gravity vanishes, so the rocket cannot be
        // flung back out before the collision check.
        state.position = earth;
    }
    app.update();

    let state = flight(&app);
    assert_eq!(state.status, PlayerStatus::Dead);
    assert_eq!(state.position, state.spawn_point);
    assert_eq!(state.velocity, DVec3::ZERO);

    tap(&mut app, KeyCode::KeyL);
    assert_eq!(flight(&app).status, PlayerStatus::Flying);
}

// ── Mining and trade ──────────────────────────────────────────────────────────

#[test]
fn mining_while_docked_fills_the_batch() {
    let mut app = sim_app(seeded());
    app.update();

    press(&mut app, KeyCode::KeyE);
    for _ in 0..5 {
        app.update();
    }
    assert!(app.world().resource::<MiningLaser>().active);
    let mined = app.world().resource::<OreBatch>().mass_kg;
    assert!(mined > 0.0 && mined <= 500.0);

    release(&mut app, KeyCode::KeyE);
    app.update();
    assert!(!app.world().resource::<MiningLaser>().active);
    assert!(!app.world().resource::<FlightTelemetry>().laser_active);
}

#[test]
fn button_sell_beats_held_thrust_key() {
    let mut app = sim_app(seeded());
    app.update();
    tap(&mut app, KeyCode::KeyL);
    app.insert_resource(OreBatch {
        mass_kg: 40.0,
        value: 1234.0,
    });
    let velocity = flight(&app).velocity;
    let delta_v = economy(&app).delta_v;

    press(&mut app, KeyCode::KeyW);
    app.insert_resource(OnScreenInput(InputToken::Sell));
    app.update();

    assert_eq!(economy(&app).currency, 1234.0);
    assert_eq!(*app.world().resource::<OreBatch>(), OreBatch::default());
    assert_eq!(economy(&app).delta_v, delta_v);
    assert!((flight(&app).velocity - velocity).length() < 0.001);
}

#[test]
fn upgrade_key_advances_one_tier() {
    let mut app = sim_app(seeded());
    app.update();
    app.world_mut().resource_mut::<RocketEconomy>().currency = 20_000_000.0;

    tap(&mut app, KeyCode::KeyU);
    assert_eq!(economy(&app).tier, TechTier::Nuclear);
    assert_eq!(economy(&app).delta_v, 1_352.0);
    assert_eq!(economy(&app).currency, 19_900_000.0);

    tap(&mut app, KeyCode::KeyU);
    assert_eq!(economy(&app).tier, TechTier::Fusion);
    assert_eq!(app.world().resource::<FlightTelemetry>().tier, TechTier::Fusion);
}

#[test]
fn fixed_frame_rate_mode_pins_gravity_divisor() {
    let mut app = sim_app(GameConfig {
        frame_rate_mode: FrameRateMode::Fixed,
        fixed_frame_rate: 60.0,
        ..seeded()
    });
    for _ in 0..3 {
        app.update();
    }
    let field = app.world().resource::<GravityField>();
    assert_eq!(field.estimated_frame_rate(), 60.0);
    assert!(field.nearest.is_some());
}
