//! Headless tests for the [`GameState`] state machine and its gating of the
//! flight simulation.
//!
//! These tests use [`MinimalPlugins`]: no window, no rendering.
//!
//! Covered scenarios:
//! 1. Default initial state is `MainMenu`.
//! 2. A `NextState` request transitions from `MainMenu` → `Playing`.
//! 3. `Playing` persists across frames with no new transition request.
//! 4. `insert_state` can force-start directly in `Playing` (skip-menu path).
//! 5. The simulation tick does not run on the title screen.

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use prospector::economy::RocketEconomy;
use prospector::menu::GameState;
use prospector::player::FlightState;
use prospector::simulation::SimulationPlugin;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Minimal headless app with just the state registered via `init_state`.
fn app_with_default_state() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.init_state::<GameState>();
    app
}

fn current(app: &App) -> GameState {
    app.world().resource::<State<GameState>>().get().clone()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn default_state_is_main_menu() {
    let mut app = app_with_default_state();
    app.update();
    assert_eq!(current(&app), GameState::MainMenu);
}

#[test]
fn transition_main_menu_to_playing() {
    let mut app = app_with_default_state();
    app.update();

    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::Playing);
    app.update();

    assert_eq!(current(&app), GameState::Playing);
}

#[test]
fn playing_state_persists_across_frames() {
    let mut app = app_with_default_state();
    app.update();
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::Playing);
    app.update();

    for _ in 0..5 {
        app.update();
    }
    assert_eq!(current(&app), GameState::Playing);
}

#[test]
fn insert_state_starts_in_playing() {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_state(GameState::Playing);
    app.update();
    assert_eq!(current(&app), GameState::Playing);
}

/// Holding thrust on the title screen must not burn fuel or move the rocket.
#[test]
fn simulation_is_paused_on_title_screen() {
    let mut app = app_with_default_state();
    app.init_resource::<ButtonInput<KeyCode>>();
    app.add_plugins(SimulationPlugin);
    app.update();

    let start = app.world().resource::<FlightState>().position;
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::KeyW);
    for _ in 0..10 {
        app.update();
    }

    assert_eq!(current(&app), GameState::MainMenu);
    assert_eq!(app.world().resource::<FlightState>().position, start);
    assert_eq!(app.world().resource::<RocketEconomy>().delta_v, 676.0);
}
