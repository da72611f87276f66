use bevy::prelude::*;
use bevy::window::WindowResolution;
use prospector::buttons::ControlButtonsPlugin;
use prospector::config::GameConfig;
use prospector::graphics::ScenePlugin;
use prospector::hud::HudPlugin;
use prospector::menu::{GameState, MainMenuPlugin};
use prospector::player::RocketRenderPlugin;
use prospector::simulation::SimulationPlugin;
use std::env;

fn main() {
    // PROSPECTOR_SKIP_MENU starts straight in flight.
    let skip_menu = env::var("PROSPECTOR_SKIP_MENU").is_ok();

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Prospector".into(),
            resolution: WindowResolution::new(1280, 720),
            ..Default::default()
        }),
        ..Default::default()
    }))
    .insert_resource(ClearColor(Color::BLACK))
    // Compiled defaults; load_game_config overwrites them from
    // assets/game.toml (if present) in PreStartup.
    .insert_resource(GameConfig::default())
    .add_plugins(MainMenuPlugin)
    .add_plugins((
        SimulationPlugin,
        ScenePlugin,
        RocketRenderPlugin,
        HudPlugin,
        ControlButtonsPlugin,
    ));

    if skip_menu {
        app.insert_state(GameState::Playing);
    }

    app.run();
}
